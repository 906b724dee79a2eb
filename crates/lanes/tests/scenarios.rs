//! Worked examples with exact expected values.
//!
//! The 4-wide examples run on every 4-wide lane type the build compiles:
//! scalar and SSE2 `F32x4`, plus AVX `F64x4` when AVX is enabled.

use lanes::{BoolLane, Element, FloatLane};

// ─────────────────────────────────────────────────────────────────────────────
// Shared checks
// ─────────────────────────────────────────────────────────────────────────────

fn sum_of_one_to_four<L: FloatLane>() {
  let v = L::from_fn(|i| L::Scalar::from_f64((i + 1) as f64));
  assert_eq!(v.sum().to_f64(), 10.0);
}

fn less_than_mask<L: FloatLane>() {
  let a = L::from_fn(|i| L::Scalar::from_f64((i + 1) as f64));
  let b = L::splat(L::Scalar::TWO);
  let m = a.lanes_lt(b);
  assert_eq!(m.to_array().as_ref(), &[true, false, false, false]);
  assert_eq!(m.store_mask(), 0b0001);
}

fn select_picks_from_mask<L: FloatLane>() {
  let mask = L::Mask::from_fn(|i| i % 2 == 0);
  let a = L::from_fn(|i| L::Scalar::from_f64(10.0 * (i + 1) as f64));
  let b = L::from_fn(|i| L::Scalar::from_f64((i + 1) as f64));
  let got: Vec<f64> = L::select(mask, a, b).to_array().as_ref().iter().map(|x| x.to_f64()).collect();
  assert_eq!(got, [10.0, 2.0, 30.0, 4.0]);
}

fn sine_at_quarter_turns<L: FloatLane>(tolerance: f64) {
  let pi = core::f64::consts::PI;
  let x = L::from_fn(|i| L::Scalar::from_f64(i as f64 * pi / 2.0));
  let got = x.sin().to_array();
  for (lane, expected) in got.as_ref().iter().zip([0.0, 1.0, 0.0, -1.0]) {
    assert!((lane.to_f64() - expected).abs() <= tolerance, "sin lane {lane} expected {expected}");
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scalar backend
// ─────────────────────────────────────────────────────────────────────────────

mod scalar {
  use lanes::scalar::F32x4;

  #[test]
  fn sum_of_one_to_four() {
    super::sum_of_one_to_four::<F32x4>();
  }

  #[test]
  fn less_than_mask() {
    super::less_than_mask::<F32x4>();
  }

  #[test]
  fn select_picks_from_mask() {
    super::select_picks_from_mask::<F32x4>();
  }

  #[test]
  fn sine_at_quarter_turns() {
    super::sine_at_quarter_turns::<F32x4>(1e-6);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// SSE2 backend
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "x86_64")]
mod sse {
  use lanes::x86_64::sse::F32x4;

  #[test]
  fn sum_of_one_to_four() {
    super::sum_of_one_to_four::<F32x4>();
  }

  #[test]
  fn less_than_mask() {
    super::less_than_mask::<F32x4>();
  }

  #[test]
  fn select_picks_from_mask() {
    super::select_picks_from_mask::<F32x4>();
  }

  #[test]
  fn sine_at_quarter_turns() {
    super::sine_at_quarter_turns::<F32x4>(1e-6);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// AVX backend (4-wide f64)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
mod avx {
  use lanes::x86_64::avx::F64x4;

  #[test]
  fn sum_of_one_to_four() {
    super::sum_of_one_to_four::<F64x4>();
  }

  #[test]
  fn less_than_mask() {
    super::less_than_mask::<F64x4>();
  }

  #[test]
  fn select_picks_from_mask() {
    super::select_picks_from_mask::<F64x4>();
  }

  #[test]
  fn sine_at_quarter_turns() {
    super::sine_at_quarter_turns::<F64x4>(1e-15);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatched lanes
// ─────────────────────────────────────────────────────────────────────────────

mod dispatched {
  use lanes::{
    BoolLane, FloatLane,
    dispatch::{F32Lane, F64Lane, M32Lane},
  };

  #[test]
  fn sum_counts_every_lane() {
    let v = F32Lane::from_fn(|i| (i + 1) as f32);
    let n = F32Lane::WIDTH as f32;
    assert_eq!(v.sum(), n * (n + 1.0) / 2.0);
  }

  #[test]
  fn low_lane_is_least_significant_bit() {
    let m = M32Lane::from_fn(|i| i == 0);
    assert_eq!(m.store_mask(), 1);
    assert!(m.any() && !m.all());
  }

  #[test]
  fn sine_tracks_std_on_reduced_range() {
    let step = core::f64::consts::PI / 7.0;
    let x = F64Lane::from_fn(|i| -3.0 + i as f64 * step);
    for (i, got) in x.sin().to_array().iter().enumerate() {
      let arg = -3.0 + i as f64 * step;
      assert!((got - arg.sin()).abs() <= 2.0 * f64::EPSILON, "sin({arg}) = {got}");
    }
  }

  #[test]
  fn sine_of_special_values() {
    let x = F64Lane::splat(f64::NAN).sin();
    assert!(x.lanes_ne(x).all());
    let x = F64Lane::splat(f64::INFINITY).sin();
    assert!(x.lanes_ne(x).all());
  }
}
