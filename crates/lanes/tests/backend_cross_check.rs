//! Hardware backends checked lane-for-lane against the scalar backend.
//!
//! The scalar backend is the reference. Every element-wise operation must
//! agree bit for bit; NaN lanes only need to agree on being NaN, since
//! payload propagation is an ISA detail. Reductions are excluded because
//! their tree shape depends on the lane width.

use lanes::{BoolLane, FloatLane, IntLane, scalar};
use proptest::prelude::*;

/// Run `f` over `input` one lane of `L` at a time.
fn map_lanes<L: FloatLane>(input: &[L::Scalar], f: impl Fn(L) -> L) -> Vec<L::Scalar> {
  let mut out = vec![L::Scalar::default(); input.len()];
  for (src, dst) in input.chunks_exact(L::WIDTH).zip(out.chunks_exact_mut(L::WIDTH)) {
    f(L::from_slice(src)).write_to_slice(dst);
  }
  out
}

fn zip_lanes<L: FloatLane>(a: &[L::Scalar], b: &[L::Scalar], f: impl Fn(L, L) -> L) -> Vec<L::Scalar> {
  let mut out = vec![L::Scalar::default(); a.len()];
  for ((x, y), dst) in a.chunks_exact(L::WIDTH).zip(b.chunks_exact(L::WIDTH)).zip(out.chunks_exact_mut(L::WIDTH)) {
    f(L::from_slice(x), L::from_slice(y)).write_to_slice(dst);
  }
  out
}

fn mask_bits<L: FloatLane>(a: &[L::Scalar], b: &[L::Scalar], f: impl Fn(L, L) -> L::Mask) -> Vec<bool> {
  a.chunks_exact(L::WIDTH)
    .zip(b.chunks_exact(L::WIDTH))
    .flat_map(|(x, y)| f(L::from_slice(x), L::from_slice(y)).to_array().as_ref().to_vec())
    .collect()
}

macro_rules! cross_check {
  ($module:ident, $lane:ty, $reference:ty, $elem:ident, $bits:ident, $int:ident, rint_bound: $bound:expr) => {
    mod $module {
      use super::*;

      type Hw = $lane;
      type Ref = $reference;

      /// Eight elements: a whole number of lanes for every width.
      const N: usize = 8;

      fn same(a: &[$elem], b: &[$elem]) -> bool {
        a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits() || (x.is_nan() && y.is_nan()))
      }

      fn values() -> impl Strategy<Value = $elem> {
        prop_oneof![
          4 => -1.0e4 as $elem..1.0e4 as $elem,
          1 => any::<$bits>().prop_map($elem::from_bits),
          1 => Just(0.0 as $elem),
          1 => Just(-0.0 as $elem),
        ]
      }

      /// Whole finite range with the quadrant count past `2^51` well covered,
      /// plus signed zeros, subnormals and non-finite lanes.
      fn sine_values() -> impl Strategy<Value = $elem> {
        prop_oneof![
          4 => -1.0e4 as $elem..1.0e4 as $elem,
          3 => (1.0e15 as $elem..1.0e30 as $elem, any::<bool>()).prop_map(|(x, neg)| if neg { -x } else { x }),
          2 => any::<$bits>().prop_map($elem::from_bits),
          1 => prop::sample::select(vec![
            0.0 as $elem,
            -0.0,
            $elem::from_bits(1),
            -$elem::MIN_POSITIVE / 2.0,
            $elem::MAX,
            $elem::MIN,
            $elem::INFINITY,
            $elem::NEG_INFINITY,
            $elem::NAN,
          ]),
        ]
      }

      #[test]
      fn sine_agrees_at_large_magnitudes() {
        let (lo, hi) = (7.1e15 as $elem, 2.71e16 as $elem);
        let a: Vec<$elem> = (0..2000).map(|i| lo + (hi - lo) * (i as $elem / 1999.0)).collect();
        let a = &a[..a.len() - a.len() % N];
        assert!(same(&map_lanes::<Hw>(a, Hw::sin), &map_lanes::<Ref>(a, Ref::sin)));
      }

      proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        #[test]
        fn arithmetic_matches_reference(
          a in prop::collection::vec(values(), N),
          b in prop::collection::vec(values(), N),
        ) {
          prop_assert!(same(&zip_lanes::<Hw>(&a, &b, |x, y| x + y), &zip_lanes::<Ref>(&a, &b, |x, y| x + y)));
          prop_assert!(same(&zip_lanes::<Hw>(&a, &b, |x, y| x - y), &zip_lanes::<Ref>(&a, &b, |x, y| x - y)));
          prop_assert!(same(&zip_lanes::<Hw>(&a, &b, |x, y| x * y), &zip_lanes::<Ref>(&a, &b, |x, y| x * y)));
          prop_assert!(same(&zip_lanes::<Hw>(&a, &b, |x, y| x / y), &zip_lanes::<Ref>(&a, &b, |x, y| x / y)));
          prop_assert!(same(&zip_lanes::<Hw>(&a, &b, Hw::min), &zip_lanes::<Ref>(&a, &b, Ref::min)));
          prop_assert!(same(&zip_lanes::<Hw>(&a, &b, Hw::max), &zip_lanes::<Ref>(&a, &b, Ref::max)));
        }

        #[test]
        fn unary_ops_match_reference(a in prop::collection::vec(values(), N)) {
          prop_assert!(same(&map_lanes::<Hw>(&a, |x| -x), &map_lanes::<Ref>(&a, |x| -x)));
          prop_assert!(same(&map_lanes::<Hw>(&a, Hw::abs), &map_lanes::<Ref>(&a, Ref::abs)));
          prop_assert!(same(&map_lanes::<Hw>(&a, Hw::sqrt), &map_lanes::<Ref>(&a, Ref::sqrt)));
          prop_assert!(same(&map_lanes::<Hw>(&a, Hw::rcp), &map_lanes::<Ref>(&a, Ref::rcp)));
          prop_assert!(same(&map_lanes::<Hw>(&a, Hw::rcp_sqrt), &map_lanes::<Ref>(&a, Ref::rcp_sqrt)));
          prop_assert!(same(
            &map_lanes::<Hw>(&a, Hw::round_to_nearest),
            &map_lanes::<Ref>(&a, Ref::round_to_nearest),
          ));
        }

        #[test]
        fn sine_matches_reference(a in prop::collection::vec(sine_values(), N)) {
          prop_assert!(same(&map_lanes::<Hw>(&a, Hw::sin), &map_lanes::<Ref>(&a, Ref::sin)));
        }

        #[test]
        fn comparisons_match_reference(
          a in prop::collection::vec(values(), N),
          b in prop::collection::vec(values(), N),
        ) {
          prop_assert_eq!(mask_bits::<Hw>(&a, &b, Hw::lanes_eq), mask_bits::<Ref>(&a, &b, Ref::lanes_eq));
          prop_assert_eq!(mask_bits::<Hw>(&a, &b, Hw::lanes_ne), mask_bits::<Ref>(&a, &b, Ref::lanes_ne));
          prop_assert_eq!(mask_bits::<Hw>(&a, &b, Hw::lanes_lt), mask_bits::<Ref>(&a, &b, Ref::lanes_lt));
          prop_assert_eq!(mask_bits::<Hw>(&a, &b, Hw::lanes_le), mask_bits::<Ref>(&a, &b, Ref::lanes_le));
          prop_assert_eq!(mask_bits::<Hw>(&a, &b, Hw::lanes_gt), mask_bits::<Ref>(&a, &b, Ref::lanes_gt));
          prop_assert_eq!(mask_bits::<Hw>(&a, &b, Hw::lanes_ge), mask_bits::<Ref>(&a, &b, Ref::lanes_ge));
        }

        #[test]
        fn integer_conversions_match_reference(a in prop::collection::vec(-$bound..$bound, N)) {
          let hw: Vec<$int> = a.chunks_exact(Hw::WIDTH).flat_map(|c| Hw::from_slice(c).rint().to_array()).collect();
          let reference: Vec<$int> =
            a.chunks_exact(Ref::WIDTH).flat_map(|c| Ref::from_slice(c).rint().to_array()).collect();
          prop_assert_eq!(&hw, &reference);

          let back_hw: Vec<$elem> = hw
            .chunks_exact(Hw::WIDTH)
            .flat_map(|c| Hw::from_int(<Hw as FloatLane>::Int::from_fn(|i| c[i])).to_array())
            .collect();
          let back_ref: Vec<$elem> = reference
            .chunks_exact(Ref::WIDTH)
            .flat_map(|c| Ref::from_int(<Ref as FloatLane>::Int::from_fn(|i| c[i])).to_array())
            .collect();
          prop_assert!(same(&back_hw, &back_ref));
        }
      }
    }
  };
}

#[cfg(target_arch = "x86_64")]
cross_check!(sse_f32, lanes::x86_64::sse::F32x4, scalar::F32x4, f32, u32, i32, rint_bound: 2.0e9f32);
#[cfg(target_arch = "x86_64")]
cross_check!(sse_f64, lanes::x86_64::sse::F64x2, scalar::F64x2, f64, u64, i64, rint_bound: 2.0e15f64);

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
cross_check!(avx_f32, lanes::x86_64::avx::F32x8, scalar::F32x4, f32, u32, i32, rint_bound: 2.0e9f32);
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
cross_check!(avx_f64, lanes::x86_64::avx::F64x4, scalar::F64x2, f64, u64, i64, rint_bound: 2.0e15f64);

cross_check!(dispatched_f32, lanes::dispatch::F32Lane, scalar::F32x4, f32, u32, i32, rint_bound: 2.0e9f32);
cross_check!(dispatched_f64, lanes::dispatch::F64Lane, scalar::F64x2, f64, u64, i64, rint_bound: 2.0e15f64);
