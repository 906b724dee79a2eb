//! Property tests for the lane contract, run against every compiled backend.
//!
//! Each backend gets its own module per element width, so a failure names
//! the backend it came from (`scalar_f32::select_matches_bitwise_blend`).
#![allow(unsafe_code)]

use lanes::{Aligned, BoolLane, FloatLane, IntLane, LaneTraits};
use proptest::prelude::*;

macro_rules! lane_properties {
  ($module:ident, $backend:ty, $elem:ident, $bits:ident, sum_tolerance: $tol:expr) => {
    mod $module {
      use super::*;

      type L = <$backend as LaneTraits<$elem>>::Lane;
      type M = <$backend as LaneTraits<$elem>>::Mask;
      type I = <$backend as LaneTraits<$elem>>::Int;
      const W: usize = <$backend as LaneTraits<$elem>>::WIDTH;

      fn lane_from(values: &[$elem]) -> L {
        L::from_slice(values)
      }

      fn bits_of(lane: L) -> Vec<$bits> {
        lane.to_array().iter().map(|x| x.to_bits()).collect()
      }

      fn finite() -> impl Strategy<Value = $elem> {
        -1.0e3 as $elem..1.0e3 as $elem
      }

      proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn aligned_round_trip_is_bit_exact(raw in prop::collection::vec(any::<$bits>(), W)) {
          let mut src = Aligned::new([0 as $elem; 8]);
          for (d, &b) in src.iter_mut().zip(&raw) {
            *d = $elem::from_bits(b);
          }
          let mut dst = Aligned::new([0 as $elem; 8]);
          // SAFETY: both buffers hold at least W elements and are 32-byte aligned.
          unsafe {
            let v = L::load_aligned(src.as_ptr());
            v.store_aligned(dst.as_mut_ptr());
          }
          let got: Vec<$bits> = dst[..W].iter().map(|x| x.to_bits()).collect();
          prop_assert_eq!(got, raw);
        }

        #[test]
        fn unaligned_round_trip_is_bit_exact(
          raw in prop::collection::vec(any::<$bits>(), W),
          offset in 0usize..4,
        ) {
          let mut src = vec![0 as $elem; W + 4];
          for (d, &b) in src[offset..].iter_mut().zip(&raw) {
            *d = $elem::from_bits(b);
          }
          let mut dst = vec![0 as $elem; W + 4];
          // SAFETY: `offset + W <= W + 4` elements are in bounds for both vectors.
          unsafe {
            let v = L::load_unaligned(src.as_ptr().add(offset));
            v.store_unaligned(dst.as_mut_ptr().add(offset));
          }
          let got: Vec<$bits> = dst[offset..offset + W].iter().map(|x| x.to_bits()).collect();
          prop_assert_eq!(got, raw);
        }

        #[test]
        fn binary_mask_round_trips(bits in any::<u32>()) {
          let canonical = bits & M::FULL;
          let m = M::load_binary_mask(bits);
          prop_assert_eq!(m.store_mask(), canonical);
          prop_assert_eq!(M::load_binary_mask(m.store_mask()).store_mask(), canonical);
          prop_assert_eq!(M::from_array(m.to_array()).store_mask(), canonical);
          for i in 0..W {
            prop_assert_eq!(m.test(i), (bits >> i) & 1 != 0);
          }
        }

        #[test]
        fn mask_logic_obeys_de_morgan(a in any::<u32>(), b in any::<u32>()) {
          let (ma, mb) = (M::load_binary_mask(a), M::load_binary_mask(b));
          prop_assert_eq!((!(ma & mb)).store_mask(), (!ma | !mb).store_mask());
          prop_assert_eq!((!(ma | mb)).store_mask(), (!ma & !mb).store_mask());
          prop_assert_eq!(ma.lanes_eq(mb).store_mask(), !(a ^ b) & M::FULL);
          prop_assert_eq!(ma.lanes_ne(mb).store_mask(), (a ^ b) & M::FULL);
          prop_assert_eq!(ma.any(), a & M::FULL != 0);
          prop_assert_eq!(ma.all(), a & M::FULL == M::FULL);
        }

        #[test]
        fn select_matches_bitwise_blend(
          a in prop::collection::vec(any::<$bits>(), W),
          b in prop::collection::vec(any::<$bits>(), W),
          mask in any::<u32>(),
        ) {
          let la = L::from_fn(|i| $elem::from_bits(a[i]));
          let lb = L::from_fn(|i| $elem::from_bits(b[i]));
          let m = M::load_binary_mask(mask);
          let got = bits_of(L::select(m, la, lb));
          let lane_masks: Vec<$bits> = (0..W).map(|i| if (mask >> i) & 1 != 0 { !0 } else { 0 }).collect();
          let expected: Vec<$bits> = (0..W).map(|i| (a[i] & lane_masks[i]) | (b[i] & !lane_masks[i])).collect();
          prop_assert_eq!(got, expected);
        }

        #[test]
        fn nan_lanes_compare_unequal_to_themselves(
          values in prop::collection::vec(finite(), W),
          nan_bits in any::<u32>(),
        ) {
          let x = L::from_fn(|i| if (nan_bits >> i) & 1 != 0 { $elem::NAN } else { values[i] });
          let nan = nan_bits & M::FULL;
          prop_assert_eq!(x.lanes_ne(x).store_mask(), nan);
          prop_assert_eq!(x.lanes_eq(x).store_mask(), !nan & M::FULL);
          prop_assert_eq!(x.lanes_lt(x).store_mask(), 0);
          prop_assert_eq!(x.lanes_le(x).store_mask(), !nan & M::FULL);
          prop_assert_eq!(x.lanes_ge(x).store_mask(), !nan & M::FULL);
        }

        #[test]
        fn sum_is_linear(
          a in prop::collection::vec(finite(), W),
          b in prop::collection::vec(finite(), W),
        ) {
          let (la, lb) = (lane_from(&a), lane_from(&b));
          let lhs = (la + lb).sum();
          let rhs = la.sum() + lb.sum();
          let scale: $elem = a.iter().chain(&b).map(|x| x.abs()).sum();
          prop_assert!((lhs - rhs).abs() <= $tol * scale.max(1.0), "{lhs} vs {rhs}");
        }

        #[test]
        fn comparisons_agree_with_scalar_operators(
          a in prop::collection::vec(finite(), W),
          b in prop::collection::vec(finite(), W),
        ) {
          let (la, lb) = (lane_from(&a), lane_from(&b));
          let pack = |f: &dyn Fn($elem, $elem) -> bool| {
            (0..W).fold(0u32, |acc, i| acc | (u32::from(f(a[i], b[i])) << i))
          };
          prop_assert_eq!(la.lanes_lt(lb).store_mask(), pack(&|x, y| x < y));
          prop_assert_eq!(la.lanes_le(lb).store_mask(), pack(&|x, y| x <= y));
          prop_assert_eq!(la.lanes_gt(lb).store_mask(), pack(&|x, y| x > y));
          prop_assert_eq!(la.lanes_ge(lb).store_mask(), pack(&|x, y| x >= y));
          prop_assert_eq!(la.lanes_eq(la).store_mask(), M::FULL);
        }

        #[test]
        fn rint_and_round_to_nearest_agree(values in prop::collection::vec(-1.0e6 as $elem..1.0e6 as $elem, W)) {
          let x = lane_from(&values);
          let ints = x.rint().to_array();
          let rounded = x.round_to_nearest().to_array();
          for i in 0..W {
            let expected = values[i].round_ties_even();
            prop_assert_eq!(rounded[i], expected);
            prop_assert_eq!(ints[i] as $elem, expected);
          }
          prop_assert_eq!(L::from_int(x.rint()).to_array(), rounded);
        }

        #[test]
        fn reinterpret_as_mask_tests_raw_bits(raw in prop::collection::vec(any::<$bits>(), W)) {
          let x = L::from_fn(|i| $elem::from_bits(raw[i]));
          let expected = (0..W).fold(0u32, |acc, i| acc | (u32::from(raw[i] != 0) << i));
          prop_assert_eq!(x.reinterpret_as_mask().store_mask(), expected);
          prop_assert_eq!(I::from_array(x.to_bits().to_array()).is_nonzero().store_mask(), expected);
        }
      }

      proptest! {
        #![proptest_config(ProptestConfig::with_cases(10_000 / W as u32))]

        #[test]
        fn rcp_sqrt_within_two_ulp(values in prop::collection::vec(1.0e-3 as $elem..1.0e6 as $elem, W)) {
          let r = lane_from(&values).rcp_sqrt().to_array();
          for (x, y) in values.iter().zip(r.iter()) {
            let product = f64::from(*y) * f64::from(*x).sqrt();
            prop_assert!((product - 1.0).abs() <= 2.0 * f64::from($elem::EPSILON), "x={x} rcp_sqrt={y}");
          }
        }
      }

      #[test]
      fn arithmetic_propagates_ieee_specials() {
        let zero = L::zero();
        let one = L::splat(1.0);
        let inf = (one / zero).to_array();
        assert!(inf.iter().all(|x| *x == $elem::INFINITY));
        assert!(zero.rcp().lanes_eq(L::splat($elem::INFINITY)).all());
        let nan = L::splat(-1.0).sqrt();
        assert!(nan.lanes_ne(nan).all());
        assert!((zero / zero).lanes_eq(zero / zero).none());
      }

      #[test]
      fn extract_reads_each_lane() {
        let v = L::from_fn(|i| i as $elem);
        for i in 0..W {
          assert_eq!(v.extract(i), i as $elem);
        }
      }

      #[test]
      #[should_panic(expected = "shorter than lane width")]
      fn from_slice_rejects_short_input() {
        let short = vec![0 as $elem; W - 1];
        let _ = L::from_slice(&short);
      }

      #[test]
      fn table_matches_lane_types() {
        assert_eq!(<$backend as LaneTraits<$elem>>::ALIGN, L::ALIGN);
        assert_eq!(<$backend as LaneTraits<$elem>>::ELEMENT_BYTES, core::mem::size_of::<$elem>());
        assert_eq!(M::WIDTH, W);
        assert_eq!(I::WIDTH, W);
      }
    }
  };
}

lane_properties!(scalar_f32, lanes::scalar::Scalar, f32, u32, sum_tolerance: 1e-5);
lane_properties!(scalar_f64, lanes::scalar::Scalar, f64, u64, sum_tolerance: 1e-12);

#[cfg(target_arch = "x86_64")]
lane_properties!(sse_f32, lanes::x86_64::sse::Sse, f32, u32, sum_tolerance: 1e-5);
#[cfg(target_arch = "x86_64")]
lane_properties!(sse_f64, lanes::x86_64::sse::Sse, f64, u64, sum_tolerance: 1e-12);

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
lane_properties!(avx_f32, lanes::x86_64::avx::Avx, f32, u32, sum_tolerance: 1e-5);
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
lane_properties!(avx_f64, lanes::x86_64::avx::Avx, f64, u64, sum_tolerance: 1e-12);
