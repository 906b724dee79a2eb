use core::arch::x86_64::*;

use super::int::{all_ones, cmpeq_epi64};
use crate::traits::BoolLane;

macro_rules! sse_mask {
  (
    $(#[$meta:meta])*
    $name:ident($reg:ty, $w:literal) {
      from_int: $from_int:ident,
      zero: $zero:ident,
      and: $and:ident,
      or: $or:ident,
      xor: $xor:ident,
      movemask: $movemask:ident,
      bits_to_lanes: |$bits:ident| $load:expr $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(Clone, Copy)]
    #[repr(transparent)]
    pub struct $name(pub(crate) $reg);

    impl core::ops::Not for $name {
      type Output = Self;

      #[inline]
      fn not(self) -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        Self(unsafe { $xor(self.0, $from_int(all_ones())) })
      }
    }

    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    impl_binary_op!($name, BitAnd::bitand, BitAndAssign::bitand_assign, |a, b| Self(unsafe { $and(a.0, b.0) }));
    impl_binary_op!($name, BitOr::bitor, BitOrAssign::bitor_assign, |a, b| Self(unsafe { $or(a.0, b.0) }));
    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    impl_binary_op!($name, BitXor::bitxor, BitXorAssign::bitxor_assign, |a, b| Self(unsafe { $xor(a.0, b.0) }));

    impl BoolLane for $name {
      type Array = [bool; $w];

      const WIDTH: usize = $w;

      #[inline]
      fn splat(value: bool) -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        if value { Self(unsafe { $from_int(all_ones()) }) } else { Self(unsafe { $zero() }) }
      }

      #[inline]
      fn from_array(values: [bool; $w]) -> Self {
        let bits = values.iter().enumerate().fold(0u32, |acc, (i, &v)| acc | (u32::from(v) << i));
        Self::load_binary_mask(bits)
      }

      #[inline]
      fn to_array(self) -> [bool; $w] {
        let bits = self.store_mask();
        core::array::from_fn(|i| (bits >> i) & 1 != 0)
      }

      #[inline]
      fn store_mask(self) -> u32 {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        unsafe { $movemask(self.0) as u32 }
      }

      #[inline]
      fn load_binary_mask(bits: u32) -> Self {
        let $bits = bits;
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        Self(unsafe { $from_int($load) })
      }
    }

    impl_lane_debug!($name: BoolLane);
  };
}

sse_mask!(
  /// Four 32-bit boolean lanes in an `__m128`.
  M32x4(__m128, 4) {
    from_int: _mm_castsi128_ps,
    zero: _mm_setzero_ps,
    and: _mm_and_ps,
    or: _mm_or_ps,
    xor: _mm_xor_ps,
    movemask: _mm_movemask_ps,
    // Lane i keeps bit i of the broadcast word, then compares against that bit.
    bits_to_lanes: |bits| {
      let select = _mm_setr_epi32(1, 2, 4, 8);
      let picked = _mm_and_si128(_mm_set1_epi32(bits as i32), select);
      _mm_cmpeq_epi32(picked, select)
    },
  }
);

sse_mask!(
  /// Two 64-bit boolean lanes in an `__m128d`.
  M64x2(__m128d, 2) {
    from_int: _mm_castsi128_pd,
    zero: _mm_setzero_pd,
    and: _mm_and_pd,
    or: _mm_or_pd,
    xor: _mm_xor_pd,
    movemask: _mm_movemask_pd,
    bits_to_lanes: |bits| {
      let select = _mm_set_epi64x(2, 1);
      let picked = _mm_and_si128(_mm_set1_epi64x(i64::from(bits)), select);
      cmpeq_epi64(picked, select)
    },
  }
);
