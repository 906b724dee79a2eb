use core::arch::x86_64::*;

use crate::{traits::BoolLane, x86_64::sse};

macro_rules! avx_mask {
  (
    $(#[$meta:meta])*
    $name:ident($reg:ty, $w:literal) {
      half: $half:ident,
      from_int: $from_int:ident,
      zero: $zero:ident,
      and: $and:ident,
      or: $or:ident,
      xor: $xor:ident,
      movemask: $movemask:ident,
      join: $join:ident,
      lo: $lo:ident,
      hi: $hi:ident $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(Clone, Copy)]
    #[repr(transparent)]
    pub struct $name(pub(crate) $reg);

    impl $name {
      #[inline(always)]
      fn ones() -> $reg {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        unsafe { $from_int(_mm256_set1_epi32(-1)) }
      }

      #[inline]
      pub(crate) fn from_halves(lo: sse::$half, hi: sse::$half) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $join(lo.0, hi.0) })
      }

      #[inline]
      pub(crate) fn halves(self) -> (sse::$half, sse::$half) {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        unsafe { (sse::$half($lo(self.0)), sse::$half($hi::<1>(self.0))) }
      }
    }

    impl core::ops::Not for $name {
      type Output = Self;

      #[inline]
      fn not(self) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $xor(self.0, Self::ones()) })
      }
    }

    // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
    impl_binary_op!($name, BitAnd::bitand, BitAndAssign::bitand_assign, |a, b| Self(unsafe { $and(a.0, b.0) }));
    impl_binary_op!($name, BitOr::bitor, BitOrAssign::bitor_assign, |a, b| Self(unsafe { $or(a.0, b.0) }));
    // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
    impl_binary_op!($name, BitXor::bitxor, BitXorAssign::bitxor_assign, |a, b| Self(unsafe { $xor(a.0, b.0) }));

    impl BoolLane for $name {
      type Array = [bool; $w];

      const WIDTH: usize = $w;

      #[inline]
      fn splat(value: bool) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        if value { Self(Self::ones()) } else { Self(unsafe { $zero() }) }
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
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        unsafe { $movemask(self.0) as u32 }
      }

      #[inline]
      fn load_binary_mask(bits: u32) -> Self {
        const HALF: u32 = $w / 2;
        Self::from_halves(sse::$half::load_binary_mask(bits), sse::$half::load_binary_mask(bits >> HALF))
      }
    }

    impl_lane_debug!($name: BoolLane);
  };
}

avx_mask!(
  /// Eight 32-bit boolean lanes in an `__m256`.
  M32x8(__m256, 8) {
    half: M32x4,
    from_int: _mm256_castsi256_ps,
    zero: _mm256_setzero_ps,
    and: _mm256_and_ps,
    or: _mm256_or_ps,
    xor: _mm256_xor_ps,
    movemask: _mm256_movemask_ps,
    join: _mm256_setr_m128,
    lo: _mm256_castps256_ps128,
    hi: _mm256_extractf128_ps,
  }
);

avx_mask!(
  /// Four 64-bit boolean lanes in an `__m256d`.
  M64x4(__m256d, 4) {
    half: M64x2,
    from_int: _mm256_castsi256_pd,
    zero: _mm256_setzero_pd,
    and: _mm256_and_pd,
    or: _mm256_or_pd,
    xor: _mm256_xor_pd,
    movemask: _mm256_movemask_pd,
    join: _mm256_setr_m128d,
    lo: _mm256_castpd256_pd128,
    hi: _mm256_extractf128_pd,
  }
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn binary_mask_spans_both_halves() {
    for bits in [0u32, 1, 0x0f, 0xf0, 0x81, 0xff] {
      assert_eq!(M32x8::load_binary_mask(bits).store_mask(), bits);
    }
    assert_eq!(M64x4::load_binary_mask(0b1010).to_array(), [false, true, false, true]);
    assert_eq!(M64x4::load_binary_mask(0xffff_fff0).store_mask(), 0);
  }
}
