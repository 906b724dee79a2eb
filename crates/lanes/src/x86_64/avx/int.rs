use core::arch::x86_64::*;

use super::mask::{M32x8, M64x4};
use crate::{traits::IntLane, x86_64::sse};

macro_rules! avx_int {
  (
    $(#[$meta:meta])*
    $name:ident($elem:ty, $w:literal) {
      half: $half:ident,
      mask: $mask:ident,
      set1: $set1:ident $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(Clone, Copy)]
    #[repr(transparent)]
    pub struct $name(pub(crate) __m256i);

    impl $name {
      #[inline]
      pub(crate) fn from_halves(lo: sse::$half, hi: sse::$half) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { _mm256_setr_m128i(lo.0, hi.0) })
      }

      #[inline]
      pub(crate) fn halves(self) -> (sse::$half, sse::$half) {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        unsafe { (sse::$half(_mm256_castsi256_si128(self.0)), sse::$half(_mm256_extractf128_si256::<1>(self.0))) }
      }

      #[inline]
      fn zip(self, other: Self, f: impl Fn(sse::$half, sse::$half) -> sse::$half) -> Self {
        let (a_lo, a_hi) = self.halves();
        let (b_lo, b_hi) = other.halves();
        Self::from_halves(f(a_lo, b_lo), f(a_hi, b_hi))
      }
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { _mm256_setzero_si256() })
      }
    }

    impl_binary_op!($name, Add::add, AddAssign::add_assign, |a, b| a.zip(b, |x, y| x + y));
    impl_binary_op!($name, Sub::sub, SubAssign::sub_assign, |a, b| a.zip(b, |x, y| x - y));
    impl_binary_op!($name, BitAnd::bitand, BitAndAssign::bitand_assign, |a, b| a.zip(b, |x, y| x & y));
    impl_binary_op!($name, BitOr::bitor, BitOrAssign::bitor_assign, |a, b| a.zip(b, |x, y| x | y));
    impl_binary_op!($name, BitXor::bitxor, BitXorAssign::bitxor_assign, |a, b| a.zip(b, |x, y| x ^ y));

    impl IntLane for $name {
      type Scalar = $elem;
      type Mask = $mask;
      type Array = [$elem; $w];

      const WIDTH: usize = $w;

      #[inline]
      fn splat(value: $elem) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $set1(value) })
      }

      #[inline]
      fn from_array(values: [$elem; $w]) -> Self {
        // SAFETY: the array holds exactly 32 bytes.
        unsafe { Self::load_unaligned(values.as_ptr()) }
      }

      #[inline]
      fn to_array(self) -> [$elem; $w] {
        let mut out = [0; $w];
        // SAFETY: the array holds exactly 32 bytes.
        unsafe { self.store_unaligned(out.as_mut_ptr()) };
        out
      }

      #[inline]
      unsafe fn load_unaligned(ptr: *const $elem) -> Self {
        // SAFETY: caller guarantees 32 readable bytes at `ptr`.
        Self(unsafe { _mm256_loadu_si256(ptr.cast()) })
      }

      #[inline]
      unsafe fn store_unaligned(self, ptr: *mut $elem) {
        // SAFETY: caller guarantees 32 writable bytes at `ptr`.
        unsafe { _mm256_storeu_si256(ptr.cast(), self.0) }
      }

      #[inline]
      fn lanes_eq(self, other: Self) -> $mask {
        let (a_lo, a_hi) = self.halves();
        let (b_lo, b_hi) = other.halves();
        $mask::from_halves(a_lo.lanes_eq(b_lo), a_hi.lanes_eq(b_hi))
      }

      #[inline]
      fn is_nonzero(self) -> $mask {
        let (lo, hi) = self.halves();
        $mask::from_halves(lo.is_nonzero(), hi.is_nonzero())
      }

      #[inline]
      fn is_odd(self) -> $mask {
        let (lo, hi) = self.halves();
        $mask::from_halves(lo.is_odd(), hi.is_odd())
      }
    }

    impl_lane_debug!($name: IntLane);
  };
}

avx_int!(
  /// Eight `i32` lanes in an `__m256i`.
  I32x8(i32, 8) {
    half: I32x4,
    mask: M32x8,
    set1: _mm256_set1_epi32,
  }
);

avx_int!(
  /// Four `i64` lanes in an `__m256i`.
  I64x4(i64, 4) {
    half: I64x2,
    mask: M64x4,
    set1: _mm256_set1_epi64x,
  }
);
