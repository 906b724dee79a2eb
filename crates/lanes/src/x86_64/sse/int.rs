use core::arch::x86_64::*;

use super::mask::{M32x4, M64x2};
use crate::traits::IntLane;

/// 64-bit lane equality from SSE2 pieces: both 32-bit halves equal.
#[inline(always)]
pub(crate) fn cmpeq_epi64(a: __m128i, b: __m128i) -> __m128i {
  // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
  unsafe {
    let eq = _mm_cmpeq_epi32(a, b);
    _mm_and_si128(eq, _mm_shuffle_epi32::<0b10_11_00_01>(eq))
  }
}

#[inline(always)]
pub(crate) fn all_ones() -> __m128i {
  // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
  unsafe { _mm_set1_epi32(-1) }
}

macro_rules! sse_int {
  (
    $(#[$meta:meta])*
    $name:ident($elem:ty, $w:literal) {
      mask: $mask:ident($mask_cast:ident),
      set1: $set1:ident,
      add: $add:ident,
      sub: $sub:ident,
      cmpeq: $cmpeq:ident $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(Clone, Copy)]
    #[repr(transparent)]
    pub struct $name(pub(crate) __m128i);

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        Self(unsafe { _mm_setzero_si128() })
      }
    }

    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    impl_binary_op!($name, Add::add, AddAssign::add_assign, |a, b| Self(unsafe { $add(a.0, b.0) }));
    impl_binary_op!($name, Sub::sub, SubAssign::sub_assign, |a, b| Self(unsafe { $sub(a.0, b.0) }));
    impl_binary_op!($name, BitAnd::bitand, BitAndAssign::bitand_assign, |a, b| {
      // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
      Self(unsafe { _mm_and_si128(a.0, b.0) })
    });
    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    impl_binary_op!($name, BitOr::bitor, BitOrAssign::bitor_assign, |a, b| Self(unsafe { _mm_or_si128(a.0, b.0) }));
    impl_binary_op!($name, BitXor::bitxor, BitXorAssign::bitxor_assign, |a, b| {
      // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
      Self(unsafe { _mm_xor_si128(a.0, b.0) })
    });

    impl IntLane for $name {
      type Scalar = $elem;
      type Mask = $mask;
      type Array = [$elem; $w];

      const WIDTH: usize = $w;

      #[inline]
      fn splat(value: $elem) -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        Self(unsafe { $set1(value) })
      }

      #[inline]
      fn from_array(values: [$elem; $w]) -> Self {
        // SAFETY: the array holds exactly 16 bytes.
        unsafe { Self::load_unaligned(values.as_ptr()) }
      }

      #[inline]
      fn to_array(self) -> [$elem; $w] {
        let mut out = [0; $w];
        // SAFETY: the array holds exactly 16 bytes.
        unsafe { self.store_unaligned(out.as_mut_ptr()) };
        out
      }

      #[inline]
      unsafe fn load_unaligned(ptr: *const $elem) -> Self {
        // SAFETY: caller guarantees 16 readable bytes at `ptr`.
        Self(unsafe { _mm_loadu_si128(ptr.cast()) })
      }

      #[inline]
      unsafe fn store_unaligned(self, ptr: *mut $elem) {
        // SAFETY: caller guarantees 16 writable bytes at `ptr`.
        unsafe { _mm_storeu_si128(ptr.cast(), self.0) }
      }

      #[inline]
      fn lanes_eq(self, other: Self) -> $mask {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        $mask(unsafe { $mask_cast($cmpeq(self.0, other.0)) })
      }

      #[inline]
      fn is_nonzero(self) -> $mask {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        let zero = unsafe { $cmpeq(self.0, _mm_setzero_si128()) };
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        $mask(unsafe { $mask_cast(_mm_xor_si128(zero, all_ones())) })
      }

      #[inline]
      fn is_odd(self) -> $mask {
        (self & Self::splat(1)).is_nonzero()
      }
    }

    impl_lane_debug!($name: IntLane);
  };
}

sse_int!(
  /// Four `i32` lanes in an `__m128i`.
  I32x4(i32, 4) {
    mask: M32x4(_mm_castsi128_ps),
    set1: _mm_set1_epi32,
    add: _mm_add_epi32,
    sub: _mm_sub_epi32,
    cmpeq: _mm_cmpeq_epi32,
  }
);

sse_int!(
  /// Two `i64` lanes in an `__m128i`.
  I64x2(i64, 2) {
    mask: M64x2(_mm_castsi128_pd),
    set1: _mm_set1_epi64x,
    add: _mm_add_epi64,
    sub: _mm_sub_epi64,
    cmpeq: cmpeq_epi64,
  }
);
