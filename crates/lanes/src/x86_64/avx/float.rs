use core::arch::x86_64::*;

use super::{
  int::{I32x8, I64x4},
  mask::{M32x8, M64x4},
};
use crate::{
  special::{self, F64_ROUND_MAGIC, F64_ROUND_MAGIC_BITS},
  traits::{FloatLane, IntLane},
  x86_64::sse,
};

macro_rules! avx_float {
  (
    $(#[$meta:meta])*
    $name:ident($reg:ty, $elem:ty, $w:literal) {
      int: $int:ident,
      mask: $mask:ident,
      set1: $set1:ident,
      zero: $zero:ident,
      load: $load:ident,
      loadu: $loadu:ident,
      store: $store:ident,
      storeu: $storeu:ident,
      add: $add:ident,
      sub: $sub:ident,
      mul: $mul:ident,
      div: $div:ident,
      andnot: $andnot:ident,
      xor: $xor:ident,
      blendv: $blendv:ident,
      sqrt: $sqrt:ident,
      min: $min:ident,
      max: $max:ident,
      cmp: $cmp:ident,
      round: $round:ident,
      to_int: $to_int:ident,
      from_int: $from_int:ident $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(Clone, Copy)]
    #[repr(transparent)]
    pub struct $name(pub(crate) $reg);

    impl $name {
      #[inline(always)]
      fn sign_mask() -> $reg {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        unsafe { $set1(-0.0) }
      }
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $zero() })
      }
    }

    // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
    impl_binary_op!($name, Add::add, AddAssign::add_assign, |a, b| Self(unsafe { $add(a.0, b.0) }));
    impl_binary_op!($name, Sub::sub, SubAssign::sub_assign, |a, b| Self(unsafe { $sub(a.0, b.0) }));
    // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
    impl_binary_op!($name, Mul::mul, MulAssign::mul_assign, |a, b| Self(unsafe { $mul(a.0, b.0) }));
    impl_binary_op!($name, Div::div, DivAssign::div_assign, |a, b| Self(unsafe { $div(a.0, b.0) }));

    impl core::ops::Neg for $name {
      type Output = Self;

      #[inline]
      fn neg(self) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $xor(self.0, Self::sign_mask()) })
      }
    }

    impl FloatLane for $name {
      type Scalar = $elem;
      type Int = $int;
      type Mask = $mask;
      type Array = [$elem; $w];

      const WIDTH: usize = $w;
      const ALIGN: usize = 32;

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
        let mut out = [0.0; $w];
        // SAFETY: the array holds exactly 32 bytes.
        unsafe { self.store_unaligned(out.as_mut_ptr()) };
        out
      }

      #[inline]
      unsafe fn load_aligned(ptr: *const $elem) -> Self {
        debug_assert_eq!(ptr as usize % Self::ALIGN, 0, "misaligned lane load");
        // SAFETY: caller guarantees 32 readable, 32-byte aligned bytes at `ptr`.
        Self(unsafe { $load(ptr) })
      }

      #[inline]
      unsafe fn load_unaligned(ptr: *const $elem) -> Self {
        // SAFETY: caller guarantees 32 readable bytes at `ptr`.
        Self(unsafe { $loadu(ptr) })
      }

      #[inline]
      unsafe fn store_aligned(self, ptr: *mut $elem) {
        debug_assert_eq!(ptr as usize % Self::ALIGN, 0, "misaligned lane store");
        // SAFETY: caller guarantees 32 writable, 32-byte aligned bytes at `ptr`.
        unsafe { $store(ptr, self.0) }
      }

      #[inline]
      unsafe fn store_unaligned(self, ptr: *mut $elem) {
        // SAFETY: caller guarantees 32 writable bytes at `ptr`.
        unsafe { $storeu(ptr, self.0) }
      }

      #[inline]
      fn lanes_eq(self, other: Self) -> $mask {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        $mask(unsafe { $cmp::<_CMP_EQ_OQ>(self.0, other.0) })
      }

      #[inline]
      fn lanes_ne(self, other: Self) -> $mask {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        $mask(unsafe { $cmp::<_CMP_NEQ_UQ>(self.0, other.0) })
      }

      #[inline]
      fn lanes_lt(self, other: Self) -> $mask {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        $mask(unsafe { $cmp::<_CMP_LT_OQ>(self.0, other.0) })
      }

      #[inline]
      fn lanes_le(self, other: Self) -> $mask {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        $mask(unsafe { $cmp::<_CMP_LE_OQ>(self.0, other.0) })
      }

      #[inline]
      fn lanes_gt(self, other: Self) -> $mask {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        $mask(unsafe { $cmp::<_CMP_GT_OQ>(self.0, other.0) })
      }

      #[inline]
      fn lanes_ge(self, other: Self) -> $mask {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        $mask(unsafe { $cmp::<_CMP_GE_OQ>(self.0, other.0) })
      }

      #[inline]
      fn select(mask: $mask, a: Self, b: Self) -> Self {
        // Mask lanes are all-ones or all-zeros, so the sign-bit blend is exact.
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $blendv(b.0, a.0, mask.0) })
      }

      #[inline]
      fn sum(self) -> $elem {
        self.horizontal_sum()
      }

      #[inline]
      fn sqrt(self) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $sqrt(self.0) })
      }

      #[inline]
      fn rcp(self) -> Self {
        Self::splat(1.0) / self
      }

      #[inline]
      fn rcp_sqrt(self) -> Self {
        let y = Self::splat(1.0) / self.sqrt();
        y * (Self::splat(1.5) - Self::splat(0.5) * self * y * y)
      }

      #[inline]
      fn rint(self) -> $int {
        self.round_to_int()
      }

      #[inline]
      fn round_to_nearest(self) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $round::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(self.0) })
      }

      #[inline]
      fn sin(self) -> Self {
        self.sine()
      }

      #[inline]
      fn abs(self) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $andnot(Self::sign_mask(), self.0) })
      }

      #[inline]
      fn min(self, other: Self) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $min(self.0, other.0) })
      }

      #[inline]
      fn max(self, other: Self) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $max(self.0, other.0) })
      }

      #[inline]
      fn to_bits(self) -> $int {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        $int(unsafe { $to_int(self.0) })
      }

      #[inline]
      fn from_bits(bits: $int) -> Self {
        // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
        Self(unsafe { $from_int(bits.0) })
      }

      #[inline]
      fn from_int(values: $int) -> Self {
        Self::convert_int(values)
      }
    }

    impl_lane_debug!($name: FloatLane);
  };
}

avx_float!(
  /// Eight `f32` lanes in an `__m256`.
  F32x8(__m256, f32, 8) {
    int: I32x8,
    mask: M32x8,
    set1: _mm256_set1_ps,
    zero: _mm256_setzero_ps,
    load: _mm256_load_ps,
    loadu: _mm256_loadu_ps,
    store: _mm256_store_ps,
    storeu: _mm256_storeu_ps,
    add: _mm256_add_ps,
    sub: _mm256_sub_ps,
    mul: _mm256_mul_ps,
    div: _mm256_div_ps,
    andnot: _mm256_andnot_ps,
    xor: _mm256_xor_ps,
    blendv: _mm256_blendv_ps,
    sqrt: _mm256_sqrt_ps,
    min: _mm256_min_ps,
    max: _mm256_max_ps,
    cmp: _mm256_cmp_ps,
    round: _mm256_round_ps,
    to_int: _mm256_castps_si256,
    from_int: _mm256_castsi256_ps,
  }
);

avx_float!(
  /// Four `f64` lanes in an `__m256d`.
  F64x4(__m256d, f64, 4) {
    int: I64x4,
    mask: M64x4,
    set1: _mm256_set1_pd,
    zero: _mm256_setzero_pd,
    load: _mm256_load_pd,
    loadu: _mm256_loadu_pd,
    store: _mm256_store_pd,
    storeu: _mm256_storeu_pd,
    add: _mm256_add_pd,
    sub: _mm256_sub_pd,
    mul: _mm256_mul_pd,
    div: _mm256_div_pd,
    andnot: _mm256_andnot_pd,
    xor: _mm256_xor_pd,
    blendv: _mm256_blendv_pd,
    sqrt: _mm256_sqrt_pd,
    min: _mm256_min_pd,
    max: _mm256_max_pd,
    cmp: _mm256_cmp_pd,
    round: _mm256_round_pd,
    to_int: _mm256_castpd_si256,
    from_int: _mm256_castsi256_pd,
  }
);

// ─────────────────────────────────────────────────────────────────────────────
// Width-specific pieces
// ─────────────────────────────────────────────────────────────────────────────

impl F32x8 {
  /// Fold the upper 128 bits onto the lower, then the SSE2 tree.
  #[inline]
  fn horizontal_sum(self) -> f32 {
    // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
    unsafe {
      let folded = _mm_add_ps(_mm256_castps256_ps128(self.0), _mm256_extractf128_ps::<1>(self.0));
      sse::F32x4(folded).horizontal_sum()
    }
  }

  #[inline]
  fn round_to_int(self) -> I32x8 {
    // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
    I32x8(unsafe { _mm256_cvtps_epi32(self.0) })
  }

  /// Widened to two `F64x4` lanes and narrowed once at the end.
  #[inline]
  fn sine(self) -> Self {
    // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
    unsafe {
      let lo = F64x4(_mm256_cvtps_pd(_mm256_castps256_ps128(self.0))).sin();
      let hi = F64x4(_mm256_cvtps_pd(_mm256_extractf128_ps::<1>(self.0))).sin();
      Self(_mm256_setr_m128(_mm256_cvtpd_ps(lo.0), _mm256_cvtpd_ps(hi.0)))
    }
  }

  #[inline]
  fn convert_int(values: I32x8) -> Self {
    // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
    Self(unsafe { _mm256_cvtepi32_ps(values.0) })
  }
}

impl F64x4 {
  #[inline]
  fn horizontal_sum(self) -> f64 {
    // SAFETY: register-only intrinsics; this module only compiles with `target_feature = "avx"`.
    unsafe {
      let folded = _mm_add_pd(_mm256_castpd256_pd128(self.0), _mm256_extractf128_pd::<1>(self.0));
      sse::F64x2(folded).horizontal_sum()
    }
  }

  /// AVX has no `f64 -> i64` conversion either; same `1.5 · 2^52` shift as
  /// SSE2, valid for `|x| < 2^51`.
  #[inline]
  fn round_to_int(self) -> I64x4 {
    let shifted = self + Self::splat(F64_ROUND_MAGIC);
    shifted.to_bits() - I64x4::splat(F64_ROUND_MAGIC_BITS)
  }

  #[inline]
  fn sine(self) -> Self {
    special::sin_f64(self)
  }

  #[inline]
  fn convert_int(values: I64x4) -> Self {
    Self::from_bits(values + I64x4::splat(F64_ROUND_MAGIC_BITS)) - Self::splat(F64_ROUND_MAGIC)
  }
}
