use core::arch::x86_64::*;

use super::{
  int::{I32x4, I64x2},
  mask::{M32x4, M64x2},
};
use crate::{
  special::{self, F32_INTEGRAL_BOUND, F64_INTEGRAL_BOUND, F64_ROUND_MAGIC, F64_ROUND_MAGIC_BITS},
  traits::{FloatLane, IntLane},
};

macro_rules! sse_float {
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
      and: $and:ident,
      andnot: $andnot:ident,
      or: $or:ident,
      xor: $xor:ident,
      sqrt: $sqrt:ident,
      min: $min:ident,
      max: $max:ident,
      cmpeq: $cmpeq:ident,
      cmpneq: $cmpneq:ident,
      cmplt: $cmplt:ident,
      cmple: $cmple:ident,
      cmpgt: $cmpgt:ident,
      cmpge: $cmpge:ident,
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
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        unsafe { $set1(-0.0) }
      }
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        Self(unsafe { $zero() })
      }
    }

    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    impl_binary_op!($name, Add::add, AddAssign::add_assign, |a, b| Self(unsafe { $add(a.0, b.0) }));
    impl_binary_op!($name, Sub::sub, SubAssign::sub_assign, |a, b| Self(unsafe { $sub(a.0, b.0) }));
    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    impl_binary_op!($name, Mul::mul, MulAssign::mul_assign, |a, b| Self(unsafe { $mul(a.0, b.0) }));
    impl_binary_op!($name, Div::div, DivAssign::div_assign, |a, b| Self(unsafe { $div(a.0, b.0) }));

    impl core::ops::Neg for $name {
      type Output = Self;

      #[inline]
      fn neg(self) -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        Self(unsafe { $xor(self.0, Self::sign_mask()) })
      }
    }

    impl FloatLane for $name {
      type Scalar = $elem;
      type Int = $int;
      type Mask = $mask;
      type Array = [$elem; $w];

      const WIDTH: usize = $w;
      const ALIGN: usize = 16;

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
        let mut out = [0.0; $w];
        // SAFETY: the array holds exactly 16 bytes.
        unsafe { self.store_unaligned(out.as_mut_ptr()) };
        out
      }

      #[inline]
      unsafe fn load_aligned(ptr: *const $elem) -> Self {
        debug_assert_eq!(ptr as usize % Self::ALIGN, 0, "misaligned lane load");
        // SAFETY: caller guarantees 16 readable, 16-byte aligned bytes at `ptr`.
        Self(unsafe { $load(ptr) })
      }

      #[inline]
      unsafe fn load_unaligned(ptr: *const $elem) -> Self {
        // SAFETY: caller guarantees 16 readable bytes at `ptr`.
        Self(unsafe { $loadu(ptr) })
      }

      #[inline]
      unsafe fn store_aligned(self, ptr: *mut $elem) {
        debug_assert_eq!(ptr as usize % Self::ALIGN, 0, "misaligned lane store");
        // SAFETY: caller guarantees 16 writable, 16-byte aligned bytes at `ptr`.
        unsafe { $store(ptr, self.0) }
      }

      #[inline]
      unsafe fn store_unaligned(self, ptr: *mut $elem) {
        // SAFETY: caller guarantees 16 writable bytes at `ptr`.
        unsafe { $storeu(ptr, self.0) }
      }

      #[inline]
      fn lanes_eq(self, other: Self) -> $mask {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        $mask(unsafe { $cmpeq(self.0, other.0) })
      }

      #[inline]
      fn lanes_ne(self, other: Self) -> $mask {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        $mask(unsafe { $cmpneq(self.0, other.0) })
      }

      #[inline]
      fn lanes_lt(self, other: Self) -> $mask {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        $mask(unsafe { $cmplt(self.0, other.0) })
      }

      #[inline]
      fn lanes_le(self, other: Self) -> $mask {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        $mask(unsafe { $cmple(self.0, other.0) })
      }

      #[inline]
      fn lanes_gt(self, other: Self) -> $mask {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        $mask(unsafe { $cmpgt(self.0, other.0) })
      }

      #[inline]
      fn lanes_ge(self, other: Self) -> $mask {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        $mask(unsafe { $cmpge(self.0, other.0) })
      }

      #[inline]
      fn select(mask: $mask, a: Self, b: Self) -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        Self(unsafe { $or($and(mask.0, a.0), $andnot(mask.0, b.0)) })
      }

      #[inline]
      fn sum(self) -> $elem {
        self.horizontal_sum()
      }

      #[inline]
      fn sqrt(self) -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
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
        self.round_integral()
      }

      #[inline]
      fn sin(self) -> Self {
        self.sine()
      }

      #[inline]
      fn abs(self) -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        Self(unsafe { $andnot(Self::sign_mask(), self.0) })
      }

      #[inline]
      fn min(self, other: Self) -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        Self(unsafe { $min(self.0, other.0) })
      }

      #[inline]
      fn max(self, other: Self) -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        Self(unsafe { $max(self.0, other.0) })
      }

      #[inline]
      fn to_bits(self) -> $int {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
        $int(unsafe { $to_int(self.0) })
      }

      #[inline]
      fn from_bits(bits: $int) -> Self {
        // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
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

sse_float!(
  /// Four `f32` lanes in an `__m128`.
  F32x4(__m128, f32, 4) {
    int: I32x4,
    mask: M32x4,
    set1: _mm_set1_ps,
    zero: _mm_setzero_ps,
    load: _mm_load_ps,
    loadu: _mm_loadu_ps,
    store: _mm_store_ps,
    storeu: _mm_storeu_ps,
    add: _mm_add_ps,
    sub: _mm_sub_ps,
    mul: _mm_mul_ps,
    div: _mm_div_ps,
    and: _mm_and_ps,
    andnot: _mm_andnot_ps,
    or: _mm_or_ps,
    xor: _mm_xor_ps,
    sqrt: _mm_sqrt_ps,
    min: _mm_min_ps,
    max: _mm_max_ps,
    cmpeq: _mm_cmpeq_ps,
    cmpneq: _mm_cmpneq_ps,
    cmplt: _mm_cmplt_ps,
    cmple: _mm_cmple_ps,
    cmpgt: _mm_cmpgt_ps,
    cmpge: _mm_cmpge_ps,
    to_int: _mm_castps_si128,
    from_int: _mm_castsi128_ps,
  }
);

sse_float!(
  /// Two `f64` lanes in an `__m128d`.
  F64x2(__m128d, f64, 2) {
    int: I64x2,
    mask: M64x2,
    set1: _mm_set1_pd,
    zero: _mm_setzero_pd,
    load: _mm_load_pd,
    loadu: _mm_loadu_pd,
    store: _mm_store_pd,
    storeu: _mm_storeu_pd,
    add: _mm_add_pd,
    sub: _mm_sub_pd,
    mul: _mm_mul_pd,
    div: _mm_div_pd,
    and: _mm_and_pd,
    andnot: _mm_andnot_pd,
    or: _mm_or_pd,
    xor: _mm_xor_pd,
    sqrt: _mm_sqrt_pd,
    min: _mm_min_pd,
    max: _mm_max_pd,
    cmpeq: _mm_cmpeq_pd,
    cmpneq: _mm_cmpneq_pd,
    cmplt: _mm_cmplt_pd,
    cmple: _mm_cmple_pd,
    cmpgt: _mm_cmpgt_pd,
    cmpge: _mm_cmpge_pd,
    to_int: _mm_castpd_si128,
    from_int: _mm_castsi128_pd,
  }
);

// ─────────────────────────────────────────────────────────────────────────────
// Width-specific pieces
// ─────────────────────────────────────────────────────────────────────────────

impl F32x4 {
  /// `(v0 + v2) + (v1 + v3)`.
  #[inline]
  pub(crate) fn horizontal_sum(self) -> f32 {
    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    unsafe {
      let pairs = _mm_add_ps(self.0, _mm_movehl_ps(self.0, self.0));
      let odd = _mm_shuffle_ps::<0b01>(pairs, pairs);
      _mm_cvtss_f32(_mm_add_ss(pairs, odd))
    }
  }

  #[inline]
  fn round_to_int(self) -> I32x4 {
    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    I32x4(unsafe { _mm_cvtps_epi32(self.0) })
  }

  /// `(|x| + 2^23) - 2^23` rounds ties-to-even in the current mode; the sign
  /// is copied back so `-0.3` gives `-0.0`. Lanes already integral (including
  /// ±∞ and NaN) pass through untouched.
  #[inline]
  fn round_integral(self) -> Self {
    let bound = Self::splat(F32_INTEGRAL_BOUND);
    let magnitude = self.abs();
    let rounded = (magnitude + bound) - bound;
    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    let signed = Self(unsafe { _mm_or_ps(rounded.0, _mm_and_ps(self.0, Self::sign_mask())) });
    Self::select(magnitude.lanes_lt(bound), signed, self)
  }

  /// Widened to two `F64x2` lanes and narrowed once at the end.
  #[inline]
  fn sine(self) -> Self {
    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    unsafe {
      let lo = F64x2(_mm_cvtps_pd(self.0)).sin();
      let hi = F64x2(_mm_cvtps_pd(_mm_movehl_ps(self.0, self.0))).sin();
      Self(_mm_movelh_ps(_mm_cvtpd_ps(lo.0), _mm_cvtpd_ps(hi.0)))
    }
  }

  #[inline]
  fn convert_int(values: I32x4) -> Self {
    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    Self(unsafe { _mm_cvtepi32_ps(values.0) })
  }
}

impl F64x2 {
  /// `v0 + v1`.
  #[inline]
  pub(crate) fn horizontal_sum(self) -> f64 {
    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    unsafe { _mm_cvtsd_f64(_mm_add_sd(self.0, _mm_unpackhi_pd(self.0, self.0))) }
  }

  /// SSE2 has no `f64 -> i64` conversion: after adding `1.5 · 2^52` the
  /// rounded integer sits in the low mantissa bits. Valid for `|x| < 2^51`.
  #[inline]
  fn round_to_int(self) -> I64x2 {
    let shifted = self + Self::splat(F64_ROUND_MAGIC);
    shifted.to_bits() - I64x2::splat(F64_ROUND_MAGIC_BITS)
  }

  #[inline]
  fn round_integral(self) -> Self {
    let bound = Self::splat(F64_INTEGRAL_BOUND);
    let magnitude = self.abs();
    let rounded = (magnitude + bound) - bound;
    // SAFETY: register-only SSE2 intrinsics; SSE2 is part of the x86_64 baseline.
    let signed = Self(unsafe { _mm_or_pd(rounded.0, _mm_and_pd(self.0, Self::sign_mask())) });
    Self::select(magnitude.lanes_lt(bound), signed, self)
  }

  #[inline]
  fn sine(self) -> Self {
    special::sin_f64(self)
  }

  /// Inverse of [`round_to_int`](Self::round_to_int). Valid for `|v| < 2^51`.
  #[inline]
  fn convert_int(values: I64x2) -> Self {
    Self::from_bits(values + I64x2::splat(F64_ROUND_MAGIC_BITS)) - Self::splat(F64_ROUND_MAGIC)
  }
}
