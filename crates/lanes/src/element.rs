//! Scalar element types and their algebraic/trigonometric primitives.
//!
//! [`Element`] is implemented for `f32` and `f64` only. Besides keying the
//! [`LaneTraits`](crate::LaneTraits) table, it is the scalar primitive set
//! (`sqrt`, `sin`, `cos`, ...) that the `math` crate builds on, so scalar
//! and lane code agree on `rcp_sqrt` and rounding behaviour.

use core::{
  fmt::{Debug, Display},
  ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

mod sealed {
  pub trait Sealed {}
  impl Sealed for f32 {}
  impl Sealed for f64 {}
}

/// A floating-point element type that lanes can be built from.
///
/// Sealed: only `f32` and `f64` implement it.
pub trait Element:
  sealed::Sealed
  + Copy
  + Default
  + Debug
  + Display
  + PartialEq
  + PartialOrd
  + Send
  + Sync
  + 'static
  + Add<Output = Self>
  + Sub<Output = Self>
  + Mul<Output = Self>
  + Div<Output = Self>
  + Neg<Output = Self>
  + AddAssign
  + SubAssign
  + MulAssign
  + DivAssign
{
  /// Same-width signed integer.
  type Bits: Copy + Debug + Default + Eq + Send + Sync + 'static;

  const ZERO: Self;
  const ONE: Self;
  const TWO: Self;
  const HALF: Self;
  const PI: Self;
  const FRAC_PI_2: Self;
  const EPSILON: Self;
  const INFINITY: Self;
  const NAN: Self;
  /// Size of one element in bytes.
  const BYTES: usize;

  fn from_f64(v: f64) -> Self;
  fn to_f64(self) -> f64;

  fn abs(self) -> Self;
  fn sqrt(self) -> Self;
  fn sin(self) -> Self;
  fn cos(self) -> Self;
  fn tan(self) -> Self;
  fn asin(self) -> Self;
  fn acos(self) -> Self;
  fn atan2(self, x: Self) -> Self;
  fn mul_add(self, a: Self, b: Self) -> Self;
  fn is_nan(self) -> bool;
  fn round_ties_even(self) -> Self;

  /// `a < b ? a : b`, matching the x86 `min` instructions (second operand on NaN).
  #[inline]
  fn min(self, other: Self) -> Self {
    if self < other { self } else { other }
  }

  /// `a > b ? a : b`, matching the x86 `max` instructions (second operand on NaN).
  #[inline]
  fn max(self, other: Self) -> Self {
    if self > other { self } else { other }
  }

  /// Limit to `[lo, hi]`; NaN comes out as `lo`.
  #[inline]
  fn clamp(self, lo: Self, hi: Self) -> Self {
    self.max(lo).min(hi)
  }

  /// Exact reciprocal `1 / self`.
  #[inline]
  fn rcp(self) -> Self {
    Self::ONE / self
  }

  /// Reciprocal square root with one Newton-Raphson refinement.
  ///
  /// Same algorithm the lane types use, so scalar and lane results agree
  /// bit for bit.
  #[inline]
  fn rcp_sqrt(self) -> Self {
    let y = Self::ONE / self.sqrt();
    newton_rcp_sqrt(self, y)
  }
}

/// One Newton-Raphson step for `1/sqrt(x)`: `y * (1.5 - 0.5 * x * y^2)`.
#[inline(always)]
pub(crate) fn newton_rcp_sqrt<T: Element>(x: T, y: T) -> T {
  let three_halves = T::ONE + T::HALF;
  y * (three_halves - T::HALF * x * y * y)
}

macro_rules! impl_element {
  ($t:ident, $bits:ty) => {
    impl Element for $t {
      type Bits = $bits;

      const ZERO: Self = 0.0;
      const ONE: Self = 1.0;
      const TWO: Self = 2.0;
      const HALF: Self = 0.5;
      const PI: Self = core::$t::consts::PI;
      const FRAC_PI_2: Self = core::$t::consts::FRAC_PI_2;
      const EPSILON: Self = $t::EPSILON;
      const INFINITY: Self = $t::INFINITY;
      const NAN: Self = $t::NAN;
      const BYTES: usize = core::mem::size_of::<$t>();

      #[inline]
      fn from_f64(v: f64) -> Self {
        v as $t
      }

      #[inline]
      fn to_f64(self) -> f64 {
        self as f64
      }

      #[inline]
      fn abs(self) -> Self {
        $t::abs(self)
      }

      #[inline]
      fn sqrt(self) -> Self {
        $t::sqrt(self)
      }

      #[inline]
      fn sin(self) -> Self {
        $t::sin(self)
      }

      #[inline]
      fn cos(self) -> Self {
        $t::cos(self)
      }

      #[inline]
      fn tan(self) -> Self {
        $t::tan(self)
      }

      #[inline]
      fn asin(self) -> Self {
        $t::asin(self)
      }

      #[inline]
      fn acos(self) -> Self {
        $t::acos(self)
      }

      #[inline]
      fn atan2(self, x: Self) -> Self {
        $t::atan2(self, x)
      }

      #[inline]
      fn mul_add(self, a: Self, b: Self) -> Self {
        $t::mul_add(self, a, b)
      }

      #[inline]
      fn is_nan(self) -> bool {
        $t::is_nan(self)
      }

      #[inline]
      fn round_ties_even(self) -> Self {
        $t::round_ties_even(self)
      }
    }
  };
}

impl_element!(f32, i32);
impl_element!(f64, i64);
