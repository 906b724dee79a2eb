//! The uniform lane API shared by every backend.
//!
//! - [`BoolLane`]: `W` logical values, each lane all-ones or all-zeros.
//! - [`IntLane`]: `W` signed integers, the bit-level bridge between numeric
//!   and boolean lanes.
//! - [`FloatLane`]: `W` floating-point values with arithmetic, ordered and
//!   unordered comparisons, select, reductions and special functions.
//! - [`LaneTraits`]: the compile-time table binding an element type to its
//!   lane, integer and mask types for one backend.
//!
//! Everything here resolves statically. There is no `dyn` anywhere in the
//! lane layer.

#![allow(unsafe_code)]

use core::{
  fmt::Debug,
  ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign, Mul, MulAssign,
    Neg, Not, Sub, SubAssign,
  },
};

use crate::element::Element;

/// Compile-time descriptor of one backend's lanes for element type `T`.
///
/// Implemented by the backend marker types ([`Avx`](crate::x86_64::avx::Avx),
/// [`Sse`](crate::x86_64::sse::Sse), [`Scalar`](crate::scalar::Scalar)).
/// There are never any values of these types; the table is read through
/// associated items only.
pub trait LaneTraits<T: Element> {
  /// Numeric lane holding `WIDTH` elements of `T`.
  type Lane: FloatLane<Scalar = T, Int = Self::Int, Mask = Self::Mask>;
  /// Integer companion of the same element width.
  type Int: IntLane<Mask = Self::Mask>;
  /// Boolean companion of the same width.
  type Mask: BoolLane;

  /// Number of elements per lane value.
  const WIDTH: usize;
  /// Alignment in bytes required by the aligned load/store entry points.
  const ALIGN: usize;
  /// Size of one element in bytes.
  const ELEMENT_BYTES: usize = T::BYTES;
  /// Architectural vector registers the backend keeps lanes in (0 for scalar).
  const REGISTERS: usize;
}

/// Fixed-width vector of logical values.
///
/// Every lane is either all-bits-set (true) or all-bits-clear (false). The
/// only ways to bring an arbitrary bit pattern in are
/// [`load_binary_mask`](BoolLane::load_binary_mask) and
/// [`IntLane::is_nonzero`], both of which normalize.
///
/// Deliberately not `PartialEq`: equality of masks is lane-wise
/// ([`lanes_eq`](BoolLane::lanes_eq)), not an aggregate `bool`.
pub trait BoolLane:
  Copy
  + Debug
  + Not<Output = Self>
  + BitAnd<Output = Self>
  + BitOr<Output = Self>
  + BitXor<Output = Self>
  + BitAndAssign
  + BitOrAssign
  + BitXorAssign
{
  /// `[bool; WIDTH]`.
  type Array: Copy + Debug + Default + AsRef<[bool]> + AsMut<[bool]>;

  /// Number of lanes.
  const WIDTH: usize;

  /// Bit-field with one bit per lane set.
  const FULL: u32 = if Self::WIDTH >= 32 { u32::MAX } else { (1u32 << Self::WIDTH) - 1 };

  /// Broadcast `value` to every lane.
  fn splat(value: bool) -> Self;

  /// Build from one `bool` per lane.
  fn from_array(values: Self::Array) -> Self;

  /// Read back one `bool` per lane.
  fn to_array(self) -> Self::Array;

  /// Pack lane `i` into bit `i` of the result (lane 0 is the least significant bit).
  fn store_mask(self) -> u32;

  /// Inverse of [`store_mask`](BoolLane::store_mask). Bits at or above `WIDTH` are ignored.
  fn load_binary_mask(bits: u32) -> Self;

  /// Build lane `i` from `f(i)`.
  #[inline]
  fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
    let mut values = Self::Array::default();
    for (i, v) in values.as_mut().iter_mut().enumerate() {
      *v = f(i);
    }
    Self::from_array(values)
  }

  /// Value of lane `i`. Precondition: `i < WIDTH`.
  #[inline]
  fn test(self, i: usize) -> bool {
    debug_assert!(i < Self::WIDTH, "lane index {i} out of range for width {}", Self::WIDTH);
    (self.store_mask() >> i) & 1 != 0
  }

  /// Lane-wise equality (XNOR).
  #[inline]
  fn lanes_eq(self, other: Self) -> Self {
    !(self ^ other)
  }

  /// Lane-wise inequality (XOR).
  #[inline]
  fn lanes_ne(self, other: Self) -> Self {
    self ^ other
  }

  /// True iff at least one lane is true.
  #[inline]
  fn any(self) -> bool {
    self.store_mask() != 0
  }

  /// True iff every lane is true.
  #[inline]
  fn all(self) -> bool {
    self.store_mask() == Self::FULL
  }

  /// True iff no lane is true.
  #[inline]
  fn none(self) -> bool {
    !self.any()
  }
}

/// Fixed-width vector of signed integers.
///
/// Arithmetic wraps. Used for index math, float/int conversion and as the
/// bit-level substrate a boolean lane can be derived from.
pub trait IntLane:
  Copy
  + Debug
  + Default
  + Add<Output = Self>
  + Sub<Output = Self>
  + BitAnd<Output = Self>
  + BitOr<Output = Self>
  + BitXor<Output = Self>
  + AddAssign
  + SubAssign
{
  /// `i32` or `i64`.
  type Scalar: Copy + Debug + Default + Eq;
  /// Boolean lane of the same width.
  type Mask: BoolLane;
  /// `[Scalar; WIDTH]`.
  type Array: Copy + Debug + Default + AsRef<[Self::Scalar]> + AsMut<[Self::Scalar]>;

  /// Number of lanes.
  const WIDTH: usize;

  fn splat(value: Self::Scalar) -> Self;
  fn from_array(values: Self::Array) -> Self;
  fn to_array(self) -> Self::Array;

  /// Read `WIDTH` integers from `ptr`.
  ///
  /// # Safety
  ///
  /// `ptr` must be valid for reads of `WIDTH` elements. No alignment requirement.
  unsafe fn load_unaligned(ptr: *const Self::Scalar) -> Self;

  /// Write `WIDTH` integers to `ptr`.
  ///
  /// # Safety
  ///
  /// `ptr` must be valid for writes of `WIDTH` elements. No alignment requirement.
  unsafe fn store_unaligned(self, ptr: *mut Self::Scalar);

  /// Lane-wise `==`.
  fn lanes_eq(self, other: Self) -> Self::Mask;

  /// Lane-wise `x != 0`: the normalizing bridge from raw bits to a mask.
  fn is_nonzero(self) -> Self::Mask;

  /// Lane-wise `x & 1 != 0`.
  fn is_odd(self) -> Self::Mask;

  /// Build lane `i` from `f(i)`.
  #[inline]
  fn from_fn(mut f: impl FnMut(usize) -> Self::Scalar) -> Self {
    let mut values = Self::Array::default();
    for (i, v) in values.as_mut().iter_mut().enumerate() {
      *v = f(i);
    }
    Self::from_array(values)
  }

  /// Value of lane `i`. Precondition: `i < WIDTH`.
  #[inline]
  fn extract(self, i: usize) -> Self::Scalar {
    debug_assert!(i < Self::WIDTH, "lane index {i} out of range for width {}", Self::WIDTH);
    self.to_array().as_ref()[i]
  }
}

/// Fixed-width vector of floating-point values.
///
/// Arithmetic follows IEEE-754. Comparisons are ordered (false when either
/// side is NaN) except [`lanes_ne`](FloatLane::lanes_ne), which is unordered
/// (true when either side is NaN).
pub trait FloatLane:
  Copy
  + Debug
  + Default
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
  /// Element type.
  type Scalar: Element;
  /// Integer companion (`i32` lanes for `f32`, `i64` lanes for `f64`).
  type Int: IntLane<Mask = Self::Mask>;
  /// Boolean companion.
  type Mask: BoolLane;
  /// `[Scalar; WIDTH]`.
  type Array: Copy + Debug + Default + AsRef<[Self::Scalar]> + AsMut<[Self::Scalar]>;

  /// Number of lanes.
  const WIDTH: usize;
  /// Alignment required by [`load_aligned`](FloatLane::load_aligned) and
  /// [`store_aligned`](FloatLane::store_aligned).
  const ALIGN: usize;

  /// Broadcast `value` to every lane.
  fn splat(value: Self::Scalar) -> Self;
  fn from_array(values: Self::Array) -> Self;
  fn to_array(self) -> Self::Array;

  /// Read `WIDTH` elements from `ptr`.
  ///
  /// # Safety
  ///
  /// `ptr` must be valid for reads of `WIDTH` elements and aligned to
  /// [`ALIGN`](FloatLane::ALIGN) bytes.
  unsafe fn load_aligned(ptr: *const Self::Scalar) -> Self;

  /// Read `WIDTH` elements from `ptr`.
  ///
  /// # Safety
  ///
  /// `ptr` must be valid for reads of `WIDTH` elements.
  unsafe fn load_unaligned(ptr: *const Self::Scalar) -> Self;

  /// Write `WIDTH` elements to `ptr`.
  ///
  /// # Safety
  ///
  /// `ptr` must be valid for writes of `WIDTH` elements and aligned to
  /// [`ALIGN`](FloatLane::ALIGN) bytes.
  unsafe fn store_aligned(self, ptr: *mut Self::Scalar);

  /// Write `WIDTH` elements to `ptr`.
  ///
  /// # Safety
  ///
  /// `ptr` must be valid for writes of `WIDTH` elements.
  unsafe fn store_unaligned(self, ptr: *mut Self::Scalar);

  fn lanes_eq(self, other: Self) -> Self::Mask;
  /// Unordered: NaN compares not-equal to everything, itself included.
  fn lanes_ne(self, other: Self) -> Self::Mask;
  fn lanes_lt(self, other: Self) -> Self::Mask;
  fn lanes_le(self, other: Self) -> Self::Mask;
  fn lanes_gt(self, other: Self) -> Self::Mask;
  fn lanes_ge(self, other: Self) -> Self::Mask;

  /// Lane `i` is `a[i]` where `mask[i]`, else `b[i]`.
  ///
  /// Equivalent to `(a & mask) | (b & !mask)` on the raw bits.
  fn select(mask: Self::Mask, a: Self, b: Self) -> Self;

  /// Horizontal sum, reduced as a pairwise tree (lane `i` with lane `i + W/2`, halving).
  fn sum(self) -> Self::Scalar;

  fn sqrt(self) -> Self;
  /// `1 / x`, exact division.
  fn rcp(self) -> Self;
  /// `1 / sqrt(x)` refined by one step of `y * (1.5 - 0.5 * x * y^2)`.
  fn rcp_sqrt(self) -> Self;
  /// Nearest integer (ties-to-even) as an integer lane.
  ///
  /// Defined for `|x| < 2^31` (`f32`) and `|x| < 2^51` (`f64`); outside that
  /// range the result is backend-specific.
  fn rint(self) -> Self::Int;
  /// Nearest integral value (ties-to-even) in the same element type.
  fn round_to_nearest(self) -> Self;
  /// Lane-wise sine.
  ///
  /// Reduced by the nearest multiple of π and evaluated with a fixed odd
  /// polynomial. Accuracy degrades as `|x|` grows because of cancellation
  /// in the reduction step.
  fn sin(self) -> Self;
  fn abs(self) -> Self;
  /// `a < b ? a : b` per lane.
  fn min(self, other: Self) -> Self;
  /// `a > b ? a : b` per lane.
  fn max(self, other: Self) -> Self;

  /// Reinterpret the raw bits as the integer companion.
  fn to_bits(self) -> Self::Int;
  /// Reinterpret integer bits as floats.
  fn from_bits(bits: Self::Int) -> Self;
  /// Convert integers to the nearest representable float.
  fn from_int(values: Self::Int) -> Self;

  /// All lanes zero.
  #[inline]
  fn zero() -> Self {
    Self::splat(Self::Scalar::ZERO)
  }

  /// Build lane `i` from `f(i)`.
  #[inline]
  fn from_fn(mut f: impl FnMut(usize) -> Self::Scalar) -> Self {
    let mut values = Self::Array::default();
    for (i, v) in values.as_mut().iter_mut().enumerate() {
      *v = f(i);
    }
    Self::from_array(values)
  }

  /// Load the first `WIDTH` elements of `slice`.
  ///
  /// # Panics
  ///
  /// If `slice.len() < WIDTH`.
  #[inline]
  fn from_slice(slice: &[Self::Scalar]) -> Self {
    assert!(slice.len() >= Self::WIDTH, "slice of {} elements is shorter than lane width {}", slice.len(), Self::WIDTH);
    // SAFETY: length checked above; unaligned load has no alignment requirement.
    unsafe { Self::load_unaligned(slice.as_ptr()) }
  }

  /// Store into the first `WIDTH` elements of `slice`.
  ///
  /// # Panics
  ///
  /// If `slice.len() < WIDTH`.
  #[inline]
  fn write_to_slice(self, slice: &mut [Self::Scalar]) {
    assert!(slice.len() >= Self::WIDTH, "slice of {} elements is shorter than lane width {}", slice.len(), Self::WIDTH);
    // SAFETY: length checked above; unaligned store has no alignment requirement.
    unsafe { self.store_unaligned(slice.as_mut_ptr()) }
  }

  /// Value of lane `i`. Precondition: `i < WIDTH`.
  #[inline]
  fn extract(self, i: usize) -> Self::Scalar {
    debug_assert!(i < Self::WIDTH, "lane index {i} out of range for width {}", Self::WIDTH);
    self.to_array().as_ref()[i]
  }

  /// View the raw bits through a boolean lens: lane `i` is true iff its bit
  /// pattern is nonzero (so `-0.0` is true, `+0.0` is false).
  #[inline]
  fn reinterpret_as_mask(self) -> Self::Mask {
    self.to_bits().is_nonzero()
  }

  /// `self * a + b`, rounded twice.
  #[inline]
  fn mul_add(self, a: Self, b: Self) -> Self {
    self * a + b
  }
}
