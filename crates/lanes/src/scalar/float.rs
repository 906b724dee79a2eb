use super::{
  int::{I32x4, I64x2},
  mask::{M32x4, M64x2},
};
use crate::{
  element::Element,
  special,
  traits::{BoolLane, FloatLane},
};

macro_rules! scalar_float {
  (
    $(#[$meta:meta])*
    $name:ident {
      elem: $elem:ty,
      int: $int:ident($ielem:ty),
      mask: $mask:ident,
      width: $w:literal,
      sin: |$x:ident| $sin:expr $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(Clone, Copy, Default)]
    #[repr(C, align(16))]
    pub struct $name(pub(crate) [$elem; $w]);

    impl $name {
      #[inline]
      fn map(self, f: impl Fn($elem) -> $elem) -> Self {
        Self(self.0.map(f))
      }

      #[inline]
      fn zip(self, other: Self, f: impl Fn($elem, $elem) -> $elem) -> Self {
        Self(core::array::from_fn(|i| f(self.0[i], other.0[i])))
      }

      #[inline]
      fn compare(self, other: Self, f: impl Fn($elem, $elem) -> bool) -> $mask {
        $mask::from_array(core::array::from_fn(|i| f(self.0[i], other.0[i])))
      }
    }

    impl_binary_op!($name, Add::add, AddAssign::add_assign, |a, b| a.zip(b, |x, y| x + y));
    impl_binary_op!($name, Sub::sub, SubAssign::sub_assign, |a, b| a.zip(b, |x, y| x - y));
    impl_binary_op!($name, Mul::mul, MulAssign::mul_assign, |a, b| a.zip(b, |x, y| x * y));
    impl_binary_op!($name, Div::div, DivAssign::div_assign, |a, b| a.zip(b, |x, y| x / y));

    impl core::ops::Neg for $name {
      type Output = Self;

      #[inline]
      fn neg(self) -> Self {
        self.map(|x| -x)
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
        Self([value; $w])
      }

      #[inline]
      fn from_array(values: [$elem; $w]) -> Self {
        Self(values)
      }

      #[inline]
      fn to_array(self) -> [$elem; $w] {
        self.0
      }

      #[inline]
      unsafe fn load_aligned(ptr: *const $elem) -> Self {
        debug_assert_eq!(ptr as usize % Self::ALIGN, 0, "misaligned lane load");
        // SAFETY: caller guarantees `ptr` is readable for `$w` elements and 16-byte aligned.
        Self(unsafe { core::ptr::read(ptr.cast::<[$elem; $w]>()) })
      }

      #[inline]
      unsafe fn load_unaligned(ptr: *const $elem) -> Self {
        // SAFETY: caller guarantees `ptr` is readable for `$w` elements.
        Self(unsafe { core::ptr::read_unaligned(ptr.cast::<[$elem; $w]>()) })
      }

      #[inline]
      unsafe fn store_aligned(self, ptr: *mut $elem) {
        debug_assert_eq!(ptr as usize % Self::ALIGN, 0, "misaligned lane store");
        // SAFETY: caller guarantees `ptr` is writable for `$w` elements and 16-byte aligned.
        unsafe { core::ptr::write(ptr.cast::<[$elem; $w]>(), self.0) }
      }

      #[inline]
      unsafe fn store_unaligned(self, ptr: *mut $elem) {
        // SAFETY: caller guarantees `ptr` is writable for `$w` elements.
        unsafe { core::ptr::write_unaligned(ptr.cast::<[$elem; $w]>(), self.0) }
      }

      #[inline]
      fn lanes_eq(self, other: Self) -> $mask {
        self.compare(other, |a, b| a == b)
      }

      #[inline]
      fn lanes_ne(self, other: Self) -> $mask {
        self.compare(other, |a, b| a != b)
      }

      #[inline]
      fn lanes_lt(self, other: Self) -> $mask {
        self.compare(other, |a, b| a < b)
      }

      #[inline]
      fn lanes_le(self, other: Self) -> $mask {
        self.compare(other, |a, b| a <= b)
      }

      #[inline]
      fn lanes_gt(self, other: Self) -> $mask {
        self.compare(other, |a, b| a > b)
      }

      #[inline]
      fn lanes_ge(self, other: Self) -> $mask {
        self.compare(other, |a, b| a >= b)
      }

      #[inline]
      fn select(mask: $mask, a: Self, b: Self) -> Self {
        let m = mask.to_bits();
        let (a, b) = (a.to_bits().0, b.to_bits().0);
        Self::from_bits($int(core::array::from_fn(|i| {
          let m = m[i] as $ielem;
          (a[i] & m) | (b[i] & !m)
        })))
      }

      #[inline]
      fn sum(self) -> $elem {
        let mut values = self.0;
        special::pairwise_sum(&mut values)
      }

      #[inline]
      fn sqrt(self) -> Self {
        self.map(Element::sqrt)
      }

      #[inline]
      fn rcp(self) -> Self {
        self.map(Element::rcp)
      }

      #[inline]
      fn rcp_sqrt(self) -> Self {
        self.map(Element::rcp_sqrt)
      }

      #[inline]
      fn rint(self) -> $int {
        $int(self.0.map(|x| Element::round_ties_even(x) as $ielem))
      }

      #[inline]
      fn round_to_nearest(self) -> Self {
        self.map(Element::round_ties_even)
      }

      #[inline]
      fn sin(self) -> Self {
        let $x = self;
        $sin
      }

      #[inline]
      fn abs(self) -> Self {
        self.map(Element::abs)
      }

      #[inline]
      fn min(self, other: Self) -> Self {
        self.zip(other, Element::min)
      }

      #[inline]
      fn max(self, other: Self) -> Self {
        self.zip(other, Element::max)
      }

      #[inline]
      fn to_bits(self) -> $int {
        $int(self.0.map(|x| x.to_bits() as $ielem))
      }

      #[inline]
      fn from_bits(bits: $int) -> Self {
        Self(bits.0.map(|x| <$elem>::from_bits(x as _)))
      }

      #[inline]
      fn from_int(values: $int) -> Self {
        Self(values.0.map(|x| x as $elem))
      }
    }

    impl_lane_debug!($name: FloatLane);
  };
}

scalar_float!(
  /// Four `f32` lanes.
  F32x4 {
    elem: f32,
    int: I32x4(i32),
    mask: M32x4,
    width: 4,
    // Widened to f64 and narrowed once at the end.
    sin: |x| {
      let lo = F64x2([f64::from(x.0[0]), f64::from(x.0[1])]).sin();
      let hi = F64x2([f64::from(x.0[2]), f64::from(x.0[3])]).sin();
      F32x4([lo.0[0] as f32, lo.0[1] as f32, hi.0[0] as f32, hi.0[1] as f32])
    },
  }
);

scalar_float!(
  /// Two `f64` lanes.
  F64x2 {
    elem: f64,
    int: I64x2(i64),
    mask: M64x2,
    width: 2,
    sin: |x| special::sin_f64(x),
  }
);
