use super::mask::{M32x4, M64x2};
use crate::traits::{BoolLane, IntLane};

macro_rules! scalar_int {
  ($(#[$meta:meta])* $name:ident, $elem:ty, $mask:ident, $w:literal) => {
    $(#[$meta])*
    #[derive(Clone, Copy, Default)]
    #[repr(C, align(16))]
    pub struct $name(pub(crate) [$elem; $w]);

    impl_binary_op!($name, Add::add, AddAssign::add_assign, |a, b| {
      Self(core::array::from_fn(|i| a.0[i].wrapping_add(b.0[i])))
    });
    impl_binary_op!($name, Sub::sub, SubAssign::sub_assign, |a, b| {
      Self(core::array::from_fn(|i| a.0[i].wrapping_sub(b.0[i])))
    });
    impl_binary_op!($name, BitAnd::bitand, BitAndAssign::bitand_assign, |a, b| {
      Self(core::array::from_fn(|i| a.0[i] & b.0[i]))
    });
    impl_binary_op!($name, BitOr::bitor, BitOrAssign::bitor_assign, |a, b| {
      Self(core::array::from_fn(|i| a.0[i] | b.0[i]))
    });
    impl_binary_op!($name, BitXor::bitxor, BitXorAssign::bitxor_assign, |a, b| {
      Self(core::array::from_fn(|i| a.0[i] ^ b.0[i]))
    });

    impl IntLane for $name {
      type Scalar = $elem;
      type Mask = $mask;
      type Array = [$elem; $w];

      const WIDTH: usize = $w;

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
      unsafe fn load_unaligned(ptr: *const $elem) -> Self {
        // SAFETY: caller guarantees `ptr` is readable for `$w` elements.
        Self(unsafe { core::ptr::read_unaligned(ptr.cast::<[$elem; $w]>()) })
      }

      #[inline]
      unsafe fn store_unaligned(self, ptr: *mut $elem) {
        // SAFETY: caller guarantees `ptr` is writable for `$w` elements.
        unsafe { core::ptr::write_unaligned(ptr.cast::<[$elem; $w]>(), self.0) }
      }

      #[inline]
      fn lanes_eq(self, other: Self) -> $mask {
        $mask::from_array(core::array::from_fn(|i| self.0[i] == other.0[i]))
      }

      #[inline]
      fn is_nonzero(self) -> $mask {
        $mask::from_array(self.0.map(|x| x != 0))
      }

      #[inline]
      fn is_odd(self) -> $mask {
        $mask::from_array(self.0.map(|x| x & 1 != 0))
      }
    }

    impl_lane_debug!($name: IntLane);
  };
}

scalar_int!(
  /// Four `i32` lanes.
  I32x4, i32, M32x4, 4
);
scalar_int!(
  /// Two `i64` lanes.
  I64x2, i64, M64x2, 2
);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn arithmetic_wraps() {
    let a = I32x4::splat(i32::MAX);
    assert_eq!((a + I32x4::splat(1)).to_array(), [i32::MIN; 4]);
    assert_eq!((I64x2::splat(i64::MIN) - I64x2::splat(1)).to_array(), [i64::MAX; 2]);
  }

  #[test]
  fn nonzero_normalizes() {
    let m = I32x4::from_array([0, 1, -1, 0x100]).is_nonzero();
    assert_eq!(m.to_array(), [false, true, true, true]);
    assert_eq!(I64x2::from_array([3, -4]).is_odd().to_array(), [true, false]);
  }
}
