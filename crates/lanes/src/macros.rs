//! Internal macros shared by the backends.
//!
//! Every backend spells out the same operator impls for every lane type;
//! these macros keep that boilerplate in one place so the backend modules
//! only contain the per-ISA bodies.

/// Implement a binary `core::ops` operator and its `*Assign` form.
///
/// The body is an expression over the two bound operands:
///
/// ```ignore
/// impl_binary_op!(F32x4, Add::add, AddAssign::add_assign, |a, b| Self(_mm_add_ps(a.0, b.0)));
/// ```
macro_rules! impl_binary_op {
  ($ty:ty, $op:ident :: $method:ident, $assign:ident :: $assign_method:ident, |$a:ident, $b:ident| $body:expr) => {
    impl core::ops::$op for $ty {
      type Output = Self;

      #[inline]
      fn $method(self, rhs: Self) -> Self {
        let ($a, $b) = (self, rhs);
        $body
      }
    }

    impl core::ops::$assign for $ty {
      #[inline]
      fn $assign_method(&mut self, rhs: Self) {
        *self = core::ops::$op::$method(*self, rhs);
      }
    }
  };
}

/// Implement `Debug` by printing the lane contents through `$trait::to_array`.
macro_rules! impl_lane_debug {
  ($ty:ident : $trait:ident) => {
    impl core::fmt::Debug for $ty {
      fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple(stringify!($ty)).field(&$crate::traits::$trait::to_array(*self)).finish()
      }
    }
  };
}

/// Implement `LaneTraits<f32>` and `LaneTraits<f64>` for a backend marker.
macro_rules! impl_lane_traits {
  (
    $backend:ty {
      align: $align:expr,
      registers: $regs:expr,
      f32: ($f32:ty, $i32:ty, $m32:ty, $w32:expr),
      f64: ($f64:ty, $i64:ty, $m64:ty, $w64:expr) $(,)?
    }
  ) => {
    impl $crate::traits::LaneTraits<f32> for $backend {
      type Lane = $f32;
      type Int = $i32;
      type Mask = $m32;

      const WIDTH: usize = $w32;
      const ALIGN: usize = $align;
      const REGISTERS: usize = $regs;
    }

    impl $crate::traits::LaneTraits<f64> for $backend {
      type Lane = $f64;
      type Int = $i64;
      type Mask = $m64;

      const WIDTH: usize = $w64;
      const ALIGN: usize = $align;
      const REGISTERS: usize = $regs;
    }
  };
}
