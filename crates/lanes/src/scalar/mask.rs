use crate::traits::BoolLane;

macro_rules! scalar_mask {
  ($(#[$meta:meta])* $name:ident, $bits:ty, $w:literal) => {
    $(#[$meta])*
    #[derive(Clone, Copy)]
    pub struct $name(pub(crate) [$bits; $w]);

    impl $name {
      #[inline]
      pub(crate) const fn lane(value: bool) -> $bits {
        if value { <$bits>::MAX } else { 0 }
      }

      /// Raw lane words, each all-ones or zero.
      #[inline]
      #[must_use]
      pub const fn to_bits(self) -> [$bits; $w] {
        self.0
      }
    }

    impl core::ops::Not for $name {
      type Output = Self;

      #[inline]
      fn not(self) -> Self {
        Self(self.0.map(|x| !x))
      }
    }

    impl_binary_op!($name, BitAnd::bitand, BitAndAssign::bitand_assign, |a, b| {
      Self(core::array::from_fn(|i| a.0[i] & b.0[i]))
    });
    impl_binary_op!($name, BitOr::bitor, BitOrAssign::bitor_assign, |a, b| {
      Self(core::array::from_fn(|i| a.0[i] | b.0[i]))
    });
    impl_binary_op!($name, BitXor::bitxor, BitXorAssign::bitxor_assign, |a, b| {
      Self(core::array::from_fn(|i| a.0[i] ^ b.0[i]))
    });

    impl BoolLane for $name {
      type Array = [bool; $w];

      const WIDTH: usize = $w;

      #[inline]
      fn splat(value: bool) -> Self {
        Self([Self::lane(value); $w])
      }

      #[inline]
      fn from_array(values: [bool; $w]) -> Self {
        Self(values.map(Self::lane))
      }

      #[inline]
      fn to_array(self) -> [bool; $w] {
        self.0.map(|x| x != 0)
      }

      #[inline]
      fn store_mask(self) -> u32 {
        self.0.iter().enumerate().fold(0, |acc, (i, &x)| acc | (u32::from(x != 0) << i))
      }

      #[inline]
      fn load_binary_mask(bits: u32) -> Self {
        Self(core::array::from_fn(|i| Self::lane((bits >> i) & 1 != 0)))
      }
    }

    impl_lane_debug!($name: BoolLane);
  };
}

scalar_mask!(
  /// Four 32-bit boolean lanes.
  M32x4, u32, 4
);
scalar_mask!(
  /// Two 64-bit boolean lanes.
  M64x2, u64, 2
);
