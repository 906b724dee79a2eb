//! Small fixed-size vectors.
//!
//! `Vec2`, `Vec3` and `Vec4` share one macro-generated surface: componentwise
//! arithmetic, scalar scaling, `dot`, `length`, `normalize` and `lerp`.
//! Dimension-specific operations (`cross`, `extend`, `truncate`) are written
//! out below the macro.

use lanes::Element;

macro_rules! define_vector {
  ($(#[$meta:meta])* $name:ident, $n:literal, { $($field:ident),+ }) => {
    $(#[$meta])*
    #[derive(Clone, Copy, Default, PartialEq)]
    #[repr(C)]
    pub struct $name<T: Element = f32> {
      $(pub $field: T,)+
    }

    impl<T: Element> $name<T> {
      /// All components zero.
      pub const ZERO: Self = Self { $($field: T::ZERO),+ };
      /// All components one.
      pub const ONE: Self = Self { $($field: T::ONE),+ };

      #[inline]
      #[must_use]
      pub const fn new($($field: T),+) -> Self {
        Self { $($field),+ }
      }

      /// Every component set to `v`.
      #[inline]
      #[must_use]
      pub const fn splat(v: T) -> Self {
        Self { $($field: v),+ }
      }

      #[inline]
      #[must_use]
      pub fn from_array(a: [T; $n]) -> Self {
        let [$($field),+] = a;
        Self { $($field),+ }
      }

      #[inline]
      #[must_use]
      pub fn to_array(self) -> [T; $n] {
        [$(self.$field),+]
      }

      /// Apply `f` to every component.
      #[inline]
      #[must_use]
      pub fn map(self, mut f: impl FnMut(T) -> T) -> Self {
        Self { $($field: f(self.$field)),+ }
      }

      #[inline]
      #[must_use]
      fn zip(self, other: Self, mut f: impl FnMut(T, T) -> T) -> Self {
        Self { $($field: f(self.$field, other.$field)),+ }
      }

      #[inline]
      #[must_use]
      pub fn dot(self, other: Self) -> T {
        let mut acc = T::ZERO;
        $(acc += self.$field * other.$field;)+
        acc
      }

      #[inline]
      #[must_use]
      pub fn length_squared(self) -> T {
        self.dot(self)
      }

      #[inline]
      #[must_use]
      pub fn length(self) -> T {
        self.length_squared().sqrt()
      }

      #[inline]
      #[must_use]
      pub fn distance(self, other: Self) -> T {
        (self - other).length()
      }

      /// Unit vector in the same direction.
      ///
      /// Zero-length input gives non-finite components; use
      /// [`try_normalize`](Self::try_normalize) when that can happen.
      #[inline]
      #[must_use]
      pub fn normalize(self) -> Self {
        self * self.length_squared().rcp_sqrt()
      }

      /// Unit vector, or `None` for zero-length or non-finite input.
      #[inline]
      #[must_use]
      pub fn try_normalize(self) -> Option<Self> {
        let len2 = self.length_squared();
        if len2 > T::ZERO && len2 < T::INFINITY {
          Some(self * len2.rcp_sqrt())
        } else {
          None
        }
      }

      /// `self + (other - self) * t`.
      #[inline]
      #[must_use]
      pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
      }

      #[inline]
      #[must_use]
      pub fn abs(self) -> Self {
        self.map(T::abs)
      }

      #[inline]
      #[must_use]
      pub fn min(self, other: Self) -> Self {
        self.zip(other, T::min)
      }

      #[inline]
      #[must_use]
      pub fn max(self, other: Self) -> Self {
        self.zip(other, T::max)
      }

      /// Largest absolute componentwise difference.
      #[inline]
      #[must_use]
      pub fn max_abs_diff(self, other: Self) -> T {
        let d = (self - other).abs();
        let mut m = T::ZERO;
        $(m = m.max(d.$field);)+
        m
      }
    }

    impl<T: Element> core::fmt::Debug for $name<T> {
      fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple(stringify!($name))$(.field(&self.$field))+.finish()
      }
    }

    impl<T: Element> From<[T; $n]> for $name<T> {
      #[inline]
      fn from(a: [T; $n]) -> Self {
        Self::from_array(a)
      }
    }

    impl<T: Element> From<$name<T>> for [T; $n] {
      #[inline]
      fn from(v: $name<T>) -> Self {
        v.to_array()
      }
    }

    impl<T: Element> core::ops::Index<usize> for $name<T> {
      type Output = T;

      #[inline]
      fn index(&self, i: usize) -> &T {
        [$(&self.$field),+][i]
      }
    }

    impl<T: Element> core::ops::Neg for $name<T> {
      type Output = Self;

      #[inline]
      fn neg(self) -> Self {
        self.map(|c| -c)
      }
    }

    impl_vector_op!($name, Add::add, AddAssign::add_assign);
    impl_vector_op!($name, Sub::sub, SubAssign::sub_assign);
    impl_vector_op!($name, Mul::mul, MulAssign::mul_assign);
    impl_vector_op!($name, Div::div, DivAssign::div_assign);
  };
}

/// Componentwise `vector ∘ vector` and `vector ∘ scalar`, plus the assign forms.
macro_rules! impl_vector_op {
  ($name:ident, $op:ident :: $method:ident, $assign:ident :: $assign_method:ident) => {
    impl<T: Element> core::ops::$op for $name<T> {
      type Output = Self;

      #[inline]
      fn $method(self, rhs: Self) -> Self {
        self.zip(rhs, core::ops::$op::$method)
      }
    }

    impl<T: Element> core::ops::$op<T> for $name<T> {
      type Output = Self;

      #[inline]
      fn $method(self, rhs: T) -> Self {
        self.map(|c| core::ops::$op::$method(c, rhs))
      }
    }

    impl<T: Element> core::ops::$assign for $name<T> {
      #[inline]
      fn $assign_method(&mut self, rhs: Self) {
        *self = core::ops::$op::$method(*self, rhs);
      }
    }

    impl<T: Element> core::ops::$assign<T> for $name<T> {
      #[inline]
      fn $assign_method(&mut self, rhs: T) {
        *self = core::ops::$op::$method(*self, rhs);
      }
    }
  };
}

define_vector!(
  /// Two-component vector.
  Vec2, 2, { x, y }
);
define_vector!(
  /// Three-component vector.
  Vec3, 3, { x, y, z }
);
define_vector!(
  /// Four-component vector.
  Vec4, 4, { x, y, z, w }
);

impl<T: Element> Vec2<T> {
  pub const X: Self = Self::new(T::ONE, T::ZERO);
  pub const Y: Self = Self::new(T::ZERO, T::ONE);

  /// Counter-clockwise perpendicular, `(-y, x)`.
  #[inline]
  #[must_use]
  pub fn perp(self) -> Self {
    Self::new(-self.y, self.x)
  }

  /// Polar angle in `(-π, π]`, measured counter-clockwise from [`Vec2::X`].
  #[inline]
  #[must_use]
  pub fn angle(self) -> T {
    self.y.atan2(self.x)
  }

  /// z component of the 3-D cross product of `self` and `other`.
  #[inline]
  #[must_use]
  pub fn perp_dot(self, other: Self) -> T {
    self.x * other.y - self.y * other.x
  }

  #[inline]
  #[must_use]
  pub fn extend(self, z: T) -> Vec3<T> {
    Vec3::new(self.x, self.y, z)
  }
}

impl<T: Element> Vec3<T> {
  pub const X: Self = Self::new(T::ONE, T::ZERO, T::ZERO);
  pub const Y: Self = Self::new(T::ZERO, T::ONE, T::ZERO);
  pub const Z: Self = Self::new(T::ZERO, T::ZERO, T::ONE);

  /// Right-handed cross product.
  #[inline]
  #[must_use]
  pub fn cross(self, other: Self) -> Self {
    Self::new(
      self.y * other.z - self.z * other.y,
      self.z * other.x - self.x * other.z,
      self.x * other.y - self.y * other.x,
    )
  }

  /// Unsigned angle in `[0, π]` between two vectors of any length.
  ///
  /// `atan2(|a × b|, a · b)` keeps full precision near 0 and π, where
  /// `acos` of the normalized dot product flattens out.
  #[inline]
  #[must_use]
  pub fn angle_between(self, other: Self) -> T {
    self.cross(other).length().atan2(self.dot(other))
  }

  #[inline]
  #[must_use]
  pub fn extend(self, w: T) -> Vec4<T> {
    Vec4::new(self.x, self.y, self.z, w)
  }

  #[inline]
  #[must_use]
  pub fn truncate(self) -> Vec2<T> {
    Vec2::new(self.x, self.y)
  }
}

impl<T: Element> Vec4<T> {
  pub const X: Self = Self::new(T::ONE, T::ZERO, T::ZERO, T::ZERO);
  pub const Y: Self = Self::new(T::ZERO, T::ONE, T::ZERO, T::ZERO);
  pub const Z: Self = Self::new(T::ZERO, T::ZERO, T::ONE, T::ZERO);
  pub const W: Self = Self::new(T::ZERO, T::ZERO, T::ZERO, T::ONE);

  #[inline]
  #[must_use]
  pub fn truncate(self) -> Vec3<T> {
    Vec3::new(self.x, self.y, self.z)
  }
}
