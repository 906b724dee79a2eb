//! Rotation quaternions.

use lanes::Element;

use crate::{matrix::Mat3, vector::Vec3};

/// Quaternion `w + xi + yj + zk`.
///
/// Rotation helpers assume unit length. [`Quat::from_axis_angle`] and
/// [`Quat::slerp`] produce unit quaternions from unit inputs; products of
/// unit quaternions drift slowly and can be renormalized with
/// [`Quat::normalize`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Quat<T: Element = f32> {
  pub x: T,
  pub y: T,
  pub z: T,
  pub w: T,
}

impl<T: Element> Default for Quat<T> {
  #[inline]
  fn default() -> Self {
    Self::IDENTITY
  }
}

/// Cosine above which [`Quat::slerp`] falls back to normalized lerp.
const SLERP_LINEAR_THRESHOLD: f64 = 0.9995;

impl<T: Element> Quat<T> {
  pub const IDENTITY: Self = Self::from_xyzw(T::ZERO, T::ZERO, T::ZERO, T::ONE);

  #[inline]
  #[must_use]
  pub const fn from_xyzw(x: T, y: T, z: T, w: T) -> Self {
    Self { x, y, z, w }
  }

  /// Rotation of `angle` radians about the unit vector `axis`.
  #[inline]
  #[must_use]
  pub fn from_axis_angle(axis: Vec3<T>, angle: T) -> Self {
    let half = angle * T::HALF;
    let (s, c) = (half.sin(), half.cos());
    Self::from_vec_w(axis * s, c)
  }

  #[inline]
  fn from_vec_w(v: Vec3<T>, w: T) -> Self {
    Self::from_xyzw(v.x, v.y, v.z, w)
  }

  /// Vector part `(x, y, z)`.
  #[inline]
  #[must_use]
  pub fn xyz(self) -> Vec3<T> {
    Vec3::new(self.x, self.y, self.z)
  }

  #[inline]
  #[must_use]
  pub fn dot(self, other: Self) -> T {
    self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
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
  pub fn normalize(self) -> Self {
    self.scale(self.length_squared().rcp_sqrt())
  }

  #[inline]
  fn scale(self, s: T) -> Self {
    Self::from_xyzw(self.x * s, self.y * s, self.z * s, self.w * s)
  }

  /// `(-x, -y, -z, w)`; the inverse rotation for unit quaternions.
  #[inline]
  #[must_use]
  pub fn conjugate(self) -> Self {
    Self::from_xyzw(-self.x, -self.y, -self.z, self.w)
  }

  /// Multiplicative inverse, or `None` for a zero quaternion.
  #[inline]
  #[must_use]
  pub fn inverse(self) -> Option<Self> {
    let n = self.length_squared();
    if n == T::ZERO || n.is_nan() {
      return None;
    }
    Some(self.conjugate().scale(n.rcp()))
  }

  /// Hamilton product; `a.mul_quat(b)` applies `b` first, then `a`.
  #[inline]
  #[must_use]
  pub fn mul_quat(self, rhs: Self) -> Self {
    let (a, b) = (self, rhs);
    Self::from_xyzw(
      a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
      a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
      a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
      a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
    )
  }

  /// Rotate `v` by this unit quaternion.
  ///
  /// Uses `v + 2w(q × v) + 2 q × (q × v)`, which skips building `q v q*`.
  #[inline]
  #[must_use]
  pub fn rotate(self, v: Vec3<T>) -> Vec3<T> {
    let q = self.xyz();
    let t = q.cross(v) * T::TWO;
    v + t * self.w + q.cross(t)
  }

  /// Rotation matrix of this unit quaternion.
  #[must_use]
  pub fn to_mat3(self) -> Mat3<T> {
    let Self { x, y, z, w } = self;
    let (x2, y2, z2) = (x + x, y + y, z + z);
    let (xx, xy, xz) = (x * x2, x * y2, x * z2);
    let (yy, yz, zz) = (y * y2, y * z2, z * z2);
    let (wx, wy, wz) = (w * x2, w * y2, w * z2);
    Mat3::from_cols(
      Vec3::new(T::ONE - (yy + zz), xy + wz, xz - wy),
      Vec3::new(xy - wz, T::ONE - (xx + zz), yz + wx),
      Vec3::new(xz + wy, yz - wx, T::ONE - (xx + yy)),
    )
  }

  /// Spherical interpolation along the shorter arc.
  ///
  /// Nearly parallel inputs use normalized lerp, where the `sin` ratio loses
  /// precision.
  #[must_use]
  pub fn slerp(self, end: Self, t: T) -> Self {
    let mut cos = self.dot(end);
    let mut end = end;
    if cos < T::ZERO {
      cos = -cos;
      end = end.scale(-T::ONE);
    }

    if cos > T::from_f64(SLERP_LINEAR_THRESHOLD) {
      let lerp = Self::from_xyzw(
        self.x + (end.x - self.x) * t,
        self.y + (end.y - self.y) * t,
        self.z + (end.z - self.z) * t,
        self.w + (end.w - self.w) * t,
      );
      return lerp.normalize();
    }

    let theta = cos.acos();
    let inv_sin = theta.sin().rcp();
    let a = ((T::ONE - t) * theta).sin() * inv_sin;
    let b = (t * theta).sin() * inv_sin;
    Self::from_xyzw(
      self.x * a + end.x * b,
      self.y * a + end.y * b,
      self.z * a + end.z * b,
      self.w * a + end.w * b,
    )
  }

  /// Angle in radians between two unit rotations.
  #[inline]
  #[must_use]
  pub fn angle_between(self, other: Self) -> T {
    let d = self.dot(other).abs().clamp(T::ZERO, T::ONE);
    T::TWO * d.acos()
  }
}

impl<T: Element> core::ops::Mul for Quat<T> {
  type Output = Self;

  #[inline]
  fn mul(self, rhs: Self) -> Self {
    self.mul_quat(rhs)
  }
}

impl<T: Element> core::ops::Mul<Vec3<T>> for Quat<T> {
  type Output = Vec3<T>;

  #[inline]
  fn mul(self, rhs: Vec3<T>) -> Vec3<T> {
    self.rotate(rhs)
  }
}

#[cfg(test)]
mod tests {
  use core::f64::consts::{FRAC_PI_2, PI};

  use super::*;

  const TOL: f64 = 1e-12;

  fn close(a: Vec3<f64>, b: Vec3<f64>) -> bool {
    a.max_abs_diff(b) < TOL
  }

  #[test]
  fn identity_leaves_vectors_alone() {
    let v = Vec3::new(1.0, -2.0, 3.0);
    assert_eq!(Quat::IDENTITY.rotate(v), v);
    assert_eq!(Quat::<f64>::IDENTITY.to_mat3(), Mat3::IDENTITY);
    assert_eq!(Quat::<f32>::default(), Quat::IDENTITY);
  }

  #[test]
  fn quarter_turn_about_z() {
    let q = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
    assert!((q.length() - 1.0).abs() < TOL);
    assert!(close(q * Vec3::X, Vec3::Y));
    assert!(close(q * Vec3::Y, -Vec3::X));
    assert!(close(q.to_mat3() * Vec3::X, Vec3::Y));
  }

  #[test]
  fn composition_order() {
    let rz = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2);
    let rx = Quat::from_axis_angle(Vec3::X, FRAC_PI_2);
    let v = Vec3::new(0.3, -1.2, 2.0);
    assert!(close((rx * rz).rotate(v), rx.rotate(rz.rotate(v))));
    assert!(close(((rx * rz).to_mat3()) * v, rx.to_mat3() * (rz.to_mat3() * v)));
  }

  #[test]
  fn conjugate_undoes_rotation() {
    let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), 1.1);
    let v = Vec3::new(4.0, 5.0, 6.0);
    assert!(close(q.conjugate().rotate(q.rotate(v)), v));
    let inv = q.inverse().expect("unit quaternion");
    assert!((inv.dot(q.conjugate()) - 1.0).abs() < TOL);
    assert_eq!(Quat::from_xyzw(0.0f32, 0.0, 0.0, 0.0).inverse(), None);
  }

  #[test]
  fn normalize_rescales() {
    let q = Quat::from_xyzw(0.0f64, 0.0, 3.0, 4.0).normalize();
    assert!((q.length() - 1.0).abs() < TOL);
    assert!((q.z - 0.6).abs() < TOL);
  }

  #[test]
  fn slerp_endpoints_and_midpoint() {
    let a = Quat::IDENTITY;
    let b = Quat::from_axis_angle(Vec3::Z, PI / 2.0);
    assert!((a.slerp(b, 0.0).dot(a) - 1.0).abs() < TOL);
    assert!((a.slerp(b, 1.0).dot(b) - 1.0).abs() < TOL);

    let mid = a.slerp(b, 0.5);
    let expect = Quat::from_axis_angle(Vec3::Z, PI / 4.0);
    assert!((mid.dot(expect) - 1.0).abs() < TOL);
  }

  #[test]
  fn slerp_takes_short_arc() {
    let a = Quat::from_axis_angle(Vec3::Y, 0.2);
    let b = Quat::from_axis_angle(Vec3::Y, 0.6);
    let flipped = Quat::from_xyzw(-b.x, -b.y, -b.z, -b.w);
    let mid = a.slerp(flipped, 0.5);
    assert!((mid.angle_between(Quat::from_axis_angle(Vec3::Y, 0.4))).abs() < 1e-6);
  }

  #[test]
  fn slerp_near_parallel_stays_unit() {
    let a = Quat::from_axis_angle(Vec3::X, 0.1f32);
    let b = Quat::from_axis_angle(Vec3::X, 0.1001f32);
    let q = a.slerp(b, 0.5);
    assert!((q.length() - 1.0).abs() < 1e-6);
  }
}
