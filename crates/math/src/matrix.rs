//! Column-major 3×3 and 4×4 matrices.
//!
//! `m.cols[j]` is column `j`, so `m * v` is `Σ cols[j] * v[j]`.

use lanes::Element;

use crate::vector::{Vec3, Vec4};

// ─────────────────────────────────────────────────────────────────────────────
// Mat3
// ─────────────────────────────────────────────────────────────────────────────

/// 3×3 matrix, stored as three columns.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Mat3<T: Element = f32> {
  pub cols: [Vec3<T>; 3],
}

impl<T: Element> Default for Mat3<T> {
  #[inline]
  fn default() -> Self {
    Self::IDENTITY
  }
}

impl<T: Element> Mat3<T> {
  pub const ZERO: Self = Self {
    cols: [Vec3::ZERO; 3],
  };

  pub const IDENTITY: Self = Self {
    cols: [Vec3::X, Vec3::Y, Vec3::Z],
  };

  #[inline]
  #[must_use]
  pub const fn from_cols(x: Vec3<T>, y: Vec3<T>, z: Vec3<T>) -> Self {
    Self { cols: [x, y, z] }
  }

  /// Build from rows, as the matrix is usually written on paper.
  #[inline]
  #[must_use]
  pub fn from_rows(r0: Vec3<T>, r1: Vec3<T>, r2: Vec3<T>) -> Self {
    Self::from_cols(r0, r1, r2).transpose()
  }

  #[inline]
  #[must_use]
  pub fn from_diagonal(d: Vec3<T>) -> Self {
    Self::from_cols(Vec3::X * d.x, Vec3::Y * d.y, Vec3::Z * d.z)
  }

  /// Element at `row`, `col`.
  #[inline]
  #[must_use]
  pub fn get(&self, row: usize, col: usize) -> T {
    self.cols[col][row]
  }

  #[inline]
  #[must_use]
  pub fn row(&self, i: usize) -> Vec3<T> {
    Vec3::new(self.cols[0][i], self.cols[1][i], self.cols[2][i])
  }

  #[inline]
  #[must_use]
  pub fn transpose(&self) -> Self {
    Self::from_cols(self.row(0), self.row(1), self.row(2))
  }

  #[inline]
  #[must_use]
  pub fn mul_vec3(&self, v: Vec3<T>) -> Vec3<T> {
    self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
  }

  #[inline]
  #[must_use]
  pub fn mul_mat3(&self, rhs: &Self) -> Self {
    Self::from_cols(self.mul_vec3(rhs.cols[0]), self.mul_vec3(rhs.cols[1]), self.mul_vec3(rhs.cols[2]))
  }

  /// Scalar triple product of the columns.
  #[inline]
  #[must_use]
  pub fn determinant(&self) -> T {
    self.cols[2].dot(self.cols[0].cross(self.cols[1]))
  }

  /// Inverse via the adjugate, or `None` when the determinant is zero or NaN.
  #[must_use]
  pub fn inverse(&self) -> Option<Self> {
    let [a, b, c] = self.cols;
    let r0 = b.cross(c);
    let r1 = c.cross(a);
    let r2 = a.cross(b);
    let det = c.dot(r2);
    if det == T::ZERO || det.is_nan() {
      return None;
    }
    let inv_det = det.rcp();
    Some(Self::from_rows(r0 * inv_det, r1 * inv_det, r2 * inv_det))
  }

  /// Largest absolute elementwise difference.
  #[must_use]
  pub fn max_abs_diff(&self, other: &Self) -> T {
    (0..3).fold(T::ZERO, |m, j| m.max(self.cols[j].max_abs_diff(other.cols[j])))
  }
}

impl<T: Element> core::ops::Mul for Mat3<T> {
  type Output = Self;

  #[inline]
  fn mul(self, rhs: Self) -> Self {
    self.mul_mat3(&rhs)
  }
}

impl<T: Element> core::ops::Mul<Vec3<T>> for Mat3<T> {
  type Output = Vec3<T>;

  #[inline]
  fn mul(self, rhs: Vec3<T>) -> Vec3<T> {
    self.mul_vec3(rhs)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mat4
// ─────────────────────────────────────────────────────────────────────────────

/// 4×4 matrix, stored as four columns.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Mat4<T: Element = f32> {
  pub cols: [Vec4<T>; 4],
}

impl<T: Element> Default for Mat4<T> {
  #[inline]
  fn default() -> Self {
    Self::IDENTITY
  }
}

impl<T: Element> Mat4<T> {
  pub const ZERO: Self = Self {
    cols: [Vec4::ZERO; 4],
  };

  pub const IDENTITY: Self = Self {
    cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
  };

  #[inline]
  #[must_use]
  pub const fn from_cols(x: Vec4<T>, y: Vec4<T>, z: Vec4<T>, w: Vec4<T>) -> Self {
    Self { cols: [x, y, z, w] }
  }

  #[inline]
  #[must_use]
  pub fn from_rows(r0: Vec4<T>, r1: Vec4<T>, r2: Vec4<T>, r3: Vec4<T>) -> Self {
    Self::from_cols(r0, r1, r2, r3).transpose()
  }

  /// Affine transform: `m` in the upper-left block, `t` in the last column.
  #[inline]
  #[must_use]
  pub fn from_mat3_translation(m: Mat3<T>, t: Vec3<T>) -> Self {
    Self::from_cols(
      m.cols[0].extend(T::ZERO),
      m.cols[1].extend(T::ZERO),
      m.cols[2].extend(T::ZERO),
      t.extend(T::ONE),
    )
  }

  #[inline]
  #[must_use]
  pub fn from_translation(t: Vec3<T>) -> Self {
    Self::from_mat3_translation(Mat3::IDENTITY, t)
  }

  #[inline]
  #[must_use]
  pub fn from_scale(s: Vec3<T>) -> Self {
    Self::from_mat3_translation(Mat3::from_diagonal(s), Vec3::ZERO)
  }

  #[inline]
  #[must_use]
  pub fn get(&self, row: usize, col: usize) -> T {
    self.cols[col][row]
  }

  #[inline]
  #[must_use]
  pub fn row(&self, i: usize) -> Vec4<T> {
    Vec4::new(self.cols[0][i], self.cols[1][i], self.cols[2][i], self.cols[3][i])
  }

  #[inline]
  #[must_use]
  pub fn transpose(&self) -> Self {
    Self::from_cols(self.row(0), self.row(1), self.row(2), self.row(3))
  }

  #[inline]
  #[must_use]
  pub fn mul_vec4(&self, v: Vec4<T>) -> Vec4<T> {
    self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
  }

  #[inline]
  #[must_use]
  pub fn mul_mat4(&self, rhs: &Self) -> Self {
    Self::from_cols(
      self.mul_vec4(rhs.cols[0]),
      self.mul_vec4(rhs.cols[1]),
      self.mul_vec4(rhs.cols[2]),
      self.mul_vec4(rhs.cols[3]),
    )
  }

  /// Transform a point (`w = 1`, translation applies).
  #[inline]
  #[must_use]
  pub fn transform_point3(&self, p: Vec3<T>) -> Vec3<T> {
    self.mul_vec4(p.extend(T::ONE)).truncate()
  }

  /// Transform a direction (`w = 0`, translation ignored).
  #[inline]
  #[must_use]
  pub fn transform_vector3(&self, v: Vec3<T>) -> Vec3<T> {
    self.mul_vec4(v.extend(T::ZERO)).truncate()
  }

  /// The twelve 2×2 minors the determinant and inverse share.
  ///
  /// `s` spans rows 0-1 and `c` rows 2-3, each over the six column pairs.
  #[inline]
  fn minors(&self) -> ([T; 6], [T; 6]) {
    let e = |r: usize, c: usize| self.cols[c][r];
    let s = [
      e(0, 0) * e(1, 1) - e(1, 0) * e(0, 1),
      e(0, 0) * e(1, 2) - e(1, 0) * e(0, 2),
      e(0, 0) * e(1, 3) - e(1, 0) * e(0, 3),
      e(0, 1) * e(1, 2) - e(1, 1) * e(0, 2),
      e(0, 1) * e(1, 3) - e(1, 1) * e(0, 3),
      e(0, 2) * e(1, 3) - e(1, 2) * e(0, 3),
    ];
    let c = [
      e(2, 0) * e(3, 1) - e(3, 0) * e(2, 1),
      e(2, 0) * e(3, 2) - e(3, 0) * e(2, 2),
      e(2, 0) * e(3, 3) - e(3, 0) * e(2, 3),
      e(2, 1) * e(3, 2) - e(3, 1) * e(2, 2),
      e(2, 1) * e(3, 3) - e(3, 1) * e(2, 3),
      e(2, 2) * e(3, 3) - e(3, 2) * e(2, 3),
    ];
    (s, c)
  }

  #[inline]
  fn det_from_minors(s: &[T; 6], c: &[T; 6]) -> T {
    s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
  }

  /// Laplace expansion over the 2×2 minors of rows 0-1 and 2-3.
  #[must_use]
  pub fn determinant(&self) -> T {
    let (s, c) = self.minors();
    Self::det_from_minors(&s, &c)
  }

  /// Inverse via the adjugate, or `None` when the determinant is zero or NaN.
  #[must_use]
  pub fn inverse(&self) -> Option<Self> {
    let (s, c) = self.minors();
    let det = Self::det_from_minors(&s, &c);
    if det == T::ZERO || det.is_nan() {
      return None;
    }
    let e = |r: usize, col: usize| self.cols[col][r];

    let r0 = Vec4::new(
      e(1, 1) * c[5] - e(1, 2) * c[4] + e(1, 3) * c[3],
      -e(0, 1) * c[5] + e(0, 2) * c[4] - e(0, 3) * c[3],
      e(3, 1) * s[5] - e(3, 2) * s[4] + e(3, 3) * s[3],
      -e(2, 1) * s[5] + e(2, 2) * s[4] - e(2, 3) * s[3],
    );
    let r1 = Vec4::new(
      -e(1, 0) * c[5] + e(1, 2) * c[2] - e(1, 3) * c[1],
      e(0, 0) * c[5] - e(0, 2) * c[2] + e(0, 3) * c[1],
      -e(3, 0) * s[5] + e(3, 2) * s[2] - e(3, 3) * s[1],
      e(2, 0) * s[5] - e(2, 2) * s[2] + e(2, 3) * s[1],
    );
    let r2 = Vec4::new(
      e(1, 0) * c[4] - e(1, 1) * c[2] + e(1, 3) * c[0],
      -e(0, 0) * c[4] + e(0, 1) * c[2] - e(0, 3) * c[0],
      e(3, 0) * s[4] - e(3, 1) * s[2] + e(3, 3) * s[0],
      -e(2, 0) * s[4] + e(2, 1) * s[2] - e(2, 3) * s[0],
    );
    let r3 = Vec4::new(
      -e(1, 0) * c[3] + e(1, 1) * c[1] - e(1, 2) * c[0],
      e(0, 0) * c[3] - e(0, 1) * c[1] + e(0, 2) * c[0],
      -e(3, 0) * s[3] + e(3, 1) * s[1] - e(3, 2) * s[0],
      e(2, 0) * s[3] - e(2, 1) * s[1] + e(2, 2) * s[0],
    );
    let inv = det.rcp();
    Some(Self::from_rows(r0 * inv, r1 * inv, r2 * inv, r3 * inv))
  }

  /// Largest absolute elementwise difference.
  #[must_use]
  pub fn max_abs_diff(&self, other: &Self) -> T {
    (0..4).fold(T::ZERO, |m, j| m.max(self.cols[j].max_abs_diff(other.cols[j])))
  }
}

impl<T: Element> core::ops::Mul for Mat4<T> {
  type Output = Self;

  #[inline]
  fn mul(self, rhs: Self) -> Self {
    self.mul_mat4(&rhs)
  }
}

impl<T: Element> core::ops::Mul<Vec4<T>> for Mat4<T> {
  type Output = Vec4<T>;

  #[inline]
  fn mul(self, rhs: Vec4<T>) -> Vec4<T> {
    self.mul_vec4(rhs)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample3() -> Mat3<f64> {
    Mat3::from_rows(Vec3::new(2.0, 0.0, 1.0), Vec3::new(1.0, 3.0, 2.0), Vec3::new(1.0, 1.0, 2.0))
  }

  fn sample4() -> Mat4<f64> {
    Mat4::from_rows(
      Vec4::new(4.0, 0.0, 0.0, 1.0),
      Vec4::new(0.0, 2.0, 1.0, 0.0),
      Vec4::new(1.0, 0.0, 3.0, 2.0),
      Vec4::new(0.0, 1.0, 0.0, 1.0),
    )
  }

  #[test]
  fn layout_is_column_major() {
    let m = sample3();
    assert_eq!(m.get(1, 0), 1.0);
    assert_eq!(m.cols[0], Vec3::new(2.0, 1.0, 1.0));
    assert_eq!(m.row(0), Vec3::new(2.0, 0.0, 1.0));
    assert_eq!(m.transpose().transpose(), m);
  }

  #[test]
  fn identity_is_neutral() {
    let m = sample4();
    assert_eq!(Mat4::IDENTITY * m, m);
    assert_eq!(m * Mat4::IDENTITY, m);
    assert_eq!(Mat3::<f32>::default(), Mat3::IDENTITY);
  }

  #[test]
  fn mat3_mul_vector() {
    let v = sample3() * Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(v, Vec3::new(5.0, 13.0, 9.0));
  }

  #[test]
  fn determinants() {
    assert_eq!(sample3().determinant(), 6.0);
    assert_eq!(Mat3::<f64>::IDENTITY.determinant(), 1.0);
    assert_eq!(Mat4::<f64>::IDENTITY.determinant(), 1.0);
    assert_eq!(Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0)).determinant(), 24.0);
    assert_eq!(sample4().determinant(), sample4().transpose().determinant());
  }

  #[test]
  fn inverse_round_trips() {
    let m = sample3();
    let inv = m.inverse().expect("invertible");
    assert!((m * inv).max_abs_diff(&Mat3::IDENTITY) < 1e-12);

    let m = sample4();
    let inv = m.inverse().expect("invertible");
    assert!((m * inv).max_abs_diff(&Mat4::IDENTITY) < 1e-12);
    assert!((inv * m).max_abs_diff(&Mat4::IDENTITY) < 1e-12);
  }

  #[test]
  fn singular_has_no_inverse() {
    let m = Mat3::from_cols(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0), Vec3::Z);
    assert_eq!(m.inverse(), None);
    assert_eq!(Mat4::<f32>::ZERO.inverse(), None);
    let mut nan = Mat4::<f32>::IDENTITY;
    nan.cols[2].z = f32::NAN;
    assert_eq!(nan.inverse(), None);
  }

  #[test]
  fn affine_transforms() {
    let t = Mat4::from_translation(Vec3::new(1.0f32, 2.0, 3.0));
    let p = Vec3::new(1.0, 1.0, 1.0);
    assert_eq!(t.transform_point3(p), Vec3::new(2.0, 3.0, 4.0));
    assert_eq!(t.transform_vector3(p), p);
    let back = t.inverse().expect("translation is invertible");
    assert_eq!(back.transform_point3(Vec3::new(2.0, 3.0, 4.0)), p);
  }
}
