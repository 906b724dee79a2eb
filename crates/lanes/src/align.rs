//! Over-aligned storage for the aligned load/store entry points.

use core::ops::{Deref, DerefMut};

/// Wrapper aligned to 32 bytes, enough for every backend's `ALIGN`.
///
/// ```
/// use lanes::{Aligned, FloatLane, dispatch::F32Lane};
///
/// let buf = Aligned::new([1.0f32; 8]);
/// // SAFETY: 8 elements cover every f32 lane width and the buffer is 32-byte aligned.
/// let v = unsafe { F32Lane::load_aligned(buf.as_ptr()) };
/// assert_eq!(v.extract(0), 1.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C, align(32))]
pub struct Aligned<T>(pub T);

impl<T> Aligned<T> {
  #[inline]
  #[must_use]
  pub const fn new(value: T) -> Self {
    Self(value)
  }

  #[inline]
  #[must_use]
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> Deref for Aligned<T> {
  type Target = T;

  #[inline]
  fn deref(&self) -> &T {
    &self.0
  }
}

impl<T> DerefMut for Aligned<T> {
  #[inline]
  fn deref_mut(&mut self) -> &mut T {
    &mut self.0
  }
}
