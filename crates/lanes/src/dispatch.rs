//! Compile-time backend selection.
//!
//! Exactly one backend is "current" for a build:
//!
//! | Condition | Backend |
//! |-----------|---------|
//! | `feature = "force-scalar"` | [`Scalar`](crate::scalar::Scalar) |
//! | x86_64 with `target_feature = "avx"` | [`Avx`](crate::x86_64::avx::Avx) |
//! | x86_64 otherwise | [`Sse`](crate::x86_64::sse::Sse) |
//! | any other architecture | [`Scalar`](crate::scalar::Scalar) |
//!
//! The choice is made from `cfg` alone. Nothing here reads the environment
//! or executes CPUID; a binary built with `+avx` and run on a CPU without AVX
//! faults on the first AVX instruction, which is the caller's contract.

use crate::{
  backend::{Backend, BackendKind},
  element::Element,
  traits::LaneTraits,
};

#[cfg(all(target_arch = "x86_64", target_feature = "avx", not(feature = "force-scalar")))]
pub type Current = crate::x86_64::avx::Avx;

#[cfg(all(target_arch = "x86_64", not(target_feature = "avx"), not(feature = "force-scalar")))]
pub type Current = crate::x86_64::sse::Sse;

#[cfg(any(not(target_arch = "x86_64"), feature = "force-scalar"))]
pub type Current = crate::scalar::Scalar;

/// Identity of [`Current`].
pub const BACKEND: BackendKind = <Current as Backend>::KIND;

/// Numeric lane of element `T` on the current backend.
pub type Lane<T> = <Current as LaneTraits<T>>::Lane;
/// Integer companion of [`Lane<T>`].
pub type Int<T> = <Current as LaneTraits<T>>::Int;
/// Boolean companion of [`Lane<T>`].
pub type Mask<T> = <Current as LaneTraits<T>>::Mask;

pub type F32Lane = Lane<f32>;
pub type F64Lane = Lane<f64>;
pub type I32Lane = Int<f32>;
pub type I64Lane = Int<f64>;
pub type M32Lane = Mask<f32>;
pub type M64Lane = Mask<f64>;

/// Lane width of element `T` on the current backend.
#[inline]
#[must_use]
pub const fn width<T: Element>() -> usize
where
  Current: LaneTraits<T>,
{
  <Current as LaneTraits<T>>::WIDTH
}

/// Alignment the aligned load/store entry points require for element `T`.
#[inline]
#[must_use]
pub const fn align<T: Element>() -> usize
where
  Current: LaneTraits<T>,
{
  <Current as LaneTraits<T>>::ALIGN
}
