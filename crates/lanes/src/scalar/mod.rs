//! Portable backend: plain arrays processed one element at a time.
//!
//! Compiled on every target. It mirrors the 128-bit layout of the SSE2
//! backend (`F32x4`, `F64x2`) and serves as the reference the hardware
//! backends are cross-checked against.

#![allow(unsafe_code)]

mod float;
mod int;
mod mask;

pub use float::{F32x4, F64x2};
pub use int::{I32x4, I64x2};
pub use mask::{M32x4, M64x2};

use crate::backend::{Backend, BackendKind};

/// Scalar backend marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scalar;

impl Backend for Scalar {
  const KIND: BackendKind = BackendKind::Scalar;
}

impl_lane_traits!(Scalar {
  align: 16,
  registers: 0,
  f32: (F32x4, I32x4, M32x4, 4),
  f64: (F64x2, I64x2, M64x2, 2),
});
