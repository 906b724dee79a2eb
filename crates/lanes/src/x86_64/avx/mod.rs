//! AVX backend: 256-bit lanes.
//!
//! | Element | Numeric | Integer | Mask |
//! |---------|---------|---------|------|
//! | `f32` | [`F32x8`] (`__m256`) | [`I32x8`] | [`M32x8`] (`__m256`) |
//! | `f64` | [`F64x4`] (`__m256d`) | [`I64x4`] | [`M64x4`] (`__m256d`) |
//!
//! AVX1 has no 256-bit integer arithmetic. Integer lanes are stored as
//! `__m256i` and every integer op runs on the two SSE2 halves.

#![allow(unsafe_code)]
#![allow(unused_unsafe)]

mod float;
mod int;
mod mask;

pub use float::{F32x8, F64x4};
pub use int::{I32x8, I64x4};
pub use mask::{M32x8, M64x4};

use crate::backend::{Backend, BackendKind};

/// AVX backend marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Avx;

impl Backend for Avx {
  const KIND: BackendKind = BackendKind::Avx;
}

impl_lane_traits!(Avx {
  align: 32,
  registers: 16,
  f32: (F32x8, I32x8, M32x8, 8),
  f64: (F64x4, I64x4, M64x4, 4),
});
