//! SSE2 backend: 128-bit lanes.
//!
//! | Element | Numeric | Integer | Mask |
//! |---------|---------|---------|------|
//! | `f32` | [`F32x4`] (`__m128`) | [`I32x4`] | [`M32x4`] (`__m128`) |
//! | `f64` | [`F64x2`] (`__m128d`) | [`I64x2`] | [`M64x2`] (`__m128d`) |
//!
//! Only SSE2 instructions are used, so this backend runs on every x86_64 CPU.
//! `round_to_nearest` uses the `2^23`/`2^52` add-subtract trick in place of
//! SSE4.1 `roundps`.

#![allow(unsafe_code)]
#![allow(unused_unsafe)]

mod float;
mod int;
mod mask;

pub use float::{F32x4, F64x2};
pub use int::{I32x4, I64x2};
pub use mask::{M32x4, M64x2};

use crate::backend::{Backend, BackendKind};

/// SSE2 backend marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sse;

impl Backend for Sse {
  const KIND: BackendKind = BackendKind::Sse;
}

impl_lane_traits!(Sse {
  align: 16,
  registers: 16,
  f32: (F32x4, I32x4, M32x4, 4),
  f64: (F64x2, I64x2, M64x2, 2),
});
