//! Fixed-width SIMD lanes with build-time backend selection.
//!
//! This crate presents one arithmetic/comparison/select/reduction API over
//! several hardware backends. Every backend provides the same triple of lane
//! types for each element width:
//!
//! | Backend | `f32` lane | `f64` lane | Alignment | Requires |
//! |---------|-----------|-----------|-----------|----------|
//! | [`Avx`](x86_64::avx::Avx) | `F32x8` | `F64x4` | 32 | `target_feature = "avx"` |
//! | [`Sse`](x86_64::sse::Sse) | `F32x4` | `F64x2` | 16 | x86_64 (SSE2 baseline) |
//! | [`Scalar`](scalar::Scalar) | `F32x4` | `F64x2` | 16 | nothing |
//!
//! Each numeric lane comes with a companion integer lane ([`IntLane`]) of the
//! same element width and a boolean lane ([`BoolLane`]) whose lanes are
//! always all-bits-set or all-bits-clear.
//!
//! # Dispatch
//!
//! [`dispatch`] aliases the "current" lane types to exactly one backend,
//! chosen from `cfg(target_feature)` at compile time: AVX, else SSE2, else
//! the scalar fallback. Nothing is probed at runtime; the `platform` crate's
//! CPU probe is purely diagnostic and never feeds back into this choice.
//!
//! ```
//! use lanes::{BoolLane, FloatLane, dispatch::F32Lane};
//!
//! let a = F32Lane::splat(1.5);
//! let b = F32Lane::splat(2.0);
//! assert_eq!((a * b).sum(), 3.0 * F32Lane::WIDTH as f32);
//! assert!(a.lanes_lt(b).all());
//! ```
//!
//! # Testing every backend
//!
//! The SSE2 and scalar modules are always compiled on x86_64, so a default
//! `cargo test` cross-checks both. The AVX module only exists under
//! `target_feature = "avx"`, so it needs its own pass:
//!
//! ```text
//! cargo test --workspace --features lanes/force-scalar
//! cargo test --workspace
//! RUSTFLAGS='-C target-feature=+avx' cargo test --workspace
//! ```
//!
//! `scripts/test-backends.sh` runs all three.
//!
//! # Preconditions
//!
//! The lane layer has no error channel. Misaligned pointers passed to the
//! aligned load/store entry points, out-of-range lane indices and invalid
//! operands (`sqrt(-1)`, `rcp(0)`) are caller preconditions: debug builds
//! assert where cheap, release builds produce the native IEEE result.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

#[macro_use]
mod macros;

pub mod align;
pub mod backend;
pub mod dispatch;
pub mod element;
pub mod scalar;
mod special;
pub mod traits;

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

pub use align::Aligned;
pub use backend::{Backend, BackendKind};
pub use element::Element;
pub use traits::{BoolLane, FloatLane, IntLane, LaneTraits};
