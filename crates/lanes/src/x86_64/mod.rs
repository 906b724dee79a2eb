//! x86_64 backends.
//!
//! - [`sse`]: SSE2, part of the x86_64 baseline, always compiled here.
//! - [`avx`]: AVX, compiled only when the build enables `target_feature = "avx"`
//!   (`-C target-feature=+avx` or a `-C target-cpu` that implies it).
//!
//! Safety:
//! - These modules are allowed to use `unsafe` for ISA intrinsics.
//! - Every intrinsic they call belongs to a target feature the build enables
//!   statically, so no call site can reach an unsupported instruction.

pub mod sse;

#[cfg(target_feature = "avx")]
pub mod avx;
