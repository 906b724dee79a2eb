//! Fixed-width SIMD lanes, scalar math types and CPU capability probing.
//!
//! `lanekit` re-exports three crates behind features:
//!
//! | Feature | Default | Crate | Contents |
//! |---------|---------|-------|----------|
//! | (always) | Yes | [`lanes`] | Lane types, backends, build-time dispatch |
//! | `math` | Yes | [`math`] | `Vec2`-`Vec4`, `Mat3`, `Mat4`, `Quat` |
//! | `probe` | Yes | [`platform`] | CPUID snapshot, capability set, report |
//! | `tracing` | No | | Debug event when the snapshot is captured |
//! | `cli` | Yes | | The `lanekit-probe` binary |
//! | `force-scalar` | No | | Pin dispatch to the scalar backend |
//!
//! # Quick Start
//!
//! ```
//! use lanekit::{FloatLane, dispatch::F32Lane};
//!
//! let x = F32Lane::splat(0.25);
//! let y = x.mul_add(F32Lane::splat(4.0), F32Lane::splat(1.0));
//! assert_eq!(y.sum(), 2.0 * F32Lane::WIDTH as f32);
//! ```
//!
//! The backend is fixed when the crate is compiled. [`report()`] describes
//! the processor the binary is running on next to that choice, for logs.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub use lanes::{
  Aligned, Backend, BackendKind, BoolLane, Element, FloatLane, IntLane, LaneTraits, dispatch, scalar,
};
#[cfg(target_arch = "x86_64")]
pub use lanes::x86_64;
#[cfg(feature = "math")]
pub use math::{self, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};
#[cfg(feature = "probe")]
pub use platform::{self, Arch, Caps, CpuFeatureSnapshot, OutputFormat, Report};

/// Report for the running processor and the backend this build dispatches to.
#[cfg(feature = "probe")]
#[must_use]
pub fn report() -> Report {
  Report::new(*platform::probe(), dispatch::BACKEND.name())
}

/// Whether `snapshot` can execute the instructions of `backend`.
///
/// A `false` here means the binary was built for a wider ISA than the host
/// offers; the lane layer does not check this itself.
#[cfg(feature = "probe")]
#[must_use]
pub const fn backend_supported(backend: BackendKind, snapshot: &CpuFeatureSnapshot) -> bool {
  match backend {
    BackendKind::Scalar => true,
    BackendKind::Sse => snapshot.supports_sse2(),
    BackendKind::Avx => snapshot.supports_avx(),
  }
}
