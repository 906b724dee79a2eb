//! CPU capability probing for lanekit.
//!
//! Everything here is diagnostic. The lane layer picks its backend when the
//! binary is built; this crate reports what the machine it runs on can do,
//! so logs can show whether that choice left performance on the table.
//!
//! # Core Types
//!
//! - [`Caps`]: a bitset of ISA extensions
//! - [`CpuFeatureSnapshot`]: raw CPUID data plus the predicates read from it
//! - [`Report`]: vendor, named flags, SIMD level and compiled backend, for logs
//!
//! # Main Entry Point
//!
//! ```
//! let snapshot = platform::probe();
//! let report = platform::Report::new(*snapshot, "scalar");
//! assert!(report.to_string().contains("simd level:"));
//! ```
//!
//! # Caching
//!
//! The snapshot is captured once and never mutated: `OnceLock` with `std`,
//! atomics without. An override installed before the first [`probe()`]
//! replaces detection, for bare metal and for tests.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod caps;
mod detect;
mod error;
pub mod report;
pub mod snapshot;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

pub use caps::{Arch, Caps};
pub use detect::{caps_static, clear_override, has_override, probe, probe_uncached, set_override, try_set_override};
pub use error::OverrideError;
pub use report::{OutputFormat, Report};
pub use snapshot::{CpuFeatureSnapshot, CpuidRegs, RawCpuid, Register};
