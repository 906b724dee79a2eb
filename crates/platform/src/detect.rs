//! Runtime CPU probing.
//!
//! - Compile-time capabilities via `cfg!(target_feature = "...")`
//! - One CPUID capture per process, cached (`OnceLock` with `std`, atomics without)
//! - A snapshot pinned before first use replaces detection (bare metal, tests)
//! - Miri fallback (reports nothing beyond the architecture)
//!
//! ```
//! let snapshot = platform::probe();
//! // Same object every time.
//! assert!(core::ptr::eq(snapshot, platform::probe()));
//!
//! #[cfg(target_arch = "x86_64")]
//! assert!(snapshot.supports_sse2());
//! ```

use crate::snapshot::CpuFeatureSnapshot;

mod cache;
mod compile_time;

mod arch {
  #[cfg(all(target_arch = "aarch64", not(miri)))]
  pub(super) mod aarch64;
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  pub(super) mod x86;
}

pub use cache::{clear_override, has_override, set_override, try_set_override};
pub use compile_time::caps_static;

/// The process-wide snapshot.
///
/// Captured on first call and never mutated afterwards, so concurrent
/// readers need no synchronization. If [`set_override`] ran before the
/// first call, the override is served instead of a capture.
///
/// Builds without `std` or atomics cannot cache; they always report the
/// bare architecture.
#[inline]
#[must_use]
pub fn probe() -> &'static CpuFeatureSnapshot {
  cache::get_or_init(resolve)
}

/// Capture a fresh snapshot, bypassing the cache and any override.
#[inline]
#[must_use]
pub fn probe_uncached() -> CpuFeatureSnapshot {
  detect_uncached()
}

/// The pinned snapshot if there is one, otherwise a fresh capture.
#[cold]
fn resolve(pinned: Option<CpuFeatureSnapshot>) -> CpuFeatureSnapshot {
  let snapshot = pinned.unwrap_or_else(detect_uncached);

  #[cfg(feature = "tracing")]
  tracing::debug!(
    arch = %snapshot.arch(),
    vendor = snapshot.vendor(),
    simd_level = snapshot.simd_level(),
    caps = %snapshot.caps(),
    pinned = pinned.is_some(),
    "captured cpu feature snapshot"
  );

  snapshot
}

fn detect_uncached() -> CpuFeatureSnapshot {
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  {
    arch::x86::capture()
  }

  #[cfg(all(target_arch = "aarch64", not(miri)))]
  {
    arch::aarch64::capture()
  }

  #[cfg(any(miri, not(any(target_arch = "x86_64", target_arch = "aarch64"))))]
  {
    CpuFeatureSnapshot::empty(crate::caps::Arch::current())
  }
}

#[cfg(test)]
mod tests;
