// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Capture
// ─────────────────────────────────────────────────────────────────────────────

use crate::snapshot::CpuFeatureSnapshot;

/// NEON from the compile-time baseline, confirmed at runtime when `std`
/// can ask the OS.
pub(in crate::detect) fn capture() -> CpuFeatureSnapshot {
  #[cfg(feature = "std")]
  let neon = cfg!(target_feature = "neon") || std::arch::is_aarch64_feature_detected!("neon");
  #[cfg(not(feature = "std"))]
  let neon = cfg!(target_feature = "neon");

  CpuFeatureSnapshot::from_aarch64(neon)
}
