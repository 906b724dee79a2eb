use crate::caps::{Caps, aarch64, x86};

/// Extensions paired with whether this build was compiled to assume them.
const ENABLED: [(bool, Caps); 13] = [
  (cfg!(target_feature = "sse"), x86::SSE),
  (cfg!(target_feature = "sse2"), x86::SSE2),
  (cfg!(target_feature = "sse3"), x86::SSE3),
  (cfg!(target_feature = "ssse3"), x86::SSSE3),
  (cfg!(target_feature = "sse4.1"), x86::SSE41),
  (cfg!(target_feature = "sse4.2"), x86::SSE42),
  (cfg!(target_feature = "avx"), x86::AVX),
  (cfg!(target_feature = "avx2"), x86::AVX2),
  (cfg!(target_feature = "fma"), x86::FMA),
  (cfg!(target_feature = "f16c"), x86::F16C),
  (cfg!(target_feature = "avx512f"), x86::AVX512F),
  (cfg!(target_feature = "popcnt"), x86::POPCNT),
  (cfg!(all(target_arch = "aarch64", target_feature = "neon")), aarch64::NEON),
];

/// Extensions the binary was compiled to assume.
///
/// Follows `-C target-feature` and `-C target-cpu`, the same inputs the lane
/// layer's backend selection reads. Always a subset of what [`probe()`]
/// reports on hardware that can run the binary.
///
/// [`probe()`]: crate::probe
///
/// ```
/// const CAPS: platform::Caps = platform::caps_static();
///
/// #[cfg(target_arch = "x86_64")]
/// assert!(CAPS.has(platform::caps::x86::BASELINE));
/// ```
#[must_use]
pub const fn caps_static() -> Caps {
  let mut caps = if cfg!(target_arch = "x86_64") { x86::BASELINE } else { Caps::NONE };
  let mut i = 0;
  while i < ENABLED.len() {
    if ENABLED[i].0 {
      caps = caps.union(ENABLED[i].1);
    }
    i += 1;
  }
  caps
}
