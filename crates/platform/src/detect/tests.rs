use super::*;
use crate::{
  caps::{Arch, Caps, x86},
  error::OverrideError,
  snapshot::{Register, leaf},
};

#[test]
#[cfg(not(miri))]
fn probe_describes_the_host() {
  let snap = probe();
  assert_eq!(snap.arch(), Arch::current());

  if cfg!(target_arch = "x86_64") {
    assert!(snap.caps().has(x86::BASELINE));
    assert!(snap.simd_level() >= 2);
    assert_ne!(snap.vendor(), "");
    assert!(!snap.supports_neon());
  }
  if cfg!(target_arch = "aarch64") {
    assert!(snap.supports_neon());
    assert_eq!(snap.simd_level(), 0);
  }
}

#[test]
fn probe_serves_one_object() {
  assert!(core::ptr::eq(probe(), probe()));
}

#[test]
#[cfg(not(miri))]
fn uncached_captures_agree() {
  assert_eq!(probe_uncached(), probe_uncached());
  assert_eq!(probe_uncached(), *probe());
}

#[test]
fn pin_after_probe_is_rejected() {
  let _ = probe();
  let late = Some(CpuFeatureSnapshot::empty(Arch::Other));
  assert_eq!(try_set_override(late), Err(OverrideError::AlreadyInitialized));
  assert!(!has_override());
}

#[test]
#[should_panic(expected = "platform::set_override failed")]
fn clearing_after_probe_panics() {
  let _ = probe();
  clear_override();
}

#[test]
fn static_caps_fold_in_const() {
  const CAPS: Caps = caps_static();
  assert_eq!(CAPS, caps_static());
  if cfg!(target_arch = "x86_64") {
    assert!(CAPS.has(x86::BASELINE));
  }
  if cfg!(target_feature = "avx2") {
    assert!(CAPS.has(x86::AVX2));
  }
  if cfg!(target_arch = "aarch64") {
    assert!(CAPS.has(crate::caps::aarch64::NEON));
  }
}

#[test]
#[cfg(not(miri))]
fn static_caps_are_a_runtime_subset() {
  let compiled = caps_static();
  let running = probe_uncached().caps();
  assert!(running.has(compiled), "compiled {compiled} not within running {running}");
}

#[test]
#[cfg(all(target_arch = "x86_64", feature = "std", not(miri)))]
fn capture_matches_std_detection() {
  use std::arch::is_x86_feature_detected as detected;

  let snap = probe_uncached();
  let pairs = [
    (snap.supports_sse3(), detected!("sse3")),
    (snap.supports_ssse3(), detected!("ssse3")),
    (snap.supports_sse41(), detected!("sse4.1")),
    (snap.supports_sse42(), detected!("sse4.2")),
    (snap.supports_popcnt(), detected!("popcnt")),
    (snap.supports_avx(), detected!("avx")),
    (snap.supports_avx2(), detected!("avx2")),
    (snap.supports_fma(), detected!("fma")),
    (snap.supports_f16c(), detected!("f16c")),
    (snap.supports_avx512f(), detected!("avx512f")),
  ];
  for (i, (ours, std)) in pairs.into_iter().enumerate() {
    assert_eq!(ours, std, "predicate #{i}");
  }
}

#[test]
#[cfg(all(target_arch = "x86_64", not(miri)))]
fn captured_levels_answer_queries() {
  let snap = probe_uncached();
  let raw = snap.raw();
  assert!(raw.max_leaf >= leaf::FEATURES);
  assert_eq!(snap.query(leaf::FEATURES, 0), Some(raw.leaf1));
  assert!(snap.supports(leaf::FEATURES, Register::Edx, 26));
  assert_eq!(snap.query(raw.max_leaf + 1, 0), None);
  if raw.max_leaf < leaf::EXTENDED_FEATURES {
    assert_eq!(snap.query(leaf::EXTENDED_FEATURES, 0), None);
  }
}
