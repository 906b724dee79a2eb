//! Fuzz target for Caps bitset invariants.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - has() is consistent with has_bit()
//! - count() and the two halves match the raw word
//! - Display and feature_names agree

#![no_main]

use libfuzzer_sys::fuzz_target;
use platform::Caps;

fuzz_target!(|raw: u128| {
  let caps = Caps::from_raw(raw);

  // ─── Invariant: Self-containment ───
  assert!(caps.has(caps), "caps must contain itself");

  // ─── Invariant: Count accuracy ───
  assert_eq!(caps.count(), raw.count_ones(), "count() must equal the popcount");
  assert_eq!(caps.is_empty(), raw == 0, "is_empty() must match a zero word");
  assert_eq!(caps.x86_word(), raw as u64);
  assert_eq!(caps.aarch64_word(), (raw >> 64) as u64);

  // ─── Invariant: Identities ───
  assert_eq!(caps | Caps::NONE, caps, "union with NONE must be identity");
  assert_eq!(caps & Caps::NONE, Caps::NONE, "intersection with NONE must be NONE");
  assert!(caps.difference(caps).is_empty(), "difference with self must be empty");

  // ─── Invariant: has_bit consistency ───
  for n in 0..Caps::BITS {
    assert_eq!(caps.has_bit(n), caps.has(Caps::bit(n)), "has_bit({n}) must equal has(Caps::bit({n}))");
  }
  for n in Caps::BITS..=u8::MAX {
    assert!(!caps.has_bit(n), "bit {n} is past the end");
  }

  // ─── Invariant: names round-trip ───
  for name in caps.feature_names() {
    let Some(named) = Caps::from_name(name) else {
      panic!("feature name {name} must resolve");
    };
    assert!(caps.has(named));
  }
  let rendered = caps.to_string();
  assert_eq!(rendered == "none", caps.feature_names().next().is_none());
});
