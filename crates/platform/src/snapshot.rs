//! Immutable record of what the processor reported.
//!
//! A [`CpuFeatureSnapshot`] holds the raw CPUID leaves the predicates need,
//! plus the OS extended-state mask (XCR0). Every predicate is a pure
//! function of that record, so a snapshot built from a recorded dump
//! answers exactly like the machine it was taken on.

use crate::caps::{Arch, Caps, aarch64, x86};

// ─────────────────────────────────────────────────────────────────────────────
// Raw CPUID Data
// ─────────────────────────────────────────────────────────────────────────────

/// One CPUID output register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Register {
  Eax,
  Ebx,
  Ecx,
  Edx,
}

/// The four output registers of one CPUID function level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CpuidRegs {
  pub eax: u32,
  pub ebx: u32,
  pub ecx: u32,
  pub edx: u32,
}

impl CpuidRegs {
  /// All-zero registers.
  pub const ZERO: Self = Self {
    eax: 0,
    ebx: 0,
    ecx: 0,
    edx: 0,
  };

  /// Read one register.
  #[inline]
  #[must_use]
  pub const fn get(self, register: Register) -> u32 {
    match register {
      Register::Eax => self.eax,
      Register::Ebx => self.ebx,
      Register::Ecx => self.ecx,
      Register::Edx => self.edx,
    }
  }

  /// Whether `bit` of `register` is set. Bits past 31 read as unset.
  #[inline]
  #[must_use]
  pub const fn bit(self, register: Register, bit: u32) -> bool {
    bit < 32 && (self.get(register) >> bit) & 1 != 0
  }
}

/// CPUID function levels captured in a snapshot.
pub mod leaf {
  /// Vendor string and highest basic leaf.
  pub const VENDOR: u32 = 0;
  /// Processor signature and basic feature flags.
  pub const FEATURES: u32 = 1;
  /// Structured extended feature flags (subleaf 0).
  pub const EXTENDED_FEATURES: u32 = 7;
  /// Highest extended leaf.
  pub const EXT_MAX: u32 = 0x8000_0000;
  /// Extended processor signature and feature flags.
  pub const EXT_FEATURES: u32 = 0x8000_0001;
}

// Leaf 1 EDX
const EDX1_SSE: u32 = 25;
const EDX1_SSE2: u32 = 26;
// Leaf 1 ECX
const ECX1_SSE3: u32 = 0;
const ECX1_SSSE3: u32 = 9;
const ECX1_FMA: u32 = 12;
const ECX1_SSE41: u32 = 19;
const ECX1_SSE42: u32 = 20;
const ECX1_POPCNT: u32 = 23;
pub(crate) const ECX1_OSXSAVE: u32 = 27;
const ECX1_AVX: u32 = 28;
const ECX1_F16C: u32 = 29;
// Leaf 7.0 EBX
const EBX7_AVX2: u32 = 5;
const EBX7_AVX512F: u32 = 16;

/// XCR0 bits 1-2: XMM and YMM state.
const XCR0_AVX_MASK: u64 = 0x6;
/// XCR0 bits 5-7: opmask, ZMM_Hi256 and Hi16_ZMM state.
const XCR0_AVX512_MASK: u64 = 0xE0;

/// Raw identification data read from the processor.
///
/// Leaves above `max_leaf` / `max_ext_leaf` hold zeros.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawCpuid {
  /// 12 ASCII bytes from leaf 0 (EBX, EDX, ECX order).
  pub vendor: [u8; 12],
  /// Highest supported basic leaf.
  pub max_leaf: u32,
  /// Highest supported extended leaf.
  pub max_ext_leaf: u32,
  pub leaf1: CpuidRegs,
  pub leaf7: CpuidRegs,
  pub ext1: CpuidRegs,
  /// OS-enabled extended state, zero when OSXSAVE is clear.
  pub xcr0: u64,
}

impl RawCpuid {
  /// No CPUID data at all.
  pub const EMPTY: Self = Self {
    vendor: [0; 12],
    max_leaf: 0,
    max_ext_leaf: 0,
    leaf1: CpuidRegs::ZERO,
    leaf7: CpuidRegs::ZERO,
    ext1: CpuidRegs::ZERO,
    xcr0: 0,
  };

  /// Vendor bytes as the `(ebx, edx, ecx)` words leaf 0 returns them in.
  #[inline]
  #[must_use]
  pub const fn vendor_words(&self) -> (u32, u32, u32) {
    let v = &self.vendor;
    (
      u32::from_le_bytes([v[0], v[1], v[2], v[3]]),
      u32::from_le_bytes([v[4], v[5], v[6], v[7]]),
      u32::from_le_bytes([v[8], v[9], v[10], v[11]]),
    )
  }

  /// Pack the `(ebx, edx, ecx)` words of leaf 0 into vendor bytes.
  #[inline]
  #[must_use]
  pub const fn vendor_from_words(ebx: u32, edx: u32, ecx: u32) -> [u8; 12] {
    let (b, d, c) = (ebx.to_le_bytes(), edx.to_le_bytes(), ecx.to_le_bytes());
    [b[0], b[1], b[2], b[3], d[0], d[1], d[2], d[3], c[0], c[1], c[2], c[3]]
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// What the running processor reported, captured once.
///
/// Purely observational: nothing in the lane layer reads it, and the
/// backend a binary runs is fixed when it is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CpuFeatureSnapshot {
  raw: RawCpuid,
  arch: Arch,
  neon: bool,
}

impl CpuFeatureSnapshot {
  /// A snapshot that reports nothing beyond the architecture.
  #[inline]
  #[must_use]
  pub const fn empty(arch: Arch) -> Self {
    Self {
      raw: RawCpuid::EMPTY,
      arch,
      neon: false,
    }
  }

  /// Build an x86 snapshot from recorded CPUID data.
  ///
  /// Used for overrides on machines where detection is unavailable, and
  /// for replaying dumps in tests.
  #[inline]
  #[must_use]
  pub const fn from_cpuid(arch: Arch, raw: RawCpuid) -> Self {
    Self { raw, arch, neon: false }
  }

  /// Build an aarch64 snapshot.
  #[inline]
  #[must_use]
  pub const fn from_aarch64(neon: bool) -> Self {
    Self {
      raw: RawCpuid::EMPTY,
      arch: Arch::Aarch64,
      neon,
    }
  }

  /// Raw captured data.
  #[inline]
  #[must_use]
  pub const fn raw(&self) -> &RawCpuid {
    &self.raw
  }

  /// Architecture the snapshot was taken on.
  #[inline]
  #[must_use]
  pub const fn arch(&self) -> Arch {
    self.arch
  }

  /// Vendor identification string, e.g. `GenuineIntel`.
  ///
  /// Empty when the architecture has no CPUID or the bytes are not ASCII.
  #[must_use]
  pub fn vendor(&self) -> &str {
    let bytes = &self.raw.vendor;
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    match core::str::from_utf8(&bytes[..len]) {
      Ok(s) if s.is_ascii() => s,
      _ => "",
    }
  }

  // ─── Raw queries ───

  /// Registers captured for a CPUID function level.
  ///
  /// `None` when the level is above what the processor advertises, when the
  /// architecture has no CPUID, or when the level was not captured. Leaf 7
  /// is captured for subleaf 0 only; the other leaves ignore `subleaf`.
  #[must_use]
  pub const fn query(&self, leaf_id: u32, subleaf: u32) -> Option<CpuidRegs> {
    if !self.arch.has_cpuid() {
      return None;
    }
    let raw = &self.raw;
    match leaf_id {
      leaf::VENDOR => {
        let (ebx, edx, ecx) = raw.vendor_words();
        Some(CpuidRegs {
          eax: raw.max_leaf,
          ebx,
          ecx,
          edx,
        })
      }
      leaf::FEATURES if raw.max_leaf >= leaf::FEATURES => Some(raw.leaf1),
      leaf::EXTENDED_FEATURES if raw.max_leaf >= leaf::EXTENDED_FEATURES && subleaf == 0 => Some(raw.leaf7),
      leaf::EXT_MAX if raw.max_ext_leaf >= leaf::EXT_MAX => Some(CpuidRegs {
        eax: raw.max_ext_leaf,
        ..CpuidRegs::ZERO
      }),
      leaf::EXT_FEATURES if raw.max_ext_leaf >= leaf::EXT_FEATURES => Some(raw.ext1),
      _ => None,
    }
  }

  /// Whether `bit` of `register` is set at function level `leaf_id`.
  ///
  /// Unsupported levels answer `false`.
  #[inline]
  #[must_use]
  pub const fn supports(&self, leaf_id: u32, register: Register, bit: u32) -> bool {
    match self.query(leaf_id, 0) {
      Some(regs) => regs.bit(register, bit),
      None => false,
    }
  }

  // ─── OS state ───

  /// OSXSAVE: the OS uses XSAVE and XCR0 is readable.
  #[inline]
  #[must_use]
  pub const fn os_xsave(&self) -> bool {
    self.supports(leaf::FEATURES, Register::Ecx, ECX1_OSXSAVE)
  }

  /// The OS saves YMM state across context switches.
  #[inline]
  #[must_use]
  pub const fn os_avx(&self) -> bool {
    self.os_xsave() && (self.raw.xcr0 & XCR0_AVX_MASK) == XCR0_AVX_MASK
  }

  /// The OS saves ZMM and opmask state across context switches.
  #[inline]
  #[must_use]
  pub const fn os_avx512(&self) -> bool {
    self.os_avx() && (self.raw.xcr0 & XCR0_AVX512_MASK) == XCR0_AVX512_MASK
  }

  // ─── Feature predicates ───

  #[inline]
  #[must_use]
  pub const fn supports_sse(&self) -> bool {
    self.supports(leaf::FEATURES, Register::Edx, EDX1_SSE)
  }

  #[inline]
  #[must_use]
  pub const fn supports_sse2(&self) -> bool {
    self.supports(leaf::FEATURES, Register::Edx, EDX1_SSE2)
  }

  #[inline]
  #[must_use]
  pub const fn supports_sse3(&self) -> bool {
    self.supports(leaf::FEATURES, Register::Ecx, ECX1_SSE3)
  }

  #[inline]
  #[must_use]
  pub const fn supports_ssse3(&self) -> bool {
    self.supports(leaf::FEATURES, Register::Ecx, ECX1_SSSE3)
  }

  #[inline]
  #[must_use]
  pub const fn supports_sse41(&self) -> bool {
    self.supports(leaf::FEATURES, Register::Ecx, ECX1_SSE41)
  }

  #[inline]
  #[must_use]
  pub const fn supports_sse42(&self) -> bool {
    self.supports(leaf::FEATURES, Register::Ecx, ECX1_SSE42)
  }

  #[inline]
  #[must_use]
  pub const fn supports_popcnt(&self) -> bool {
    self.supports(leaf::FEATURES, Register::Ecx, ECX1_POPCNT)
  }

  /// AVX, only when the OS also saves YMM state.
  #[inline]
  #[must_use]
  pub const fn supports_avx(&self) -> bool {
    self.os_avx() && self.supports(leaf::FEATURES, Register::Ecx, ECX1_AVX)
  }

  #[inline]
  #[must_use]
  pub const fn supports_fma(&self) -> bool {
    self.os_avx() && self.supports(leaf::FEATURES, Register::Ecx, ECX1_FMA)
  }

  #[inline]
  #[must_use]
  pub const fn supports_f16c(&self) -> bool {
    self.os_avx() && self.supports(leaf::FEATURES, Register::Ecx, ECX1_F16C)
  }

  #[inline]
  #[must_use]
  pub const fn supports_avx2(&self) -> bool {
    self.os_avx() && self.supports(leaf::EXTENDED_FEATURES, Register::Ebx, EBX7_AVX2)
  }

  /// AVX-512F, only when the OS also saves ZMM and opmask state.
  #[inline]
  #[must_use]
  pub const fn supports_avx512f(&self) -> bool {
    self.os_avx512() && self.supports(leaf::EXTENDED_FEATURES, Register::Ebx, EBX7_AVX512F)
  }

  #[inline]
  #[must_use]
  pub const fn supports_neon(&self) -> bool {
    matches!(self.arch, Arch::Aarch64) && self.neon
  }

  // ─── Aggregates ───

  /// Capability set implied by the predicates above.
  #[must_use]
  pub const fn caps(&self) -> Caps {
    let table: [(bool, Caps); 13] = [
      (self.supports_sse(), x86::SSE),
      (self.supports_sse2(), x86::SSE2),
      (self.supports_sse3(), x86::SSE3),
      (self.supports_ssse3(), x86::SSSE3),
      (self.supports_sse41(), x86::SSE41),
      (self.supports_sse42(), x86::SSE42),
      (self.supports_avx(), x86::AVX),
      (self.supports_avx2(), x86::AVX2),
      (self.supports_fma(), x86::FMA),
      (self.supports_f16c(), x86::F16C),
      (self.supports_avx512f(), x86::AVX512F),
      (self.supports_popcnt(), x86::POPCNT),
      (self.supports_neon(), aarch64::NEON),
    ];

    let mut caps = Caps::NONE;
    let mut i = 0;
    while i < table.len() {
      if table[i].0 {
        caps = caps.union(table[i].1);
      }
      i += 1;
    }
    caps
  }

  /// How far up the SIMD ladder the processor goes without a gap.
  ///
  /// Counts SSE, SSE2, SSE3, SSSE3, SSE4.1, SSE4.2, AVX, AVX2 and AVX-512F
  /// from the bottom, stopping at the first one missing. 0 on targets
  /// without CPUID.
  #[must_use]
  pub const fn simd_level(&self) -> u32 {
    let caps = self.caps();
    let mut level = 0;
    while level < x86::LADDER.len() {
      if !caps.has(x86::LADDER[level]) {
        break;
      }
      level += 1;
    }
    level as u32
  }

  /// Named predicate results in ladder order, for reports.
  pub fn flags(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
    let predicates: [(&'static str, fn(&Self) -> bool); 13] = [
      ("sse", Self::supports_sse),
      ("sse2", Self::supports_sse2),
      ("sse3", Self::supports_sse3),
      ("ssse3", Self::supports_ssse3),
      ("sse4.1", Self::supports_sse41),
      ("sse4.2", Self::supports_sse42),
      ("avx", Self::supports_avx),
      ("avx2", Self::supports_avx2),
      ("fma", Self::supports_fma),
      ("f16c", Self::supports_f16c),
      ("avx512f", Self::supports_avx512f),
      ("popcnt", Self::supports_popcnt),
      ("neon", Self::supports_neon),
    ];
    predicates.into_iter().map(move |(name, f)| (name, f(self)))
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;

  /// Haswell-class dump: SSE through AVX2 plus FMA/F16C/POPCNT, no AVX-512.
  fn haswell() -> RawCpuid {
    RawCpuid {
      vendor: *b"GenuineIntel",
      max_leaf: 0xD,
      max_ext_leaf: 0x8000_0008,
      leaf1: CpuidRegs {
        eax: 0x0003_06C3,
        ebx: 0,
        ecx: 0x7FFA_FBFF,
        edx: 0xBFEB_FBFF,
      },
      leaf7: CpuidRegs {
        eax: 0,
        ebx: 0x0000_27AB,
        ecx: 0,
        edx: 0,
      },
      ext1: CpuidRegs {
        eax: 0,
        ebx: 0,
        ecx: 0x21,
        edx: 0x2C10_0800,
      },
      xcr0: 0x7,
    }
  }

  fn x86(raw: RawCpuid) -> CpuFeatureSnapshot {
    CpuFeatureSnapshot::from_cpuid(Arch::X86_64, raw)
  }

  #[test]
  fn haswell_predicates() {
    let s = x86(haswell());
    assert_eq!(s.vendor(), "GenuineIntel");
    assert!(s.supports_sse() && s.supports_sse2() && s.supports_sse3() && s.supports_ssse3());
    assert!(s.supports_sse41() && s.supports_sse42() && s.supports_popcnt());
    assert!(s.supports_avx() && s.supports_avx2() && s.supports_fma() && s.supports_f16c());
    assert!(!s.supports_avx512f());
    assert!(!s.supports_neon());
    assert_eq!(s.simd_level(), 8);
  }

  #[test]
  fn avx_requires_os_support() {
    let mut raw = haswell();
    raw.xcr0 = 0x3; // YMM state not enabled
    let s = x86(raw);
    assert!(s.supports(leaf::FEATURES, Register::Ecx, 28), "raw bit stays visible");
    assert!(!s.supports_avx() && !s.supports_avx2() && !s.supports_fma());
    assert_eq!(s.simd_level(), 6);
    assert!(s.caps().intersection(x86::OS_GATED).is_empty());

    raw.xcr0 = 0x7;
    raw.leaf1.ecx &= !(1 << 27); // OSXSAVE clear
    assert!(!x86(raw).supports_avx());
  }

  #[test]
  fn avx512_requires_zmm_state() {
    let mut raw = haswell();
    raw.leaf7.ebx |= 1 << 16;
    assert!(!x86(raw).supports_avx512f());
    raw.xcr0 = 0xE7;
    let s = x86(raw);
    assert!(s.supports_avx512f());
    assert_eq!(s.simd_level(), 9);
  }

  #[test]
  fn ladder_stops_at_first_gap() {
    let mut raw = haswell();
    raw.leaf1.ecx &= !(1 << 9); // no SSSE3
    let s = x86(raw);
    assert!(s.supports_sse41() && s.supports_avx2());
    assert_eq!(s.simd_level(), 3);
  }

  #[test]
  fn unsupported_levels_answer_false() {
    let mut raw = haswell();
    raw.max_leaf = 1;
    raw.leaf7.ebx = u32::MAX;
    let s = x86(raw);
    assert_eq!(s.query(leaf::EXTENDED_FEATURES, 0), None);
    assert!(!s.supports(leaf::EXTENDED_FEATURES, Register::Ebx, 5));
    assert!(!s.supports_avx2());
    assert_eq!(s.query(0x4000_0000, 0), None);
    assert_eq!(s.query(leaf::EXTENDED_FEATURES, 1), None);
    assert!(!s.supports(leaf::FEATURES, Register::Ecx, 32));
  }

  #[test]
  fn leaf_zero_round_trips_vendor() {
    let s = x86(haswell());
    let Some(regs) = s.query(leaf::VENDOR, 0) else {
      panic!("leaf 0 is always present on x86");
    };
    assert_eq!(regs.eax, 0xD);
    assert_eq!(RawCpuid::vendor_from_words(regs.ebx, regs.edx, regs.ecx), *b"GenuineIntel");
    assert_eq!(regs.ebx, 0x756E_6547); // "Genu"
    assert_eq!(s.query(leaf::EXT_MAX, 0).map(|r| r.eax), Some(0x8000_0008));
  }

  #[test]
  fn no_cpuid_means_nothing() {
    let s = CpuFeatureSnapshot::from_cpuid(Arch::Other, haswell());
    assert_eq!(s.query(leaf::VENDOR, 0), None);
    assert_eq!(s.simd_level(), 0);
    assert!(s.caps().is_empty());
  }

  #[test]
  fn neon_only_on_aarch64() {
    let s = CpuFeatureSnapshot::from_aarch64(true);
    assert!(s.supports_neon());
    assert_eq!(s.caps(), aarch64::NEON);
    assert_eq!(s.simd_level(), 0);
    assert_eq!(s.vendor(), "");
    assert!(!CpuFeatureSnapshot::from_aarch64(false).supports_neon());
  }

  #[test]
  fn flags_match_caps() {
    let s = x86(haswell());
    let named: Vec<_> = s.flags().filter(|(_, on)| *on).map(|(n, _)| n).collect();
    let from_caps: Vec<_> = s.caps().feature_names().collect();
    assert_eq!(named, from_caps);
  }

  #[test]
  fn non_ascii_vendor_is_empty() {
    let mut raw = haswell();
    raw.vendor[0] = 0xFF;
    assert_eq!(x86(raw).vendor(), "");
  }
}
