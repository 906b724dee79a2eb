// ─────────────────────────────────────────────────────────────────────────────
// x86_64 Capture
// ─────────────────────────────────────────────────────────────────────────────

#![allow(unsafe_code)]
// `__cpuid` is an unsafe fn on older toolchains.
#![allow(unused_unsafe)]

use core::arch::x86_64::{CpuidResult, __cpuid, __cpuid_count, _xgetbv};

use crate::{
  caps::Arch,
  snapshot::{CpuFeatureSnapshot, CpuidRegs, ECX1_OSXSAVE, RawCpuid, Register, leaf},
};

#[inline]
fn regs(r: CpuidResult) -> CpuidRegs {
  CpuidRegs {
    eax: r.eax,
    ebx: r.ebx,
    ecx: r.ecx,
    edx: r.edx,
  }
}

/// Read leaves 0, 1, 7.0, 0x8000_0000 and 0x8000_0001, then XCR0.
///
/// Leaves above the advertised maximum are left zeroed instead of being
/// queried, since out-of-range CPUID returns data from some other leaf.
/// XCR0 is only read when OSXSAVE says XGETBV is enabled.
pub(in crate::detect) fn capture() -> CpuFeatureSnapshot {
  // SAFETY: CPUID is present on every x86_64 processor.
  let leaf0 = unsafe { __cpuid(leaf::VENDOR) };
  let max_leaf = leaf0.eax;
  let vendor = RawCpuid::vendor_from_words(leaf0.ebx, leaf0.edx, leaf0.ecx);

  let leaf1 = if max_leaf >= leaf::FEATURES {
    // SAFETY: leaf 1 is within the advertised range.
    regs(unsafe { __cpuid(leaf::FEATURES) })
  } else {
    CpuidRegs::ZERO
  };

  let leaf7 = if max_leaf >= leaf::EXTENDED_FEATURES {
    // SAFETY: leaf 7 is within the advertised range.
    regs(unsafe { __cpuid_count(leaf::EXTENDED_FEATURES, 0) })
  } else {
    CpuidRegs::ZERO
  };

  // SAFETY: leaf 0x8000_0000 is always queryable; its EAX is only trusted
  // when it looks like an extended leaf number.
  let ext_max = unsafe { __cpuid(leaf::EXT_MAX) }.eax;
  let max_ext_leaf = if ext_max & leaf::EXT_MAX != 0 { ext_max } else { 0 };

  let ext1 = if max_ext_leaf >= leaf::EXT_FEATURES {
    // SAFETY: leaf 0x8000_0001 is within the advertised extended range.
    regs(unsafe { __cpuid(leaf::EXT_FEATURES) })
  } else {
    CpuidRegs::ZERO
  };

  let xcr0 = if leaf1.bit(Register::Ecx, ECX1_OSXSAVE) {
    // SAFETY: OSXSAVE is set, so the OS has enabled XGETBV.
    unsafe { _xgetbv(0) }
  } else {
    0
  };

  CpuFeatureSnapshot::from_cpuid(
    Arch::X86_64,
    RawCpuid {
      vendor,
      max_leaf,
      max_ext_leaf,
      leaf1,
      leaf7,
      ext1,
      xcr0,
    },
  )
}
