//! Fuzz target for CpuFeatureSnapshot predicates over arbitrary CPUID dumps.
//!
//! Tests that:
//! - No panics on arbitrary register contents or leaf numbers
//! - OS-gated features never appear without XCR0 support
//! - simd_level() is a contiguous prefix of the ladder
//! - query() never answers above the advertised maximum leaf

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use platform::{Arch, CpuFeatureSnapshot, CpuidRegs, RawCpuid, Register, caps::x86};

#[derive(Arbitrary, Debug)]
struct Input {
  vendor: [u8; 12],
  max_leaf: u32,
  max_ext_leaf: u32,
  regs: [[u32; 4]; 3],
  xcr0: u64,
  probe_leaf: u32,
  probe_subleaf: u32,
  probe_bit: u32,
}

fn regs(r: [u32; 4]) -> CpuidRegs {
  CpuidRegs {
    eax: r[0],
    ebx: r[1],
    ecx: r[2],
    edx: r[3],
  }
}

fuzz_target!(|input: Input| {
  let raw = RawCpuid {
    vendor: input.vendor,
    max_leaf: input.max_leaf,
    max_ext_leaf: input.max_ext_leaf,
    leaf1: regs(input.regs[0]),
    leaf7: regs(input.regs[1]),
    ext1: regs(input.regs[2]),
    xcr0: input.xcr0,
  };
  let snap = CpuFeatureSnapshot::from_cpuid(Arch::X86_64, raw);
  let caps = snap.caps();

  // ─── OS gating ───
  if !snap.os_avx() {
    assert!(caps.intersection(x86::OS_GATED).is_empty(), "AVX-class bits need XCR0 support");
  }
  if snap.supports_avx512f() {
    assert!(snap.os_avx512());
  }

  // ─── Ladder ───
  let level = snap.simd_level() as usize;
  assert!(level <= x86::LADDER.len());
  for (i, step) in x86::LADDER.iter().enumerate() {
    if i < level {
      assert!(caps.has(*step), "ladder step {i} below level {level} must be present");
    }
  }
  if level < x86::LADDER.len() {
    assert!(!caps.has(x86::LADDER[level]), "level must stop at the first gap");
  }

  // ─── Unsupported levels ───
  let _ = snap.vendor();
  let answered = snap.query(input.probe_leaf, input.probe_subleaf);
  let basic = input.probe_leaf < 0x8000_0000;
  if basic && input.probe_leaf > input.max_leaf {
    assert!(answered.is_none(), "leaf {:#x} above max {:#x}", input.probe_leaf, input.max_leaf);
  }
  if !basic && input.probe_leaf > input.max_ext_leaf {
    assert!(answered.is_none());
  }
  if snap.query(input.probe_leaf, 0).is_none() {
    for reg in [Register::Eax, Register::Ebx, Register::Ecx, Register::Edx] {
      assert!(!snap.supports(input.probe_leaf, reg, input.probe_bit));
    }
  }

  // ─── No CPUID, no answers ───
  let other = CpuFeatureSnapshot::from_cpuid(Arch::Other, raw);
  assert!(other.query(input.probe_leaf, input.probe_subleaf).is_none());
  assert_eq!(other.simd_level(), 0);
});
