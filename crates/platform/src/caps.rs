//! ISA extension sets.
//!
//! [`Caps`] packs one bit per extension into a `u128`: x86 extensions in the
//! low 64 bits, aarch64 extensions in the high 64. Bit positions and the
//! `target_feature` names used in reports come from one table, so the two
//! cannot drift.
//!
//! ```
//! use platform::caps::{Caps, x86};
//!
//! let c = x86::SSE2 | x86::AVX;
//! assert!(c.has(x86::AVX));
//! assert!(!c.has(x86::AVX | x86::AVX2));
//! assert_eq!(c.count(), 2);
//! assert_eq!(c.to_string(), "sse2 avx");
//! ```

use core::{fmt, ops};

/// A set of ISA extensions.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(u128);

impl Caps {
  pub const NONE: Self = Self(0);

  /// Addressable bit positions.
  pub const BITS: u8 = 128;

  /// First bit of the aarch64 half.
  const AARCH64_BASE: u8 = 64;

  /// Set with exactly the bits of `raw`.
  ///
  /// Test and fuzz builds only; everything else combines the named constants.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(raw: u128) -> Self {
    Self(raw)
  }

  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn to_raw(self) -> u128 {
    self.0
  }

  /// Set holding only `bit`.
  ///
  /// # Panics
  ///
  /// Panics if `bit >= 128`; in a `const` item that is a build error.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    assert!(bit < Self::BITS, "capability bit out of range");
    Self(1 << bit)
  }

  /// `true` when `bit` is set. Out-of-range bits are never set.
  #[inline]
  #[must_use]
  pub const fn has_bit(self, bit: u8) -> bool {
    bit < Self::BITS && self.0 & (1 << bit) != 0
  }

  /// `true` when every bit of `required` is set in `self`.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    self.0 & required.0 == required.0
  }

  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  /// Bits of `self` missing from `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// The x86 half of the set.
  #[inline]
  #[must_use]
  pub const fn x86_word(self) -> u64 {
    self.0 as u64
  }

  /// The aarch64 half of the set.
  #[inline]
  #[must_use]
  pub const fn aarch64_word(self) -> u64 {
    (self.0 >> Self::AARCH64_BASE) as u64
  }

  /// Names of the set bits, lowest bit first. Bits without a name are skipped.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    NAMES.iter().filter(move |(c, _)| self.has(*c)).map(|(_, name)| *name)
  }

  /// Look an extension up by its `target_feature` name.
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    NAMES.iter().find(|(_, n)| *n == name).map(|(c, _)| *c)
  }
}

impl ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}

impl ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self {
    self.intersection(rhs)
  }
}

impl ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    self.0 |= rhs.0;
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Caps").field(&NameList(*self)).finish()
  }
}

struct NameList(Caps);

impl fmt::Debug for NameList {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.0.feature_names()).finish()
  }
}

/// Space-separated names, or `none` for the empty set.
impl fmt::Display for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut sep = "";
    for name in self.feature_names() {
      write!(f, "{sep}{name}")?;
      sep = " ";
    }
    if sep.is_empty() { f.write_str("none") } else { Ok(()) }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture
// ─────────────────────────────────────────────────────────────────────────────

/// Processor architecture a snapshot describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Architecture of the compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "x86") {
      Self::X86
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }

  /// Whether the CPUID instruction exists.
  #[inline]
  #[must_use]
  pub const fn has_cpuid(self) -> bool {
    matches!(self, Self::X86_64 | Self::X86)
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Named extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Declares the per-architecture constant modules and the name table together.
macro_rules! extensions {
  ($(
    $(#[$mmeta:meta])*
    mod $arch:ident base $base:expr => {
      $( $(#[$cmeta:meta])* $cap:ident = $bit:literal, $name:literal; )+
    }
    $(also { $($extra:item)* })?
  )+) => {
    $(
      $(#[$mmeta])*
      pub mod $arch {
        use super::Caps;

        $(
          $(#[$cmeta])*
          #[doc = concat!("`", $name, "`")]
          pub const $cap: Caps = Caps::bit($base + $bit);
        )+

        $($($extra)*)?
      }
    )+

    const NAMES: &[(Caps, &str)] = &[ $( $( ($arch::$cap, $name), )+ )+ ];
  };
}

extensions! {
  /// x86 and x86_64 extensions (low half).
  mod x86 base 0 => {
    SSE = 0, "sse";
    SSE2 = 1, "sse2";
    SSE3 = 2, "sse3";
    SSSE3 = 3, "ssse3";
    SSE41 = 4, "sse4.1";
    SSE42 = 5, "sse4.2";
    AVX = 6, "avx";
    AVX2 = 7, "avx2";
    FMA = 8, "fma";
    F16C = 9, "f16c";
    AVX512F = 10, "avx512f";
    POPCNT = 11, "popcnt";
  }
  also {
    /// What every x86_64 processor has.
    pub const BASELINE: Caps = SSE.union(SSE2);

    /// Extensions whose register state the OS has to enable in XCR0.
    pub const OS_GATED: Caps = AVX.union(AVX2).union(FMA).union(F16C).union(AVX512F);

    /// The ordered SIMD ladder behind `simd_level`.
    pub const LADDER: [Caps; 9] = [SSE, SSE2, SSE3, SSSE3, SSE41, SSE42, AVX, AVX2, AVX512F];
  }

  /// aarch64 extensions (high half).
  mod aarch64 base Caps::AARCH64_BASE => {
    /// Advanced SIMD; part of the aarch64 base ISA.
    NEON = 0, "neon";
  }
}
