//! Backend identities.
//!
//! | Kind | Vector width | Description |
//! |------|--------------|-------------|
//! | [`Scalar`](BackendKind::Scalar) | 128-bit layout | Plain arrays, one element at a time. Always compiled. |
//! | [`Sse`](BackendKind::Sse) | 128-bit | SSE2 registers. x86_64 baseline. |
//! | [`Avx`](BackendKind::Avx) | 256-bit | AVX registers; integer lanes split into SSE2 halves. |

use core::fmt;

use crate::traits::LaneTraits;

/// Which backend a lane family belongs to.
///
/// Ordered from least to most capable, so `kind >= BackendKind::Sse` reads
/// as "has hardware vectors".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BackendKind {
  /// Portable arrays. Source of truth for cross-checks.
  #[default]
  Scalar = 0,
  /// 128-bit SSE2.
  Sse = 1,
  /// 256-bit AVX.
  Avx = 2,
}

impl BackendKind {
  /// All kinds in ascending order.
  pub const ALL: [Self; 3] = [Self::Scalar, Self::Sse, Self::Avx];

  #[inline]
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    self as u8
  }

  /// Short lowercase name, as printed in reports.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Scalar => "scalar",
      Self::Sse => "sse2",
      Self::Avx => "avx",
    }
  }

  /// Vector register width in bits (the scalar backend mirrors the 128-bit layout).
  #[inline]
  #[must_use]
  pub const fn vector_bits(self) -> u32 {
    match self {
      Self::Scalar | Self::Sse => 128,
      Self::Avx => 256,
    }
  }

  /// True for backends that use hardware vector registers.
  #[inline]
  #[must_use]
  pub const fn is_simd(self) -> bool {
    !matches!(self, Self::Scalar)
  }
}

impl fmt::Display for BackendKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A backend: a marker type carrying the lane table for both element widths.
///
/// Markers are zero-sized and never instantiated by the lane layer; generic
/// code names them as type parameters (`fn kernel<B: Backend>()`) and reaches
/// the lane types through [`LaneTraits`].
pub trait Backend: LaneTraits<f32> + LaneTraits<f64> + Copy + fmt::Debug + Default + Send + Sync + 'static {
  const KIND: BackendKind;
}
