//! Error types.

use core::fmt;

/// Rejected detection override.
///
/// # Examples
///
/// ```
/// use platform::OverrideError;
///
/// assert_eq!(OverrideError::AlreadyInitialized.to_string(), "detection already initialized");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OverrideError {
  /// [`probe()`](crate::probe) already captured a snapshot; it never changes afterwards.
  AlreadyInitialized,
  /// This build has no storage for an override (no `std`, no atomics).
  Unsupported,
}

impl fmt::Display for OverrideError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::AlreadyInitialized => "detection already initialized",
      Self::Unsupported => "detection override unsupported on this build",
    })
  }
}

impl core::error::Error for OverrideError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;

  #[test]
  fn display_names_the_cause() {
    assert_eq!(OverrideError::AlreadyInitialized.to_string(), "detection already initialized");
    assert!(OverrideError::Unsupported.to_string().contains("unsupported"));
  }

  #[test]
  fn is_a_core_error() {
    fn takes_error(_: &dyn core::error::Error) {}
    takes_error(&OverrideError::Unsupported);
  }
}
