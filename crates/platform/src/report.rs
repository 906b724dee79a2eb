//! Diagnostic report of the probed processor.
//!
//! Two renderings:
//!
//! - [`OutputFormat::Summary`]: Human-readable summary (default)
//! - [`OutputFormat::Env`]: Shell environment variable exports
//!
//! A report is for logs only. The backend it names was fixed at build time,
//! and nothing here feeds back into that choice.

use core::fmt;

use crate::snapshot::CpuFeatureSnapshot;

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
  /// Human-readable summary (default).
  #[default]
  Summary,

  /// Shell environment variable exports.
  Env,
}

impl OutputFormat {
  /// Parse a format name, case-insensitively.
  #[must_use]
  pub fn parse(s: &str) -> Option<Self> {
    if ["summary", "text", "human"].iter().any(|n| s.eq_ignore_ascii_case(n)) {
      Some(Self::Summary)
    } else if ["env", "shell", "export"].iter().any(|n| s.eq_ignore_ascii_case(n)) {
      Some(Self::Env)
    } else {
      None
    }
  }
}

/// Prefix of every exported variable in [`OutputFormat::Env`].
pub const ENV_PREFIX: &str = "LANEKIT";

/// Snapshot plus the backend the binary was built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
  snapshot: CpuFeatureSnapshot,
  backend: &'static str,
}

impl Report {
  /// Describe `snapshot` for a binary compiled against `backend`.
  #[inline]
  #[must_use]
  pub const fn new(snapshot: CpuFeatureSnapshot, backend: &'static str) -> Self {
    Self { snapshot, backend }
  }

  #[inline]
  #[must_use]
  pub const fn snapshot(&self) -> &CpuFeatureSnapshot {
    &self.snapshot
  }

  #[inline]
  #[must_use]
  pub const fn backend(&self) -> &'static str {
    self.backend
  }

  /// Renderer for `format`.
  #[inline]
  #[must_use]
  pub const fn display(&self, format: OutputFormat) -> Display<'_> {
    Display { report: self, format }
  }

  fn vendor(&self) -> &str {
    match self.snapshot.vendor() {
      "" => "unknown",
      v => v,
    }
  }

  fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = &self.snapshot;
    writeln!(f, "vendor:     {}", self.vendor())?;
    writeln!(f, "arch:       {}", s.arch())?;
    writeln!(f, "simd level: {}", s.simd_level())?;
    writeln!(f, "backend:    {}", self.backend)?;
    write!(f, "features:   {}", s.caps())
  }

  fn write_env(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = &self.snapshot;
    writeln!(f, "export {ENV_PREFIX}_VENDOR={}", ShellQuoted(self.vendor()))?;
    writeln!(f, "export {ENV_PREFIX}_ARCH={}", s.arch())?;
    writeln!(f, "export {ENV_PREFIX}_SIMD_LEVEL={}", s.simd_level())?;
    write!(f, "export {ENV_PREFIX}_BACKEND={}", self.backend)?;
    for (name, on) in s.flags() {
      write!(f, "\nexport {ENV_PREFIX}_HAS_")?;
      for c in name.chars().filter(char::is_ascii_alphanumeric) {
        write!(f, "{}", c.to_ascii_uppercase())?;
      }
      write!(f, "={}", u8::from(on))?;
    }
    Ok(())
  }
}

/// Single-quoted for POSIX `sh`; an embedded `'` becomes `'\''`.
struct ShellQuoted<'a>(&'a str);

impl fmt::Display for ShellQuoted<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("'")?;
    for (i, part) in self.0.split('\'').enumerate() {
      if i > 0 {
        f.write_str("'\\''")?;
      }
      f.write_str(part)?;
    }
    f.write_str("'")
  }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.write_summary(f)
  }
}

/// A [`Report`] bound to an [`OutputFormat`].
#[derive(Clone, Copy, Debug)]
pub struct Display<'a> {
  report: &'a Report,
  format: OutputFormat,
}

impl fmt::Display for Display<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.format {
      OutputFormat::Summary => self.report.write_summary(f),
      OutputFormat::Env => self.report.write_env(f),
    }
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::ToString, vec::Vec};

  use super::*;
  use crate::{
    caps::Arch,
    snapshot::{CpuidRegs, RawCpuid},
  };

  fn sse2_only() -> CpuFeatureSnapshot {
    CpuFeatureSnapshot::from_cpuid(
      Arch::X86_64,
      RawCpuid {
        vendor: *b"AuthenticAMD",
        max_leaf: 1,
        leaf1: CpuidRegs {
          edx: (1 << 25) | (1 << 26),
          ..CpuidRegs::ZERO
        },
        ..RawCpuid::EMPTY
      },
    )
  }

  #[test]
  fn parse_formats() {
    assert_eq!(OutputFormat::parse("summary"), Some(OutputFormat::Summary));
    assert_eq!(OutputFormat::parse("ENV"), Some(OutputFormat::Env));
    assert_eq!(OutputFormat::parse("json"), None);
  }

  #[test]
  fn summary_lists_everything() {
    let text = Report::new(sse2_only(), "sse2").to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
      lines,
      [
        "vendor:     AuthenticAMD",
        "arch:       x86_64",
        "simd level: 2",
        "backend:    sse2",
        "features:   sse sse2",
      ]
    );
  }

  #[test]
  fn env_exports_every_flag() {
    let report = Report::new(sse2_only(), "scalar");
    let text = format!("{}", report.display(OutputFormat::Env));
    assert!(text.starts_with("export LANEKIT_VENDOR='AuthenticAMD'\n"));
    assert!(text.contains("\nexport LANEKIT_BACKEND=scalar\n"));
    assert!(text.contains("\nexport LANEKIT_HAS_SSE2=1\n"));
    assert!(text.contains("\nexport LANEKIT_HAS_SSE41=0\n"));
    assert!(text.ends_with("export LANEKIT_HAS_NEON=0"));
    assert_eq!(text.lines().count(), 4 + 13);
  }

  #[test]
  fn env_vendor_with_spaces_stays_one_word() {
    let snapshot = CpuFeatureSnapshot::from_cpuid(
      Arch::X86_64,
      RawCpuid {
        vendor: *b"VIA VIA VIA ",
        ..RawCpuid::EMPTY
      },
    );
    let text = format!("{}", Report::new(snapshot, "sse2").display(OutputFormat::Env));
    assert_eq!(text.lines().next(), Some("export LANEKIT_VENDOR='VIA VIA VIA '"));
  }

  #[test]
  fn shell_quoting_escapes_single_quotes() {
    assert_eq!(ShellQuoted("it's").to_string(), "'it'\\''s'");
    assert_eq!(ShellQuoted("").to_string(), "''");
    assert_eq!(ShellQuoted("'").to_string(), "''\\'''");
  }

  #[test]
  fn missing_vendor_reads_unknown() {
    let report = Report::new(CpuFeatureSnapshot::from_aarch64(true), "scalar");
    let text = report.to_string();
    assert!(text.starts_with("vendor:     unknown\n"));
    assert!(text.ends_with("features:   neon"));
  }
}
