//! Print what the running processor supports next to the backend this build uses.
//!
//! ```text
//! lanekit-probe                 # human-readable summary
//! lanekit-probe --format env    # `export LANEKIT_...=...` lines for shell scripts
//! RUST_LOG=debug lanekit-probe  # also log the captured snapshot
//! ```

use std::{env, process::ExitCode};

use lanekit::{OutputFormat, backend_supported, dispatch};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Default)]
struct Args {
  format: OutputFormat,
  verbose: bool,
  help: bool,
}

fn print_help() {
  eprintln!("Usage: lanekit-probe [--format <summary|env>] [--verbose]");
  eprintln!();
  eprintln!("Options:");
  eprintln!("  -f, --format <FMT>  Output format: summary (default) or env");
  eprintln!("  -v, --verbose       Log the captured snapshot at debug level");
  eprintln!("  -h, --help          Print this help");
  eprintln!();
  eprintln!("RUST_LOG overrides the log filter when set.");
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
  OutputFormat::parse(value).ok_or_else(|| format!("unknown format: {value} (expected summary or env)"))
}

fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Result<Args, String> {
  let mut args = Args::default();
  let mut it = argv.into_iter();
  while let Some(arg) = it.next() {
    match arg.as_str() {
      "-h" | "--help" => args.help = true,
      "-v" | "--verbose" => args.verbose = true,
      "-f" | "--format" => {
        let Some(value) = it.next() else {
          return Err(format!("{arg} requires a value"));
        };
        args.format = parse_format(&value)?;
      }
      "--" => break,
      other => {
        if let Some(value) = other.strip_prefix("--format=") {
          args.format = parse_format(value)?;
        } else {
          return Err(format!("unknown argument: {other}"));
        }
      }
    }
  }
  Ok(args)
}

fn init_logging(verbose: bool) -> Result<(), String> {
  let default = if verbose { Level::DEBUG } else { Level::WARN };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default.as_str()));
  let subscriber = FmtSubscriber::builder()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .finish();
  tracing::subscriber::set_global_default(subscriber).map_err(|e| format!("failed to install logger: {e}"))
}

fn run() -> Result<(), String> {
  let args = parse_args(env::args().skip(1))?;
  if args.help {
    print_help();
    return Ok(());
  }
  init_logging(args.verbose)?;

  let report = lanekit::report();
  if !backend_supported(dispatch::BACKEND, report.snapshot()) {
    tracing::warn!(
      backend = report.backend(),
      "compiled backend is not supported by this processor"
    );
  }
  println!("{}", report.display(args.format));
  Ok(())
}

fn main() -> ExitCode {
  match run() {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("error: {e}");
      eprintln!();
      print_help();
      ExitCode::from(2)
    }
  }
}
