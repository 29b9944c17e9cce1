//! Command-line front end for test binaries
//!
//! A test binary built on [`TestApp`] accepts:
//!
//! - `[SELECTOR]...` - `Suite` or `Suite::case`, run in the order given (default: everything)
//! - `--list` - print every `suite::case` and run nothing
//! - `--color <auto|always|never>` - colorize FAIL/ERROR/summary lines
//! - `-q`, `--quiet` - skip the per-case `Executing` lines
//!
//! ## Design
//!
//! Functions here return `CliResult<T>` instead of calling `process::exit`. Only [`run`] turns errors into an exit
//! code, and [`TestApp::main`] hands that code back to the process.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};

use clap::Parser;

use crate::app::{Selector, TestApp};
use crate::reporter::{ColorChoice, ConsoleReporter, ReporterConfig, TestReporter};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Bad command-line usage
    pub const USAGE: ExitCode = ExitCode(2);
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        u8::try_from(code.0).map_or(std::process::ExitCode::FAILURE, std::process::ExitCode::from)
    }
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. An empty message means the problem was already reported.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run the registered test suites
#[derive(Parser, Debug)]
#[command(name = "suitecase", version, long_about = None)]
pub struct RunArgs {
    /// `Suite` or `Suite::case` to run (default: every suite)
    #[arg(value_name = "SELECTOR")]
    pub selectors: Vec<Selector>,

    /// Print every registered `suite::case` and exit
    #[arg(long)]
    pub list: bool,

    /// When to color output
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Do not print a line per executed case
    #[arg(short, long)]
    pub quiet: bool,
}

impl RunArgs {
    pub fn reporter_config(&self) -> ReporterConfig {
        ReporterConfig::new()
            .with_stream_colors(
                self.color.use_colors(&io::stdout()),
                self.color.use_colors(&io::stderr()),
            )
            .with_quiet(self.quiet)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Install the stderr `tracing` subscriber, filtered by `RUST_LOG` (default `warn`).
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();
}

/// Parse `args` (program name first), run `app` on the console, and return the exit code.
pub fn run<I, T>(app: &TestApp, args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match RunArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(e) => {
            // clap routes help and version to stdout and picks exit code 0 for them
            let _ = e.print();
            return ExitCode(e.exit_code());
        }
    };

    let mut reporter = ConsoleReporter::stdio(args.reporter_config());
    match execute(app, &args, &mut reporter) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            e.exit_code
        }
    }
}

/// Execute parsed arguments against `app`.
///
/// ## Errors
///
/// A harness configuration error yields a [`CliError`] with an empty message (the reporter already printed it). A
/// failed `--list` write yields a failure with the I/O error text.
pub fn execute(app: &TestApp, args: &RunArgs, reporter: &mut dyn TestReporter) -> CliResult<ExitCode> {
    if args.list {
        return list_cases(app, &mut io::stdout().lock());
    }

    let results = app
        .run(&args.selectors, reporter)
        .map_err(|_| CliError::new("", ExitCode::FAILURE))?;

    if results.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Write every `suite::case`, one per line.
pub fn list_cases(app: &TestApp, out: &mut impl Write) -> CliResult<ExitCode> {
    for name in app.case_names() {
        writeln!(out, "{name}").map_err(|e| CliError::failure(format!("Error writing case list: {e}")))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Tests
// ============================================================================
