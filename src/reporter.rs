//! Result reporting
//!
//! ## TestReporter Trait
//!
//! The executor and the app talk to the outside world only through [`TestReporter`]. Implement it to redirect or
//! reformat output; [`ConsoleReporter`] is the default and writes plain text lines.

use std::env;
use std::io::{self, IsTerminal, Write};

use miette::Diagnostic;

use crate::diagnostics::TestFailure;
use crate::error::HarnessError;
use crate::results::TestResults;

// ============================================================================
// Test Reporter Trait
// ============================================================================

/// Receives progress and outcome notifications from a run.
pub trait TestReporter {
    /// Called before every case.
    fn announce_test(&mut self, suite: &str, case: &str);

    /// Called once for every case that raised an assertion failure.
    fn report_failure(&mut self, suite: &str, case: &str, failure: &TestFailure);

    /// Called once for every case that panicked or returned an error unexpectedly.
    fn report_error(&mut self, suite: &str, case: &str, message: &str);

    /// Called once at the end of a full run.
    fn report_summary(&mut self, results: &TestResults);

    /// Called when a harness configuration error aborts the run.
    fn report_harness_error(&mut self, _error: &HarnessError) {}
}

// ============================================================================
// Configuration
// ============================================================================

/// When to color console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color a stream when it is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Whether output written to `stream` gets colors.
    pub fn use_colors(self, stream: &impl IsTerminal) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => env::var_os("NO_COLOR").is_none() && stream.is_terminal(),
        }
    }
}

/// Console output settings
#[derive(Debug, Clone, Default)]
pub struct ReporterConfig {
    /// Color the banner and summary written to `out`
    pub stdout_colors: bool,
    /// Color the FAIL/ERROR tags written to `err`
    pub stderr_colors: bool,
    /// Skip the per-case `Executing` lines
    pub quiet: bool,
}

impl ReporterConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Same color setting for both streams.
    pub fn with_colors(self, use_colors: bool) -> Self {
        self.with_stream_colors(use_colors, use_colors)
    }

    pub fn with_stream_colors(mut self, stdout: bool, stderr: bool) -> Self {
        self.stdout_colors = stdout;
        self.stderr_colors = stderr;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

// ============================================================================
// Console Reporter
// ============================================================================

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BOLD: &str = "\x1b[1m";

const BANNER_RULE: &str = "################################";

/// Plain-text reporter.
///
/// Progress and the summary go to `out`; FAIL and ERROR lines go to `err`. A banner line is printed whenever the
/// announced suite differs from the previous one.
pub struct ConsoleReporter<O: Write, E: Write> {
    out: O,
    err: E,
    config: ReporterConfig,
    current_suite: Option<String>,
}

impl ConsoleReporter<io::Stdout, io::Stderr> {
    /// Reporter on the process's stdout and stderr.
    pub fn stdio(config: ReporterConfig) -> Self {
        Self::new(io::stdout(), io::stderr(), config)
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(out: O, err: E, config: ReporterConfig) -> Self {
        Self {
            out,
            err,
            config,
            current_suite: None,
        }
    }

    /// Give back the writers, e.g. to inspect captured output.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn paint_out(&self, text: &str, color: &str) -> String {
        paint(self.config.stdout_colors, text, color)
    }

    fn paint_err(&self, text: &str, color: &str) -> String {
        paint(self.config.stderr_colors, text, color)
    }
}

fn paint(enabled: bool, text: &str, color: &str) -> String {
    if enabled {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

// Write errors are dropped: a reporter that cannot print must not change a test's outcome.
impl<O: Write, E: Write> TestReporter for ConsoleReporter<O, E> {
    fn announce_test(&mut self, suite: &str, case: &str) {
        if self.current_suite.as_deref() != Some(suite) {
            self.current_suite = Some(suite.to_string());
            let banner = self.paint_out(&format!("{BANNER_RULE} {suite} {BANNER_RULE}"), BOLD);
            let _ = writeln!(self.out, "{banner}");
        }
        if !self.config.quiet {
            let _ = writeln!(self.out, "Executing {suite}::{case}");
        }
        let _ = self.out.flush();
    }

    fn report_failure(&mut self, suite: &str, case: &str, failure: &TestFailure) {
        let tag = self.paint_err("FAIL", RED);
        let _ = writeln!(
            self.err,
            "{tag}: {suite}::{case} - {} - {}",
            failure.location(),
            failure.message()
        );
    }

    fn report_error(&mut self, suite: &str, case: &str, message: &str) {
        let tag = self.paint_err("ERROR", RED);
        let _ = writeln!(self.err, "{tag}: {suite}::{case} - {message}");
    }

    fn report_summary(&mut self, results: &TestResults) {
        let passed = self.paint_out(&format!("{} passed", results.num_passed()), GREEN);
        let failed_text = format!("{} failed", results.num_failed());
        let failed = if results.has_failures() {
            self.paint_out(&failed_text, RED)
        } else {
            failed_text
        };
        let _ = writeln!(self.out);
        let _ = writeln!(
            self.out,
            "Results: {passed}, {failed} ({} total)",
            results.total_tests()
        );

        if results.has_failures() {
            let _ = writeln!(self.out, "Failed tests:");
            for name in results.failed_names() {
                let _ = writeln!(self.out, "  - {name}");
            }
        }
        let _ = self.out.flush();
    }

    fn report_harness_error(&mut self, error: &HarnessError) {
        let tag = self.paint_err("ERROR", RED);
        let _ = writeln!(self.err, "{tag}: {error}");
        if let Some(help) = error.help() {
            let _ = writeln!(self.err, "  help: {help}");
        }
    }
}
