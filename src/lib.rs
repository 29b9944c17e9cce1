#![forbid(unsafe_code)]
//! suitecase: a small, deterministic unit-test harness
//!
//! A developer registers named suites, each bound to one function with a fixed parameter list, and attaches named
//! cases (argument tuples) to each suite. The harness runs every case in registration order, classifies each outcome
//! as passed, assertion failure or unexpected error, and reports results with source locations.
//!
//! ```no_run
//! use suitecase::prelude::*;
//!
//! fn main() -> std::process::ExitCode {
//!     let mut app = TestApp::new();
//!     app.add_test("Math", |a: i32, b: i32, expected: i32| compare(a + b, expected))
//!         .add_test_case("add-positive", (2, 3, 5))
//!         .add_test_case("add-negative", (-1, -1, -2));
//!     app.main()
//! }
//! ```
//!
//! ## Panic Policy
//!
//! Assertion failures are *raised*: `fail`, `check` and `compare` panic with a [`diagnostics::TestFailure`] payload,
//! which the executor traps per case. Everything else follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a harness bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

// Lets `#[derive(TestValue)]` resolve `::suitecase` paths inside this crate's own tests.
extern crate self as suitecase;

pub mod app;
pub mod cli;
pub mod compare;
pub mod diagnostics;
pub mod error;
pub mod executor;
pub mod format;
pub mod reporter;
pub mod results;
pub mod suite;

mod capture;

pub use app::TestApp;
pub use compare::{Operand, OperandView, compare, compare_at, compare_with};
pub use diagnostics::{SourceLocation, TestFailure, catch_failure, check, expect_failure_of, fail, raise};
pub use error::HarnessError;
pub use executor::{ExecutionOutcome, TestExecutor};
pub use format::Stringify;
pub use reporter::{ConsoleReporter, ReporterConfig, TestReporter};
pub use results::TestResults;
pub use suite::{CaseFn, Fallible, SuiteRunner, TestCase, TestSuite};
pub use suitecase_derive::TestValue;

/// Everything a test binary usually needs.
pub mod prelude {
    pub use crate::TestValue;
    pub use crate::app::TestApp;
    pub use crate::compare::{compare, compare_with};
    pub use crate::diagnostics::{check, expect_failure_of, fail, raise};
    pub use crate::format::Stringify;
}
