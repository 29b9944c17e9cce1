//! Harness configuration errors.
//!
//! These describe misuse of the harness itself, not a failing test. They are never trapped per case: the first one
//! aborts the whole run and is reported as a top-level error.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum HarnessError {
    #[error("Test suite '{suite}' does not have any test cases")]
    #[diagnostic(
        code(suitecase::empty_suite),
        help("attach cases with `add_test_case` or `add_test_cases` before running")
    )]
    EmptySuite { suite: String },

    #[error("Test case '{case}' does not exist in test suite '{suite}'")]
    #[diagnostic(code(suitecase::unknown_case), help("run with `--list` to see registered cases"))]
    UnknownCase { suite: String, case: String },

    #[error("Test suite '{suite}' is not registered")]
    #[diagnostic(code(suitecase::unknown_suite), help("run with `--list` to see registered suites"))]
    UnknownSuite { suite: String },
}

impl HarnessError {
    pub fn empty_suite(suite: impl Into<String>) -> Self {
        Self::EmptySuite { suite: suite.into() }
    }

    pub fn unknown_case(suite: impl Into<String>, case: impl Into<String>) -> Self {
        Self::UnknownCase {
            suite: suite.into(),
            case: case.into(),
        }
    }

    pub fn unknown_suite(suite: impl Into<String>) -> Self {
        Self::UnknownSuite { suite: suite.into() }
    }
}
