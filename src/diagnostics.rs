//! Assertion failures and the helpers that raise them.
//!
//! A [`TestFailure`] is raised by panicking with it as the payload. The executor traps the unwind and reports the
//! failure against the running case only; sibling cases and suites keep running.
//!
//! Every raising helper is `#[track_caller]`, so the recorded [`SourceLocation`] is the line in the test body rather
//! than a line inside this module.

use std::any::{Any, TypeId};
use std::fmt;
use std::panic::{self, Location};

use crate::capture::{self, Caught};

/// Where an assertion was raised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// The location of the caller, followed through `#[track_caller]` frames.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line(), location.column())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// An assertion failure: a message plus the source location that raised it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TestFailure {
    message: String,
    location: SourceLocation,
}

impl TestFailure {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}

/// Message used by [`check`] callers that have nothing more specific to say.
pub const CHECK_FAILED: &str = "Check failed";
const NO_PANIC: &str = "Expected exception but none was thrown";
const WRONG_PANIC: &str = "Expected a different exception type";

/// Fail the current test case.
#[cold]
#[track_caller]
pub fn fail(message: impl Into<String>) -> ! {
    fail_at(message, SourceLocation::caller())
}

/// Fail the current test case, attributing the failure to `location`.
#[cold]
pub fn fail_at(message: impl Into<String>, location: SourceLocation) -> ! {
    panic::panic_any(TestFailure::new(message, location))
}

/// Fail the current test case with `message` if `condition` is false.
#[track_caller]
pub fn check(condition: bool, message: impl AsRef<str>) {
    if !condition {
        fail(message.as_ref());
    }
}

/// [`check`] with an explicit location.
pub fn check_at(condition: bool, message: impl AsRef<str>, location: SourceLocation) {
    if !condition {
        fail_at(message.as_ref(), location);
    }
}

/// Raise an arbitrary error value from test code.
///
/// The value becomes the panic payload, so [`expect_failure_of`] can match on its type. Raised outside of
/// `expect_failure_of`, the executor reports it as an unexpected error.
#[cold]
#[track_caller]
pub fn raise<E: Any + Send>(error: E) -> ! {
    panic::panic_any(error)
}

/// Assert that `f` raises an error of kind `E`.
///
/// - `f` returns normally: fails with "Expected exception but none was thrown"
/// - `f` raises a different kind: fails with "Expected a different exception type"
/// - `f` raises a [`TestFailure`]: the failure is re-raised untouched
///
/// `panic!` payloads are either `&'static str` or `String`; asking for `String` accepts both.
#[track_caller]
pub fn expect_failure_of<E: Any, F: FnOnce()>(f: F) {
    let location = SourceLocation::caller();
    let caught = match capture::trap(f) {
        Ok(()) => fail_at(NO_PANIC, location),
        Err(caught) => caught,
    };

    if caught.payload.is::<TestFailure>() {
        capture::resume(caught);
    }
    if caught.payload.is::<E>() {
        return;
    }
    if TypeId::of::<E>() == TypeId::of::<String>() && caught.payload.is::<&'static str>() {
        return;
    }
    fail_at(WRONG_PANIC, location)
}

/// Run `f` and hand back the assertion failure it raised, if any.
///
/// Panics that are not assertion failures keep unwinding. Useful for testing custom assertion helpers.
pub fn catch_failure<F: FnOnce()>(f: F) -> Result<(), TestFailure> {
    match capture::trap(f) {
        Ok(()) => Ok(()),
        Err(Caught { payload, location }) => match payload.downcast::<TestFailure>() {
            Ok(failure) => Err(*failure),
            Err(payload) => capture::resume(Caught { payload, location }),
        },
    }
}
