//! Single-case execution and outcome classification.

use crate::capture::{self, Caught};
use crate::diagnostics::TestFailure;
use crate::reporter::TestReporter;
use crate::results::TestResults;

/// Panic payload carrying an error a fallible test function returned.
///
/// Raised by [`Fallible`](crate::suite::Fallible) so a returned `Err` travels the same unwind path as every other
/// outcome; classified as an unexpected error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReturnedError(pub String);

/// How one case ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Passed,
    /// The body raised an assertion failure
    AssertionFailed(TestFailure),
    /// The body panicked with something else, or a fallible body returned an error
    UnexpectedError(String),
}

impl ExecutionOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, ExecutionOutcome::Passed)
    }
}

/// Runs cases one at a time and accumulates their results.
#[derive(Debug, Default)]
pub struct TestExecutor {
    results: TestResults,
}

impl TestExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one case.
    ///
    /// The reporter is told the case is starting, then `thunk` runs inside a panic trap. Assertion failures and
    /// unexpected errors are reported and recorded as failed; neither escapes this call.
    pub fn execute<F>(&mut self, suite: &str, case: &str, thunk: F, reporter: &mut dyn TestReporter) -> ExecutionOutcome
    where
        F: FnOnce(),
    {
        reporter.announce_test(suite, case);

        let outcome = classify(capture::trap(thunk));
        match &outcome {
            ExecutionOutcome::Passed => {
                tracing::debug!(suite, case, "passed");
            }
            ExecutionOutcome::AssertionFailed(failure) => {
                tracing::debug!(suite, case, location = %failure.location(), "assertion failed");
                reporter.report_failure(suite, case, failure);
            }
            ExecutionOutcome::UnexpectedError(message) => {
                tracing::debug!(suite, case, %message, "unexpected error");
                reporter.report_error(suite, case, message);
            }
        }

        self.results.record(suite, case, outcome.is_passed());
        outcome
    }

    pub fn results(&self) -> &TestResults {
        &self.results
    }

    pub fn into_results(self) -> TestResults {
        self.results
    }
}

fn classify(result: Result<(), Caught>) -> ExecutionOutcome {
    let Err(Caught { payload, location }) = result else {
        return ExecutionOutcome::Passed;
    };

    let payload = match payload.downcast::<TestFailure>() {
        Ok(failure) => return ExecutionOutcome::AssertionFailed(*failure),
        Err(other) => other,
    };
    let payload = match payload.downcast::<ReturnedError>() {
        Ok(returned) => return ExecutionOutcome::UnexpectedError(format!("Unhandled error: {}", returned.0)),
        Err(other) => other,
    };

    let mut message = match capture::payload_message(payload.as_ref()) {
        Some(text) => format!("Unhandled panic: {text}"),
        None => "Unhandled panic with non-string payload".to_string(),
    };
    if let Some(location) = location {
        message.push_str(&format!(" (at {location})"));
    }
    ExecutionOutcome::UnexpectedError(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{catch_failure, expect_failure_of, fail, raise};
    use crate::reporter::{ConsoleReporter, ReporterConfig};

    fn quiet_reporter() -> ConsoleReporter<Vec<u8>, Vec<u8>> {
        ConsoleReporter::new(Vec::new(), Vec::new(), ReporterConfig::new().with_quiet(true))
    }

    #[test]
    fn test_normal_return_passes() {
        let mut executor = TestExecutor::new();
        let mut reporter = quiet_reporter();
        let outcome = executor.execute("S", "ok", || {}, &mut reporter);
        assert_eq!(outcome, ExecutionOutcome::Passed);
        assert_eq!(executor.results().num_passed(), 1);
    }

    #[test]
    fn test_assertion_failure_is_classified_and_reported() {
        let mut executor = TestExecutor::new();
        let mut reporter = quiet_reporter();
        let outcome = executor.execute("S", "bad", || fail("nope"), &mut reporter);

        let ExecutionOutcome::AssertionFailed(failure) = outcome else {
            panic!("expected an assertion failure");
        };
        assert_eq!(failure.message(), "nope");
        assert_eq!(executor.results().failed_names(), ["S::bad"]);

        let (_, err) = reporter.into_inner();
        assert!(String::from_utf8(err).unwrap().starts_with("FAIL: S::bad - "));
    }

    #[test]
    fn test_plain_panic_is_unexpected_error() {
        let mut executor = TestExecutor::new();
        let mut reporter = quiet_reporter();
        let outcome = executor.execute("S", "crash", || panic!("index out of range"), &mut reporter);

        let ExecutionOutcome::UnexpectedError(message) = outcome else {
            panic!("expected an unexpected error");
        };
        assert!(message.starts_with("Unhandled panic: index out of range (at "));
        assert!(message.contains("executor.rs"));

        let (_, err) = reporter.into_inner();
        assert!(String::from_utf8(err).unwrap().starts_with("ERROR: S::crash - Unhandled panic"));
    }

    #[test]
    fn test_non_string_payload_is_unexpected_error() {
        let mut executor = TestExecutor::new();
        let mut reporter = quiet_reporter();
        let outcome = executor.execute("S", "raise", || raise(42_u32), &mut reporter);
        let ExecutionOutcome::UnexpectedError(message) = outcome else {
            panic!("expected an unexpected error");
        };
        assert!(message.starts_with("Unhandled panic with non-string payload"));
    }

    #[test]
    fn test_returned_error_is_unexpected_error() {
        let mut executor = TestExecutor::new();
        let mut reporter = quiet_reporter();
        let outcome = executor.execute(
            "S",
            "parse",
            || std::panic::panic_any(ReturnedError("invalid digit found in string".to_string())),
            &mut reporter,
        );
        assert_eq!(
            outcome,
            ExecutionOutcome::UnexpectedError("Unhandled error: invalid digit found in string".to_string())
        );
    }

    #[test]
    fn test_results_accumulate_across_cases() {
        let mut executor = TestExecutor::new();
        let mut reporter = quiet_reporter();
        executor.execute("S", "a", || {}, &mut reporter);
        executor.execute("S", "b", || fail("x"), &mut reporter);
        executor.execute("S", "c", || panic!("y"), &mut reporter);
        executor.execute("S", "d", || {}, &mut reporter);

        let results = executor.into_results();
        assert_eq!(results.num_passed(), 2);
        assert_eq!(results.num_failed(), 2);
        assert_eq!(results.failed_names(), ["S::b", "S::c"]);
    }

    #[test]
    fn test_always_failing_body_needs_no_annotation() {
        let mut executor = TestExecutor::new();
        let mut reporter = quiet_reporter();
        let outcome = executor.execute("S", "todo", || fail("not written yet"), &mut reporter);
        assert!(matches!(outcome, ExecutionOutcome::AssertionFailed(_)));
    }

    #[test]
    fn test_panic_resumed_by_catch_failure_keeps_location() {
        let mut executor = TestExecutor::new();
        let mut reporter = quiet_reporter();
        let outcome = executor.execute(
            "S",
            "resumed",
            || {
                let _ = catch_failure(|| raise(42_u32));
            },
            &mut reporter,
        );

        let ExecutionOutcome::UnexpectedError(message) = outcome else {
            panic!("expected an unexpected error");
        };
        assert!(message.starts_with("Unhandled panic with non-string payload (at "));
        assert!(message.contains("executor.rs"));
    }

    #[test]
    fn test_assertion_failure_passes_through_expect_failure_of() {
        let mut executor = TestExecutor::new();
        let mut reporter = quiet_reporter();
        let line = line!() + 4;
        let outcome = executor.execute(
            "S",
            "nested",
            || expect_failure_of::<String, _>(|| fail("inner")),
            &mut reporter,
        );

        let ExecutionOutcome::AssertionFailed(failure) = outcome else {
            panic!("expected an assertion failure");
        };
        assert_eq!(failure.message(), "inner");
        assert_eq!(failure.location().line, line);
    }
}
