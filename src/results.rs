//! Aggregate pass/fail counts for a run.

/// Running totals for one execution run.
///
/// Append-only: the executor records each case exactly once. The failed count and the total are derived from the
/// stored values rather than kept alongside them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestResults {
    passed: usize,
    failed_names: Vec<String>,
}

impl TestResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished case. Failed cases are remembered by their `suite::case` name.
    pub fn record(&mut self, suite: &str, case: &str, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed_names.push(qualified_name(suite, case));
        }
    }

    pub fn num_passed(&self) -> usize {
        self.passed
    }

    pub fn num_failed(&self) -> usize {
        self.failed_names.len()
    }

    pub fn total_tests(&self) -> usize {
        self.passed + self.num_failed()
    }

    /// Qualified names of the failed cases, in execution order.
    pub fn failed_names(&self) -> &[String] {
        &self.failed_names
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_names.is_empty()
    }
}

/// `suite::case`, the name a case is reported and selected by.
pub fn qualified_name(suite: &str, case: &str) -> String {
    format!("{suite}::{case}")
}
