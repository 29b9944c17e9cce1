//! The test application: owns every registered suite and drives runs over them.

use std::convert::Infallible;
use std::process;
use std::str::FromStr;

use crate::cli;
use crate::error::HarnessError;
use crate::executor::TestExecutor;
use crate::reporter::TestReporter;
use crate::results::{TestResults, qualified_name};
use crate::suite::{CaseFn, Fallible, SuiteRunner, TestSuite};

/// Which part of the registered tests to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Every case of the first suite with this name
    Suite(String),
    /// The first case called `case` in the first suite called `suite`
    Case { suite: String, case: String },
}

impl FromStr for Selector {
    type Err = Infallible;

    /// `Suite` or `Suite::case`; everything after the first `::` is the case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.split_once("::") {
            Some((suite, case)) => Selector::Case {
                suite: suite.to_string(),
                case: case.to_string(),
            },
            None => Selector::Suite(s.to_string()),
        })
    }
}

/// Registered suites, in registration order.
#[derive(Default)]
pub struct TestApp {
    suites: Vec<Box<dyn SuiteRunner>>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a suite bound to `func` and return it so cases can be attached right away.
    pub fn add_test<Args, F>(&mut self, name: impl Into<String>, func: F) -> &mut TestSuite<Args, F>
    where
        Args: Clone + 'static,
        F: CaseFn<Args> + 'static,
    {
        self.suites.push(Box::new(TestSuite::new(name, func)));
        self.suites
            .last_mut()
            .and_then(|suite| suite.as_any_mut().downcast_mut::<TestSuite<Args, F>>())
            .expect("INVARIANT: the suite just pushed has this concrete type")
    }

    /// Register a suite whose function returns `Result<(), E>`; a returned `Err` is an unexpected error.
    pub fn add_fallible_test<Args, F>(
        &mut self,
        name: impl Into<String>,
        func: F,
    ) -> &mut TestSuite<Args, Fallible<F>>
    where
        Args: Clone + 'static,
        Fallible<F>: CaseFn<Args> + 'static,
    {
        self.add_test(name, Fallible(func))
    }

    /// Register an already-built suite.
    pub fn add_suite(&mut self, suite: impl SuiteRunner) -> &mut Self {
        self.suites.push(Box::new(suite));
        self
    }

    pub fn suites(&self) -> impl Iterator<Item = &dyn SuiteRunner> {
        self.suites.iter().map(|suite| suite.as_ref())
    }

    /// Every `suite::case` in registration order.
    pub fn case_names(&self) -> Vec<String> {
        self.suites()
            .flat_map(|suite| {
                suite
                    .case_names()
                    .into_iter()
                    .map(move |case| qualified_name(suite.name(), case))
            })
            .collect()
    }

    fn find_suite(&self, name: &str) -> Result<&dyn SuiteRunner, HarnessError> {
        self.suites()
            .find(|suite| suite.name() == name)
            .ok_or_else(|| HarnessError::unknown_suite(name))
    }

    /// Run every suite in registration order, then report the summary.
    pub fn run_all(&self, reporter: &mut dyn TestReporter) -> Result<TestResults, HarnessError> {
        self.run(&[], reporter)
    }

    /// Run the selected suites and cases in the order given (everything if `selectors` is empty), then report the
    /// summary.
    ///
    /// ## Errors
    ///
    /// The first harness configuration error stops the run. It is reported through
    /// [`TestReporter::report_harness_error`], and no summary is reported.
    pub fn run(&self, selectors: &[Selector], reporter: &mut dyn TestReporter) -> Result<TestResults, HarnessError> {
        tracing::info!(suites = self.suites.len(), selectors = selectors.len(), "starting run");

        let mut executor = TestExecutor::new();
        if let Err(err) = self.execute(selectors, &mut executor, reporter) {
            tracing::warn!(error = %err, "run aborted");
            reporter.report_harness_error(&err);
            return Err(err);
        }

        let results = executor.into_results();
        reporter.report_summary(&results);
        Ok(results)
    }

    fn execute(
        &self,
        selectors: &[Selector],
        executor: &mut TestExecutor,
        reporter: &mut dyn TestReporter,
    ) -> Result<(), HarnessError> {
        if selectors.is_empty() {
            for suite in self.suites() {
                suite.execute_all(executor, reporter)?;
            }
            return Ok(());
        }

        for selector in selectors {
            match selector {
                Selector::Suite(name) => self.find_suite(name)?.execute_all(executor, reporter)?,
                Selector::Case { suite, case } => self.find_suite(suite)?.execute_test_case(executor, case, reporter)?,
            }
        }
        Ok(())
    }

    /// Process entry point: parse the command line, run, and map the outcome to an exit status.
    ///
    /// Succeeds iff no case failed and no harness configuration error occurred.
    pub fn main(&self) -> process::ExitCode {
        cli::init_tracing();
        cli::run(self, std::env::args_os()).into()
    }
}
