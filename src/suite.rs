//! Test suites and their cases.
//!
//! A [`TestSuite`] binds one function to an ordered list of named argument tuples. Suites with different argument
//! types are driven through the object-safe [`SuiteRunner`] trait, so the app can keep them in one ordered list.

use std::any::Any;
use std::fmt::Display;
use std::panic;

use crate::error::HarnessError;
use crate::executor::{ReturnedError, TestExecutor};
use crate::reporter::TestReporter;

// ============================================================================
// Applying argument tuples
// ============================================================================

/// A test body callable with the argument tuple `Args`.
///
/// Implemented for every `Fn(A1, ..., An)` with `n <= 8`; the tuple is unpacked into positional arguments. Bodies
/// signal failure by raising, so one that always raises (`|_: u8| fail("todo")`) is accepted as is. Wrap a body
/// returning `Result` in [`Fallible`].
pub trait CaseFn<Args> {
    fn invoke(&self, args: Args);
}

/// A test body returning `Result<(), E>`; an `Err` is reported as an unexpected error.
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

macro_rules! impl_case_fn {
    ($($arg:ident),*) => {
        impl<Func, $($arg,)*> CaseFn<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*),
        {
            #[allow(non_snake_case)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) {
                (self)($($arg),*)
            }
        }

        impl<Func, Error, $($arg,)*> CaseFn<($($arg,)*)> for Fallible<Func>
        where
            Func: Fn($($arg),*) -> Result<(), Error>,
            Error: Display,
        {
            #[allow(non_snake_case)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) {
                if let Err(e) = (self.0)($($arg),*) {
                    panic::panic_any(ReturnedError(e.to_string()));
                }
            }
        }
    };
}

impl_case_fn!();
impl_case_fn!(A1);
impl_case_fn!(A1, A2);
impl_case_fn!(A1, A2, A3);
impl_case_fn!(A1, A2, A3, A4);
impl_case_fn!(A1, A2, A3, A4, A5);
impl_case_fn!(A1, A2, A3, A4, A5, A6);
impl_case_fn!(A1, A2, A3, A4, A5, A6, A7);
impl_case_fn!(A1, A2, A3, A4, A5, A6, A7, A8);

// ============================================================================
// Test cases
// ============================================================================

/// One named invocation of a suite's function.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase<Args> {
    pub name: String,
    pub args: Args,
}

impl<Args> TestCase<Args> {
    pub fn new(name: impl Into<String>, args: Args) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl<N: Into<String>, Args> From<(N, Args)> for TestCase<Args> {
    fn from((name, args): (N, Args)) -> Self {
        Self::new(name, args)
    }
}

// ============================================================================
// Suite runner interface
// ============================================================================

/// The argument-type-independent view of a suite.
pub trait SuiteRunner: Any {
    fn name(&self) -> &str;

    /// Case names in registration order (duplicates included).
    fn case_names(&self) -> Vec<&str>;

    /// Run every case in registration order.
    ///
    /// ## Errors
    ///
    /// [`HarnessError::EmptySuite`] if no case is registered; nothing is executed in that case.
    fn execute_all(&self, executor: &mut TestExecutor, reporter: &mut dyn TestReporter) -> Result<(), HarnessError>;

    /// Run the first case called `name`.
    ///
    /// ## Errors
    ///
    /// [`HarnessError::UnknownCase`] if no case has that name.
    fn execute_test_case(
        &self,
        executor: &mut TestExecutor,
        name: &str,
        reporter: &mut dyn TestReporter,
    ) -> Result<(), HarnessError>;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ============================================================================
// Test suites
// ============================================================================

/// A named suite: one test function plus its cases.
pub struct TestSuite<Args, F> {
    name: String,
    func: F,
    cases: Vec<TestCase<Args>>,
}

impl<Args, F> TestSuite<Args, F>
where
    F: CaseFn<Args>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            cases: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> &[TestCase<Args>] {
        &self.cases
    }

    /// First case called `name`; names are not required to be unique.
    pub fn case(&self, name: &str) -> Option<&TestCase<Args>> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// Append one case. No uniqueness check is made.
    pub fn add_test_case(&mut self, name: impl Into<String>, args: Args) -> &mut Self {
        self.cases.push(TestCase::new(name, args));
        self
    }

    /// Append a batch of cases, keeping the batch order.
    pub fn add_test_cases<I>(&mut self, batch: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<TestCase<Args>>,
    {
        let batch = batch.into_iter();
        self.cases.reserve(batch.size_hint().0);
        self.cases.extend(batch.map(Into::into));
        self
    }

    /// Builder form of [`add_test_case`](Self::add_test_case).
    pub fn with_case(mut self, name: impl Into<String>, args: Args) -> Self {
        self.add_test_case(name, args);
        self
    }

    /// Builder form of [`add_test_cases`](Self::add_test_cases).
    pub fn with_cases<I>(mut self, batch: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TestCase<Args>>,
    {
        self.add_test_cases(batch);
        self
    }
}

impl<Args, F> TestSuite<Args, F>
where
    Args: Clone,
    F: CaseFn<Args>,
{
    fn run_case(&self, executor: &mut TestExecutor, case: &TestCase<Args>, reporter: &mut dyn TestReporter) {
        executor.execute(&self.name, &case.name, || self.func.invoke(case.args.clone()), reporter);
    }
}

impl<Args, F> SuiteRunner for TestSuite<Args, F>
where
    Args: Clone + 'static,
    F: CaseFn<Args> + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn case_names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.name.as_str()).collect()
    }

    #[tracing::instrument(skip_all, fields(suite = %self.name, cases = self.cases.len()))]
    fn execute_all(&self, executor: &mut TestExecutor, reporter: &mut dyn TestReporter) -> Result<(), HarnessError> {
        if self.cases.is_empty() {
            return Err(HarnessError::empty_suite(&self.name));
        }

        for case in &self.cases {
            self.run_case(executor, case, reporter);
        }
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(suite = %self.name, case = name))]
    fn execute_test_case(
        &self,
        executor: &mut TestExecutor,
        name: &str,
        reporter: &mut dyn TestReporter,
    ) -> Result<(), HarnessError> {
        let case = self
            .case(name)
            .ok_or_else(|| HarnessError::unknown_case(&self.name, name))?;

        self.run_case(executor, case, reporter);
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
