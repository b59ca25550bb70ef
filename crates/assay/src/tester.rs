//! Destinations for assertion failures.

use std::cell::RefCell;

/// Receives the messages produced by failed assertions.
pub trait Tester {
    /// Records a failure; the test keeps running.
    fn error(&self, message: &str);

    /// Records a failure and stops the test.
    fn fatal(&self, message: &str) -> !;

    /// Records an informational message.
    fn log(&self, message: &str) {
        tracing::info!(target: "assay", "{message}");
    }
}

/// Panics on every failure, which fails the surrounding `#[test]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicTester;

impl Tester for PanicTester {
    fn error(&self, message: &str) {
        panic!("{message}");
    }

    fn fatal(&self, message: &str) -> ! {
        panic!("{message}");
    }
}

/// Collects failures so that several checks can run before the test fails.
///
/// Dropping a `SoftTester` that still holds failures panics with all of
/// them. Use [`SoftTester::take_failures`] to inspect and clear them.
#[derive(Debug, Default)]
pub struct SoftTester {
    failures: RefCell<Vec<String>>,
    logs: RefCell<Vec<String>>,
}

impl SoftTester {
    /// Creates an empty tester.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any failure was recorded.
    pub fn has_failed(&self) -> bool {
        !self.failures.borrow().is_empty()
    }

    /// Copies of the recorded failures.
    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }

    /// Removes and returns the recorded failures.
    pub fn take_failures(&self) -> Vec<String> {
        self.failures.take()
    }

    /// Copies of the recorded log messages.
    pub fn logs(&self) -> Vec<String> {
        self.logs.borrow().clone()
    }

    fn summary(failures: &[String]) -> String {
        format!("{} assertion(s) failed:\n{}", failures.len(), failures.join("\n"))
    }
}

impl Tester for SoftTester {
    fn error(&self, message: &str) {
        self.failures.borrow_mut().push(message.to_string());
    }

    fn fatal(&self, message: &str) -> ! {
        let mut failures = self.take_failures();
        failures.push(message.to_string());
        panic!("{}", Self::summary(&failures));
    }

    fn log(&self, message: &str) {
        self.logs.borrow_mut().push(message.to_string());
    }
}

impl Drop for SoftTester {
    fn drop(&mut self) {
        let failures = self.failures.take();
        if !failures.is_empty() && !std::thread::panicking() {
            panic!("{}", Self::summary(&failures));
        }
    }
}
