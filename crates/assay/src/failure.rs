//! Assertion failures and their rendering.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// A failed check, before it is rendered into a message.
#[derive(Debug, Clone)]
pub struct Failure {
    action: &'static str,
    note: Option<String>,
    details: Vec<(&'static str, String)>,
    location: &'static Location<'static>,
}

impl Failure {
    /// Creates a failure for `action` located at the caller.
    #[track_caller]
    pub fn new(action: &'static str) -> Self {
        Self::at(action, Location::caller())
    }

    /// Creates a failure for `action` at an explicit location.
    pub fn at(action: &'static str, location: &'static Location<'static>) -> Self {
        Self {
            action,
            note: None,
            details: Vec::new(),
            location,
        }
    }

    /// Attaches a user note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Appends a key/value detail.
    pub fn detail(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.details.push((key, value.to_string()));
        self
    }

    /// Name of the failed check.
    pub fn action(&self) -> &'static str {
        self.action
    }

    /// User note, if any.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Details in insertion order.
    pub fn details(&self) -> &[(&'static str, String)] {
        &self.details
    }

    /// Source location of the check.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

type RenderFn = dyn Fn(&Failure, usize) -> String + Send + Sync;

/// Turns a [`Failure`] into the message handed to the tester.
///
/// The render function receives the failure and the configured maximum
/// value length.
#[derive(Clone)]
pub struct FailureFormatter {
    render: Arc<RenderFn>,
}

impl FailureFormatter {
    /// Creates a formatter from a render function.
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&Failure, usize) -> String + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(render),
        }
    }

    /// Renders a failure.
    pub fn format(&self, failure: &Failure, max_value_len: usize) -> String {
        (self.render)(failure, max_value_len)
    }
}

impl Default for FailureFormatter {
    fn default() -> Self {
        Self::new(default_format)
    }
}

impl fmt::Debug for FailureFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureFormatter").finish_non_exhaustive()
    }
}

/// Default rendering:
///
/// ```text
/// equal failed [tests/api.rs:42]: user note
///   v1: 1
///   v2: 2
/// ```
pub fn default_format(failure: &Failure, max_value_len: usize) -> String {
    let location = failure.location();
    let mut message = format!(
        "{} failed [{}:{}]",
        failure.action(),
        location.file(),
        location.line()
    );
    if let Some(note) = failure.note() {
        message.push_str(": ");
        message.push_str(note);
    }
    for (key, value) in failure.details() {
        message.push_str("\n  ");
        message.push_str(key);
        message.push_str(": ");
        message.push_str(&truncate(value, max_value_len));
    }
    message
}

/// Cuts `value` to at most `max` characters, marking the cut with `...`.
pub fn truncate(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_captures_caller() {
        let failure = Failure::new("equal");
        assert_eq!(failure.location().file(), file!());
        assert_eq!(failure.action(), "equal");
    }

    #[test]
    fn test_default_format() {
        let failure = Failure::new("equal")
            .with_note("ids differ")
            .detail("v1", 1)
            .detail("v2", "two");
        let message = default_format(&failure, 100);
        let line = failure.location().line();
        assert_eq!(
            message,
            format!("equal failed [{}:{line}]: ids differ\n  v1: 1\n  v2: two", file!())
        );
    }

    #[test]
    fn test_default_format_without_note() {
        let failure = Failure::new("is_true");
        assert!(default_format(&failure, 10).starts_with("is_true failed ["));
        assert!(!default_format(&failure, 10).contains(": "));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("中文字", 2), "中文...");
    }

    #[test]
    fn test_custom_formatter() {
        let formatter = FailureFormatter::new(|f, _| format!("[{}]", f.action()));
        assert_eq!(formatter.format(&Failure::new("zero"), 10), "[zero]");
    }
}
