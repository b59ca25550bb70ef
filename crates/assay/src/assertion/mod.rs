//! The fluent assertion object.

mod files;
mod numeric;
mod panics;
mod results;

use std::cell::Cell;
use std::fmt;
use std::panic::Location;

use assay_core::{contains, equal, is_empty, is_zero, length, Reflect};

use crate::failure::{Failure, FailureFormatter};
use crate::tester::{PanicTester, Tester};
use crate::AssertConfig;

/// Runs checks against values and reports failures to a [`Tester`].
///
/// Every check returns `&Self` so that checks can be chained. Failures carry
/// the location of the calling line.
///
/// ```
/// use assay::Assertion;
///
/// let a = Assertion::new();
/// a.equal(5_i8, 5_u64)
///     .contains("hello world", "world")
///     .not_empty(vec![1, 2, 3])
///     .length(&[1, 2], 2);
/// ```
pub struct Assertion<T: Tester = PanicTester> {
    tester: T,
    config: AssertConfig,
    formatter: FailureFormatter,
    note: Cell<Option<String>>,
}

impl Assertion<PanicTester> {
    /// Creates an assertion that panics on the first failure.
    pub fn new() -> Self {
        Self::with_tester(PanicTester)
    }
}

impl Default for Assertion<PanicTester> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tester> Assertion<T> {
    /// Creates an assertion reporting to `tester`.
    pub fn with_tester(tester: T) -> Self {
        Self {
            tester,
            config: AssertConfig::default(),
            formatter: FailureFormatter::default(),
            note: Cell::new(None),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: AssertConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the failure formatter.
    pub fn with_formatter(mut self, formatter: FailureFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Routes failures to [`Tester::fatal`] instead of [`Tester::error`].
    pub fn fatal(mut self, fatal: bool) -> Self {
        self.config.fatal = fatal;
        self
    }

    /// The tester failures are reported to.
    pub fn tester(&self) -> &T {
        &self.tester
    }

    /// Consumes the assertion and returns its tester.
    pub fn into_tester(self) -> T {
        self.tester
    }

    /// The active configuration.
    pub fn config(&self) -> &AssertConfig {
        &self.config
    }

    /// Attaches a note to the next check only.
    pub fn note(&self, note: impl Into<String>) -> &Self {
        self.note.set(Some(note.into()));
        self
    }

    /// Forwards a message to [`Tester::log`].
    pub fn log(&self, message: impl fmt::Display) -> &Self {
        self.tester.log(&message.to_string());
        self
    }

    /// Reports `failure` unless `expr` holds.
    pub fn assert(&self, expr: bool, failure: Failure) -> &Self {
        self.check(expr, || failure)
    }

    pub(crate) fn check(&self, passed: bool, failure: impl FnOnce() -> Failure) -> &Self {
        let note = self.note.take();
        if passed {
            tracing::trace!(target: "assay", "assertion passed");
            return self;
        }

        let mut failure = failure();
        if let Some(note) = note {
            failure = failure.with_note(note);
        }
        let location = failure.location();
        let location = format!("{}:{}", location.file(), location.line());
        tracing::warn!(
            target: "assay",
            action = failure.action(),
            location = %location,
            "assertion failed"
        );

        let message = self.formatter.format(&failure, self.config.max_value_len);
        if self.config.fatal {
            self.tester.fatal(&message);
        }
        self.tester.error(&message);
        self
    }

    /// Checks that `expr` is true.
    #[track_caller]
    pub fn is_true(&self, expr: bool) -> &Self {
        let at = Location::caller();
        self.check(expr, || Failure::at("is_true", at).detail("v", expr))
    }

    /// Checks that `expr` is false.
    #[track_caller]
    pub fn is_false(&self, expr: bool) -> &Self {
        let at = Location::caller();
        self.check(!expr, || Failure::at("is_false", at).detail("v", expr))
    }

    /// Checks that `v` is nil (`None`, a nil sequence, map or pointer).
    #[track_caller]
    pub fn nil(&self, v: impl Reflect) -> &Self {
        let at = Location::caller();
        let v = v.reflect();
        self.check(v.is_nil(), || Failure::at("nil", at).detail("v", &v))
    }

    /// Checks that `v` is not nil.
    #[track_caller]
    pub fn not_nil(&self, v: impl Reflect) -> &Self {
        let at = Location::caller();
        let v = v.reflect();
        self.check(!v.is_nil(), || Failure::at("not_nil", at).detail("v", &v))
    }

    /// Checks that two values are equal under the lenient rules of
    /// [`assay_core::equal`].
    #[track_caller]
    pub fn equal(&self, v1: impl Reflect, v2: impl Reflect) -> &Self {
        let at = Location::caller();
        let (v1, v2) = (v1.reflect(), v2.reflect());
        self.check(equal(&v1, &v2), || {
            Failure::at("equal", at).detail("v1", &v1).detail("v2", &v2)
        })
    }

    /// Checks that two values are not equal.
    #[track_caller]
    pub fn not_equal(&self, v1: impl Reflect, v2: impl Reflect) -> &Self {
        let at = Location::caller();
        let (v1, v2) = (v1.reflect(), v2.reflect());
        self.check(!equal(&v1, &v2), || {
            Failure::at("not_equal", at).detail("v1", &v1).detail("v2", &v2)
        })
    }

    /// Checks that two references point to the same object.
    #[track_caller]
    pub fn same<V: ?Sized>(&self, v1: &V, v2: &V) -> &Self {
        let at = Location::caller();
        self.check(std::ptr::eq(v1, v2), || {
            Failure::at("same", at)
                .detail("v1", format_args!("{:p}", v1))
                .detail("v2", format_args!("{:p}", v2))
        })
    }

    /// Checks that two references point to different objects.
    #[track_caller]
    pub fn not_same<V: ?Sized>(&self, v1: &V, v2: &V) -> &Self {
        let at = Location::caller();
        self.check(!std::ptr::eq(v1, v2), || {
            Failure::at("not_same", at).detail("v", format_args!("{:p}", v1))
        })
    }

    /// Checks that `v` is nil or the zero value of its type.
    #[track_caller]
    pub fn zero(&self, v: impl Reflect) -> &Self {
        let at = Location::caller();
        let v = v.reflect();
        self.check(is_zero(&v), || Failure::at("zero", at).detail("v", &v))
    }

    /// Checks that `v` is not a zero value.
    #[track_caller]
    pub fn not_zero(&self, v: impl Reflect) -> &Self {
        let at = Location::caller();
        let v = v.reflect();
        self.check(!is_zero(&v), || Failure::at("not_zero", at).detail("v", &v))
    }

    /// Checks that `v` is zero or an empty collection.
    #[track_caller]
    pub fn empty(&self, v: impl Reflect) -> &Self {
        let at = Location::caller();
        let v = v.reflect();
        self.check(is_empty(&v), || Failure::at("empty", at).detail("v", &v))
    }

    /// Checks that `v` is neither zero nor an empty collection.
    #[track_caller]
    pub fn not_empty(&self, v: impl Reflect) -> &Self {
        let at = Location::caller();
        let v = v.reflect();
        self.check(!is_empty(&v), || Failure::at("not_empty", at).detail("v", &v))
    }

    /// Checks the length of a string, sequence, array, map or channel.
    ///
    /// Values without a length fail the check.
    #[track_caller]
    pub fn length(&self, v: impl Reflect, expected: usize) -> &Self {
        let at = Location::caller();
        match length(&v.reflect()) {
            Ok(actual) => self.check(actual == expected, || {
                Failure::at("length", at).detail("l1", actual).detail("l2", expected)
            }),
            Err(e) => self.check(false, || Failure::at("length", at).detail("err", e)),
        }
    }

    /// Checks that the length differs from `unexpected`.
    #[track_caller]
    pub fn not_length(&self, v: impl Reflect, unexpected: usize) -> &Self {
        let at = Location::caller();
        match length(&v.reflect()) {
            Ok(actual) => self.check(actual != unexpected, || {
                Failure::at("not_length", at).detail("l", actual)
            }),
            Err(e) => self.check(false, || Failure::at("not_length", at).detail("err", e)),
        }
    }

    /// Checks that `container` contains `item`, see [`assay_core::contains`].
    #[track_caller]
    pub fn contains(&self, container: impl Reflect, item: impl Reflect) -> &Self {
        let at = Location::caller();
        let (container, item) = (container.reflect(), item.reflect());
        self.check(contains(&container, &item), || {
            Failure::at("contains", at)
                .detail("container", &container)
                .detail("item", &item)
        })
    }

    /// Checks that `container` does not contain `item`.
    #[track_caller]
    pub fn not_contains(&self, container: impl Reflect, item: impl Reflect) -> &Self {
        let at = Location::caller();
        let (container, item) = (container.reflect(), item.reflect());
        self.check(!contains(&container, &item), || {
            Failure::at("not_contains", at)
                .detail("container", &container)
                .detail("item", &item)
        })
    }

    /// Compares two values with the lenient rules without reporting.
    pub fn is_equal(v1: impl Reflect, v2: impl Reflect) -> bool {
        equal(&v1.reflect(), &v2.reflect())
    }
}

impl<T: Tester + fmt::Debug> fmt::Debug for Assertion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("tester", &self.tester)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
