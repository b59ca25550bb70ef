//! Ordering and range checks on numeric values.
//!
//! Every check converts the value to `f64` after dereferencing pointers.
//! Non-numeric values fail.

use std::panic::Location;

use assay_core::Reflect;

use super::Assertion;
use crate::failure::Failure;
use crate::tester::Tester;

impl<T: Tester> Assertion<T> {
    fn compare(
        &self,
        action: &'static str,
        at: &'static Location<'static>,
        v: &impl Reflect,
        holds: impl FnOnce(f64) -> bool,
    ) -> &Self {
        let value = v.reflect();
        match value.deref().as_f64() {
            Some(n) => self.check(holds(n), || Failure::at(action, at).detail("v", n)),
            None => self.check(false, || {
                Failure::at(action, at)
                    .detail("v", &value)
                    .detail("err", "not a number")
            }),
        }
    }

    /// Checks `v > bound`.
    #[track_caller]
    pub fn greater(&self, v: impl Reflect, bound: f64) -> &Self {
        self.compare("greater", Location::caller(), &v, |n| n > bound)
    }

    /// Checks `v >= bound`.
    #[track_caller]
    pub fn greater_equal(&self, v: impl Reflect, bound: f64) -> &Self {
        self.compare("greater_equal", Location::caller(), &v, |n| n >= bound)
    }

    /// Checks `v < bound`.
    #[track_caller]
    pub fn less(&self, v: impl Reflect, bound: f64) -> &Self {
        self.compare("less", Location::caller(), &v, |n| n < bound)
    }

    /// Checks `v <= bound`.
    #[track_caller]
    pub fn less_equal(&self, v: impl Reflect, bound: f64) -> &Self {
        self.compare("less_equal", Location::caller(), &v, |n| n <= bound)
    }

    /// Checks `v > 0`.
    #[track_caller]
    pub fn positive(&self, v: impl Reflect) -> &Self {
        self.compare("positive", Location::caller(), &v, |n| n > 0.0)
    }

    /// Checks `v < 0`.
    #[track_caller]
    pub fn negative(&self, v: impl Reflect) -> &Self {
        self.compare("negative", Location::caller(), &v, |n| n < 0.0)
    }

    /// Checks `v` lies in `(min, max)`.
    #[track_caller]
    pub fn between(&self, v: impl Reflect, min: f64, max: f64) -> &Self {
        self.compare("between", Location::caller(), &v, |n| n > min && n < max)
    }

    /// Checks `v` lies in `[min, max]`.
    #[track_caller]
    pub fn between_equal(&self, v: impl Reflect, min: f64, max: f64) -> &Self {
        self.compare("between_equal", Location::caller(), &v, |n| n >= min && n <= max)
    }

    /// Checks `v` lies in `[min, max)`.
    #[track_caller]
    pub fn between_equal_min(&self, v: impl Reflect, min: f64, max: f64) -> &Self {
        self.compare("between_equal_min", Location::caller(), &v, |n| n >= min && n < max)
    }

    /// Checks `v` lies in `(min, max]`.
    #[track_caller]
    pub fn between_equal_max(&self, v: impl Reflect, min: f64, max: f64) -> &Self {
        self.compare("between_equal_max", Location::caller(), &v, |n| n > min && n <= max)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Assertion, SoftTester};

    #[test]
    fn test_ordering() {
        Assertion::new()
            .greater(5, 4.0)
            .greater_equal(5_u8, 5.0)
            .less(-1_i64, 0.0)
            .less_equal(2.5_f32, 2.5)
            .positive(0.1)
            .negative(-3_i16);
    }

    #[test]
    fn test_ranges() {
        Assertion::new()
            .between(5, 1.0, 10.0)
            .between_equal(10, 1.0, 10.0)
            .between_equal_min(1, 1.0, 10.0)
            .between_equal_max(10_u64, 1.0, 10.0)
            .between(Box::new(5), 1.0, 10.0);
    }

    #[test]
    fn test_boundaries_fail() {
        let a = Assertion::with_tester(SoftTester::new());
        a.positive(0)
            .negative(0)
            .between(10, 1.0, 10.0)
            .between_equal_min(10, 1.0, 10.0)
            .between_equal_max(1, 1.0, 10.0);
        assert_eq!(a.tester().take_failures().len(), 5);
    }

    #[test]
    fn test_non_number_fails() {
        let a = Assertion::with_tester(SoftTester::new());
        a.greater("5", 1.0);
        let failures = a.tester().take_failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("not a number"));
    }
}
