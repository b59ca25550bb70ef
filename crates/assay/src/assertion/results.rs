//! Checks on `Result` values.

use std::error::Error;
use std::fmt;
use std::panic::Location;

use super::Assertion;
use crate::failure::Failure;
use crate::tester::Tester;

/// Walks `err` and its `source()` chain looking for an error equal to `target`.
fn chain_contains<K>(err: &(dyn Error + 'static), target: &K) -> bool
where
    K: Error + PartialEq + 'static,
{
    let mut current = Some(err);
    while let Some(e) = current {
        if e.downcast_ref::<K>() == Some(target) {
            return true;
        }
        current = e.source();
    }
    false
}

impl<T: Tester> Assertion<T> {
    /// Checks that `result` is an `Err`.
    #[track_caller]
    pub fn error<V, E: fmt::Display>(&self, result: &Result<V, E>) -> &Self {
        let at = Location::caller();
        self.check(result.is_err(), || Failure::at("error", at).detail("v", "Ok(..)"))
    }

    /// Checks that `result` is an `Err` whose message contains `needle`.
    #[track_caller]
    pub fn error_string<V, E: fmt::Display>(&self, result: &Result<V, E>, needle: &str) -> &Self {
        let at = Location::caller();
        match result {
            Err(e) => {
                let message = e.to_string();
                self.check(message.contains(needle), || {
                    Failure::at("error_string", at).detail("v", &message)
                })
            }
            Ok(_) => self.check(false, || Failure::at("error_string", at).detail("v", "Ok(..)")),
        }
    }

    /// Checks that `result` is an `Err` equal to `target`, or caused by one.
    #[track_caller]
    pub fn error_is<V, E, K>(&self, result: &Result<V, E>, target: &K) -> &Self
    where
        E: Error + 'static,
        K: Error + PartialEq + 'static,
    {
        let at = Location::caller();
        match result {
            Err(e) => self.check(chain_contains(e, target), || {
                Failure::at("error_is", at).detail("err", e).detail("target", target)
            }),
            Ok(_) => self.check(false, || Failure::at("error_is", at).detail("err", "Ok(..)")),
        }
    }

    /// Checks that `result` is `Ok`.
    #[track_caller]
    pub fn not_error<V, E: fmt::Display>(&self, result: &Result<V, E>) -> &Self {
        let at = Location::caller();
        match result {
            Ok(_) => self.check(true, || Failure::at("not_error", at)),
            Err(e) => self.check(false, || Failure::at("not_error", at).detail("v", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SoftTester;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("not found: {0}")]
    struct NotFound(&'static str);

    #[derive(Debug, thiserror::Error)]
    #[error("lookup failed")]
    struct Lookup(#[source] NotFound);

    #[test]
    fn test_result_checks() {
        let err: Result<(), NotFound> = Err(NotFound("user"));
        let ok: Result<i32, NotFound> = Ok(1);

        Assertion::new()
            .error(&err)
            .error_string(&err, "not found")
            .error_is(&err, &NotFound("user"))
            .not_error(&ok);
    }

    #[test]
    fn test_error_is_follows_sources() {
        let err: Result<(), Lookup> = Err(Lookup(NotFound("user")));
        let a = Assertion::with_tester(SoftTester::new());
        a.error_is(&err, &NotFound("user"))
            .error_is(&err, &NotFound("group"));
        assert_eq!(a.tester().take_failures().len(), 1);
    }

    #[test]
    fn test_result_checks_fail() {
        let ok: Result<i32, NotFound> = Ok(1);
        let err: Result<i32, NotFound> = Err(NotFound("x"));
        let a = Assertion::with_tester(SoftTester::new());
        a.error(&ok)
            .error_string(&err, "other")
            .not_error(&err);
        let failures = a.tester().take_failures();
        assert_eq!(failures.len(), 3);
        assert!(failures[2].contains("v: not found: x"));
    }
}
