//! Checks on code that is expected to panic (or not).

use std::any::Any;
use std::panic::{self, AssertUnwindSafe, Location};

use assay_core::{equal, Reflect, Value};

use super::Assertion;
use crate::failure::Failure;
use crate::tester::Tester;

type Payload = Box<dyn Any + Send>;

/// Runs `f`, returning the panic payload if it panicked.
fn catch(f: impl FnOnce()) -> Option<Payload> {
    panic::catch_unwind(AssertUnwindSafe(f)).err()
}

/// Converts a panic payload into a comparable value.
///
/// `panic!` with a message produces `&str` or `String`; `panic_any` may carry
/// any primitive. Other payloads become opaque.
pub(crate) fn payload_value(payload: &Payload) -> Value {
    macro_rules! downcast {
        ($($t:ty),*) => {
            $(
                if let Some(v) = payload.downcast_ref::<$t>() {
                    return v.reflect();
                }
            )*
        };
    }

    downcast!(&'static str, String, bool, char, i8, i16, i32, i64, isize);
    downcast!(u8, u16, u32, u64, usize, f32, f64);
    Value::opaque("Box<dyn Any + Send>", "non-primitive panic payload")
}

fn payload_text(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

impl<T: Tester> Assertion<T> {
    /// Checks that `f` panics.
    #[track_caller]
    pub fn panic(&self, f: impl FnOnce()) -> &Self {
        let at = Location::caller();
        self.check(catch(f).is_some(), || Failure::at("panic", at))
    }

    /// Checks that `f` panics with a message containing `needle`.
    #[track_caller]
    pub fn panic_string(&self, f: impl FnOnce(), needle: &str) -> &Self {
        let at = Location::caller();
        match catch(f) {
            Some(payload) => {
                let message = payload_text(&payload_value(&payload));
                self.check(message.contains(needle), || {
                    Failure::at("panic_string", at).detail("msg", &message)
                })
            }
            None => self.check(false, || Failure::at("panic_string", at)),
        }
    }

    /// Checks that `f` panics with a payload equal to `expected`.
    #[track_caller]
    pub fn panic_value(&self, f: impl FnOnce(), expected: impl Reflect) -> &Self {
        let at = Location::caller();
        match catch(f) {
            Some(payload) => {
                let (actual, expected) = (payload_value(&payload), expected.reflect());
                self.check(equal(&actual, &expected), || {
                    Failure::at("panic_value", at)
                        .detail("v1", &actual)
                        .detail("v2", &expected)
                })
            }
            None => self.check(false, || Failure::at("panic_value", at)),
        }
    }

    /// Checks that `f` returns without panicking.
    #[track_caller]
    pub fn not_panic(&self, f: impl FnOnce()) -> &Self {
        let at = Location::caller();
        match catch(f) {
            Some(payload) => self.check(false, || {
                Failure::at("not_panic", at).detail("err", payload_value(&payload))
            }),
            None => self.check(true, || Failure::at("not_panic", at)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SoftTester;

    #[test]
    fn test_panic_checks() {
        Assertion::new()
            .panic(|| panic!("boom"))
            .panic_string(|| panic!("index {} out of range", 7), "7 out of")
            .panic_value(|| panic!("exact"), "exact")
            .panic_value(|| std::panic::panic_any(42_u16), 42)
            .not_panic(|| {});
    }

    #[test]
    fn test_panic_checks_fail() {
        let a = Assertion::with_tester(SoftTester::new());
        a.panic(|| {})
            .panic_string(|| panic!("abc"), "xyz")
            .panic_value(|| panic!("abc"), "abd")
            .not_panic(|| panic!("oops"));
        let failures = a.tester().take_failures();
        assert_eq!(failures.len(), 4);
        assert!(failures[1].contains("msg: abc"));
        assert!(failures[3].contains("err: \"oops\""));
    }

    #[test]
    fn test_payload_value() {
        let payload: Payload = Box::new(String::from("owned"));
        assert_eq!(payload_value(&payload), Value::string("owned"));

        let payload: Payload = Box::new(vec![1]);
        assert!(matches!(payload_value(&payload), Value::Other(_)));
    }
}
