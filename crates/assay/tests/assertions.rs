//! End-to-end checks through the public `assay` API.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use assay::{
    init_test_logging, AssertConfig, Assertion, ConfigLoader, Failure, FailureFormatter,
    LogSettings, SoftTester, Value,
};

fn soft() -> Assertion<SoftTester> {
    Assertion::with_tester(SoftTester::new())
}

#[derive(Debug)]
struct Point {
    x: i32,
    y: i32,
}

impl assay::Reflect for Point {
    fn reflect(&self) -> Value {
        Value::structure("Point").field("x", self.x).field("y", self.y).build()
    }
}

#[test]
fn lenient_equality() {
    Assertion::new()
        .equal(5_i8, 5_u64)
        .equal(5.0_f64, 5_i32)
        .equal('a', "a")
        .equal("abc", ['a', 'b', 'c'].to_vec())
        .equal(b"abc".as_slice(), "abc")
        .equal(
            HashMap::from([(1, "one"), (2, "two")]),
            BTreeMap::from([(1, "one"), (2, "two")]),
        )
        .equal(Point { x: 1, y: 2 }, Point { x: 1, y: 2 })
        .equal(Box::new(3), Rc::new(3_u16))
        .not_equal(true, 1)
        .not_equal("5", 5)
        .not_equal(Point { x: 1, y: 2 }, Point { x: 2, y: 1 });
}

#[test]
fn containment() {
    Assertion::new()
        .contains("hello world", "lo w")
        .contains(vec![1, 2, 3], 2_u64)
        .contains(vec![1, 2, 3, 4], vec![2, 3])
        .contains(b"bytes".to_vec(), b'y')
        .contains(HashMap::from([("a", 1), ("b", 2)]), HashMap::from([("b", 2_i8)]))
        .not_contains(Value::Nil, Value::Nil)
        .not_contains(Vec::<i32>::new(), Vec::<i32>::new())
        .not_contains(vec![1, 2, 9, 1, 2, 3], vec![1, 2, 3])
        .not_contains(HashMap::from([("1", 1), ("2", 2)]), HashMap::from([("1", 110)]));
}

#[test]
fn emptiness_and_length() {
    Assertion::new()
        .empty(Duration::ZERO)
        .empty(Some(Duration::ZERO))
        .empty(None::<String>)
        .empty(HashMap::<String, i32>::new())
        .not_empty(Duration::from_secs(1))
        .zero(0.0)
        .not_zero("x")
        .length(HashMap::from([(1, 1)]), 1)
        .length("中文", 6)
        .length(Value::Nil, 0)
        .length(Some(vec![1_u8, 2]), 2)
        .not_length([1, 2, 3], 2);
}

#[test]
fn soft_tester_collects_all_failures() {
    let a = soft();
    a.equal(1, 2)
        .note("lengths differ")
        .length(vec![1], 3)
        .nil(Some(1))
        .is_true(true);

    let failures = a.into_tester().take_failures();
    assert_eq!(failures.len(), 3);
    assert!(failures[0].starts_with("equal failed ["));
    assert!(failures[1].contains(": lengths differ"));
    assert!(failures[1].contains("l1: 1"));
    assert!(failures[2].starts_with("nil failed"));
}

#[test]
fn failures_point_at_the_calling_line() {
    let a = soft();
    let line = line!() + 1;
    a.contains("abc", "d");

    let failures = a.tester().take_failures();
    assert!(failures[0].contains(&format!("{}:{line}]", file!())));
}

#[test]
fn explicit_failures() {
    let a = soft();
    a.assert(1 + 1 == 3, Failure::new("arithmetic").detail("sum", 2));
    let failures = a.tester().take_failures();
    assert!(failures[0].starts_with("arithmetic failed"));
    assert!(failures[0].ends_with("sum: 2"));
}

#[test]
fn config_drives_assertions() {
    let config = ConfigLoader::new()
        .with_string("max_value_len = 3\n[logging]\nenabled = false", "toml")
        .unwrap()
        .load()
        .unwrap();
    init_test_logging(&config.logging).unwrap();

    let a = soft().with_config(config);
    a.equal("abcdef", "abc");
    let failures = a.tester().take_failures();
    assert!(failures[0].contains("v1: \"ab..."));
}

#[test]
fn config_file_layer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assay.json");
    std::fs::write(&path, r#"{"fatal": true, "logging": {"level": "assay=trace"}}"#).unwrap();

    let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();
    assert_eq!(
        config,
        AssertConfig {
            fatal: true,
            logging: LogSettings {
                enabled: true,
                level: "assay=trace".to_string(),
            },
            ..Default::default()
        }
    );
}

#[test]
fn custom_formatter() {
    let formatter = FailureFormatter::new(|failure, _| {
        let details: Vec<String> = failure
            .details()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        format!("{}({})", failure.action(), details.join(","))
    });
    let a = soft().with_formatter(formatter);
    a.not_equal(1, 1_u8);
    assert_eq!(a.tester().take_failures(), vec!["not_equal(v1=1,v2=1)".to_string()]);
}

#[test]
#[should_panic(expected = "2 assertion(s) failed")]
fn fatal_mode_reports_earlier_failures() {
    let a = Assertion::with_tester(SoftTester::new());
    a.is_true(false);
    let a = a.fatal(true);
    a.is_false(true);
}

#[test]
#[should_panic(expected = "not_nil failed")]
fn panic_tester_stops_at_first_failure() {
    Assertion::new().not_nil(None::<i32>).is_true(false);
}
