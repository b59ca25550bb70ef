//! Containment checks built on top of [`equal`](crate::equal).

use crate::equal::equal;
use crate::value::{Kind, Map, Value};

/// Reports whether `item` is found within `container`.
///
/// - a string-like container holds string-like substrings, `u8` bytes and
///   `char` code points;
/// - a sequence or array holds any element equal to the item, or a
///   contiguous run of elements matching a sequence item;
/// - a map holds every non-empty sub-map whose keys exist with equal values.
///
/// Nil and empty containers hold nothing, not even themselves. Pointers on
/// either side are followed first.
///
/// Sequence runs are matched in a single forward pass: once a run has
/// started, the first mismatch fails the whole check instead of retrying
/// at a later offset, so `[1, 2, 9, 1, 2, 3]` does not contain `[1, 2, 3]`.
pub fn contains(container: &Value, item: &Value) -> bool {
    if matches!(container, Value::Nil) {
        return false;
    }
    let (container, item) = (container.deref(), item.deref());
    if matches!(container, Value::Nil) || is_empty_collection(container) {
        return false;
    }
    if equal(container, item) {
        return true;
    }

    match container.kind() {
        Kind::String | Kind::Bytes | Kind::Runes => text_contains(container, item),
        Kind::Sequence | Kind::Array => sequence_contains(container, item),
        Kind::Map => match (container, item) {
            (Value::Map(c), Value::Map(i)) => map_contains(c, i),
            _ => false,
        },
        _ => false,
    }
}

fn is_empty_collection(v: &Value) -> bool {
    match v {
        Value::String(s) => s.is_empty(),
        Value::Map(m) => m.is_empty(),
        other => other.item_count() == Some(0),
    }
}

fn text_contains(container: &Value, item: &Value) -> bool {
    let Some(haystack) = container.text_bytes() else {
        return false;
    };
    let needle: Vec<u8> = match item.as_number() {
        Some(n) => match (n.as_u8(), n.as_char()) {
            (Some(b), _) => return haystack.contains(&b),
            (_, Some(c)) => c.to_string().into_bytes(),
            _ => return false,
        },
        None if item.kind().is_string_like() => match item.text_bytes() {
            Some(text) => text.into_owned(),
            None => return false,
        },
        None => return false,
    };
    find_subslice(&haystack, &needle)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

fn sequence_contains(container: &Value, item: &Value) -> bool {
    if matches!(item, Value::Nil) {
        return false;
    }
    let Some(elements) = container.items() else {
        return false;
    };
    if elements.iter().any(|e| equal(e, item)) {
        return true;
    }
    if !matches!(item.kind(), Kind::Sequence | Kind::Bytes | Kind::Runes) {
        return false;
    }
    let Some(wanted) = item.items() else {
        return false;
    };
    if wanted.is_empty() || wanted.len() > elements.len() {
        return false;
    }
    contains_run(&elements, &wanted)
}

/// Single forward pass without backtracking.
fn contains_run(elements: &[Value], wanted: &[Value]) -> bool {
    let mut matched = 0;
    for (i, element) in elements.iter().enumerate() {
        if equal(element, &wanted[matched]) {
            if matched == 0 && i + wanted.len() > elements.len() {
                return false;
            }
            matched += 1;
            if matched == wanted.len() {
                return true;
            }
        } else if matched > 0 {
            return false;
        }
    }
    false
}

fn map_contains(container: &Map, item: &Map) -> bool {
    if item.is_empty() || item.len() > container.len() {
        return false;
    }
    item.entries()
        .iter()
        .all(|(k, v)| container.get(k).is_some_and(|found| equal(found, v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflect;
    use std::collections::HashMap;

    fn has<C: Reflect + ?Sized, I: Reflect + ?Sized>(container: &C, item: &I) -> bool {
        contains(&container.reflect(), &item.reflect())
    }

    #[test]
    fn test_nil_contains_nothing() {
        assert!(!contains(&Value::Nil, &Value::Nil));
        assert!(!contains(&Value::nil_pointer(), &Value::Nil));
        assert!(!contains(&Value::nil_seq(), &Value::nil_seq()));
    }

    #[test]
    fn test_empty_containers() {
        assert!(!has(&Vec::<i32>::new(), &Vec::<i32>::new()));
        assert!(!has("", ""));
        assert!(!has(&HashMap::<String, i32>::new(), &HashMap::<String, i32>::new()));
    }

    #[test]
    fn test_reflexive_for_non_empty() {
        assert!(has("abc", "abc"));
        assert!(has(&vec![1, 2], &vec![1, 2]));
        assert!(has(&5_i32, &5_i32));
    }

    #[test]
    fn test_substrings() {
        assert!(has("abc", "bc"));
        assert!(has("abc", &b'a'));
        assert!(has("中文abc", &'文'));
        assert!(has(&b"hello".to_vec(), "ell"));
        assert!(!has("abc", "cb"));
        assert!(!has("abc", &1_i32));
        assert!(!has(&b"abc".to_vec(), &97_i32));
    }

    #[test]
    fn test_rune_containers() {
        let runes = vec!['中', 'a'];
        assert!(has(&runes, &'a'));
        assert!(has(&runes, &b'a'));
        assert!(has(&runes, "中"));
        assert!(has(&runes, &vec!['a']));
        assert!(!has(&runes, "a中"));
        assert!(!has(&runes, &'b'));
    }

    #[test]
    fn test_elements() {
        assert!(has(&vec![1, 2, 3], &2_i8));
        assert!(has(&["a", "b"], "b"));
        assert!(!has(&vec![1, 2, 3], &4_i32));
        assert!(!contains(&vec![1, 2].reflect(), &Value::Nil));
    }

    #[test]
    fn test_runs() {
        assert!(has(&vec![1, 2, 4], &vec![1, 2]));
        assert!(has(&vec![0, 1, 2, 3], &vec![2, 3]));
        assert!(!has(&vec![1, 2], &vec![1, 2, 3]));
        assert!(!has(&vec![1, 2], &Vec::<i32>::new()));
    }

    #[test]
    fn test_runs_do_not_backtrack() {
        assert!(!has(&vec![1, 2, 9, 1, 2, 3], &vec![1, 2, 3]));
        // first element matches too close to the end
        assert!(!has(&vec![5, 1, 2], &vec![2, 3]));
    }

    #[test]
    fn test_array_item_is_an_element_not_a_run() {
        assert!(!has(&vec![1, 2, 3], &[1, 2]));
        assert!(has(&vec![vec![1, 2], vec![3]], &[1, 2]));
    }

    #[test]
    fn test_sub_maps() {
        let container: HashMap<String, i32> = HashMap::from([("1".into(), 1), ("2".into(), 2)]);
        let item: HashMap<String, i8> = HashMap::from([("1".into(), 1)]);
        let wrong: HashMap<String, i32> = HashMap::from([("1".into(), 110)]);
        assert!(has(&container, &item));
        assert!(!has(&container, &wrong));
        assert!(!has(&container, &HashMap::<String, i32>::new()));
    }

    #[test]
    fn test_pointers_are_followed() {
        assert!(has(&Some(vec![1, 2, 3]), &Box::new(2_i32)));
        assert!(!has(&None::<Vec<i32>>, &1_i32));
    }
}
