//! Order-insensitive deep comparison of JSON documents, for checking a
//! generated artifact against a known-good one.

use serde_json::Value;
use std::collections::BTreeSet;

/// Deep equality that ignores object key order (arrays stay positional).
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Human-readable differences between two documents, one line per leaf
/// difference or missing key, with dotted paths. Keys ending in `effect`
/// are exempt from value comparison: localized descriptions drift between
/// upstream dumps.
pub fn diff_values(a: &Value, b: &Value) -> Vec<String> {
    let mut diffs = Vec::new();
    diff_inner(a, b, "", &mut diffs);
    diffs
}

fn diff_inner(a: &Value, b: &Value, path: &str, diffs: &mut Vec<String>) {
    match (a, b) {
        (Value::Object(xs), Value::Object(ys)) => {
            let keys: BTreeSet<&String> = xs.keys().chain(ys.keys()).collect();
            for key in keys {
                let child_path = join_path(path, key);
                match (xs.get(key), ys.get(key)) {
                    (Some(x), Some(y)) => {
                        if key.ends_with("effect") {
                            continue;
                        }
                        diff_child(x, y, &child_path, diffs);
                    }
                    (Some(x), None) => diffs.push(format!(
                        "Missing key in second file: {child_path}; expected {x}"
                    )),
                    (None, Some(y)) => diffs.push(format!(
                        "Missing key in first file: {child_path}; expected {y}"
                    )),
                    (None, None) => {}
                }
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            let len = xs.len().max(ys.len());
            for index in 0..len {
                let child_path = join_path(path, &index.to_string());
                match (xs.get(index), ys.get(index)) {
                    (Some(x), Some(y)) => diff_child(x, y, &child_path, diffs),
                    (Some(x), None) => diffs.push(format!(
                        "Missing entry in second file: {child_path}; expected {x}"
                    )),
                    (None, Some(y)) => diffs.push(format!(
                        "Missing entry in first file: {child_path}; expected {y}"
                    )),
                    (None, None) => {}
                }
            }
        }
        _ => {
            if !values_equal(a, b) {
                let at = if path.is_empty() { "<root>" } else { path };
                diffs.push(format!("Difference at {at}:\n  first:  {a}\n  second: {b}"));
            }
        }
    }
}

fn diff_child(x: &Value, y: &Value, path: &str, diffs: &mut Vec<String>) {
    let both_containers = (x.is_object() && y.is_object()) || (x.is_array() && y.is_array());
    if both_containers {
        diff_inner(x, y, path, diffs);
    } else if !values_equal(x, y) {
        diffs.push(format!("Difference at {path}:\n  first:  {x}\n  second: {y}"));
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_order_is_irrelevant() {
        let a = json!({"x": 1, "y": {"a": true, "b": [1, 2]}});
        let b = json!({"y": {"b": [1, 2], "a": true}, "x": 1});
        assert!(values_equal(&a, &b));
        assert!(diff_values(&a, &b).is_empty());
    }

    #[test]
    fn array_order_matters() {
        let a = json!([1, 2]);
        let b = json!([2, 1]);
        assert!(!values_equal(&a, &b));
        assert_eq!(diff_values(&a, &b).len(), 2);
    }

    #[test]
    fn reports_missing_keys_with_dotted_paths() {
        let a = json!({"gym1": {"name": "Brock", "pokemon": []}});
        let b = json!({"gym1": {"name": "Brock"}});
        let diffs = diff_values(&a, &b);
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].contains("Missing key in second file: gym1.pokemon"));
    }

    #[test]
    fn reports_leaf_differences() {
        let a = json!({"gym1": {"pokemon": [{"level": "12"}]}});
        let b = json!({"gym1": {"pokemon": [{"level": "14"}]}});
        let diffs = diff_values(&a, &b);
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].contains("gym1.pokemon.0.level"));
    }

    #[test]
    fn effect_keys_are_exempt() {
        let a = json!({"move": {"effect": "Burns.", "power": 40}});
        let b = json!({"move": {"effect": "May burn the target.", "power": 40}});
        assert!(diff_values(&a, &b).is_empty());
        // the exemption applies to suffixed keys too
        let a = json!({"short_effect": "a"});
        let b = json!({"short_effect": "b"});
        assert!(diff_values(&a, &b).is_empty());
        // but a missing exempt key is still a difference
        let a = json!({"effect": "a"});
        let b = json!({});
        assert_eq!(diff_values(&a, &b).len(), 1);
    }

    #[test]
    fn mismatched_shapes_are_one_difference() {
        let a = json!({"x": [1]});
        let b = json!({"x": {"0": 1}});
        let diffs = diff_values(&a, &b);
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].contains("Difference at x"));
    }
}
