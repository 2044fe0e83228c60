//! Accessors over the generic YAML tree.
//!
//! Definition files are hand-written, so scalars are read leniently: numbers
//! and booleans are accepted wherever a string is expected.

use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

pub(crate) fn get<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    match map.get(key) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        _ => None,
    }
}

pub(crate) fn get_string(map: &Mapping, key: &str) -> Option<String> {
    get(map, key).and_then(scalar_string)
}

/// A list of scalars; a lone scalar is treated as a one-element list.
pub(crate) fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_string).collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}

pub(crate) fn get_string_list(map: &Mapping, key: &str) -> Vec<String> {
    get(map, key).map(string_list).unwrap_or_default()
}

/// A mapping of scalar keys to scalar values. Non-scalar entries are skipped.
pub(crate) fn get_string_map(map: &Mapping, key: &str) -> BTreeMap<String, String> {
    match get(map, key) {
        Some(Value::Mapping(entries)) => entries
            .iter()
            .filter_map(|(k, v)| Some((scalar_string(k)?, scalar_string(v)?)))
            .collect(),
        _ => BTreeMap::new(),
    }
}

/// A mapping of scalar keys to lists (scalar values become one-element lists).
pub(crate) fn get_list_map(map: &Mapping, key: &str) -> BTreeMap<String, Vec<String>> {
    match get(map, key) {
        Some(Value::Mapping(entries)) => entries
            .iter()
            .filter_map(|(k, v)| Some((scalar_string(k)?, string_list(v))))
            .collect(),
        _ => BTreeMap::new(),
    }
}

pub(crate) fn get_bool(map: &Mapping, key: &str) -> Option<bool> {
    match get(map, key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn get_f64(map: &Mapping, key: &str) -> Option<f64> {
    match get(map, key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
