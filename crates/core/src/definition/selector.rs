//! Selector normalization.
//!
//! The DSL lets a selector be written either as a bare string
//! (`title: a.torrent-name`) or as a structured mapping
//! (`title: {selector: a, attribute: title, filters: [...]}`). Both forms are
//! resolved at decode time into the single canonical [`Selector`] shape.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

use super::yaml::{get, get_string, get_string_map, scalar_string, string_list};

/// Canonical selector record consumed by the selector-evaluation engine.
///
/// Absent optional keys are omitted rather than stored as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    #[serde(default)]
    pub selector: String,
    /// Constant value used instead of evaluating the selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Child elements to strip before reading the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<String>,
    /// Sub-selector -> value; the first sub-selector that matches wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl Selector {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            ..Default::default()
        }
    }
}

/// A named value transformation applied after selection (`replace`, `dateparse`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// The two spellings a selector may have in a document.
enum RawSelector<'a> {
    Bare(String),
    Structured(&'a Mapping),
}

impl<'a> RawSelector<'a> {
    fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Mapping(map) => Some(Self::Structured(map)),
            Value::Tagged(tagged) => Self::from_value(&tagged.value),
            other => scalar_string(other).map(Self::Bare),
        }
    }
}

impl From<RawSelector<'_>> for Selector {
    fn from(raw: RawSelector<'_>) -> Self {
        match raw {
            RawSelector::Bare(selector) => Selector::new(selector),
            RawSelector::Structured(map) => Selector {
                selector: get_string(map, "selector").unwrap_or_default(),
                text: get_string(map, "text"),
                attribute: get_string(map, "attribute"),
                remove: get_string(map, "remove"),
                case: match get(map, "case") {
                    Some(Value::Mapping(_)) => Some(get_string_map(map, "case")),
                    _ => None,
                },
                filters: get(map, "filters").map(parse_filters).unwrap_or_default(),
            },
        }
    }
}

/// Normalize a selector value into its canonical shape.
///
/// Returns `None` for values that cannot be a selector (sequences, null).
/// Applying this to the serialized output of a previous normalization yields
/// the same selector.
pub fn normalize_selector(value: &Value) -> Option<Selector> {
    RawSelector::from_value(value).map(Selector::from)
}

/// Parse a filter list. Entries without a name are dropped.
pub(crate) fn parse_filters(value: &Value) -> Vec<Filter> {
    let Value::Sequence(entries) = value else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Mapping(map) => Some(Filter {
                name: get_string(map, "name")?,
                args: get(map, "args").map(string_list).unwrap_or_default(),
            }),
            other => scalar_string(other).map(|name| Filter {
                name,
                args: Vec::new(),
            }),
        })
        .collect()
}
