//! Types describing a parsed indexer definition.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::selector::{Filter, Selector};

/// Access level of an indexer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum IndexerType {
    Public,
    Private,
    SemiPrivate,
}

impl IndexerType {
    /// Parse the DSL spelling (`public`, `private`, `semi-private`).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "semi-private" | "semiprivate" => Some(Self::SemiPrivate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::SemiPrivate => "semi-private",
        }
    }
}

/// A validated description of how to search one indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub language: String,
    #[serde(rename = "type")]
    pub indexer_type: IndexerType,
    pub encoding: String,
    pub links: Vec<String>,
    /// Older domains the indexer used to live on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legacy_links: Vec<String>,
    pub capabilities: Capabilities,
    pub search: SearchConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<LoginConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<DownloadConfig>,
    #[serde(default)]
    pub settings: Vec<Setting>,
    /// Minimum delay between requests, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_delay: Option<f64>,
    #[serde(default)]
    pub follow_redirect: bool,
    #[serde(default = "default_test_link_torrent")]
    pub test_link_torrent: bool,
    #[serde(default)]
    pub certificates: Vec<String>,
    #[serde(default)]
    pub replaces: Vec<String>,
}

fn default_test_link_torrent() -> bool {
    true
}

/// What the indexer can search for and how its categories map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Search mode -> supported parameters (e.g. `tv-search: [q, season, ep]`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<BTreeMap<String, Vec<String>>>,
    /// Indexer category id -> display name.
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
    #[serde(default)]
    pub category_mappings: Vec<CategoryMapping>,
}

/// Mapping from an indexer-side category id to a standard category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMapping {
    pub id: String,
    pub cat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub paths: Vec<SearchPath>,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
    #[serde(default)]
    pub headers: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub keywords_filters: Vec<Filter>,
    pub rows: Selector,
    pub fields: BTreeMap<String, Selector>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPath {
    pub path: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default = "default_method")]
    pub method: String,
}

pub(crate) fn default_method() -> String {
    "get".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginConfig {
    pub method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_path: Option<String>,
    /// Selector of the login form, for form-based logins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
    /// Selectors whose presence indicates a failed login.
    #[serde(default)]
    pub error: Vec<Selector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<LoginTest>,
    #[serde(default)]
    pub cookies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha: Option<Captcha>,
}

/// Page and selector used to verify a session is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginTest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captcha {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default)]
    pub selectors: Vec<Selector>,
    /// Request issued before the download link is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<DownloadBefore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infohash: Option<Selector>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadBefore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}

/// A user-configurable setting declared by the definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl Definition {
    /// Whether the definition declares the given search mode.
    pub fn supports_mode(&self, mode: &str) -> bool {
        self.capabilities
            .modes
            .as_ref()
            .map(|modes| modes.contains_key(mode))
            .unwrap_or(false)
    }

    pub fn requires_login(&self) -> bool {
        self.login.is_some()
    }
}
