//! Indexer definitions.
//!
//! A definition is a declarative YAML document describing how to search and
//! scrape one indexer site. This module decodes such documents into a typed
//! [`Definition`], normalizes every selector into its canonical shape and
//! validates the result. Evaluating selectors against fetched pages happens
//! elsewhere.

mod error;
mod loader;
mod parser;
mod selector;
mod types;
mod validate;
mod yaml;

pub use error::DefinitionError;
pub use loader::{load_definition_file, load_definitions, DefinitionCatalog, FileLoadError, LoadError};
pub use parser::parse_definition;
pub use selector::{normalize_selector, Filter, Selector};
pub use types::{
    Capabilities, Captcha, CategoryMapping, Definition, DownloadBefore, DownloadConfig,
    IndexerType, LoginConfig, LoginTest, SearchConfig, SearchPath, Setting,
};
pub use validate::{validate_definition, REQUIRED_SEARCH_FIELDS};
