//! Testing utilities and mock implementations.
//!
//! This module provides fixtures for search results and definition
//! documents, and a mock quality profile scorer that records the attributes
//! it was asked to score.
//!
//! # Example
//!
//! ```rust,ignore
//! use discovery_core::testing::{fixtures, MockProfileScorer};
//!
//! let profile = Arc::new(MockProfileScorer::new(75.0));
//! let options = ScoreOptions::new().with_quality_profile(profile.clone());
//!
//! rank_all(vec![fixtures::search_result("Movie.1080p", 10, 2, 700)], &options);
//! assert_eq!(profile.calls().len(), 1);
//! ```

mod mock_profile;

pub use mock_profile::MockProfileScorer;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::scoring::SearchResult;

    /// A minimal valid public indexer definition.
    pub const MINIMAL_DEFINITION: &str = r#"id: examplepublic
name: Example Public
description: Example public tracker
language: en-US
type: public
encoding: UTF-8
links:
  - https://example.org/
caps:
  categories:
    1: Movies
    2: TV
  modes:
    search: [q]
    movie-search: [q]
search:
  path: search/{{ .Keywords }}/1/
  rows:
    selector: table.results > tbody > tr
  fields:
    title: a.title
    details:
      selector: a.title
      attribute: href
    download:
      selector: a[href^="magnet:?"]
      attribute: href
    size:
      selector: td.size
    seeders:
      selector: td.seeds
    leechers:
      selector: td.leeches
"#;

    /// Create a test search result. `size_mb` is in mebibytes.
    pub fn search_result(title: &str, seeders: u32, leechers: u32, size_mb: u64) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            size_bytes: size_mb * 1024 * 1024,
            seeders,
            leechers,
            published_at: None,
            quality: None,
            indexer: Some("mock-indexer".to_string()),
        }
    }

    /// Create a batch of results from `(title, seeders)` pairs, 1 GB each.
    pub fn search_results(entries: &[(&str, u32)]) -> Vec<SearchResult> {
        entries
            .iter()
            .map(|&(title, seeders)| search_result(title, seeders, 0, 1024))
            .collect()
    }
}
