//! Prometheus metrics for the discovery engine.
//!
//! This module provides metrics for:
//! - Definition parsing and directory loading
//! - Title classification
//! - Result scoring and ranking

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Definitions
// =============================================================================

/// Definition documents parsed, by result.
pub static DEFINITIONS_PARSED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mydia_definitions_parsed_total",
            "Total indexer definition documents parsed",
        ),
        &["result"], // "ok" or an error code such as "missing_capabilities"
    )
    .unwrap()
});

/// Definition files loaded from disk, by outcome.
pub static DEFINITION_FILES_LOADED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mydia_definition_files_loaded_total",
            "Total definition files processed by the directory loader",
        ),
        &["outcome"], // "loaded", "failed", "timed_out"
    )
    .unwrap()
});

// =============================================================================
// Quality
// =============================================================================

/// Release titles classified.
pub static TITLES_CLASSIFIED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mydia_titles_classified_total",
            "Total release titles classified",
        ),
        &["outcome"], // "recognized", "unknown"
    )
    .unwrap()
});

// =============================================================================
// Scoring
// =============================================================================

/// Results that passed filtering and were scored.
pub static RESULTS_SCORED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("mydia_results_scored_total", "Total search results scored").unwrap()
});

/// Results rejected by filtering, by reason.
pub static RESULTS_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "mydia_results_rejected_total",
            "Total search results rejected by acceptance filters",
        ),
        &["reason"], // "low_seeders", "low_ratio", "size_out_of_range", "blocked_tag"
    )
    .unwrap()
});

/// Candidates per ranking call.
pub static RANKING_CANDIDATES: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "mydia_ranking_candidates",
            "Number of search results submitted per ranking call",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0]),
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Definitions
        Box::new(DEFINITIONS_PARSED.clone()),
        Box::new(DEFINITION_FILES_LOADED.clone()),
        // Quality
        Box::new(TITLES_CLASSIFIED.clone()),
        // Scoring
        Box::new(RESULTS_SCORED.clone()),
        Box::new(RESULTS_REJECTED.clone()),
        Box::new(RANKING_CANDIDATES.clone()),
    ]
}
