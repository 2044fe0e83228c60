//! Mock quality profile scorer for testing.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::scoring::{MediaAttributes, ProfileScore, QualityProfileScorer};

/// Quality profile scorer returning a fixed score.
///
/// Every call is recorded so tests can assert on the normalized attributes
/// the scoring engine produced.
#[derive(Debug, Default)]
pub struct MockProfileScorer {
    score: f64,
    violations: Vec<String>,
    calls: Mutex<Vec<MediaAttributes>>,
}

impl MockProfileScorer {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            ..Default::default()
        }
    }

    /// Report `violation` on every call.
    pub fn with_violation(mut self, violation: impl Into<String>) -> Self {
        self.violations.push(violation.into());
        self
    }

    /// Attributes passed to [`QualityProfileScorer::score`], in call order.
    pub fn calls(&self) -> Vec<MediaAttributes> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl QualityProfileScorer for MockProfileScorer {
    fn score(&self, attributes: &MediaAttributes) -> ProfileScore {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(attributes.clone());
        }
        ProfileScore {
            score: self.score,
            breakdown: BTreeMap::from([("mock".to_string(), self.score)]),
            violations: self.violations.clone(),
        }
    }
}
