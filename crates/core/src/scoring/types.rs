//! Types for result filtering, scoring and ranking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::profile::QualityProfileScorer;
use crate::quality::QualityInfo;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A single release returned by an indexer search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    /// Size in bytes.
    #[serde(alias = "size")]
    pub size_bytes: u64,
    #[serde(default)]
    pub seeders: u32,
    #[serde(default)]
    pub leechers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityInfo>,
    /// Id of the indexer that returned this result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer: Option<String>,
}

impl SearchResult {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MB
    }

    pub fn resolution(&self) -> Option<&str> {
        self.quality.as_ref()?.resolution.as_deref()
    }
}

/// Kind of media being searched for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Episode,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Episode => "episode",
        }
    }
}

/// Acceptable size window in megabytes. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_mb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mb: Option<f64>,
}

impl SizeRange {
    pub fn contains_mb(&self, size_mb: f64) -> bool {
        self.min_mb.map_or(true, |min| size_mb >= min)
            && self.max_mb.map_or(true, |max| size_mb <= max)
    }
}

/// Options controlling filtering, scoring and ranking.
#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    pub min_seeders: u32,
    /// Minimum `seeders / (seeders + leechers)`, in [0, 1].
    pub min_ratio: Option<f64>,
    pub size_range: Option<SizeRange>,
    /// Resolutions in order of preference. Empty means rank purely by score.
    pub preferred_qualities: Vec<String>,
    /// Case-insensitive title substrings that reject a result.
    pub blocked_tags: Vec<String>,
    pub search_query: Option<String>,
    pub quality_profile: Option<Arc<dyn QualityProfileScorer>>,
    pub media_type: MediaType,
}

impl ScoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_seeders(mut self, min_seeders: u32) -> Self {
        self.min_seeders = min_seeders;
        self
    }

    pub fn with_min_ratio(mut self, min_ratio: f64) -> Self {
        self.min_ratio = Some(min_ratio);
        self
    }

    pub fn with_size_range(mut self, min_mb: Option<f64>, max_mb: Option<f64>) -> Self {
        self.size_range = Some(SizeRange { min_mb, max_mb });
        self
    }

    pub fn with_preferred_qualities<I, S>(mut self, qualities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_qualities = qualities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_blocked_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn with_quality_profile(mut self, profile: Arc<dyn QualityProfileScorer>) -> Self {
        self.quality_profile = Some(profile);
        self
    }

    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }
}

/// Per-component score contributions, rounded to two decimals.
///
/// `size`, `age` and `tag_bonus` are always zero under the current formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub quality: f64,
    pub seeders: f64,
    pub size: f64,
    pub age: f64,
    pub title_match: f64,
    pub tag_bonus: f64,
    pub total: f64,
}

/// Output of scoring a single result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultScore {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    /// Quality profile violations, if a profile was used.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

/// A scored result that passed filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub result: SearchResult,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

/// Why a result failed the acceptance filters, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    LowSeeders,
    LowRatio,
    SizeOutOfRange,
    BlockedTag,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowSeeders => "low_seeders",
            Self::LowRatio => "low_ratio",
            Self::SizeOutOfRange => "size_out_of_range",
            Self::BlockedTag => "blocked_tag",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accept/reject verdict for a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Assessment {
    Accepted { breakdown: ScoreBreakdown },
    Rejected { reason: RejectionReason },
}

/// A result with its verdict. Rejected results have a score of zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessedResult {
    pub result: SearchResult,
    pub score: f64,
    #[serde(flatten)]
    pub assessment: Assessment,
}

impl AssessedResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self.assessment, Assessment::Accepted { .. })
    }

    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        match self.assessment {
            Assessment::Rejected { reason } => Some(reason),
            Assessment::Accepted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_size_mb() {
        let result = fixtures::search_result("Movie", 1, 0, 700);
        assert!((result.size_mb() - 700.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_size_range_bounds() {
        let range = SizeRange {
            min_mb: Some(100.0),
            max_mb: None,
        };
        assert!(!range.contains_mb(99.9));
        assert!(range.contains_mb(100.0));
        assert!(range.contains_mb(1_000_000.0));
        assert!(SizeRange::default().contains_mb(0.0));
    }

    #[test]
    fn test_search_result_accepts_size_alias() {
        let result: SearchResult =
            serde_json::from_str(r#"{"title":"Movie.1080p","size":1048576,"seeders":3}"#).unwrap();
        assert_eq!(result.size_bytes, 1_048_576);
        assert_eq!(result.leechers, 0);
        assert!(result.quality.is_none());
    }

    #[test]
    fn test_assessed_result_serialization() {
        let assessed = AssessedResult {
            result: fixtures::search_result("Movie", 0, 0, 100),
            score: 0.0,
            assessment: Assessment::Rejected {
                reason: RejectionReason::LowSeeders,
            },
        };
        let json = serde_json::to_value(&assessed).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["reason"], "low_seeders");
        assert_eq!(assessed.rejection_reason(), Some(RejectionReason::LowSeeders));
    }
}
