use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::fanout::FanoutConfig;
use crate::scoring::{MediaType, QualityProfile, ScoreOptions, SizeRange};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub definitions: DefinitionsConfig,
    /// Quality profile used for scoring. Without one, seeders stand in for quality.
    #[serde(default)]
    pub profile: Option<QualityProfile>,
}

impl Config {
    /// Scoring options from the `[scoring]` section and the optional profile.
    pub fn score_options(&self) -> ScoreOptions {
        let mut options = self.scoring.to_options();
        if let Some(profile) = &self.profile {
            options = options.with_quality_profile(Arc::new(profile.clone()));
        }
        options
    }
}

/// Result acceptance and ranking configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub min_seeders: u32,
    #[serde(default)]
    pub min_ratio: Option<f64>,
    #[serde(default)]
    pub size_range: Option<SizeRange>,
    /// Resolutions in order of preference
    #[serde(default)]
    pub preferred_qualities: Vec<String>,
    #[serde(default)]
    pub blocked_tags: Vec<String>,
    #[serde(default)]
    pub media_type: MediaType,
}

impl ScoringConfig {
    pub fn to_options(&self) -> ScoreOptions {
        ScoreOptions {
            min_seeders: self.min_seeders,
            min_ratio: self.min_ratio,
            size_range: self.size_range,
            preferred_qualities: self.preferred_qualities.clone(),
            blocked_tags: self.blocked_tags.clone(),
            media_type: self.media_type,
            ..Default::default()
        }
    }
}

/// Definition directory loading configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefinitionsConfig {
    #[serde(default = "default_definitions_dir")]
    pub dir: PathBuf,
    /// Maximum files parsed concurrently
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Per-file timeout in seconds
    #[serde(default = "default_task_timeout_secs")]
    pub task_timeout_secs: u64,
}

impl Default for DefinitionsConfig {
    fn default() -> Self {
        Self {
            dir: default_definitions_dir(),
            max_concurrency: default_max_concurrency(),
            task_timeout_secs: default_task_timeout_secs(),
        }
    }
}

impl DefinitionsConfig {
    pub fn fanout(&self) -> FanoutConfig {
        FanoutConfig {
            max_concurrency: self.max_concurrency,
            task_timeout: Duration::from_secs(self.task_timeout_secs),
        }
    }
}

fn default_definitions_dir() -> PathBuf {
    PathBuf::from("definitions")
}

fn default_max_concurrency() -> usize {
    8
}

fn default_task_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scoring.min_seeders, 0);
        assert!(config.scoring.min_ratio.is_none());
        assert_eq!(config.definitions.dir, PathBuf::from("definitions"));
        assert_eq!(config.definitions.max_concurrency, 8);
        assert_eq!(config.definitions.task_timeout_secs, 10);
        assert!(config.profile.is_none());
    }

    #[test]
    fn test_score_options_carry_profile() {
        let mut config = Config::default();
        config.scoring.min_seeders = 3;
        config.scoring.preferred_qualities = vec!["1080p".to_string()];
        assert!(config.score_options().quality_profile.is_none());

        config.profile = Some(QualityProfile::default());
        let options = config.score_options();
        assert_eq!(options.min_seeders, 3);
        assert_eq!(options.preferred_qualities, vec!["1080p"]);
        assert!(options.quality_profile.is_some());
        assert!(options.search_query.is_none());
    }

    #[test]
    fn test_fanout_config() {
        let definitions = DefinitionsConfig {
            max_concurrency: 2,
            task_timeout_secs: 30,
            ..Default::default()
        };
        let fanout = definitions.fanout();
        assert_eq!(fanout.max_concurrency, 2);
        assert_eq!(fanout.task_timeout, Duration::from_secs(30));
    }
}
