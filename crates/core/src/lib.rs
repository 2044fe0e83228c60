pub mod config;
pub mod definition;
pub mod fanout;
pub mod metrics;
pub mod quality;
pub mod scoring;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DefinitionsConfig,
    ScoringConfig,
};
pub use definition::{
    load_definitions, parse_definition, validate_definition, Definition, DefinitionCatalog,
    DefinitionError, LoadError, Selector,
};
pub use fanout::{run_bounded, BatchReport, FanoutConfig, TaskOutcome};
pub use quality::{classify_results, parse_quality, quality_score, QualityInfo};
pub use scoring::{
    filter_acceptable, rank_all, score_all_with_reasons, score_result, select_best_result,
    AssessedResult, QualityProfile, QualityProfileScorer, RankedResult, ScoreOptions,
    SearchResult,
};
