//! Search result scoring and ranking.
//!
//! Filters a batch of [`SearchResult`]s by acceptance criteria, scores the
//! survivors on quality, swarm health and title relevance, and sorts them so
//! the best download candidate comes first.

mod filter;
mod profile;
mod ranking;
mod relevance;
mod scorer;
mod types;

pub use filter::{filter_acceptable, rejection_reason};
pub use profile::{
    normalize_audio_codec, normalize_hdr_format, normalize_source, normalize_video_codec,
    MediaAttributes, ProfileScore, QualityProfile, QualityProfileScorer,
};
pub use ranking::{rank_all, score_all_with_reasons, select_best_result};
pub use relevance::{normalize_words, title_relevance};
pub use scorer::{score_result, seeder_score};
pub use types::{
    AssessedResult, Assessment, MediaType, RankedResult, RejectionReason, ResultScore,
    ScoreBreakdown, ScoreOptions, SearchResult, SizeRange,
};
