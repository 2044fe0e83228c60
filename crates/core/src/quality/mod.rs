//! Release title quality classification.
//!
//! Turns free-text release titles ("Movie.2023.1080p.BluRay.x264-GRP") into a
//! structured [`QualityInfo`] using ordered first-match-wins rule tables, and
//! computes an absolute quality score from fixed tier tables.

mod classifier;
mod rules;
mod score;
mod types;

pub use classifier::{
    classify_results, extract_audio, extract_codec, extract_hdr_format, extract_resolution,
    extract_source, is_proper, is_repack, parse_quality,
};
pub use rules::{Rule, RuleTable};
pub use score::{
    audio_points, codec_points, hdr_points, quality_score, resolution_points, source_points,
    PROPER_BONUS, REPACK_BONUS,
};
pub use types::QualityInfo;
