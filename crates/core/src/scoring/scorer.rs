//! Composite result scoring.
//!
//! `score = (quality * 0.6 + seeder_score + relevance / 2) * zero_seeder_penalty`

use super::profile::MediaAttributes;
use super::relevance::title_relevance;
use super::types::{ResultScore, ScoreBreakdown, ScoreOptions, SearchResult};

const QUALITY_WEIGHT: f64 = 0.6;
const ZERO_SEEDER_PENALTY: f64 = 0.7;
/// Quality stand-in cap when no profile is supplied.
const FALLBACK_QUALITY_CAP: u32 = 100;

/// `log10(seeders + 1) * 10`, zero without seeders.
pub fn seeder_score(seeders: u32) -> f64 {
    if seeders == 0 {
        return 0.0;
    }
    (f64::from(seeders) + 1.0).log10() * 10.0
}

/// Score a single result. Never fails; missing quality data scores zero for
/// the affected terms.
pub fn score_result(result: &SearchResult, options: &ScoreOptions) -> ResultScore {
    let (quality, violations) = match &options.quality_profile {
        Some(profile) => {
            let attributes = MediaAttributes::from_result(result, options.media_type);
            let profile_score = profile.score(&attributes);
            (profile_score.score.clamp(0.0, 100.0), profile_score.violations)
        }
        None => (f64::from(result.seeders.min(FALLBACK_QUALITY_CAP)), Vec::new()),
    };

    let quality_part = quality * QUALITY_WEIGHT;
    let seeders_part = seeder_score(result.seeders);
    let title_part = options
        .search_query
        .as_deref()
        .map(|query| title_relevance(&result.title, query) / 2.0)
        .unwrap_or(0.0);

    let penalty = if result.seeders == 0 {
        ZERO_SEEDER_PENALTY
    } else {
        1.0
    };
    let score = (quality_part + seeders_part + title_part) * penalty;

    ResultScore {
        score,
        breakdown: ScoreBreakdown {
            quality: round2(quality_part),
            seeders: round2(seeders_part),
            size: 0.0,
            age: 0.0,
            title_match: round2(title_part),
            tag_bonus: 0.0,
            total: round2(score),
        },
        violations,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
