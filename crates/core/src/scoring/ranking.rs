//! Ranking of search results.

use std::cmp::Ordering;
use tracing::debug;

use super::filter::check;
use super::scorer::score_result;
use super::types::{AssessedResult, Assessment, RankedResult, ScoreOptions, SearchResult};
use crate::metrics::{RANKING_CANDIDATES, RESULTS_SCORED};

/// Rank index for results whose resolution is not a preferred quality.
const UNLISTED_PREFERENCE: usize = 999;

/// Filter, score and sort `results`.
///
/// Without preferred qualities, results are sorted by score, highest first.
/// Otherwise they are sorted by the position of their resolution in the
/// preference list, then by score. Ties keep their input order.
pub fn rank_all(results: Vec<SearchResult>, options: &ScoreOptions) -> Vec<RankedResult> {
    let candidates = results.len();
    RANKING_CANDIDATES.observe(candidates as f64);

    let mut ranked: Vec<RankedResult> = results
        .into_iter()
        .filter(|result| check(result, options).is_none())
        .map(|result| {
            let scored = score_result(&result, options);
            RESULTS_SCORED.inc();
            RankedResult {
                result,
                score: scored.score,
                breakdown: scored.breakdown,
                violations: scored.violations,
            }
        })
        .collect();

    if options.preferred_qualities.is_empty() {
        ranked.sort_by(|a, b| by_score_desc(a.score, b.score));
    } else {
        ranked.sort_by(|a, b| {
            preference_index(&a.result, options)
                .cmp(&preference_index(&b.result, options))
                .then_with(|| by_score_desc(a.score, b.score))
        });
    }

    debug!(
        candidates,
        accepted = ranked.len(),
        best = ranked.first().map(|r| r.result.title.as_str()),
        "Ranked search results"
    );

    ranked
}

/// The top-ranked result, if any result is acceptable.
pub fn select_best_result(
    results: Vec<SearchResult>,
    options: &ScoreOptions,
) -> Option<RankedResult> {
    rank_all(results, options).into_iter().next()
}

/// Score every result without dropping any.
///
/// Rejected results carry the first failed check and a score of zero. The
/// output is sorted by score, highest first.
pub fn score_all_with_reasons(
    results: Vec<SearchResult>,
    options: &ScoreOptions,
) -> Vec<AssessedResult> {
    let mut assessed: Vec<AssessedResult> = results
        .into_iter()
        .map(|result| match check(&result, options) {
            Some(reason) => AssessedResult {
                result,
                score: 0.0,
                assessment: Assessment::Rejected { reason },
            },
            None => {
                let scored = score_result(&result, options);
                RESULTS_SCORED.inc();
                AssessedResult {
                    result,
                    score: scored.score,
                    assessment: Assessment::Accepted {
                        breakdown: scored.breakdown,
                    },
                }
            }
        })
        .collect();

    assessed.sort_by(|a, b| by_score_desc(a.score, b.score));
    assessed
}

fn preference_index(result: &SearchResult, options: &ScoreOptions) -> usize {
    result
        .resolution()
        .and_then(|resolution| {
            options
                .preferred_qualities
                .iter()
                .position(|preferred| preferred.eq_ignore_ascii_case(resolution))
        })
        .unwrap_or(UNLISTED_PREFERENCE)
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
