//! Acceptance filters.

use tracing::trace;

use super::types::{RejectionReason, ScoreOptions, SearchResult};
use crate::metrics::RESULTS_REJECTED;

/// The first acceptance check `result` fails, if any.
///
/// Checks run in a fixed order: seeders, ratio, size, blocked tags.
pub fn rejection_reason(result: &SearchResult, options: &ScoreOptions) -> Option<RejectionReason> {
    if result.seeders < options.min_seeders {
        return Some(RejectionReason::LowSeeders);
    }

    if let Some(min_ratio) = options.min_ratio {
        let peers = u64::from(result.seeders) + u64::from(result.leechers);
        // No peers at all is not a ratio problem.
        if peers > 0 && (f64::from(result.seeders) / peers as f64) < min_ratio {
            return Some(RejectionReason::LowRatio);
        }
    }

    if let Some(range) = &options.size_range {
        if !range.contains_mb(result.size_mb()) {
            return Some(RejectionReason::SizeOutOfRange);
        }
    }

    let title = result.title.to_lowercase();
    let blocked = options
        .blocked_tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .any(|tag| title.contains(&tag.to_lowercase()));
    if blocked {
        return Some(RejectionReason::BlockedTag);
    }

    None
}

/// Like [`rejection_reason`], but records the rejection.
pub(crate) fn check(result: &SearchResult, options: &ScoreOptions) -> Option<RejectionReason> {
    let reason = rejection_reason(result, options)?;
    RESULTS_REJECTED.with_label_values(&[reason.as_str()]).inc();
    trace!(title = %result.title, reason = %reason, "Rejected search result");
    Some(reason)
}

/// Keep only results that pass every acceptance check, preserving order.
pub fn filter_acceptable(results: Vec<SearchResult>, options: &ScoreOptions) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(|result| check(result, options).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::search_result;

    #[test]
    fn test_min_seeders() {
        let options = ScoreOptions::new().with_min_seeders(5);
        let results = vec![
            search_result("A", 4, 0, 100),
            search_result("B", 5, 0, 100),
            search_result("C", 50, 0, 100),
        ];

        let kept = filter_acceptable(results, &options);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.seeders >= 5));
    }

    #[test]
    fn test_ratio_skipped_without_peers() {
        let options = ScoreOptions::new().with_min_ratio(0.5);
        assert_eq!(rejection_reason(&search_result("A", 0, 0, 100), &options), None);
        assert_eq!(
            rejection_reason(&search_result("B", 1, 3, 100), &options),
            Some(RejectionReason::LowRatio)
        );
        assert_eq!(rejection_reason(&search_result("C", 3, 3, 100), &options), None);
    }

    #[test]
    fn test_size_range() {
        let options = ScoreOptions::new().with_size_range(Some(500.0), Some(2000.0));
        assert_eq!(
            rejection_reason(&search_result("Small", 10, 0, 499), &options),
            Some(RejectionReason::SizeOutOfRange)
        );
        assert_eq!(rejection_reason(&search_result("Ok", 10, 0, 500), &options), None);
        assert_eq!(
            rejection_reason(&search_result("Big", 10, 0, 2001), &options),
            Some(RejectionReason::SizeOutOfRange)
        );

        let open_ended = ScoreOptions::new().with_size_range(None, Some(1000.0));
        assert_eq!(rejection_reason(&search_result("Tiny", 10, 0, 1), &open_ended), None);
    }

    #[test]
    fn test_blocked_tags_case_insensitive() {
        let options = ScoreOptions::new().with_blocked_tags(["CAM", ""]);
        assert_eq!(
            rejection_reason(&search_result("Movie.2023.HDcam.x264", 10, 0, 700), &options),
            Some(RejectionReason::BlockedTag)
        );
        assert_eq!(
            rejection_reason(&search_result("Movie.2023.1080p.BluRay", 10, 0, 700), &options),
            None
        );
    }

    #[test]
    fn test_reason_priority() {
        let options = ScoreOptions::new()
            .with_min_seeders(5)
            .with_min_ratio(0.9)
            .with_size_range(Some(1000.0), None)
            .with_blocked_tags(["cam"]);

        let everything_wrong = search_result("Movie.CAM", 1, 10, 10);
        assert_eq!(
            rejection_reason(&everything_wrong, &options),
            Some(RejectionReason::LowSeeders)
        );

        let bad_ratio = search_result("Movie.CAM", 10, 10, 10);
        assert_eq!(rejection_reason(&bad_ratio, &options), Some(RejectionReason::LowRatio));

        let too_small = search_result("Movie.CAM", 10, 0, 10);
        assert_eq!(
            rejection_reason(&too_small, &options),
            Some(RejectionReason::SizeOutOfRange)
        );

        let blocked = search_result("Movie.CAM", 10, 0, 2000);
        assert_eq!(rejection_reason(&blocked, &options), Some(RejectionReason::BlockedTag));
    }
}
