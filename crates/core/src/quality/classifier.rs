//! Title parsing into [`QualityInfo`].

use tracing::trace;

use crate::metrics::TITLES_CLASSIFIED;
use crate::scoring::SearchResult;

use super::rules::{AUDIO, CODEC, HDR_FORMAT, PROPER, REPACK, RESOLUTION, SOURCE};
use super::QualityInfo;

/// Parse a release title into its quality attributes.
///
/// Each attribute is extracted independently; attributes that cannot be
/// recognised are left as `None` / `false`.
pub fn parse_quality(title: &str) -> QualityInfo {
    let hdr_format = extract_hdr_format(title);
    let info = QualityInfo {
        resolution: extract_resolution(title),
        source: extract_source(title),
        codec: extract_codec(title),
        audio: extract_audio(title),
        hdr: hdr_format.is_some(),
        hdr_format,
        proper: is_proper(title),
        repack: is_repack(title),
    };

    let outcome = if info.is_unknown() { "unknown" } else { "recognized" };
    TITLES_CLASSIFIED.with_label_values(&[outcome]).inc();
    trace!(title = title, quality = ?info, "Classified release title");

    info
}

pub fn extract_resolution(title: &str) -> Option<String> {
    RESOLUTION.first_match(title).map(str::to_string)
}

pub fn extract_source(title: &str) -> Option<String> {
    SOURCE.first_match(title).map(str::to_string)
}

/// Video codec label (`x265`, `H.265`, `AV1`, `x264`, ...).
pub fn extract_codec(title: &str) -> Option<String> {
    CODEC.first_match(title).map(str::to_string)
}

/// Audio codec label (`TrueHD Atmos`, `DTS-HD MA`, `DD+`, ...).
pub fn extract_audio(title: &str) -> Option<String> {
    AUDIO.first_match(title).map(str::to_string)
}

pub fn extract_hdr_format(title: &str) -> Option<String> {
    HDR_FORMAT.first_match(title).map(str::to_string)
}

pub fn is_proper(title: &str) -> bool {
    PROPER.is_match(title)
}

pub fn is_repack(title: &str) -> bool {
    REPACK.is_match(title)
}

/// Attach parsed quality to every result that does not carry one yet.
///
/// Results that already have quality attributes (e.g. reported by the
/// indexer) are left untouched.
pub fn classify_results(results: Vec<SearchResult>) -> Vec<SearchResult> {
    results
        .into_iter()
        .map(|mut result| {
            if result.quality.is_none() {
                result.quality = Some(parse_quality(&result.title));
            }
            result
        })
        .collect()
}
