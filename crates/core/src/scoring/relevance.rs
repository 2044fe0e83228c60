//! Title relevance against a search query.
//!
//! Raw relevance lies in [0, 20]:
//! `match_ratio * 15 + starts_with_bonus - extra_word_penalty`.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::collections::HashSet;

const MATCH_WEIGHT: f64 = 15.0;
const STARTS_WITH_BONUS: f64 = 5.0;
const EXTRA_WORD_PENALTY: f64 = 2.0;
const MAX_EXTRA_WORD_PENALTY: f64 = 10.0;
const MAX_RELEVANCE: f64 = 20.0;

const STOPWORDS: &[&str] = &["the", "a", "an", "of", "and", "or", "in", "on", "at", "to", "for"];

/// Release-name tokens that describe the encode rather than the content.
static QUALITY_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // resolution
        "2160p", "1080p", "1080i", "720p", "576p", "480p", "360p", "4k", "uhd",
        // source
        "remux", "bluray", "blu", "ray", "bdrip", "brrip", "web", "dl", "webdl", "webrip", "rip",
        "hdtv", "dvdrip", "dvd", "dvdr", "sdtv", "pdtv", "hdrip", "cam", "hdcam", "camrip", "ts",
        "hdts", "telesync", "tc", "hdtc", "telecine", "scr", "screener", "dvdscr",
        // video codec
        "x264", "x265", "h264", "h265", "hevc", "avc", "av1", "vp9", "xvid", "divx", "10bit",
        "8bit",
        // audio
        "aac", "ac3", "dts", "hd", "ma", "truehd", "atmos", "flac", "dd", "ddp", "eac3", "opus",
        "vorbis", "mp3", "dts:x",
        // hdr
        "hdr", "hdr10", "hdr10+", "hdr10plus", "dv", "dovi", "sdr",
        // release flags
        "proper", "repack",
    ]
    .into_iter()
    .collect()
});

static EPISODE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(s\d+e?\d*|e\d+)$").unwrap());

/// Lowercase `text` and split it into words, treating `.`, `_` and `-` as spaces.
pub fn normalize_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(['.', '_', '-'], " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Raw relevance of `title` to `query`, in [0, 20]. An empty query scores 0.
pub fn title_relevance(title: &str, query: &str) -> f64 {
    let query_words = normalize_words(query);
    if query_words.is_empty() {
        return 0.0;
    }
    let title_words = normalize_words(title);

    let found = query_words
        .iter()
        .filter(|q| title_words.iter().any(|t| words_match(t, q)))
        .count();
    let match_ratio = found as f64 / query_words.len() as f64;

    let starts_with_bonus = match (first_significant(&query_words), first_significant(&title_words)) {
        (Some(q), Some(t)) if q == t => STARTS_WITH_BONUS,
        _ => 0.0,
    };

    let query_set: HashSet<&str> = query_words.iter().map(String::as_str).collect();
    let extra_words = title_words
        .iter()
        .filter(|t| !query_set.contains(t.as_str()))
        .filter(|t| !is_release_token(t))
        .count();
    let penalty = (EXTRA_WORD_PENALTY * extra_words as f64).min(MAX_EXTRA_WORD_PENALTY);

    (match_ratio * MATCH_WEIGHT + starts_with_bonus - penalty).clamp(0.0, MAX_RELEVANCE)
}

/// Exact match, or either word is a prefix of the other.
fn words_match(a: &str, b: &str) -> bool {
    a == b || a.starts_with(b) || b.starts_with(a)
}

fn first_significant(words: &[String]) -> Option<&str> {
    words
        .iter()
        .map(String::as_str)
        .find(|word| !STOPWORDS.contains(word))
}

/// Quality tokens, season/episode markers and years.
fn is_release_token(word: &str) -> bool {
    QUALITY_TOKENS.contains(word) || EPISODE_MARKER.is_match(word) || is_year(word)
}

fn is_year(word: &str) -> bool {
    word.len() == 4
        && word
            .parse::<u16>()
            .map(|year| (1900..=2100).contains(&year))
            .unwrap_or(false)
}
