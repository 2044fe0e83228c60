//! Quality profile scoring.
//!
//! A quality profile expresses user preferences over a release's technical
//! attributes. The scoring engine only depends on the [`QualityProfileScorer`]
//! contract; [`QualityProfile`] is the built-in implementation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

use super::types::{MediaType, SearchResult};
use crate::quality::QualityInfo;

/// Scores media attributes against user preferences.
pub trait QualityProfileScorer: Send + Sync + Debug {
    fn score(&self, attributes: &MediaAttributes) -> ProfileScore;
}

/// Normalized technical attributes of a release, as seen by a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaAttributes {
    pub resolution: Option<String>,
    pub source: Option<String>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub hdr_format: Option<String>,
    pub file_size_mb: f64,
    pub media_type: MediaType,
}

impl MediaAttributes {
    pub fn from_quality(quality: &QualityInfo, file_size_mb: f64, media_type: MediaType) -> Self {
        let hdr_format = quality
            .hdr_format
            .as_deref()
            .map(normalize_hdr_format)
            .or_else(|| quality.hdr.then(|| "hdr10".to_string()));

        Self {
            resolution: quality.resolution.as_deref().map(str::to_lowercase),
            source: quality.source.as_deref().map(normalize_source),
            video_codec: quality.codec.as_deref().map(normalize_video_codec),
            audio_codec: quality.audio.as_deref().map(normalize_audio_codec),
            hdr_format,
            file_size_mb,
            media_type,
        }
    }

    /// Attributes of a result; missing quality data leaves every attribute unset.
    pub fn from_result(result: &SearchResult, media_type: MediaType) -> Self {
        match &result.quality {
            Some(quality) => Self::from_quality(quality, result.size_mb(), media_type),
            None => Self {
                file_size_mb: result.size_mb(),
                media_type,
                ..Default::default()
            },
        }
    }
}

/// Result of scoring attributes against a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileScore {
    /// In [0, 100].
    pub score: f64,
    pub breakdown: BTreeMap<String, f64>,
    pub violations: Vec<String>,
}

pub fn normalize_source(source: &str) -> String {
    match source.to_lowercase().as_str() {
        "web-dl" | "webdl" | "web" => "web-dl".to_string(),
        "webrip" | "web-rip" => "webrip".to_string(),
        "bluray" | "blu-ray" => "bluray".to_string(),
        other => other.to_string(),
    }
}

pub fn normalize_video_codec(codec: &str) -> String {
    match codec.to_lowercase().as_str() {
        "x264" | "h.264" | "h264" | "avc" => "h264".to_string(),
        "x265" | "h.265" | "h265" | "hevc" => "h265".to_string(),
        other => other.to_string(),
    }
}

pub fn normalize_audio_codec(audio: &str) -> String {
    match audio.to_lowercase().as_str() {
        "truehd atmos" | "atmos" => "atmos".to_string(),
        "dts:x" | "dts-hd ma" | "dts-hd" => "dts-hd".to_string(),
        "dd+" | "ddp" | "e-ac3" | "eac3" => "eac3".to_string(),
        "dd" | "ac-3" | "ac3" => "ac3".to_string(),
        other => other.to_string(),
    }
}

pub fn normalize_hdr_format(format: &str) -> String {
    match format.to_lowercase().as_str() {
        "dv" | "dovi" | "dolby vision" | "dolby_vision" => "dolby_vision".to_string(),
        "hdr10+" | "hdr10plus" => "hdr10plus".to_string(),
        "hdr10" | "hdr" => "hdr10".to_string(),
        other => other.to_string(),
    }
}

pub const WEIGHT_RESOLUTION: f64 = 40.0;
pub const WEIGHT_SOURCE: f64 = 25.0;
pub const WEIGHT_VIDEO_CODEC: f64 = 15.0;
pub const WEIGHT_AUDIO_CODEC: f64 = 10.0;
pub const WEIGHT_HDR: f64 = 10.0;

/// Built-in preference-list quality profile.
///
/// Each dimension holds normalized values in order of preference (`h265`,
/// `atmos`, `dolby_vision`, ...). The first entry earns the full weight of its
/// dimension, later entries progressively less, unlisted values nothing. An
/// empty list expresses no preference and earns half the weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityProfile {
    pub name: String,
    pub resolutions: Vec<String>,
    pub sources: Vec<String>,
    pub video_codecs: Vec<String>,
    pub audio_codecs: Vec<String>,
    pub hdr_formats: Vec<String>,
    /// Resolutions outside this list are violations. Empty allows all.
    pub allowed_resolutions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size_mb: Option<f64>,
}

impl QualityProfile {
    fn violations(&self, attributes: &MediaAttributes) -> Vec<String> {
        let mut violations = Vec::new();

        if !self.allowed_resolutions.is_empty() {
            let allowed = attributes
                .resolution
                .as_deref()
                .map(|res| position(&self.allowed_resolutions, res).is_some())
                .unwrap_or(false);
            if !allowed {
                violations.push("resolution_not_allowed".to_string());
            }
        }
        if self.min_size_mb.is_some_and(|min| attributes.file_size_mb < min) {
            violations.push("size_below_minimum".to_string());
        }
        if self.max_size_mb.is_some_and(|max| attributes.file_size_mb > max) {
            violations.push("size_above_maximum".to_string());
        }

        violations
    }
}

impl QualityProfileScorer for QualityProfile {
    fn score(&self, attributes: &MediaAttributes) -> ProfileScore {
        let dimensions = [
            ("resolution", &self.resolutions, &attributes.resolution, WEIGHT_RESOLUTION),
            ("source", &self.sources, &attributes.source, WEIGHT_SOURCE),
            ("video_codec", &self.video_codecs, &attributes.video_codec, WEIGHT_VIDEO_CODEC),
            ("audio_codec", &self.audio_codecs, &attributes.audio_codec, WEIGHT_AUDIO_CODEC),
            ("hdr_format", &self.hdr_formats, &attributes.hdr_format, WEIGHT_HDR),
        ];

        let breakdown: BTreeMap<String, f64> = dimensions
            .into_iter()
            .map(|(name, preferred, value, weight)| {
                (name.to_string(), weight * preference(preferred, value.as_deref()))
            })
            .collect();

        let violations = self.violations(attributes);
        let mut score: f64 = breakdown.values().sum();
        if !violations.is_empty() {
            score /= 2.0;
        }

        ProfileScore {
            score: score.clamp(0.0, 100.0),
            breakdown,
            violations,
        }
    }
}

/// Fraction of a dimension's weight earned by `value`.
fn preference(preferred: &[String], value: Option<&str>) -> f64 {
    if preferred.is_empty() {
        return 0.5;
    }
    match value.and_then(|value| position(preferred, value)) {
        Some(index) => 1.0 - index as f64 / preferred.len() as f64,
        None => 0.0,
    }
}

fn position(list: &[String], value: &str) -> Option<usize> {
    list.iter().position(|item| item.eq_ignore_ascii_case(value))
}
