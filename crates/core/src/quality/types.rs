//! Types for release quality classification.

use serde::{Deserialize, Serialize};

/// Structured quality attributes extracted from a release title.
///
/// Every label is one of the labels of the matching rule table
/// (e.g. `"1080p"`, `"BluRay"`, `"x264"`, `"DTS-HD MA"`, `"HDR10+"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Video codec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    /// Audio codec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default)]
    pub hdr: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdr_format: Option<String>,
    #[serde(default)]
    pub proper: bool,
    #[serde(default)]
    pub repack: bool,
}

impl QualityInfo {
    /// True when no attribute could be extracted from the title.
    pub fn is_unknown(&self) -> bool {
        self.resolution.is_none()
            && self.source.is_none()
            && self.codec.is_none()
            && self.audio.is_none()
            && self.hdr_format.is_none()
            && !self.hdr
            && !self.proper
            && !self.repack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        let info = QualityInfo::default();
        assert!(info.is_unknown());
        assert!(!info.hdr);
        assert!(!info.proper);
        assert!(!info.repack);
    }

    #[test]
    fn test_serialization_skips_absent_labels() {
        let info = QualityInfo {
            resolution: Some("720p".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"resolution\":\"720p\""));
        assert!(!json.contains("source"));
        assert!(!json.contains("hdr_format"));
        assert!(json.contains("\"hdr\":false"));
    }

    #[test]
    fn test_deserialize_minimal() {
        let info: QualityInfo = serde_json::from_str(r#"{"codec": "x265"}"#).unwrap();
        assert_eq!(info.codec.as_deref(), Some("x265"));
        assert!(!info.proper);
        assert!(!info.is_unknown());
    }
}
