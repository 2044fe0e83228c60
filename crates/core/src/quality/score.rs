//! Absolute quality score from fixed tier tables.
//!
//! All components are additive; an unknown label contributes 0.

use super::QualityInfo;

pub const PROPER_BONUS: u32 = 25;
pub const REPACK_BONUS: u32 = 15;

pub fn resolution_points(label: &str) -> u32 {
    match label {
        "2160p" => 1000,
        "1080p" => 800,
        "720p" => 600,
        "576p" => 400,
        "480p" => 300,
        "360p" => 200,
        _ => 0,
    }
}

pub fn source_points(label: &str) -> u32 {
    match label {
        "REMUX" => 500,
        "BluRay" => 450,
        "WEB-DL" => 400,
        "WEBRip" => 350,
        "HDTV" => 300,
        "DVDRip" => 250,
        "DVD" => 200,
        "SDTV" => 150,
        "Telecine" => 100,
        "Telesync" => 75,
        "Screener" => 50,
        "CAM" => 25,
        _ => 0,
    }
}

pub fn codec_points(label: &str) -> u32 {
    match label {
        "x265" | "H.265" => 150,
        "AV1" => 140,
        "x264" | "H.264" => 100,
        "VP9" => 80,
        "XviD" => 50,
        "DivX" => 40,
        _ => 0,
    }
}

pub fn audio_points(label: &str) -> u32 {
    match label {
        "TrueHD Atmos" => 200,
        "DTS:X" => 190,
        "TrueHD" => 180,
        "DTS-HD MA" => 170,
        "DTS-HD" => 160,
        "FLAC" => 150,
        "DD+" => 120,
        "DTS" => 100,
        "AC3" => 80,
        "AAC" => 60,
        "Opus" => 50,
        "Vorbis" => 40,
        "MP3" => 30,
        _ => 0,
    }
}

pub fn hdr_points(label: &str) -> u32 {
    match label {
        "DV" => 100,
        "HDR10+" => 80,
        "HDR10" => 60,
        "HDR" => 40,
        _ => 0,
    }
}

/// Sum of all tier points plus PROPER/REPACK bonuses.
pub fn quality_score(info: &QualityInfo) -> u32 {
    fn points(label: &Option<String>, table: fn(&str) -> u32) -> u32 {
        label.as_deref().map(table).unwrap_or(0)
    }

    let mut score = points(&info.resolution, resolution_points)
        + points(&info.source, source_points)
        + points(&info.codec, codec_points)
        + points(&info.audio, audio_points)
        + points(&info.hdr_format, hdr_points);

    if info.proper {
        score += PROPER_BONUS;
    }
    if info.repack {
        score += REPACK_BONUS;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::parse_quality;

    fn with_resolution(resolution: &str) -> QualityInfo {
        QualityInfo {
            resolution: Some(resolution.to_string()),
            source: Some("WEB-DL".to_string()),
            codec: Some("x264".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolution_dominates_ordering() {
        let uhd = quality_score(&with_resolution("2160p"));
        let fhd = quality_score(&with_resolution("1080p"));
        let hd = quality_score(&with_resolution("720p"));
        assert!(uhd > fhd);
        assert!(fhd > hd);
    }

    #[test]
    fn test_empty_info_scores_zero() {
        assert_eq!(quality_score(&QualityInfo::default()), 0);
    }

    #[test]
    fn test_unknown_labels_score_zero() {
        let info = QualityInfo {
            resolution: Some("8640p".to_string()),
            audio: Some("PCM".to_string()),
            ..Default::default()
        };
        assert_eq!(quality_score(&info), 0);
    }

    #[test]
    fn test_reference_title_score() {
        let info = parse_quality("Movie.Name.2023.1080p.BluRay.x264.DTS-Group");
        // 800 + 450 + 100 + 100
        assert_eq!(quality_score(&info), 1450);
    }

    #[test]
    fn test_bonuses_are_additive() {
        let base = with_resolution("1080p");
        let bonus = QualityInfo {
            proper: true,
            repack: true,
            ..base.clone()
        };
        assert_eq!(
            quality_score(&bonus),
            quality_score(&base) + PROPER_BONUS + REPACK_BONUS
        );
    }

    #[test]
    fn test_full_stack_uhd() {
        let info = QualityInfo {
            resolution: Some("2160p".to_string()),
            source: Some("REMUX".to_string()),
            codec: Some("x265".to_string()),
            audio: Some("TrueHD Atmos".to_string()),
            hdr: true,
            hdr_format: Some("DV".to_string()),
            proper: false,
            repack: false,
        };
        assert_eq!(quality_score(&info), 1000 + 500 + 150 + 200 + 100);
    }

    #[test]
    fn test_codec_aliases_share_tier() {
        assert_eq!(codec_points("x265"), codec_points("H.265"));
        assert_eq!(codec_points("x264"), codec_points("H.264"));
    }
}
