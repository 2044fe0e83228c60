//! Ordered first-match-wins pattern tables.
//!
//! Order inside each table is significant: more specific labels must come
//! before the generic ones they contain (`HDR10+` before `HDR10` before `HDR`,
//! `REMUX` before `BluRay`, `TrueHD Atmos` before `TrueHD`). `WEBRip` is
//! tested before `WEB-DL` because the bare `WEB` tag would also match
//! `WEB-Rip`.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// A single `(label, pattern)` entry.
#[derive(Debug)]
pub struct Rule {
    pub label: &'static str,
    pub pattern: Regex,
}

/// An ordered list of rules; the first matching rule wins.
#[derive(Debug)]
pub struct RuleTable {
    pub name: &'static str,
    rules: Vec<Rule>,
}

impl RuleTable {
    fn new(name: &'static str, entries: &[(&'static str, &str)]) -> Self {
        let rules = entries
            .iter()
            .map(|&(label, pattern)| Rule {
                label,
                pattern: Regex::new(&format!("(?i){}", pattern))
                    .expect("static quality pattern must compile"),
            })
            .collect();
        Self { name, rules }
    }

    /// Label of the first rule matching anywhere in `title`.
    pub fn first_match(&self, title: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(title))
            .map(|rule| rule.label)
    }

    /// Labels in evaluation order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.label).collect()
    }
}

pub(crate) static RESOLUTION: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::new(
        "resolution",
        &[
            ("2160p", r"2160p|\b4k\b|\buhd\b"),
            ("1080p", r"1080[pi]"),
            ("720p", r"720p"),
            ("576p", r"576[pi]"),
            ("480p", r"480[pi]"),
            ("360p", r"360p"),
        ],
    )
});

pub(crate) static SOURCE: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::new(
        "source",
        &[
            ("REMUX", r"\bremux\b"),
            ("BluRay", r"blu-?ray|\bbdrip\b|\bbrrip\b|\bbd(25|50)\b"),
            ("WEBRip", r"web[-. ]?rip"),
            ("WEB-DL", r"web[-. ]?dl|\bweb\b"),
            ("HDTV", r"\bhdtv\b"),
            ("DVDRip", r"dvd[-. ]?rip"),
            ("DVD", r"\bdvd(r|5|9)?\b"),
            ("SDTV", r"\bsdtv\b|\bpdtv\b"),
            ("Telecine", r"\btelecine\b|\bhdtc\b|\btc\b"),
            ("Telesync", r"\btelesync\b|\bhdts\b|\bts\b"),
            ("Screener", r"\bscreener\b|\bdvdscr\b|\bscr\b"),
            ("CAM", r"\bcam\b|\bhdcam\b|\bcamrip\b"),
        ],
    )
});

pub(crate) static CODEC: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::new(
        "codec",
        &[
            ("x265", r"x\.?265"),
            ("H.265", r"h\.?265|\bhevc\b"),
            ("AV1", r"\bav1\b"),
            ("x264", r"x\.?264"),
            ("H.264", r"h\.?264|\bavc\b"),
            ("VP9", r"\bvp9\b"),
            ("XviD", r"\bxvid\b"),
            ("DivX", r"\bdivx\b"),
        ],
    )
});

pub(crate) static AUDIO: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::new(
        "audio",
        &[
            ("TrueHD Atmos", r"true-?hd.*atmos|atmos.*true-?hd"),
            ("DTS:X", r"dts[:. -]?x\b"),
            ("TrueHD", r"true-?hd"),
            ("DTS-HD MA", r"dts[-. ]?hd[-. ]?ma"),
            ("DTS-HD", r"dts[-. ]?hd"),
            ("FLAC", r"\bflac"),
            ("DD+", r"\bddp|dd\+|\be-?ac-?3"),
            ("DTS", r"\bdts"),
            ("AC3", r"\bac-?3\b|\bdd[ .]?[257]\.?[01]|\bdd\b|dolby[ .]?digital"),
            ("AAC", r"\baac"),
            ("Opus", r"\bopus\b"),
            ("Vorbis", r"\bvorbis\b|\bogg\b"),
            ("MP3", r"\bmp3\b"),
        ],
    )
});

pub(crate) static HDR_FORMAT: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::new(
        "hdr_format",
        &[
            ("DV", r"\bdv\b|\bdovi\b|dolby[ .]?vision"),
            ("HDR10+", r"hdr10(\+|plus)"),
            ("HDR10", r"hdr10"),
            ("HDR", r"\bhdr\b"),
        ],
    )
});

pub(crate) static PROPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bproper\b").expect("static proper pattern must compile"));

pub(crate) static REPACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\brepack\b").expect("static repack pattern must compile"));
