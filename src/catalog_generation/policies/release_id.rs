use regex::Regex;
use std::sync::LazyLock;

/// Build-major thresholds, scanned top to bottom; the first threshold the
/// build meets or exceeds names its release. Entry order is significant.
const BUILD_RELEASE_THRESHOLDS: &[(u32, &str)] = &[
    (26200, "25H2"),
    (26100, "24H2"),
    (22631, "23H2"),
    (22621, "22H2"),
    (22000, "21H2"),
    (19045, "22H2"),
    (19044, "21H2"),
    (19043, "21H1"),
    (19042, "20H2"),
    (19041, "2004"),
    (18363, "1909"),
    (18362, "1903"),
    (17763, "1809"),
    (17134, "1803"),
    (16299, "1709"),
    (15063, "1703"),
    (14393, "1607"),
    (10586, "1511"),
    (10240, "1507"),
];

/// First Windows 11 build
pub const WINDOWS_11_MIN_BUILD: u32 = 22000;

static RELEASE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(25H2|24H2|23H2|22H2|21H2|21H1|20H2|2004|1909|1903|1809|1803|1709|1703|1607|1511|1507)",
    )
    .expect("Invalid release token regex")
});

static HALF_YEAR_RELEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{2})H([12])$").expect("Invalid half-year regex"));

static CALENDAR_RELEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})\d{2}$").expect("Invalid calendar release regex"));

static FIVE_DIGIT_BUILD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{5})(?:[^0-9]|$)").expect("Invalid build token regex")
});

static WINPE_COMBINED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"10\s*/\s*11").expect("Invalid WinPE 10/11 regex"));

static WINPE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)winpe(\d+)x").expect("Invalid WinPE code regex"));

static WINPE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)winpe\s*(\d+)(?:\.\d+)?").expect("Invalid WinPE version regex")
});

static WINPE_STANDALONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(11|10|5|4|3)\b").expect("Invalid WinPE token regex"));

/// ReleaseIdPolicy encodes how a public Windows release identifier
/// ("23H2", "1909", ...) is inferred from builds and vendor text.
pub struct ReleaseIdPolicy;

impl ReleaseIdPolicy {
    /// Release identifier for a build major, or `None` below 10240.
    pub fn from_build(build_major: Option<u32>) -> Option<&'static str> {
        let build = build_major?;
        BUILD_RELEASE_THRESHOLDS
            .iter()
            .find(|(threshold, _)| build >= *threshold)
            .map(|(_, release)| *release)
    }

    /// Extracts the build major from "22631", "22631.2861" or "10.0.22631.2861".
    pub fn parse_build_major(text: &str) -> Option<u32> {
        let mut parts = text.trim().split('.');
        let first = parts.next()?;
        let candidate = if first == "10" {
            match (parts.next(), parts.next()) {
                (Some("0"), Some(build)) => build,
                _ => first,
            }
        } else {
            first
        };
        candidate.parse().ok()
    }

    /// First five-digit token in the text, e.g. the build in
    /// "SurfacePro9_Win11_22621_23.092.20045.0.msi".
    pub fn build_token(text: &str) -> Option<u32> {
        FIVE_DIGIT_BUILD
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// First literal release token in the text, upper-cased.
    pub fn from_text(text: &str) -> Option<String> {
        RELEASE_TOKEN
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_uppercase())
    }

    /// Best candidate from a comma-separated release list.
    ///
    /// `NNH1`/`NNH2` scores NN*10+half, a four-digit `YYMM` release scores
    /// its two-digit year YY, anything else -1. The highest score wins; ties keep the
    /// earliest candidate, so an all-unranked list yields its first entry.
    pub fn preferred(csv: &str) -> Option<String> {
        let mut best: Option<(&str, i64)> = None;
        for candidate in csv.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let score = Self::score(candidate);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }
        best.map(|(candidate, _)| candidate.to_string())
    }

    fn score(candidate: &str) -> i64 {
        if let Some(caps) = HALF_YEAR_RELEASE.captures(candidate) {
            let decade: i64 = caps[1].parse().unwrap_or(0);
            let half: i64 = caps[2].parse().unwrap_or(0);
            return decade * 10 + half;
        }
        if let Some(caps) = CALENDAR_RELEASE.captures(candidate) {
            return caps[1].parse().unwrap_or(-1);
        }
        -1
    }

    /// Release identifier of a WinPE family description.
    ///
    /// Tried in order: the combined "10/11" marker, a `winpeNNx` code, a
    /// `winpe N[.N]` version (major part only), then a standalone 11, 10, 5,
    /// 4 or 3.
    pub fn winpe_release(text: &str) -> Option<String> {
        if WINPE_COMBINED.is_match(text) {
            return Some("10/11".to_string());
        }
        [&*WINPE_CODE, &*WINPE_VERSION, &*WINPE_STANDALONE]
            .into_iter()
            .find_map(|pattern| {
                pattern
                    .captures(text)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string())
            })
    }

    /// Windows family implied by a build: 11 from build 22000 on, else 10.
    pub fn family_from_build(build_major: u32) -> &'static str {
        if build_major >= WINDOWS_11_MIN_BUILD {
            "Windows 11"
        } else {
            "Windows 10"
        }
    }
}
