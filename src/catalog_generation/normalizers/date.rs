use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Canonical date shape of every record
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

type DateStrategy = fn(&str) -> Option<NaiveDate>;

/// Parse strategies in the order they are tried. The order decides which
/// ambiguous dates resolve (e.g. 03/04/2024 is March 4th, not April 3rd).
const DATE_STRATEGIES: &[DateStrategy] = &[parse_compact, parse_invariant, parse_host_locale];

const INVARIANT_NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const INVARIANT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const HOST_LOCALE_NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
];

const HOST_LOCALE_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y"];

/// Normalizes a vendor date string to `yyyy-MM-dd` (UTC).
///
/// Returns `None` when no strategy understands the input.
pub fn normalize_date(raw: Option<&str>) -> Option<String> {
    let text = raw.map(str::trim).filter(|s| !s.is_empty())?;
    DATE_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(text))
        .map(|date| date.format(ISO_DATE_FORMAT).to_string())
}

/// Parses a canonical `yyyy-MM-dd` date produced by [`normalize_date`].
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}

fn parse_compact(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y%m%d").ok()
}

fn parse_invariant(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    parse_with(text, INVARIANT_NAIVE_DATETIME_FORMATS, INVARIANT_DATE_FORMATS)
}

fn parse_host_locale(text: &str) -> Option<NaiveDate> {
    parse_with(
        text,
        HOST_LOCALE_NAIVE_DATETIME_FORMATS,
        HOST_LOCALE_DATE_FORMATS,
    )
}

// Naive timestamps carry no offset and are taken as UTC
fn parse_with(text: &str, datetime_formats: &[&str], date_formats: &[&str]) -> Option<NaiveDate> {
    datetime_formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            date_formats
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        })
}
