use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Output rendering of a parsed release date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MONTH_PREFIXES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Parse a release date cell into a calendar date.
///
/// Tries the explicit formats seen in movie dumps first, then falls back to
/// free-form parsing in UTC. A bare year or a month and year resolve to the
/// first day of that period. Blank input never parses, and neither does input
/// without a calendar date in it (a time of day, a bare timestamp).
pub fn parse_release_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    // %B also accepts abbreviated month names when parsing
    if let Ok(date) = NaiveDate::parse_from_str(&format!("1 {}", text), "%d %B %Y") {
        return Some(date);
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }

    // Try RFC3339/ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }

    if !has_date_component(text) {
        return None;
    }
    dateparser::parse_with_timezone(text, &Utc)
        .ok()
        .map(|dt| dt.date_naive())
}

// A month name, or two digits joined by a date separator
fn has_date_component(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    if MONTH_PREFIXES.iter().any(|month| lower.contains(month)) {
        return true;
    }
    text.as_bytes()
        .windows(3)
        .any(|w| w[0].is_ascii_digit() && matches!(w[1], b'-' | b'/' | b'.') && w[2].is_ascii_digit())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
