use std::cmp::Ordering;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};

/// Offset between the Gregorian and Buddhist Era calendars.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Years at or above this are already Buddhist Era and are printed as-is.
const BUDDHIST_ERA_THRESHOLD: i32 = 2400;

/// The event runs on Indochina Time (UTC+7). The spreadsheet backend hands
/// dates back as UTC timestamps of local midnight, so they are shifted back
/// before the calendar day is read.
const EVENT_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// Plain-date layouts accepted besides RFC 3339.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Timestamps without a zone; they are already local, so the date is taken as written.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Format a birth date as `DD/MM/YYYY` in the Buddhist Era.
///
/// Gregorian years (below 2400) get 543 added; years already in the
/// Buddhist Era are kept. Anything that does not parse as a date is
/// returned unchanged, so this never fails.
pub fn format_buddhist_date(date: &str) -> String {
    match parse_date(date) {
        Some(parsed) => {
            let mut year = parsed.year();
            if year < BUDDHIST_ERA_THRESHOLD {
                year += BUDDHIST_ERA_OFFSET;
            }
            format!("{:02}/{:02}/{}", parsed.day(), parsed.month(), year)
        }
        None => date.to_string(),
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        let local = FixedOffset::east_opt(EVENT_UTC_OFFSET_SECS)
            .map(|tz| dt.with_timezone(&tz).date_naive())
            .unwrap_or_else(|| dt.date_naive());
        return Some(local);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Split a display name into first name and surname at the first space.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.split_once(' ') {
        Some((first, last)) => (first, last),
        None => (name, ""),
    }
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Compare two strings without regard to case
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Case-insensitive substring test; `needle` is expected to be lowercase already.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
