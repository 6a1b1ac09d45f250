//! Publish-date parsing and display helpers.
//!
//! Frontmatter dates are kept as the author wrote them. Everything here
//! interprets them in UTC so that output never depends on the host zone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Display style for [`format_date`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// `Mar 15, 2024`
    #[default]
    Short,
    /// `March 15, 2024`
    Long,
    /// `3/15/2024`
    Numeric,
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a frontmatter date.
///
/// Accepts RFC 3339, a bare `YYYY-MM-DD` (midnight UTC) and zone-less
/// date-times, which are taken as UTC.
pub fn parse_publish_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.and_utc())
}

/// Format a frontmatter date for display.
pub fn format_date(value: &str, style: DateStyle) -> Option<String> {
    let date = parse_publish_date(value)?;
    let pattern = match style {
        DateStyle::Short => "%b %-d, %Y",
        DateStyle::Long => "%B %-d, %Y",
        DateStyle::Numeric => "%-m/%-d/%Y",
    };
    Some(date.format(pattern).to_string())
}

/// Calendar year of a frontmatter date.
pub fn year(value: &str) -> Option<i32> {
    parse_publish_date(value).map(|date| date.year())
}

/// Whether a frontmatter date lies strictly before `now`.
pub fn is_past(value: &str, now: DateTime<Utc>) -> bool {
    parse_publish_date(value).is_some_and(|date| date < now)
}

/// ISO 8601 timestamp with milliseconds, as used in sitemaps.
pub fn sitemap_date(value: &str) -> Option<String> {
    parse_publish_date(value).map(|date| date.to_rfc3339_opts(SecondsFormat::Millis, true))
}
