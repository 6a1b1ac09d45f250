//! Reading-time estimates for document bodies.

use std::sync::LazyLock;

use regex::Regex;

/// Fenced code blocks are not counted as prose.
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("code fence pattern is a valid regex"));

/// Count the prose words of a markdown body, ignoring fenced code.
pub fn word_count(body: &str) -> usize {
    CODE_FENCE_RE.replace_all(body, "").split_whitespace().count()
}

/// Estimated reading time, rounded up, never below one minute.
pub fn read_time_minutes(body: &str, words_per_minute: u32) -> u32 {
    let words_per_minute = words_per_minute.max(1) as usize;
    let minutes = word_count(body).div_ceil(words_per_minute).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Human-readable reading time, e.g. `"3 min read"`.
pub fn calculate_read_time(body: &str, words_per_minute: u32) -> String {
    format_minutes(read_time_minutes(body, words_per_minute))
}

/// Render a minute count the way frontmatter authors write it.
pub fn format_minutes(minutes: u32) -> String {
    format!("{minutes} min read")
}
