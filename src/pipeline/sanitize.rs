//! Helpers for normalizing extracted field values into canonical forms.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

/// Canonical serialization applied to every accepted date: UTC, second
/// precision, `Z` suffix. Fractional seconds are dropped.
const CANONICAL_DATE: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

const NAIVE_DATETIME: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

const SPACED_DATETIME: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const DATE_ONLY: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Sanitize arbitrary string input by trimming whitespace and dropping empties.
pub fn sanitize_string(value: Option<String>) -> Option<String> {
    value.and_then(|input| {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Normalize a raw date-like value to canonical UTC form, or `None` when the
/// value cannot be parsed.
///
/// Accepted inputs: RFC3339 (any offset, converted to UTC), a naive
/// `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS` datetime (assumed UTC), and
/// a bare `YYYY-MM-DD` date (midnight UTC). A garbage value nulls out rather
/// than passing through verbatim.
pub fn sanitize_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let utc = if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        parsed.to_offset(UtcOffset::UTC)
    } else if let Ok(naive) = PrimitiveDateTime::parse(trimmed, NAIVE_DATETIME)
        .or_else(|_| PrimitiveDateTime::parse(trimmed, SPACED_DATETIME))
    {
        naive.assume_utc()
    } else if let Ok(date) = Date::parse(trimmed, DATE_ONLY) {
        date.midnight().assume_utc()
    } else {
        return None;
    };

    utc.format(CANONICAL_DATE).ok()
}

/// Normalize body text: strip HTML tags when markup is present, collapse
/// redundant whitespace within lines, drop blank lines, and trim.
///
/// Returns an empty string rather than rejecting; the transformer owns the
/// "Missing Text" decision.
pub fn sanitize_text(raw: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    static SPACES: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
    let spaces = SPACES.get_or_init(|| Regex::new(r"[ \t]+").expect("valid spaces pattern"));

    let stripped = if raw.contains('<') && raw.contains('>') {
        tag.replace_all(raw, " ")
    } else {
        raw.into()
    };

    let lines: Vec<String> = stripped
        .lines()
        .map(|line| spaces.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}

/// Normalize a taxonomy list: trim entries, drop empties, and deduplicate by
/// exact string match with first-seen-wins, preserving original order.
pub fn sanitize_list(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut sanitized = Vec::new();

    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            sanitized.push(trimmed.to_string());
        }
    }

    sanitized
}
