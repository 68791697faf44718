//! Field access over the embedded raw citation text.
//!
//! Each rendered entry may carry a hidden block with its original
//! BibTeX-style field data. The field grammar handled here is
//! `key = {value}`, `key = "value"`, or `key = value` with the key
//! matched case-insensitively. This module is the only place that looks
//! at that text; everything downstream consumes the extracted values, so
//! a structured data source could replace the scan without touching the
//! filter logic.

use std::sync::LazyLock;

use compact_str::CompactString;

use crate::MonthKey;
use crate::regex::{Regex, escape};

static LRD_KEYS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\blrdkeys\s*=\s*\{([^}]*)\}").unwrap());

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\byear\s*=\s*["{]?\s*(\d{4})"#).unwrap());

static MONTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bmonth\s*=\s*["{]?\s*([a-zA-Z]+|\d{1,2})"#).unwrap());

/// Extract an arbitrary field value from raw citation text.
///
/// Handles braced, quoted, and bare value forms. Returns the value with
/// surrounding whitespace trimmed, or `None` when the key is absent.
pub fn field(raw: &str, key: &str) -> Option<String> {
    let pattern = format!(
        r#"(?i)\b{}\s*=\s*(?:\{{([^}}]*)\}}|"([^"]*)"|([^,\s{{}}]+))"#,
        escape(key)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(raw)?;
    let value = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?;
    Some(value.as_str().trim().to_string())
}

/// Extract the comma-separated `lrdKeys` field, if present.
pub fn lrd_keys(raw: &str) -> Option<String> {
    LRD_KEYS_REGEX
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Split a tag list on commas, trimming each token and discarding empty
/// ones. Tokens keep their original casing.
pub fn split_tags(value: &str) -> Vec<CompactString> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(CompactString::from)
        .collect()
}

/// Parse a month token: the 12 English names and three-letter
/// abbreviations, or a bare number clamped into `[1, 12]`.
pub fn parse_month(token: &str) -> Option<u8> {
    let token = token.trim();
    if let Ok(n) = token.parse::<i32>() {
        return Some(n.clamp(1, 12) as u8);
    }
    match token.to_lowercase().as_str() {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Extract the publication month of an entry.
///
/// The year is required; without it there is no bucket. The month
/// defaults to January when the field is absent or unrecognized — that
/// matches what the site always did, even though it skews bucketing for
/// year-only citations.
pub fn publication_month(raw: &str) -> Option<MonthKey> {
    let year: i32 = YEAR_REGEX
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())?;

    let month = MONTH_REGEX
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_month(m.as_str()))
        .unwrap_or(1);

    Some(MonthKey::new(year, month))
}
