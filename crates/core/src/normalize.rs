//! Text normalization for imported and fetched values.
//!
//! Handles splitting of delimited answers and cleanup of financial
//! figures that arrive with label prefixes or trailing notes.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::FinancialYear;

/// Delimiter between list entries and between sub-fields in flat answers.
pub const DELIMITER: char = '|';

/// Regex matching a leading label such as `2021: ` or `Net debt: `.
static LABEL_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^:;]*?:\s+").unwrap());

/// Regex matching free text after a semicolon, e.g. `; source note`.
static TRAILING_NOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*;.*$").unwrap());

/// Split a delimited answer into trimmed, non-empty pieces.
pub fn split_delimited(raw: &str) -> Vec<String> {
    raw.split(DELIMITER)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a delimited answer into trimmed pieces, keeping empty ones so
/// positional sub-fields stay aligned.
pub fn split_cells(raw: &str) -> Vec<String> {
    raw.split(DELIMITER).map(|piece| piece.trim().to_string()).collect()
}

/// Join values into a delimited answer.
pub fn join_delimited<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| v.as_ref().trim())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// Clean a monetary or percentage figure.
///
/// Strips a leading `label: ` prefix and anything after a semicolon, so
/// `2021: €1.2B; source note` becomes `€1.2B`.
pub fn clean_financial_value(raw: &str) -> String {
    let without_prefix = LABEL_PREFIX_REGEX.replace(raw.trim(), "");
    TRAILING_NOTE_REGEX
        .replace(&without_prefix, "")
        .trim()
        .to_string()
}

/// Clean a fiscal-year label. Only trailing notes are removed, since the
/// year itself may legitimately contain a colon-free label like `2025 (H1)`.
pub fn clean_financial_year(raw: &str) -> String {
    TRAILING_NOTE_REGEX.replace(raw.trim(), "").trim().to_string()
}

/// Clean every figure of every year in place.
pub fn clean_financials(years: &mut [FinancialYear]) {
    for year in years {
        year.year = clean_financial_year(&year.year);
        for value in [
            &mut year.revenue,
            &mut year.operating_profit,
            &mut year.net_profit,
            &mut year.operating_margin,
            &mut year.free_cash_flow,
            &mut year.debt,
        ] {
            *value = clean_financial_value(value);
        }
    }
}

/// Normalize a column header for alias matching: lowercase, with spaces,
/// underscores and hyphens removed.
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
