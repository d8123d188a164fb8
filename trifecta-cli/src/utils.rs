use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use trifecta_core::{ProfitRange, ProfitRangeError};

/// Error returned when a string cannot be parsed as a dollar amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseMoneyError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

#[derive(Debug, Error)]
pub enum ParseRangeError {
    #[error("invalid range '{0}', expected START..END:STEP (e.g. 50,000..500,000:10,000)")]
    Format(String),

    #[error(transparent)]
    Amount(#[from] ParseMoneyError),

    #[error(transparent)]
    Range(#[from] ProfitRangeError),
}

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<start>[^.:]+?)\s*\.\.=?\s*(?P<end>[^.:]+?)\s*:\s*(?P<step>[^.:]+?)\s*$")
        .expect("range pattern is valid")
});

/// Normalizes input for decimal parsing: trims whitespace and removes the
/// dollar sign and commas (thousands separator).
fn normalize_money_input(s: &str) -> String {
    s.trim().replace(['$', ','], "")
}

/// Parses a dollar amount such as `"$100,000"`, `"-$1,250.50"` or `"75000"`.
pub fn parse_money(s: &str) -> Result<Decimal, ParseMoneyError> {
    let normalized = normalize_money_input(s);
    normalized.parse().map_err(|e| ParseMoneyError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses `START..END:STEP` into a validated [`ProfitRange`].
///
/// Each bound accepts the same forms as [`parse_money`] except for a
/// decimal point, and `..=` is accepted in place of `..`.
pub fn parse_profit_range(s: &str) -> Result<ProfitRange, ParseRangeError> {
    let captures = RANGE_PATTERN
        .captures(s)
        .ok_or_else(|| ParseRangeError::Format(s.to_string()))?;

    let start = parse_money(&captures["start"])?;
    let end = parse_money(&captures["end"])?;
    let step = parse_money(&captures["step"])?;

    Ok(ProfitRange::new(start, end, step)?)
}
