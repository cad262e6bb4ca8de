//! Cell Value Module
//! Tagged cell values and the single numeric grammar used by every reader.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Decimal number: optional sign, digits with optional fraction (or a bare
/// fraction), optional exponent. Nothing else is accepted.
static NUMBER_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("Hard-coded regex pattern should be valid")
});

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Classify raw cell text.
    ///
    /// The text is trimmed; empty text is `Missing`, text matching the number
    /// grammar (and finite) is `Number`, everything else is `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }
        match parse_number(trimmed) {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(trimmed.to_string()),
        }
    }

    /// Wrap an already-typed number, demoting non-finite values to text.
    pub fn from_number(n: f64) -> Self {
        if n.is_finite() {
            CellValue::Number(n)
        } else {
            CellValue::Text(n.to_string())
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) | CellValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Total order: numbers, then text, then missing.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        fn rank(cell: &CellValue) -> u8 {
            match cell {
                CellValue::Number(_) => 0,
                CellValue::Text(_) => 1,
                CellValue::Missing => 2,
            }
        }

        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }

    /// JSON form used by summary payloads.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Missing => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Missing => Ok(()),
        }
    }
}

/// Parse `text` as a finite decimal number, consuming all of it.
///
/// Partial matches (`12abc`), special values (`inf`, `NaN`) and hex are
/// rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    if !NUMBER_GRAMMAR.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}
