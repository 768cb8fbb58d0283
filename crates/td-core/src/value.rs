//! Dynamic cell values and the coercion boundary

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single cell in a table row.
///
/// Cells are dynamically typed: a column classified as numeric can still
/// hold stray text, and the engine must cope. All type-sensitive logic
/// goes through [`CellValue::is_missing`] and [`CellValue::as_number`]
/// so that the rest of the engine never inspects raw values directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// A numeric value (may be NaN, which counts as missing)
    Number(f64),

    /// A text value
    Text(String),

    /// A parsed date-time instant
    DateTime(NaiveDateTime),

    /// An absent value
    Null,
}

impl CellValue {
    /// Whether this cell counts as missing.
    ///
    /// Missing is defined uniformly as: null, a numeric NaN, or a string
    /// that is empty after trimming. DROP_MISSING and FILL_MISSING both
    /// use this exact predicate.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::DateTime(_) => false,
        }
    }

    /// Coerce this cell to a finite number, if possible.
    ///
    /// Numbers coerce to themselves when finite. Text coerces when,
    /// after removing comma separators, the trimmed remainder parses as
    /// a finite float (so "1,234.5" coerces to 1234.5). Dates and nulls
    /// never coerce.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => {
                let cleaned = s.replace(',', "");
                let trimmed = cleaned.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}
