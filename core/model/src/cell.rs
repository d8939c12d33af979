//! FILENAME: core/model/src/cell.rs
//! PURPOSE: Defines the value held by a single table cell.
//! CONTEXT: Worksheet cells, parameter tables and transformed display tables
//! all carry this one value type. `Empty` is the single missing-value marker;
//! a NaN number is treated as missing wherever values are inspected.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Represents the raw data within a cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Integer(i64),
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// True for `Empty` and for NaN numbers.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// True for `Empty` and for text made only of whitespace.
    /// Worksheet parsing treats both as a blank cell.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            other => other.is_missing(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }

    /// Numeric view of an `Integer` or non-NaN `Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    /// Numeric coercion: numbers pass through, text is parsed, anything
    /// else (including unparseable text) becomes missing.
    pub fn to_numeric(&self) -> Option<f64> {
        match self {
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            other => other.as_f64(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Replaces NaN numbers by `Empty`.
    pub fn normalized(self) -> Self {
        if self.is_missing() {
            CellValue::Empty
        } else {
            self
        }
    }

    /// Returns the display value of the cell as a String.
    /// Used for column headers produced by pivoting, set elements and
    /// filter matching.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Number(n) => {
                if n.is_nan() {
                    String::new()
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    // Format without unnecessary decimal places
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }

    /// Total order used when sorting index and column labels:
    /// numbers (ascending), then text, then booleans, then missing values.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        fn rank(value: &CellValue) -> u8 {
            if value.is_missing() {
                return 3;
            }
            match value {
                CellValue::Integer(_) | CellValue::Number(_) => 0,
                CellValue::Text(_) => 1,
                CellValue::Boolean(_) => 2,
                CellValue::Empty => 3,
            }
        }

        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => match (self, other) {
                (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
                (CellValue::Boolean(a), CellValue::Boolean(b)) => a.cmp(b),
                _ => rank(self).cmp(&rank(other)),
            },
        }
    }

    /// Value equality where `Integer(2020)` equals `Number(2020.0)` and all
    /// missing values are equal to each other.
    pub fn same_value(&self, other: &CellValue) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value).normalized()
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(value as i64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}
