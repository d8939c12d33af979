//! FILENAME: core/pivot-engine/src/definition.rs
//! Transformation definition - the serializable configuration.
//!
//! This module contains the types needed to DESCRIBE a display transform:
//! - the keyword table that assigns roles to columns
//! - the aggregation used when several rows land in one pivot cell
//! - the display options a caller passes for one transform call

use model::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TransformError;

// ============================================================================
// COLUMN ROLES
// ============================================================================

/// What a column is used for when building a display table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Time axis; candidate row index for pivoting.
    Year,
    /// Categorical column whose values become column headers.
    Pivot,
    /// Column offered as an exact-match filter.
    Filter,
    /// Carries nothing worth displaying.
    Ignored,
    /// The magnitude column.
    Value,
    /// Passed through untouched.
    Uncategorized,
}

/// Column names (lower case) per role. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnKeywords {
    pub value: Vec<String>,
    /// Value column names that only count in result tables.
    pub result_value: Vec<String>,
    pub year: Vec<String>,
    pub ignored: Vec<String>,
    pub pivot: Vec<String>,
    pub filter: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for ColumnKeywords {
    fn default() -> Self {
        ColumnKeywords {
            value: owned(&["value", "val"]),
            result_value: owned(&["lvl"]),
            year: owned(&[
                "year_vtg",
                "year_act",
                "year",
                "period",
                "year_vintage",
                "year_rel",
                "year_active",
            ]),
            ignored: owned(&["time", "unit", "units", "mrg"]),
            pivot: owned(&["commodity", "technology", "type", "tec", "category", "relation"]),
            filter: owned(&[
                "region",
                "node",
                "node_loc",
                "node_rel",
                "node_dest",
                "node_origin",
                "mode",
                "level",
                "grade",
                "fuel",
                "sector",
                "subcategory",
            ]),
        }
    }
}

impl ColumnKeywords {
    /// Missing fields keep their default keyword lists.
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Role of a column name; rules are checked in a fixed order and the
    /// first match wins.
    pub fn role_of(&self, column: &str, is_results: bool) -> ColumnRole {
        let lower = column.to_lowercase();
        let hit = |words: &[String]| words.iter().any(|w| *w == lower);

        if hit(&self.value) || (is_results && hit(&self.result_value)) {
            ColumnRole::Value
        } else if hit(&self.year) {
            ColumnRole::Year
        } else if hit(&self.ignored) {
            ColumnRole::Ignored
        } else if hit(&self.pivot) {
            ColumnRole::Pivot
        } else if hit(&self.filter) {
            ColumnRole::Filter
        } else {
            ColumnRole::Uncategorized
        }
    }
}

/// Columns of one table partitioned by role, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnRoles {
    pub year: Vec<String>,
    pub pivot: Vec<String>,
    pub filter: Vec<String>,
    pub ignored: Vec<String>,
    pub value: Option<String>,
    pub uncategorized: Vec<String>,
}

impl ColumnRoles {
    /// Pivoting needs a year column, a pivot column and a value column.
    pub fn can_pivot(&self) -> bool {
        !self.year.is_empty() && !self.pivot.is_empty() && self.value.is_some()
    }

    /// Number of column slots assigned, counting duplicates.
    pub fn len(&self) -> usize {
        self.year.len()
            + self.pivot.len()
            + self.filter.len()
            + self.ignored.len()
            + self.uncategorized.len()
            + usize::from(self.value.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// How values sharing one (index, column) pivot cell are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Aggregation {
    /// First value in row order.
    #[default]
    First,
    Last,
    Sum,
    Mean,
    Min,
    Max,
    Count,
}

impl Aggregation {
    /// Combines the values of one cell. `values` is never empty when called
    /// from the pivot engine.
    pub fn apply(self, column: &str, values: &[CellValue]) -> Result<CellValue, TransformError> {
        match self {
            Aggregation::First => Ok(values.first().cloned().unwrap_or_default()),
            Aggregation::Last => Ok(values.last().cloned().unwrap_or_default()),
            Aggregation::Count => Ok(CellValue::Integer(values.len() as i64)),
            Aggregation::Sum | Aggregation::Mean | Aggregation::Min | Aggregation::Max => {
                let numbers = values
                    .iter()
                    .map(|v| {
                        v.to_numeric().ok_or_else(|| TransformError::NonNumeric {
                            column: column.to_string(),
                            aggregation: self,
                            value: v.display_value(),
                        })
                    })
                    .collect::<Result<Vec<f64>, _>>()?;
                if numbers.is_empty() {
                    return Ok(CellValue::Empty);
                }
                let result = match self {
                    Aggregation::Sum => numbers.iter().sum(),
                    Aggregation::Mean => numbers.iter().sum::<f64>() / numbers.len() as f64,
                    Aggregation::Min => numbers.iter().copied().fold(f64::INFINITY, f64::min),
                    _ => numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                };
                Ok(CellValue::Number(result))
            }
        }
    }
}

// ============================================================================
// DISPLAY OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Long format as loaded, filters only.
    #[default]
    Raw,
    /// Classified, filtered and pivoted.
    Advanced,
}

/// Column name to exact-match value. `"All"` or an empty value means no
/// filter on that column.
pub type FilterSelection = BTreeMap<String, String>;

/// Sentinel selection meaning "do not filter this column".
pub const FILTER_ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub is_results: bool,
    pub mode: DisplayMode,
    pub filters: FilterSelection,
    /// `None` hides empty columns in tables and keeps them in charts.
    pub hide_empty: Option<bool>,
    pub for_chart: bool,
    pub aggregation: Aggregation,
    pub keywords: ColumnKeywords,
}

impl DisplayOptions {
    pub fn advanced() -> Self {
        DisplayOptions {
            mode: DisplayMode::Advanced,
            ..Default::default()
        }
    }

    pub fn results() -> Self {
        DisplayOptions {
            is_results: true,
            mode: DisplayMode::Advanced,
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(column.into(), value.into());
        self
    }

    pub fn should_hide_empty(&self) -> bool {
        self.hide_empty.unwrap_or(!self.for_chart)
    }
}
