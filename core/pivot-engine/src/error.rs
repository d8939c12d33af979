//! FILENAME: core/pivot-engine/src/error.rs
//! Transform errors and the `Outcome` returned by public entry points.

use crate::definition::Aggregation;
use model::{Table, TableError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("table is empty")]
    EmptyTable,

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("pivoting needs a year, a pivot and a value column")]
    MissingRoles,

    #[error("cells of an unpivoted view are edited in the long table")]
    NotPivoted,

    #[error("no values to place when pivoting '{year}' against '{pivot}'")]
    NoPivotValues { year: String, pivot: String },

    #[error("{aggregation:?} needs numbers but column '{column}' holds '{value}'")]
    NonNumeric {
        column: String,
        aggregation: Aggregation,
        value: String,
    },

    #[error("all {attempts} pivot attempts failed, last error: {last}")]
    PivotFailed {
        attempts: usize,
        last: Box<TransformError>,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Result of a transform that never fails outright: either the transformed
/// value, or a fallback value together with the reason it was used.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Ok(T),
    Degraded(T, TransformError),
}

impl<T> Outcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Ok(value) | Outcome::Degraded(value, _) => value,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Ok(value) | Outcome::Degraded(value, _) => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded(..))
    }

    pub fn reason(&self) -> Option<&TransformError> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Degraded(_, reason) => Some(reason),
        }
    }

    /// Transforms the carried value, keeping any degradation reason.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Degraded(value, reason) => Outcome::Degraded(f(value), reason),
        }
    }
}

impl Outcome<Table> {
    pub fn table(&self) -> &Table {
        self.value()
    }
}
