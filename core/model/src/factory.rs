//! FILENAME: core/model/src/factory.rs
//! PURPOSE: Parameter Construction, turning raw rows + headers into records.
//! CONTEXT: Sheet parsing hands every parameter block to a factory. The
//! factories never fail loudly: a block that cannot be turned into a record
//! is logged and skipped. `build_parameter` exposes the underlying
//! `Result` for callers that want to know why nothing was produced.

use crate::cell::CellValue;
use crate::parameter::{Metadata, MetadataOverrides, Parameter};
use crate::table::{ColumnKind, Table, TableError};
use crate::{log_debug, log_warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("no rows or no headers supplied")]
    EmptyInput,

    #[error("every row is empty")]
    NoRows,

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Construction policy switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionOptions {
    /// Null out numeric columns whose values are all exactly zero.
    /// "Declared but entirely zero" is then indistinguishable from "absent".
    pub zero_columns_as_missing: bool,
}

impl Default for ConstructionOptions {
    fn default() -> Self {
        ConstructionOptions {
            zero_columns_as_missing: true,
        }
    }
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Builds a record from raw rows. See `ParameterFactory` for the
/// non-failing entry point.
pub fn build_parameter(
    name: &str,
    rows: &[Vec<CellValue>],
    headers: &[String],
    overrides: Option<MetadataOverrides>,
    options: ConstructionOptions,
) -> Result<Parameter, ConstructionError> {
    if rows.is_empty() || headers.is_empty() {
        return Err(ConstructionError::EmptyInput);
    }

    let mut table = Table::from_rows(headers, rows)?;

    for column in table.columns_mut() {
        for value in column.values.iter_mut() {
            *value = std::mem::take(value).normalized();
        }

        // Integers cannot hold a missing value: widen before anything else.
        if column.kind() == ColumnKind::Integer && column.has_missing() {
            for value in column.values.iter_mut() {
                if let CellValue::Integer(i) = value {
                    *value = CellValue::Number(*i as f64);
                }
            }
        }

        if options.zero_columns_as_missing && column.kind().is_numeric() && !column.has_nonzero() {
            column.values.fill(CellValue::Empty);
        }
    }

    let mask: Vec<bool> = (0..table.row_count())
        .map(|row| table.row(row).iter().any(|v| !v.is_missing()))
        .collect();
    let table = table.filter_rows(&mask);

    if table.row_count() == 0 {
        return Err(ConstructionError::NoRows);
    }

    let (dimensions, value_column) = match headers.split_last() {
        Some((last, dims)) => (dims.to_vec(), last.clone()),
        None => (Vec::new(), "value".to_string()),
    };

    let mut metadata = Metadata {
        dimensions,
        value_column,
        units: "N/A".to_string(),
        description: format!("Parameter {}", name),
        shape: table.shape(),
        parameter_type: None,
        result_type: None,
        source: None,
    };
    if let Some(overrides) = overrides {
        overrides.apply(&mut metadata);
    }

    Ok(Parameter::new(name, table, metadata))
}

fn build_or_log(
    name: &str,
    rows: &[Vec<CellValue>],
    headers: &[String],
    overrides: Option<MetadataOverrides>,
    options: ConstructionOptions,
) -> Option<Parameter> {
    match build_parameter(name, rows, headers, overrides, options) {
        Ok(parameter) => Some(parameter),
        Err(err @ (ConstructionError::EmptyInput | ConstructionError::NoRows)) => {
            log_debug!("PARAM", "no record for {}: {}", name, err);
            None
        }
        Err(err) => {
            log_warn!("PARAM", "Could not create parameter {}: {}", name, err);
            None
        }
    }
}

// ============================================================================
// FACTORIES
// ============================================================================

pub trait ParameterFactory: Send + Sync {
    /// Builds a record, or returns `None` when the block yields nothing.
    fn create_parameter(
        &self,
        name: &str,
        rows: &[Vec<CellValue>],
        headers: &[String],
        overrides: Option<MetadataOverrides>,
    ) -> Option<Parameter>;
}

/// Plain construction, no provenance metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardParameterFactory {
    pub options: ConstructionOptions,
}

impl ParameterFactory for StandardParameterFactory {
    fn create_parameter(
        &self,
        name: &str,
        rows: &[Vec<CellValue>],
        headers: &[String],
        overrides: Option<MetadataOverrides>,
    ) -> Option<Parameter> {
        build_or_log(name, rows, headers, overrides, self.options)
    }
}

/// Marks records as model input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputParameterFactory {
    pub options: ConstructionOptions,
}

impl ParameterFactory for InputParameterFactory {
    fn create_parameter(
        &self,
        name: &str,
        rows: &[Vec<CellValue>],
        headers: &[String],
        overrides: Option<MetadataOverrides>,
    ) -> Option<Parameter> {
        let overrides = MetadataOverrides::input().merged_with(overrides.unwrap_or_default());
        build_or_log(name, rows, headers, Some(overrides), self.options)
    }
}

/// Marks records as solver output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultParameterFactory {
    pub options: ConstructionOptions,
}

impl ParameterFactory for ResultParameterFactory {
    fn create_parameter(
        &self,
        name: &str,
        rows: &[Vec<CellValue>],
        headers: &[String],
        overrides: Option<MetadataOverrides>,
    ) -> Option<Parameter> {
        let overrides = MetadataOverrides::result().merged_with(overrides.unwrap_or_default());
        build_or_log(name, rows, headers, Some(overrides), self.options)
    }
}

pub const STANDARD_FACTORY: &str = "standard";
pub const INPUT_FACTORY: &str = "input";
pub const RESULT_FACTORY: &str = "result";

/// Factories by kind. Unknown kinds fall back to the standard factory.
pub struct FactoryRegistry {
    factories: HashMap<String, Box<dyn ParameterFactory>>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::with_options(ConstructionOptions::default())
    }

    pub fn with_options(options: ConstructionOptions) -> Self {
        let mut factories: HashMap<String, Box<dyn ParameterFactory>> = HashMap::new();
        factories.insert(
            STANDARD_FACTORY.to_string(),
            Box::new(StandardParameterFactory { options }),
        );
        factories.insert(
            INPUT_FACTORY.to_string(),
            Box::new(InputParameterFactory { options }),
        );
        factories.insert(
            RESULT_FACTORY.to_string(),
            Box::new(ResultParameterFactory { options }),
        );
        FactoryRegistry { factories }
    }

    pub fn get_factory(&self, kind: &str) -> &dyn ParameterFactory {
        match self.factories.get(kind).or_else(|| self.factories.get(STANDARD_FACTORY)) {
            Some(factory) => factory.as_ref(),
            None => &DEFAULT_FACTORY,
        }
    }

    pub fn register_factory(&mut self, kind: impl Into<String>, factory: Box<dyn ParameterFactory>) {
        self.factories.insert(kind.into(), factory);
    }

    pub fn create_parameter(
        &self,
        kind: &str,
        name: &str,
        rows: &[Vec<CellValue>],
        headers: &[String],
        overrides: Option<MetadataOverrides>,
    ) -> Option<Parameter> {
        self.get_factory(kind).create_parameter(name, rows, headers, overrides)
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Used only if someone replaced the standard factory with nothing.
static DEFAULT_FACTORY: StandardParameterFactory = StandardParameterFactory {
    options: ConstructionOptions {
        zero_columns_as_missing: true,
    },
};
