//! FILENAME: core/model/src/parameter.rs
//! PURPOSE: The Parameter Record: a named long-format table plus metadata.
//! CONTEXT: Records are created by the factories in `factory.rs` and then
//! only ever replaced wholesale. The transformation engine reads them and
//! produces new derived tables.

use crate::cell::CellValue;
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Provenance of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Input,
    Result,
}

/// Kind of solver output a result record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Variable,
    Equation,
}

impl ResultType {
    /// `var_*` sheets hold variables, everything else is an equation.
    pub fn from_sheet_name(sheet_name: &str) -> Self {
        if sheet_name.starts_with("var_") {
            ResultType::Variable
        } else {
            ResultType::Equation
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub dimensions: Vec<String>,
    pub value_column: String,
    pub units: String,
    pub description: String,
    /// `(rows, columns)` of the table at construction time.
    pub shape: (usize, usize),
    /// `None` for records built by the standard factory.
    pub parameter_type: Option<ParameterType>,
    pub result_type: Option<ResultType>,
    pub source: Option<String>,
}

/// Caller-supplied metadata fields that win over the synthesized defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataOverrides {
    pub dimensions: Option<Vec<String>>,
    pub value_column: Option<String>,
    pub units: Option<String>,
    pub description: Option<String>,
    pub parameter_type: Option<ParameterType>,
    pub result_type: Option<ResultType>,
    pub source: Option<String>,
}

impl MetadataOverrides {
    pub fn input() -> Self {
        MetadataOverrides {
            parameter_type: Some(ParameterType::Input),
            source: Some("MESSAGEix input data".to_string()),
            ..Default::default()
        }
    }

    pub fn result() -> Self {
        MetadataOverrides {
            parameter_type: Some(ParameterType::Result),
            source: Some("MESSAGEix solution data".to_string()),
            ..Default::default()
        }
    }

    pub fn with_result_type(mut self, result_type: ResultType) -> Self {
        self.result_type = Some(result_type);
        self
    }

    /// Fields set in `other` replace the ones in `self`.
    pub fn merged_with(mut self, other: MetadataOverrides) -> Self {
        if other.dimensions.is_some() {
            self.dimensions = other.dimensions;
        }
        if other.value_column.is_some() {
            self.value_column = other.value_column;
        }
        if other.units.is_some() {
            self.units = other.units;
        }
        if other.description.is_some() {
            self.description = other.description;
        }
        if other.parameter_type.is_some() {
            self.parameter_type = other.parameter_type;
        }
        if other.result_type.is_some() {
            self.result_type = other.result_type;
        }
        if other.source.is_some() {
            self.source = other.source;
        }
        self
    }

    pub fn apply(self, metadata: &mut Metadata) {
        if let Some(dimensions) = self.dimensions {
            metadata.dimensions = dimensions;
        }
        if let Some(value_column) = self.value_column {
            metadata.value_column = value_column;
        }
        if let Some(units) = self.units {
            metadata.units = units;
        }
        if let Some(description) = self.description {
            metadata.description = description;
        }
        if self.parameter_type.is_some() {
            metadata.parameter_type = self.parameter_type;
        }
        if self.result_type.is_some() {
            metadata.result_type = self.result_type;
        }
        if self.source.is_some() {
            metadata.source = self.source;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub table: Table,
    pub metadata: Metadata,
}

impl Parameter {
    pub fn new(name: impl Into<String>, table: Table, metadata: Metadata) -> Self {
        Parameter {
            name: name.into(),
            table,
            metadata,
        }
    }

    /// Re-reads `metadata.shape` from the table after rows were added or
    /// removed.
    pub fn refresh_shape(&mut self) {
        self.metadata.shape = self.table.shape();
    }

    pub fn is_result(&self) -> bool {
        self.metadata.parameter_type == Some(ParameterType::Result)
    }

    /// Values of the value column, empty if the column is missing.
    pub fn values(&self) -> &[CellValue] {
        self.table
            .column(&self.metadata.value_column)
            .map(|c| c.values.as_slice())
            .unwrap_or(&[])
    }

    /// Catalogue entry for this parameter, if it is a MESSAGEix parameter.
    pub fn schema_entry(&self) -> Option<&'static schema::ParameterSpec> {
        schema::lookup(&self.name)
    }

    /// Issues found when checking the table against the MESSAGEix catalogue.
    pub fn schema_issues(&self) -> Vec<String> {
        schema::validate_parameter_data(
            &self.name,
            &self.table.column_names(),
            &self.table.display_rows(),
        )
    }

    /// Dimension columns declared in metadata that the table lacks.
    pub fn missing_dimensions(&self) -> Vec<String> {
        self.metadata
            .dimensions
            .iter()
            .filter(|dim| !self.table.has_column(dim))
            .cloned()
            .collect()
    }
}
