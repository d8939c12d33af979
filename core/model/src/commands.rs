//! FILENAME: core/model/src/commands.rs
//! PURPOSE: Reversible scenario edits using the Command Pattern.
//! CONTEXT: Commands carry names and values, never references into the
//! scenario; the scenario is handed to `apply` and `revert`. Every applied
//! edit marks its parameter as modified, which is what a modified-only
//! export selects on. `UndoManager` keeps the history.

use crate::cell::CellValue;
use crate::parameter::Parameter;
use crate::scenario::Scenario;
use crate::table::{Column, ColumnKind, Table, TableError};
use crate::log_debug;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("parameter not found: {0}")]
    ParameterNotFound(String),

    #[error("column '{column}' not found in {parameter}")]
    ColumnNotFound { parameter: String, column: String },

    #[error("'{0}' has not been applied")]
    NotApplied(String),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// An edit that can be applied and reverted any number of times, in
/// alternation.
pub trait Command: Send + fmt::Debug {
    /// Human-readable label, e.g. for an "Undo ..." menu entry.
    fn description(&self) -> String;

    fn apply(&mut self, scenario: &mut Scenario) -> Result<(), EditError>;

    fn revert(&mut self, scenario: &mut Scenario) -> Result<(), EditError>;
}

fn parameter_mut<'a>(scenario: &'a mut Scenario, name: &str) -> Result<&'a mut Parameter, EditError> {
    scenario
        .get_parameter_mut(name)
        .ok_or_else(|| EditError::ParameterNotFound(name.to_string()))
}

fn column_position(parameter: &Parameter, column: &str) -> Result<usize, EditError> {
    parameter
        .table
        .position(column)
        .ok_or_else(|| EditError::ColumnNotFound {
            parameter: parameter.name.clone(),
            column: column.to_string(),
        })
}

/// Value of a pasted text cell: blank pastes as zero, numbers as numbers,
/// anything else as text.
pub fn pasted_value(text: &str) -> CellValue {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return CellValue::Number(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(n) => CellValue::Number(n).normalized(),
        Err(_) => CellValue::text(text),
    }
}

/// Text typed for the column it goes into.
fn typed_for(column: &Column, text: &str) -> CellValue {
    match column.kind() {
        ColumnKind::Integer => text.parse::<i64>().map(CellValue::Integer).unwrap_or_else(|_| CellValue::text(text)),
        ColumnKind::Float => text.parse::<f64>().map(CellValue::Number).unwrap_or_else(|_| CellValue::text(text)),
        _ => CellValue::text(text),
    }
}

// ============================================================================
// CELL EDITS
// ============================================================================

/// Overwrites one cell of a long-format parameter table.
#[derive(Debug, Clone)]
pub struct EditCellCommand {
    parameter: String,
    row: usize,
    column: String,
    value: CellValue,
    previous: Option<CellValue>,
}

impl EditCellCommand {
    pub fn new(parameter: impl Into<String>, row: usize, column: impl Into<String>, value: CellValue) -> Self {
        EditCellCommand {
            parameter: parameter.into(),
            row,
            column: column.into(),
            value,
            previous: None,
        }
    }
}

impl Command for EditCellCommand {
    fn description(&self) -> String {
        format!("Edit cell in {}", self.parameter)
    }

    fn apply(&mut self, scenario: &mut Scenario) -> Result<(), EditError> {
        let parameter = parameter_mut(scenario, &self.parameter)?;
        let position = column_position(parameter, &self.column)?;
        let previous = parameter.table.set_cell(self.row, position, self.value.clone())?;
        self.previous = Some(previous);
        scenario.mark_modified(&self.parameter);
        Ok(())
    }

    fn revert(&mut self, scenario: &mut Scenario) -> Result<(), EditError> {
        let previous = self
            .previous
            .clone()
            .ok_or_else(|| EditError::NotApplied(self.description()))?;
        let parameter = parameter_mut(scenario, &self.parameter)?;
        let position = column_position(parameter, &self.column)?;
        parameter.table.set_cell(self.row, position, previous)?;
        self.previous = None;
        scenario.mark_modified(&self.parameter);
        Ok(())
    }
}

/// Writes several cells of one column at once, e.g. a clipboard paste.
#[derive(Debug, Clone)]
pub struct PasteColumnCommand {
    parameter: String,
    column: String,
    values: Vec<(usize, CellValue)>,
    previous: Vec<(usize, CellValue)>,
}

impl PasteColumnCommand {
    pub fn new(parameter: impl Into<String>, column: impl Into<String>, values: Vec<(usize, CellValue)>) -> Self {
        PasteColumnCommand {
            parameter: parameter.into(),
            column: column.into(),
            values,
            previous: Vec::new(),
        }
    }

    /// Pasted display strings, converted with `pasted_value`.
    pub fn from_text(parameter: impl Into<String>, column: impl Into<String>, values: &[(usize, String)]) -> Self {
        let values = values.iter().map(|(row, text)| (*row, pasted_value(text))).collect();
        Self::new(parameter, column, values)
    }
}

fn restore(table: &mut Table, position: usize, cells: &[(usize, CellValue)]) -> Result<(), TableError> {
    for (row, value) in cells.iter().rev() {
        table.set_cell(*row, position, value.clone())?;
    }
    Ok(())
}

impl Command for PasteColumnCommand {
    fn description(&self) -> String {
        format!("Paste into column {} ({})", self.column, self.parameter)
    }

    fn apply(&mut self, scenario: &mut Scenario) -> Result<(), EditError> {
        let parameter = parameter_mut(scenario, &self.parameter)?;
        let position = column_position(parameter, &self.column)?;

        let mut previous = Vec::with_capacity(self.values.len());
        for (row, value) in &self.values {
            match parameter.table.set_cell(*row, position, value.clone()) {
                Ok(old) => previous.push((*row, old)),
                Err(err) => {
                    restore(&mut parameter.table, position, &previous)?;
                    return Err(err.into());
                }
            }
        }
        self.previous = previous;
        scenario.mark_modified(&self.parameter);
        Ok(())
    }

    fn revert(&mut self, scenario: &mut Scenario) -> Result<(), EditError> {
        if self.previous.is_empty() && !self.values.is_empty() {
            return Err(EditError::NotApplied(self.description()));
        }
        let parameter = parameter_mut(scenario, &self.parameter)?;
        let position = column_position(parameter, &self.column)?;
        restore(&mut parameter.table, position, &self.previous)?;
        self.previous.clear();
        scenario.mark_modified(&self.parameter);
        Ok(())
    }
}

// ============================================================================
// PIVOT WRITE-BACK
// ============================================================================

/// Address of one cell of a pivoted view in terms of the long-format table:
/// the row label (a year), the column label (a pivot value) and the
/// exact-match selections the view was filtered with.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotCellKey {
    pub year_column: String,
    pub year: CellValue,
    pub pivot_column: String,
    pub label: String,
    pub value_column: String,
    /// Column name to display text.
    pub context: Vec<(String, String)>,
}

impl PivotCellKey {
    fn required_columns(&self) -> impl Iterator<Item = &str> {
        [self.year_column.as_str(), self.pivot_column.as_str(), self.value_column.as_str()]
            .into_iter()
            .chain(self.context.iter().map(|(column, _)| column.as_str()))
    }

    /// Rows whose year, pivot label and context match, compared by display
    /// text the way the pivot labels its axes.
    pub fn matching_rows(&self, table: &Table) -> Vec<usize> {
        let year = self.year.display_value();
        let mut conditions: Vec<(&Column, &str)> = Vec::with_capacity(self.context.len() + 2);
        for (name, text) in [(&self.year_column, year.as_str()), (&self.pivot_column, self.label.as_str())]
            .into_iter()
            .chain(self.context.iter().map(|(c, t)| (c, t.as_str())))
        {
            match table.column(name) {
                Some(column) => conditions.push((column, text)),
                None => return Vec::new(),
            }
        }

        (0..table.row_count())
            .filter(|&row| {
                conditions.iter().all(|(column, text)| {
                    column.values.get(row).is_some_and(|cell| !cell.is_missing() && cell.display_value() == *text)
                })
            })
            .collect()
    }

    /// A long-format row for a pivot cell that has no row yet.
    fn new_row(&self, table: &Table, value: CellValue) -> Vec<CellValue> {
        table
            .columns()
            .iter()
            .map(|column| {
                if column.name == self.value_column {
                    value.clone()
                } else if column.name == self.year_column {
                    self.year.clone()
                } else if column.name == self.pivot_column {
                    typed_for(column, &self.label)
                } else if let Some((_, text)) = self.context.iter().find(|(c, _)| *c == column.name) {
                    typed_for(column, text)
                } else {
                    CellValue::Empty
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
enum PivotUndo {
    Updated(Vec<(usize, CellValue)>),
    Created(usize),
}

/// Writes a value edited in a pivoted view back into the long-format
/// table. Every matching row gets the value; without a match a new row is
/// appended.
#[derive(Debug, Clone)]
pub struct EditPivotCommand {
    parameter: String,
    key: PivotCellKey,
    value: CellValue,
    undo: Option<PivotUndo>,
}

impl EditPivotCommand {
    pub fn new(parameter: impl Into<String>, key: PivotCellKey, value: CellValue) -> Self {
        EditPivotCommand {
            parameter: parameter.into(),
            key,
            value,
            undo: None,
        }
    }

    pub fn key(&self) -> &PivotCellKey {
        &self.key
    }
}

impl Command for EditPivotCommand {
    fn description(&self) -> String {
        format!(
            "Edit {} in {} ({})",
            self.key.label,
            self.key.year.display_value(),
            self.parameter
        )
    }

    fn apply(&mut self, scenario: &mut Scenario) -> Result<(), EditError> {
        let parameter = parameter_mut(scenario, &self.parameter)?;
        for column in self.key.required_columns() {
            column_position(parameter, column)?;
        }
        let value_position = column_position(parameter, &self.key.value_column)?;

        let rows = self.key.matching_rows(&parameter.table);
        let undo = if rows.is_empty() {
            let cells = self.key.new_row(&parameter.table, self.value.clone());
            let row = parameter.table.push_row(cells)?;
            parameter.refresh_shape();
            PivotUndo::Created(row)
        } else {
            let mut previous = Vec::with_capacity(rows.len());
            for row in rows {
                previous.push((row, parameter.table.set_cell(row, value_position, self.value.clone())?));
            }
            PivotUndo::Updated(previous)
        };
        log_debug!("PARAM", "{}: {:?}", self.description(), undo);

        self.undo = Some(undo);
        scenario.mark_modified(&self.parameter);
        Ok(())
    }

    fn revert(&mut self, scenario: &mut Scenario) -> Result<(), EditError> {
        let undo = self
            .undo
            .clone()
            .ok_or_else(|| EditError::NotApplied(self.description()))?;
        let parameter = parameter_mut(scenario, &self.parameter)?;
        match undo {
            PivotUndo::Updated(previous) => {
                let position = column_position(parameter, &self.key.value_column)?;
                restore(&mut parameter.table, position, &previous)?;
            }
            PivotUndo::Created(row) => {
                parameter.table.remove_row(row)?;
                parameter.refresh_shape();
            }
        }
        self.undo = None;
        scenario.mark_modified(&self.parameter);
        Ok(())
    }
}

// ============================================================================
// PARAMETER COMMANDS
// ============================================================================

/// Adds a record, replacing a same-named one until reverted.
#[derive(Debug, Clone)]
pub struct AddParameterCommand {
    parameter: Parameter,
    replaced: Option<Parameter>,
    applied: bool,
}

impl AddParameterCommand {
    pub fn new(parameter: Parameter) -> Self {
        AddParameterCommand {
            parameter,
            replaced: None,
            applied: false,
        }
    }
}

impl Command for AddParameterCommand {
    fn description(&self) -> String {
        format!("Add parameter '{}'", self.parameter.name)
    }

    fn apply(&mut self, scenario: &mut Scenario) -> Result<(), EditError> {
        self.replaced = scenario.add_parameter(self.parameter.clone());
        self.applied = true;
        scenario.mark_modified(&self.parameter.name);
        Ok(())
    }

    fn revert(&mut self, scenario: &mut Scenario) -> Result<(), EditError> {
        if !self.applied {
            return Err(EditError::NotApplied(self.description()));
        }
        scenario.remove_parameter(&self.parameter.name);
        if let Some(replaced) = self.replaced.take() {
            scenario.add_parameter(replaced);
        }
        self.applied = false;
        Ok(())
    }
}

/// Removes a record, keeping it for revert.
#[derive(Debug, Clone)]
pub struct RemoveParameterCommand {
    name: String,
    removed: Option<Parameter>,
}

impl RemoveParameterCommand {
    pub fn new(name: impl Into<String>) -> Self {
        RemoveParameterCommand {
            name: name.into(),
            removed: None,
        }
    }
}

impl Command for RemoveParameterCommand {
    fn description(&self) -> String {
        format!("Remove parameter '{}'", self.name)
    }

    fn apply(&mut self, scenario: &mut Scenario) -> Result<(), EditError> {
        let removed = scenario
            .remove_parameter(&self.name)
            .ok_or_else(|| EditError::ParameterNotFound(self.name.clone()))?;
        self.removed = Some(removed);
        Ok(())
    }

    fn revert(&mut self, scenario: &mut Scenario) -> Result<(), EditError> {
        let removed = self
            .removed
            .take()
            .ok_or_else(|| EditError::NotApplied(self.description()))?;
        scenario.add_parameter(removed);
        scenario.mark_modified(&self.name);
        Ok(())
    }
}
