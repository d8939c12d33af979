//! FILENAME: core/pivot-engine/src/writeback.rs
//! Mapping of edited pivot cells back to long-format rows.
//!
//! A pivoted view cell is identified by its row label (a year) and its
//! column header (a pivot label). The long-format address adds the year and
//! pivot column the pivot was built from, which are found the same way
//! `perform_pivot` finds them, and the exact-match filters of the view.

use crate::classify::classify_columns;
use crate::definition::{DisplayMode, DisplayOptions, FILTER_ALL};
use crate::engine::pivot_table;
use crate::error::TransformError;
use crate::filter::apply_filters;
use model::{log_debug, CellValue, EditPivotCommand, Parameter, PivotCellKey, Table};

/// Long-format address of the view cell at (`year`, `label`).
pub fn pivot_cell_key(
    table: &Table,
    options: &DisplayOptions,
    year: CellValue,
    label: &str,
) -> Result<PivotCellKey, TransformError> {
    if options.is_results || options.mode != DisplayMode::Advanced {
        return Err(TransformError::NotPivoted);
    }
    let roles = classify_columns(table, options.is_results, &options.keywords);
    let Some(value_column) = roles.value.clone().filter(|_| roles.can_pivot()) else {
        return Err(TransformError::MissingRoles);
    };

    let filtered = apply_filters(table, &options.filters);
    let mut attempts = 0;
    let mut last_error = TransformError::MissingRoles;
    for year_column in &roles.year {
        for pivot_column in &roles.pivot {
            attempts += 1;
            match pivot_table(&filtered, year_column, pivot_column, &value_column, options.aggregation) {
                Ok(_) => {
                    let context = options
                        .filters
                        .iter()
                        .filter(|(column, selected)| {
                            !selected.is_empty() && *selected != FILTER_ALL && table.has_column(column)
                        })
                        .map(|(column, selected)| (column.clone(), selected.clone()))
                        .collect();
                    return Ok(PivotCellKey {
                        year_column: year_column.clone(),
                        year,
                        pivot_column: pivot_column.clone(),
                        label: label.to_string(),
                        value_column,
                        context,
                    });
                }
                Err(err) => last_error = err,
            }
        }
    }

    Err(TransformError::PivotFailed {
        attempts,
        last: Box::new(last_error),
    })
}

/// Command writing `value` into the view cell at (`year`, `label`) of
/// `parameter`; run it through an `UndoManager` to make it undoable.
pub fn edit_pivot_cell(
    parameter: &Parameter,
    options: &DisplayOptions,
    year: CellValue,
    label: &str,
    value: CellValue,
) -> Result<EditPivotCommand, TransformError> {
    let key = pivot_cell_key(&parameter.table, options, year, label)?;
    log_debug!(
        "PIVOT",
        "{} cell ({}, {}) maps to {} x {}",
        parameter.name,
        key.year.display_value(),
        key.label,
        key.year_column,
        key.pivot_column
    );
    Ok(EditPivotCommand::new(parameter.name.clone(), key, value))
}
