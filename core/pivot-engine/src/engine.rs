//! FILENAME: core/pivot-engine/src/engine.rs
//! Pivot Engine - reshapes a long-format table into a wide one.
//!
//! Algorithm:
//! 1. Intern the distinct year values (row axis) and pivot values (column axis)
//! 2. Collect the values of every (row, column) intersection in row order
//! 3. Aggregate each intersection with the configured `Aggregation`
//! 4. Sort both axes and emit a table indexed by the year column
//!
//! `perform_pivot` tries every (year column, pivot column) pair in order and
//! falls back to the unpivoted table when none works.

use crate::definition::{Aggregation, ColumnRoles};
use crate::error::{Outcome, TransformError};
use model::{log_debug, log_warn, CellValue, Column, Index, Table};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

// ============================================================================
// AXIS
// ============================================================================

/// Distinct labels of one axis, keyed by display text so that `2020` and
/// `2020.0` share a slot.
#[derive(Debug, Default)]
struct Axis {
    slots: FxHashMap<String, usize>,
    labels: Vec<CellValue>,
}

impl Axis {
    fn slot(&mut self, value: &CellValue) -> usize {
        let key = value.display_value();
        if let Some(&slot) = self.slots.get(&key) {
            return slot;
        }
        let slot = self.labels.len();
        self.slots.insert(key, slot);
        self.labels.push(value.clone());
        slot
    }

    /// Slot numbers in display order.
    fn sorted_slots(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.labels.len()).collect();
        order.sort_by(|&a, &b| self.labels[a].compare(&self.labels[b]));
        order
    }
}

/// Values collected for one pivot cell; most cells get exactly one.
type CellValues = SmallVec<[CellValue; 1]>;

// ============================================================================
// PIVOT
// ============================================================================

/// Builds the wide table for one (year column, pivot column) pair.
///
/// Rows with a missing year, pivot label or value are skipped. Column
/// headers are the display text of the pivot labels.
pub fn pivot_table(
    table: &Table,
    index_column: &str,
    pivot_column: &str,
    value_column: &str,
    aggregation: Aggregation,
) -> Result<Table, TransformError> {
    if table.is_empty() {
        return Err(TransformError::EmptyTable);
    }
    let column = |name: &str| {
        table
            .column(name)
            .ok_or_else(|| TransformError::ColumnNotFound(name.to_string()))
    };
    let index_values = &column(index_column)?.values;
    let pivot_values = &column(pivot_column)?.values;
    let values = &column(value_column)?.values;

    let mut rows = Axis::default();
    let mut columns = Axis::default();
    let mut cells: FxHashMap<(usize, usize), CellValues> = FxHashMap::default();

    for ((year, label), value) in index_values.iter().zip(pivot_values).zip(values) {
        if year.is_missing() || label.is_missing() || value.is_missing() {
            continue;
        }
        let key = (rows.slot(year), columns.slot(label));
        cells.entry(key).or_default().push(value.clone());
    }

    if cells.is_empty() {
        return Err(TransformError::NoPivotValues {
            year: index_column.to_string(),
            pivot: pivot_column.to_string(),
        });
    }

    let row_order = rows.sorted_slots();
    let column_order = columns.sorted_slots();

    let mut wide = Vec::with_capacity(column_order.len());
    for &col_slot in &column_order {
        let mut column_values = Vec::with_capacity(row_order.len());
        for &row_slot in &row_order {
            let value = match cells.get(&(row_slot, col_slot)) {
                Some(collected) => aggregation.apply(value_column, collected)?,
                None => CellValue::Empty,
            };
            column_values.push(value);
        }
        wide.push(Column::new(columns.labels[col_slot].display_value(), column_values));
    }

    let index = Index::Column {
        name: index_column.to_string(),
        values: row_order.iter().map(|&slot| rows.labels[slot].clone()).collect(),
    };
    Ok(Table::new(wide)?.with_index(index)?)
}

/// Pivots on the first (year column, pivot column) pair that works, trying
/// pairs in discovery order. Never fails: when no pair works the input
/// table comes back as a degraded outcome.
pub fn perform_pivot(table: &Table, roles: &ColumnRoles, aggregation: Aggregation) -> Outcome<Table> {
    let Some(value_column) = roles.value.as_deref().filter(|_| roles.can_pivot()) else {
        return Outcome::Degraded(table.clone(), TransformError::MissingRoles);
    };

    let mut attempts = 0;
    let mut last_error = TransformError::MissingRoles;
    for year_column in &roles.year {
        for pivot_column in &roles.pivot {
            attempts += 1;
            match pivot_table(table, year_column, pivot_column, value_column, aggregation) {
                Ok(wide) => {
                    log_debug!(
                        "PIVOT",
                        "pivoted {} x {}: {} rows, {} columns",
                        year_column,
                        pivot_column,
                        wide.row_count(),
                        wide.column_count()
                    );
                    return Outcome::Ok(wide);
                }
                Err(err) => {
                    log_debug!("PIVOT", "pivot {} x {} failed: {}", year_column, pivot_column, err);
                    last_error = err;
                }
            }
        }
    }

    let reason = TransformError::PivotFailed {
        attempts,
        last: Box::new(last_error),
    };
    log_warn!("PIVOT", "{}; showing unpivoted data", reason);
    Outcome::Degraded(table.clone(), reason)
}

/// Moves the first year column into the row index, without reshaping.
/// Tables without a year column are returned as they are.
pub fn prepare_2d_format(table: &Table, roles: &ColumnRoles) -> Result<Table, TransformError> {
    match roles.year.first() {
        Some(year_column) if table.has_column(year_column) => Ok(table.set_index(year_column)?),
        _ => Ok(table.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_columns;
    use crate::definition::ColumnKeywords;

    fn long_table() -> Table {
        Table::new(vec![
            Column::new("technology", vec!["gas".into(), "coal".into(), "coal".into(), "gas".into()]),
            Column::new("year", vec![2030.into(), 2020.into(), 2020.into(), 2020.0.into()]),
            Column::new("value", vec![4.0.into(), 1.0.into(), 9.0.into(), 2.0.into()]),
        ])
        .unwrap()
    }

    fn roles(table: &Table) -> ColumnRoles {
        classify_columns(table, false, &ColumnKeywords::default())
    }

    #[test]
    fn test_pivot_sorted_axes_first_wins() {
        let wide = pivot_table(&long_table(), "year", "technology", "value", Aggregation::First).unwrap();
        assert_eq!(wide.index_name(), Some("year"));
        assert_eq!(wide.column_names(), vec!["coal".to_string(), "gas".to_string()]);
        assert_eq!(wide.row_count(), 2);
        assert_eq!(wide.value(0, "coal"), Some(&CellValue::Number(1.0)));
        assert_eq!(wide.value(0, "gas"), Some(&CellValue::Number(2.0)));
        assert_eq!(wide.value(1, "coal"), Some(&CellValue::Empty));
        assert_eq!(wide.value(1, "gas"), Some(&CellValue::Number(4.0)));
    }

    #[test]
    fn test_pivot_aggregation_is_swappable() {
        let wide = pivot_table(&long_table(), "year", "technology", "value", Aggregation::Sum).unwrap();
        assert_eq!(wide.value(0, "coal"), Some(&CellValue::Number(10.0)));
        let wide = pivot_table(&long_table(), "year", "technology", "value", Aggregation::Last).unwrap();
        assert_eq!(wide.value(0, "coal"), Some(&CellValue::Number(9.0)));
    }

    #[test]
    fn test_pivot_errors() {
        let table = long_table();
        assert!(matches!(
            pivot_table(&table, "year", "fuel", "value", Aggregation::First),
            Err(TransformError::ColumnNotFound(name)) if name == "fuel"
        ));
        assert_eq!(
            pivot_table(&Table::empty(), "year", "technology", "value", Aggregation::First),
            Err(TransformError::EmptyTable)
        );

        let text_values = Table::new(vec![
            Column::new("tec", vec!["a".into()]),
            Column::new("year", vec![2020.into()]),
            Column::new("value", vec!["high".into()]),
        ])
        .unwrap();
        assert!(matches!(
            pivot_table(&text_values, "year", "tec", "value", Aggregation::Mean),
            Err(TransformError::NonNumeric { .. })
        ));
    }

    #[test]
    fn test_perform_pivot_tries_next_pair() {
        // "year_vtg" holds no values, so the second year column is used.
        let table = Table::new(vec![
            Column::new("year_vtg", vec![CellValue::Empty, CellValue::Empty]),
            Column::new("year_act", vec![2020.into(), 2030.into()]),
            Column::new("tec", vec!["a".into(), "a".into()]),
            Column::new("value", vec![1.0.into(), 2.0.into()]),
        ])
        .unwrap();
        let outcome = perform_pivot(&table, &roles(&table), Aggregation::First);
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.table().index_name(), Some("year_act"));
    }

    #[test]
    fn test_perform_pivot_degrades_to_input() {
        let table = Table::new(vec![
            Column::new("year", vec![2020.into()]),
            Column::new("tec", vec!["a".into()]),
            Column::new("value", vec![CellValue::Empty]),
        ])
        .unwrap();
        let outcome = perform_pivot(&table, &roles(&table), Aggregation::First);
        assert!(matches!(outcome.reason(), Some(TransformError::PivotFailed { attempts: 1, .. })));
        assert_eq!(outcome.into_inner(), table);

        let no_roles = ColumnRoles::default();
        let outcome = perform_pivot(&table, &no_roles, Aggregation::First);
        assert_eq!(outcome.reason(), Some(&TransformError::MissingRoles));
    }

    #[test]
    fn test_prepare_2d_format() {
        let table = Table::new(vec![
            Column::new("node", vec!["R1".into()]),
            Column::new("year", vec![2020.into()]),
            Column::new("lvl", vec![1.0.into()]),
        ])
        .unwrap();
        let roles = classify_columns(&table, true, &ColumnKeywords::default());
        let prepared = prepare_2d_format(&table, &roles).unwrap();
        assert_eq!(prepared.index_name(), Some("year"));
        assert_eq!(prepared.column_names(), vec!["node".to_string(), "lvl".to_string()]);

        let without_year = ColumnRoles::default();
        assert_eq!(prepare_2d_format(&table, &without_year).unwrap(), table);
    }
}
