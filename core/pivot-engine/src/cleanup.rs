//! FILENAME: core/pivot-engine/src/cleanup.rs
//! Empty-column elision for display tables.

use model::{log_debug, Column, Table};

/// A numeric column needs a non-zero value, any other column a non-missing
/// one.
fn has_content(column: &Column) -> bool {
    if column.kind().is_numeric() {
        column.has_nonzero()
    } else {
        !column.is_all_missing()
    }
}

/// Drops columns without content. Columns are addressed by position, so
/// duplicate names are handled one by one. When nothing would be left the
/// table comes back unchanged.
pub fn hide_empty_columns(table: &Table) -> Table {
    let keep: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, column)| has_content(column))
        .map(|(pos, _)| pos)
        .collect();

    if keep.is_empty() || keep.len() == table.column_count() {
        return table.clone();
    }
    log_debug!(
        "TRANSFORM",
        "hiding {} empty columns",
        table.column_count() - keep.len()
    );
    table.select_columns(&keep)
}
