//! FILENAME: core/model/src/table.rs
//! PURPOSE: Rectangular, column-oriented table with an optional row index.
//! CONTEXT: Parameter tables are stored long-format (one row per dimension
//! combination plus a value). Transformations never edit a table in place:
//! they return a new `Table`. Only the edit commands use the mutating
//! methods (`set_cell`, `push_row`, `remove_row`). Columns are addressed by
//! position so that duplicate column names survive pivoting and parsing;
//! name lookups resolve to the first matching column.

use crate::cell::CellValue;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("row {row} has {found} cells but only {expected} columns are defined")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' has {found} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("index has {found} entries, expected {expected}")]
    IndexLength { expected: usize, found: usize },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("no cell at row {row}, column {column}")]
    CellOutOfRange { row: usize, column: usize },

    #[error("row {row} out of range, table has {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },
}

// ============================================================================
// COLUMN
// ============================================================================

/// Storage type inferred from a column's non-missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Only `Integer` values.
    Integer,
    /// Numbers (or nothing at all: an all-missing column counts as float).
    Float,
    Boolean,
    /// Text or a mixture of types.
    Object,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn kind(&self) -> ColumnKind {
        let mut saw_integer = false;
        let mut saw_float = false;
        let mut saw_bool = false;

        for value in self.values.iter().filter(|v| !v.is_missing()) {
            match value {
                CellValue::Integer(_) => saw_integer = true,
                CellValue::Number(_) => saw_float = true,
                CellValue::Boolean(_) => saw_bool = true,
                _ => return ColumnKind::Object,
            }
        }

        match (saw_integer, saw_float, saw_bool) {
            (_, _, true) if saw_integer || saw_float => ColumnKind::Object,
            (false, false, true) => ColumnKind::Boolean,
            (true, false, false) => ColumnKind::Integer,
            _ => ColumnKind::Float,
        }
    }

    pub fn has_missing(&self) -> bool {
        self.values.iter().any(CellValue::is_missing)
    }

    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(CellValue::is_missing)
    }

    /// True when at least one non-missing value differs from zero.
    /// Only meaningful for numeric columns.
    pub fn has_nonzero(&self) -> bool {
        self.values
            .iter()
            .filter_map(CellValue::as_f64)
            .any(|n| n != 0.0)
    }

    /// Numeric coercion of every value, non-numeric values become `None`.
    pub fn to_numeric(&self) -> Vec<Option<f64>> {
        self.values.iter().map(CellValue::to_numeric).collect()
    }
}

// ============================================================================
// INDEX
// ============================================================================

/// Row labels of a table.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Index {
    /// Positional labels 0..n.
    #[default]
    Range,
    /// A single named level, e.g. the year axis of a pivoted table.
    Column { name: String, values: Vec<CellValue> },
    /// Several named levels of equal length.
    Multi {
        names: Vec<String>,
        levels: Vec<Vec<CellValue>>,
    },
}

impl Index {
    /// Name of a flat named index.
    pub fn name(&self) -> Option<&str> {
        match self {
            Index::Column { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Values of the level called `name` in a multi-level index.
    pub fn level(&self, name: &str) -> Option<&[CellValue]> {
        match self {
            Index::Multi { names, levels } => names
                .iter()
                .position(|n| n == name)
                .and_then(|pos| levels.get(pos))
                .map(Vec::as_slice),
            _ => None,
        }
    }

    fn len(&self) -> Option<usize> {
        match self {
            Index::Range => None,
            Index::Column { values, .. } => Some(values.len()),
            Index::Multi { levels, .. } => levels.first().map(Vec::len),
        }
    }

    fn filter(&self, mask: &[bool]) -> Index {
        let keep = |values: &[CellValue]| -> Vec<CellValue> {
            values
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(v, _)| v.clone())
                .collect()
        };
        match self {
            Index::Range => Index::Range,
            Index::Column { name, values } => Index::Column {
                name: name.clone(),
                values: keep(values),
            },
            Index::Multi { names, levels } => Index::Multi {
                names: names.clone(),
                levels: levels.iter().map(|level| keep(level)).collect(),
            },
        }
    }
}

// ============================================================================
// TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    index: Index,
    rows: usize,
}

impl Table {
    /// Builds a table from columns of equal length.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        for column in &columns {
            if column.len() != rows {
                return Err(TableError::LengthMismatch {
                    column: column.name.clone(),
                    expected: rows,
                    found: column.len(),
                });
            }
        }
        Ok(Table {
            columns,
            index: Index::Range,
            rows,
        })
    }

    /// Builds a table from row tuples. Short rows are padded with `Empty`;
    /// surplus cells beyond the headers are accepted only when blank.
    pub fn from_rows(headers: &[String], rows: &[Vec<CellValue>]) -> Result<Self, TableError> {
        let mut columns: Vec<Column> = headers
            .iter()
            .map(|h| Column::new(h.clone(), Vec::with_capacity(rows.len())))
            .collect();

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() > headers.len() && row[headers.len()..].iter().any(|c| !c.is_blank()) {
                return Err(TableError::RaggedRow {
                    row: row_idx,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
            for (col_idx, column) in columns.iter_mut().enumerate() {
                column.values.push(row.get(col_idx).cloned().unwrap_or_default());
            }
        }

        let mut table = Table::new(columns)?;
        table.rows = rows.len();
        Ok(table)
    }

    pub fn empty() -> Self {
        Table::default()
    }

    /// Replaces the row index.
    pub fn with_index(mut self, index: Index) -> Result<Self, TableError> {
        if let Some(found) = index.len() {
            if found != self.rows {
                return Err(TableError::IndexLength {
                    expected: self.rows,
                    found,
                });
            }
        }
        self.index = index;
        Ok(self)
    }

    /// Builds a table with an explicit row count, used when every column has
    /// been removed but the index still describes rows.
    fn from_parts(columns: Vec<Column>, index: Index, rows: usize) -> Self {
        Table {
            columns,
            index,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    /// A table with no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Position of the first column called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|pos| &self.columns[pos])
    }

    pub fn column_at(&self, position: usize) -> Option<&Column> {
        self.columns.get(position)
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index.name()
    }

    pub fn cell(&self, row: usize, position: usize) -> Option<&CellValue> {
        self.columns.get(position).and_then(|c| c.values.get(row))
    }

    /// Cell at `row` in the first column called `name`.
    pub fn value(&self, row: usize, name: &str) -> Option<&CellValue> {
        self.column(name).and_then(|c| c.values.get(row))
    }

    /// Cells of one row in column order.
    pub fn row(&self, row: usize) -> Vec<&CellValue> {
        self.columns.iter().filter_map(|c| c.values.get(row)).collect()
    }

    // ========================================================================
    // EDITING
    // ========================================================================

    /// Overwrites one cell and returns the previous value.
    pub fn set_cell(&mut self, row: usize, position: usize, value: CellValue) -> Result<CellValue, TableError> {
        self.columns
            .get_mut(position)
            .and_then(|c| c.values.get_mut(row))
            .map(|cell| std::mem::replace(cell, value))
            .ok_or(TableError::CellOutOfRange { row, column: position })
    }

    /// Appends a row and returns its position. Short rows are padded with
    /// `Empty`. A labelled index gets an `Empty` label for the new row.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) -> Result<usize, TableError> {
        if cells.len() > self.columns.len() {
            return Err(TableError::RaggedRow {
                row: self.rows,
                expected: self.columns.len(),
                found: cells.len(),
            });
        }
        cells.resize(self.columns.len(), CellValue::Empty);
        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.values.push(cell);
        }
        match &mut self.index {
            Index::Range => {}
            Index::Column { values, .. } => values.push(CellValue::Empty),
            Index::Multi { levels, .. } => levels.iter_mut().for_each(|l| l.push(CellValue::Empty)),
        }
        self.rows += 1;
        Ok(self.rows - 1)
    }

    /// Removes a row and returns its cells in column order.
    pub fn remove_row(&mut self, row: usize) -> Result<Vec<CellValue>, TableError> {
        if row >= self.rows {
            return Err(TableError::RowOutOfRange { row, rows: self.rows });
        }
        let removed = self.columns.iter_mut().map(|c| c.values.remove(row)).collect();
        match &mut self.index {
            Index::Range => {}
            Index::Column { values, .. } => {
                values.remove(row);
            }
            Index::Multi { levels, .. } => levels.iter_mut().for_each(|l| {
                l.remove(row);
            }),
        }
        self.rows -= 1;
        Ok(removed)
    }

    /// Keeps the rows whose mask entry is true.
    pub fn filter_rows(&self, mask: &[bool]) -> Table {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|column| Column {
                name: column.name.clone(),
                values: column
                    .values
                    .iter()
                    .zip(mask)
                    .filter(|(_, keep)| **keep)
                    .map(|(v, _)| v.clone())
                    .collect(),
            })
            .collect();
        let rows = mask.iter().take(self.rows).filter(|keep| **keep).count();
        Table::from_parts(columns, self.index.filter(mask), rows)
    }

    /// Keeps the columns at `positions`, in that order.
    pub fn select_columns(&self, positions: &[usize]) -> Table {
        let columns = positions
            .iter()
            .filter_map(|&pos| self.columns.get(pos).cloned())
            .collect();
        Table::from_parts(columns, self.index.clone(), self.rows)
    }

    /// Moves the first column called `name` into a flat row index.
    pub fn set_index(&self, name: &str) -> Result<Table, TableError> {
        let pos = self
            .position(name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))?;
        let mut columns = self.columns.clone();
        let column = columns.remove(pos);
        Ok(Table::from_parts(
            columns,
            Index::Column {
                name: column.name,
                values: column.values,
            },
            self.rows,
        ))
    }

    /// Appends the rows of `other`. Columns are aligned by name; the result
    /// has the union of both column lists and missing cells are `Empty`.
    /// The row index is reset.
    pub fn concat(&self, other: &Table) -> Table {
        let mut names = self.column_names();
        for name in other.column_names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }

        let rows = self.rows + other.rows;
        let columns = names
            .into_iter()
            .map(|name| {
                let mut values = Vec::with_capacity(rows);
                for table in [self, other] {
                    match table.column(&name) {
                        Some(column) => values.extend(column.values.iter().cloned()),
                        None => values.extend(std::iter::repeat(CellValue::Empty).take(table.rows)),
                    }
                }
                Column { name, values }
            })
            .collect();

        Table::from_parts(columns, Index::Range, rows)
    }

    /// Every row rendered as display text, in column order.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        (0..self.rows)
            .map(|row| self.row(row).into_iter().map(CellValue::display_value).collect())
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index_label = match &self.index {
            Index::Range => None,
            Index::Column { name, .. } => Some(name.clone()),
            Index::Multi { names, .. } => Some(names.join("/")),
        };
        let mut header: Vec<String> = index_label.into_iter().collect();
        header.extend(self.column_names());
        writeln!(f, "{}", header.join("\t"))?;

        for row in 0..self.rows {
            let mut cells: Vec<String> = Vec::new();
            match &self.index {
                Index::Range => {}
                Index::Column { values, .. } => {
                    cells.push(values.get(row).map(CellValue::display_value).unwrap_or_default())
                }
                Index::Multi { levels, .. } => cells.push(
                    levels
                        .iter()
                        .map(|l| l.get(row).map(CellValue::display_value).unwrap_or_default())
                        .collect::<Vec<_>>()
                        .join("/"),
                ),
            }
            cells.extend(self.row(row).into_iter().map(CellValue::display_value));
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}
