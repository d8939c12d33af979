//! FILENAME: core/persistence/src/sheet.rs
//! PURPOSE: Worksheet contents as plain rows of cells, plus the structural
//! checks the parsing strategies use to tell sheet kinds apart.
//! CONTEXT: Row 0 is the header row. Rows keep their original positions so
//! column offsets survive leading blank columns.

use model::CellValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        RawSheet {
            name: name.into(),
            rows,
        }
    }

    pub fn header_row(&self) -> &[CellValue] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every row after the header row.
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Header names read left to right, stopping at the first blank cell.
    pub fn leading_headers(&self) -> Vec<String> {
        self.header_row()
            .iter()
            .take_while(|cell| !cell.is_blank())
            .map(|cell| cell.display_value().trim().to_string())
            .collect()
    }

    /// True when the header row holds at least one non-blank text cell.
    pub fn has_text_header(&self) -> bool {
        self.header_row().iter().any(is_text)
    }

    /// At least one data row mixing text and numbers, looking only at the
    /// first `limit` data rows.
    pub fn has_mixed_rows(&self, limit: usize) -> bool {
        self.data_rows()
            .iter()
            .take(limit)
            .filter(|row| row.len() > 1)
            .any(|row| is_mixed_row(row))
    }

    /// Numbers present somewhere in the data, and no row mixes text with
    /// numbers. The whole sheet is scanned.
    pub fn is_numeric_only(&self) -> bool {
        let mut has_numbers = false;
        for row in self.data_rows() {
            if is_mixed_row(row) {
                return false;
            }
            has_numbers |= row.iter().any(is_number);
        }
        has_numbers
    }

    /// At least one data row with a number in it.
    pub fn has_numeric_data(&self) -> bool {
        self.data_rows().iter().any(|row| row.iter().any(is_number))
    }
}

/// Non-blank text. Booleans are not counted as numbers or text.
pub(crate) fn is_text(cell: &CellValue) -> bool {
    matches!(cell, CellValue::Text(s) if !s.trim().is_empty())
}

pub(crate) fn is_number(cell: &CellValue) -> bool {
    cell.is_numeric() && !cell.is_missing()
}

pub(crate) fn is_mixed_row(row: &[CellValue]) -> bool {
    row.iter().any(is_text) && row.iter().any(is_number)
}

/// True when every cell of the row is `Empty`.
pub(crate) fn is_empty_row(row: &[CellValue]) -> bool {
    row.iter().all(|cell| matches!(cell, CellValue::Empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: Vec<Vec<CellValue>>) -> RawSheet {
        RawSheet::new("test", rows)
    }

    #[test]
    fn test_leading_headers_stop_at_blank() {
        let s = sheet(vec![vec![
            "node".into(),
            " year ".into(),
            CellValue::Empty,
            "value".into(),
        ]]);
        assert_eq!(s.leading_headers(), vec!["node".to_string(), "year".to_string()]);
    }

    #[test]
    fn test_mixed_rows_only_checks_limit() {
        let mut rows = vec![vec!["a".into(), "b".into()]];
        for _ in 0..5 {
            rows.push(vec!["x".into(), "y".into()]);
        }
        rows.push(vec!["x".into(), 1.0.into()]);
        let s = sheet(rows);
        assert!(!s.has_mixed_rows(5));
        assert!(s.has_mixed_rows(10));
    }

    #[test]
    fn test_numeric_only_rejects_mixed_anywhere() {
        let s = sheet(vec![
            vec!["a".into(), "b".into()],
            vec![1.0.into(), 2.0.into()],
            vec![3.0.into(), 4.0.into()],
        ]);
        assert!(s.is_numeric_only());

        let mut rows = s.rows.clone();
        rows.push(vec!["R1".into(), 5.0.into()]);
        assert!(!sheet(rows).is_numeric_only());
    }

    #[test]
    fn test_booleans_are_not_numbers() {
        let s = sheet(vec![vec!["flag".into()], vec![true.into()]]);
        assert!(!s.has_numeric_data());
        assert!(!s.is_numeric_only());
    }
}
