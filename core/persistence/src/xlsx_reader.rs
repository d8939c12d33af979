//! FILENAME: core/persistence/src/xlsx_reader.rs

use crate::strategies::ExcelParser;
use crate::{LoadMode, PersistenceError, RawSheet};
use calamine::{open_workbook_auto, Data, Range, Reader};
use model::{log_info, CellValue, Scenario};
use std::path::Path;

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f).normalized(),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Text(format!("{:?}", e)),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Rows of a used range, shifted so that row and column positions match
/// the sheet (calamine ranges start at the first used cell).
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }
    rows
}

/// Reads every worksheet of an `.xlsx`, `.xls` or `.ods` file.
pub fn read_sheets(path: &Path) -> Result<Vec<RawSheet>, PersistenceError> {
    if !path.exists() {
        return Err(PersistenceError::FileNotFound(path.to_path_buf()));
    }
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    if sheet_names.is_empty() {
        return Err(PersistenceError::InvalidFormat(
            "Workbook contains no sheets".to_string(),
        ));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = workbook.worksheet_range(&sheet_name)?;
        sheets.push(RawSheet::new(sheet_name, range_to_rows(&range)));
    }
    Ok(sheets)
}

/// Reads one worksheet by name.
pub fn read_sheet(path: &Path, name: &str) -> Result<RawSheet, PersistenceError> {
    read_sheets(path)?
        .into_iter()
        .find(|sheet| sheet.name == name)
        .ok_or_else(|| PersistenceError::SheetNotFound(name.to_string()))
}

/// Loads a workbook into a new scenario. `progress` receives a percentage
/// and a status line.
pub fn load_workbook(
    path: &Path,
    mode: LoadMode,
    progress: Option<&mut dyn FnMut(u8, &str)>,
) -> Result<Scenario, PersistenceError> {
    let mut silent = |_: u8, _: &str| {};
    let progress: &mut dyn FnMut(u8, &str) = match progress {
        Some(callback) => callback,
        None => &mut silent,
    };

    progress(0, "Loading workbook...");
    let sheets = read_sheets(path)?;
    progress(20, "Workbook loaded, parsing data...");

    let parser = ExcelParser::new();
    let mut scenario = Scenario::new();
    match mode {
        LoadMode::Input => parser.parse_workbook(&sheets, &mut scenario, progress),
        LoadMode::Results => parser.parse_results(&sheets, &mut scenario, progress),
    }

    progress(100, "Loading complete");
    log_info!(
        "LOAD",
        "loaded {}: {} parameters and {} sets",
        path.display(),
        scenario.parameter_count(),
        scenario.set_count()
    );
    Ok(scenario)
}
