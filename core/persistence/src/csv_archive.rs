//! FILENAME: core/persistence/src/csv_archive.rs
//! PURPOSE: Loads a zip archive of CSV exports into a scenario.
//! CONTEXT: One item per file; the file stem prefix tells the kind
//! (`set_`, `par_`, `var_`, `equ_`). Result files are narrowed to the
//! technologies that produce electricity according to `par_output`, and
//! internal solver rows are dropped.

use crate::{LoadMode, PersistenceError};
use model::{
    build_parameter, log_debug, log_info, log_warn, CellValue, ConstructionOptions,
    MetadataOverrides, ResultType, Scenario,
};
use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

const SET_PREFIX: &str = "set_";
const PAR_PREFIX: &str = "par_";
const VAR_PREFIX: &str = "var_";
const EQU_PREFIX: &str = "equ_";

/// Technology names ending in `_res1`, `_ref2`, `_cv3` or `_hist_2020`.
const INTERNAL_SOLVER_ROW: &str = r".*_((res|ref|cv)\d|hist_\d+)$";

const UNKNOWN_UNITS: &str = "unknown";

/// One CSV file of the archive.
#[derive(Debug, Clone, PartialEq)]
struct CsvEntry {
    stem: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl CsvEntry {
    fn position(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    fn technology_column(&self) -> Option<usize> {
        self.position("technology").or_else(|| self.position("tec"))
    }

    /// Display text of `column` in the first row.
    fn first_text(&self, column: &str) -> Option<String> {
        let pos = self.position(column)?;
        self.rows
            .first()
            .and_then(|row| row.get(pos))
            .filter(|cell| !cell.is_missing())
            .map(CellValue::display_value)
    }

    fn retain_rows(&mut self, mut keep: impl FnMut(&[CellValue]) -> bool) {
        self.rows.retain(|row| keep(row));
    }

    fn dimensions(&self, excluded: &[&str]) -> Vec<String> {
        self.headers
            .iter()
            .filter(|h| !excluded.contains(&h.as_str()))
            .cloned()
            .collect()
    }
}

// ============================================================================
// READING
// ============================================================================

fn parse_field(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return CellValue::Number(n).normalized();
    }
    match trimmed {
        "True" | "TRUE" | "true" => CellValue::Boolean(true),
        "False" | "FALSE" | "false" => CellValue::Boolean(false),
        _ => CellValue::text(field),
    }
}

fn parse_csv(stem: String, bytes: &[u8]) -> Result<CsvEntry, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(parse_field).collect());
    }
    Ok(CsvEntry { stem, headers, rows })
}

/// Every `.csv` member of the archive. A member that cannot be read or
/// parsed is logged and left out.
fn read_entries(path: &Path) -> Result<Vec<CsvEntry>, PersistenceError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut entries = Vec::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let name = file.name().to_string();
        if file.is_dir() || !name.to_lowercase().ends_with(".csv") {
            continue;
        }
        let Some(stem) = Path::new(&name).file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        let mut bytes = Vec::new();
        if let Err(err) = file.read_to_end(&mut bytes) {
            log_warn!("LOAD", "Error loading CSV {}: {}", name, err);
            continue;
        }
        match parse_csv(stem, &bytes) {
            Ok(entry) => entries.push(entry),
            Err(err) => log_warn!("LOAD", "Error loading CSV {}: {}", name, err),
        }
    }

    log_debug!("LOAD", "found {} CSV files in {}", entries.len(), path.display());
    Ok(entries)
}

// ============================================================================
// RESULT FILTERS
// ============================================================================

/// Technologies with a positive `electr` output in `par_output`.
fn electricity_technologies(entries: &[CsvEntry]) -> HashSet<String> {
    let Some(output) = entries.iter().find(|e| e.stem.to_lowercase() == "par_output") else {
        return HashSet::new();
    };
    let (Some(commodity), Some(value), Some(tec)) = (
        output.position("commodity"),
        output.position("value"),
        output.technology_column(),
    ) else {
        return HashSet::new();
    };

    output
        .rows
        .iter()
        .filter(|row| {
            row.get(commodity).and_then(CellValue::as_text) == Some("electr")
                && row.get(value).and_then(CellValue::to_numeric).is_some_and(|v| v > 0.0)
        })
        .filter_map(|row| row.get(tec).map(CellValue::display_value))
        .collect()
}

fn filter_result_rows(entry: &mut CsvEntry, electricity: &HashSet<String>, internal: &Regex) {
    let Some(tec) = entry.technology_column() else {
        return;
    };
    let before = entry.rows.len();

    if !electricity.is_empty() {
        entry.retain_rows(|row| row.get(tec).is_some_and(|cell| electricity.contains(&cell.display_value())));
    }
    entry.retain_rows(|row| !row.get(tec).is_some_and(|cell| internal.is_match(&cell.display_value())));

    if entry.rows.len() < before {
        log_debug!("LOAD", "{}: filtered {} of {} rows", entry.stem, before - entry.rows.len(), before);
    }
}

// ============================================================================
// LOADING
// ============================================================================

fn add_set(scenario: &mut Scenario, name: &str, entry: &CsvEntry) {
    let elements = entry
        .rows
        .iter()
        .filter_map(|row| row.first())
        .filter(|cell| !cell.is_missing())
        .map(CellValue::display_value)
        .collect();
    scenario.add_set(name, elements);
}

fn add_record(
    scenario: &mut Scenario,
    name: &str,
    entry: &CsvEntry,
    overrides: MetadataOverrides,
    options: ConstructionOptions,
) {
    match build_parameter(name, &entry.rows, &entry.headers, Some(overrides), options) {
        Ok(parameter) => {
            scenario.add_parameter(parameter);
        }
        Err(err) => log_warn!("LOAD", "Could not create parameter {}: {}", name, err),
    }
}

fn parameter_overrides(entry: &CsvEntry) -> MetadataOverrides {
    MetadataOverrides {
        dimensions: Some(entry.dimensions(&["value", "unit"])),
        value_column: Some("value".to_string()),
        units: Some(entry.first_text("unit").unwrap_or_else(|| UNKNOWN_UNITS.to_string())),
        ..MetadataOverrides::input()
    }
}

fn result_overrides(entry: &CsvEntry, result_type: ResultType) -> MetadataOverrides {
    let units = match result_type {
        ResultType::Variable => entry.first_text("unit"),
        ResultType::Equation => None,
    };
    let value_column = ["lvl", "level"]
        .into_iter()
        .find(|column| entry.position(column).is_some())
        .map(str::to_string);

    MetadataOverrides {
        dimensions: Some(entry.dimensions(&["lvl", "mrg", "level", "marginal", "unit"])),
        value_column,
        units: Some(units.unwrap_or_else(|| UNKNOWN_UNITS.to_string())),
        ..MetadataOverrides::result().with_result_type(result_type)
    }
}

/// Loads a `.zip` of CSV files into a new scenario. In results mode only
/// `var_` and `equ_` files are read. `progress` receives a percentage and a
/// status line.
pub fn load_csv_archive(
    path: &Path,
    mode: LoadMode,
    options: ConstructionOptions,
    progress: Option<&mut dyn FnMut(u8, &str)>,
) -> Result<Scenario, PersistenceError> {
    let mut silent = |_: u8, _: &str| {};
    let progress: &mut dyn FnMut(u8, &str) = match progress {
        Some(callback) => callback,
        None => &mut silent,
    };

    if !path.exists() {
        return Err(PersistenceError::FileNotFound(path.to_path_buf()));
    }
    let internal = Regex::new(INTERNAL_SOLVER_ROW).map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    progress(0, "Opening archive...");
    let entries = read_entries(path)?;
    progress(20, "Archive read, parsing data...");

    let electricity = electricity_technologies(&entries);
    let total = entries.len().max(1);
    let mut scenario = Scenario::new();

    for (i, mut entry) in entries.into_iter().enumerate() {
        let lower = entry.stem.to_lowercase();
        let name = entry.stem.get(SET_PREFIX.len()..).unwrap_or_default().to_string();

        if entry.rows.is_empty() || name.is_empty() {
            log_debug!("LOAD", "skipping empty CSV {}", entry.stem);
            continue;
        }

        let input = mode == LoadMode::Input;
        if lower.starts_with(SET_PREFIX) && input {
            add_set(&mut scenario, &name, &entry);
        } else if lower.starts_with(PAR_PREFIX) && input {
            let overrides = parameter_overrides(&entry);
            add_record(&mut scenario, &name, &entry, overrides, options);
        } else if lower.starts_with(VAR_PREFIX) || lower.starts_with(EQU_PREFIX) {
            let result_type = if lower.starts_with(VAR_PREFIX) {
                ResultType::Variable
            } else {
                ResultType::Equation
            };
            filter_result_rows(&mut entry, &electricity, &internal);
            if entry.rows.is_empty() {
                log_debug!("LOAD", "{}: no rows left after filtering", entry.stem);
                continue;
            }
            let overrides = result_overrides(&entry, result_type);
            add_record(&mut scenario, &name, &entry, overrides, options);
        } else {
            log_debug!("LOAD", "skipping CSV {}", entry.stem);
        }

        let done = 20 + (80 * (i + 1) / total) as u8;
        progress(done.min(99), &format!("Parsed {}", entry.stem));
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

/// Whether `path` names a CSV archive rather than a workbook.
pub fn is_csv_archive(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}
