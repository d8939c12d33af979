//! FILENAME: core/persistence/src/lib.rs
//! Workbook persistence for scenario data.
//!
//! Reads `.xlsx`/`.xls`/`.ods` workbooks into scenarios (sheet
//! classification and parsing live in `strategies`), reads zip archives of
//! CSV exports, and exports scenario parameters back to XLSX.

mod csv_archive;
mod error;
mod sheet;
mod store;
mod strategies;
mod xlsx_reader;
mod xlsx_writer;

pub use csv_archive::{is_csv_archive, load_csv_archive};
pub use error::PersistenceError;
pub use sheet::RawSheet;
pub use store::ScenarioStore;
pub use strategies::{
    dedupe_headers, ExcelParser, ParameterParsingStrategy, ParsingStrategy, ResultParsingStrategy,
    SetParsingStrategy,
};
pub use xlsx_reader::{load_workbook, read_sheet, read_sheets};
pub use xlsx_writer::{group_for, sanitize_sheet_name, save_scenario, DEFAULT_GROUP};

use serde::{Deserialize, Serialize};

// ============================================================================
// LOAD MODE
// ============================================================================

/// What a workbook is expected to contain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Model input: sets, parameters and any result sheets.
    #[default]
    Input,
    /// Solver output: only result sheets are read.
    Results,
}
