//! FILENAME: core/persistence/src/xlsx_writer.rs
//! PURPOSE: Export a scenario's parameters to an XLSX workbook.
//! CONTEXT: Parameters are grouped into sheets by keywords found in their
//! names. Each sheet starts with a group title, then one block per
//! parameter: title, metadata line, header row, data rows.

use crate::PersistenceError;
use indexmap::IndexMap;
use model::{log_info, CellValue, Parameter, Scenario};
use rust_xlsxwriter::{Format, FormatAlign, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Sheet for parameters matching no keyword group.
pub const DEFAULT_GROUP: &str = "Parameters";

/// Keyword groups, checked in order; the first group with a keyword
/// contained in the lower-cased parameter name wins.
const GROUP_KEYWORDS: &[(&str, &[&str])] = &[
    ("Economic", &["cost", "price", "demand", "supply", "revenue", "profit", "investment"]),
    ("Capacity", &["capacity", "factor", "efficiency", "availability"]),
    ("Technical", &["duration", "lifetime", "construction", "operation"]),
    ("Environmental", &["emission", "carbon", "co2", "pollutant"]),
    ("Operational", &["operation", "maintenance", "fuel", "consumption"]),
    ("Bounds", &["bound", "limit", "minimum", "maximum"]),
    ("Sets", &["set", "category", "technology", "commodity", "region"]),
];

const MAX_SHEET_NAME: usize = 31;

pub fn group_for(parameter_name: &str) -> &'static str {
    let lower = parameter_name.to_lowercase();
    GROUP_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(group, _)| *group)
        .unwrap_or(DEFAULT_GROUP)
}

/// Replaces characters Excel rejects in sheet names and truncates to 31
/// characters.
pub fn sanitize_sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | '?' | '*' | '[' | ']' => '_',
            other => other,
        })
        .take(MAX_SHEET_NAME)
        .collect()
}

/// Groups in sheet order. The default group always comes first, even when
/// it ends up empty.
fn group_parameters<'a>(parameters: impl Iterator<Item = &'a Parameter>) -> IndexMap<&'static str, Vec<&'a Parameter>> {
    let mut groups: IndexMap<&'static str, Vec<&'a Parameter>> = IndexMap::new();
    groups.insert(DEFAULT_GROUP, Vec::new());
    for parameter in parameters {
        groups.entry(group_for(&parameter.name)).or_default().push(parameter);
    }
    groups
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> Result<(), PersistenceError> {
    match value {
        CellValue::Empty => {}
        CellValue::Integer(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Number(n) => {
            if !n.is_nan() {
                worksheet.write_number(row, col, *n)?;
            }
        }
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

/// Writes one parameter block starting at `row`; returns the next free row.
fn write_parameter(worksheet: &mut Worksheet, parameter: &Parameter, mut row: u32) -> Result<u32, PersistenceError> {
    let title = Format::new().set_bold().set_font_size(12);
    let italic = Format::new().set_italic();
    let header = Format::new().set_bold().set_align(FormatAlign::Center);

    worksheet.write_string_with_format(row, 0, format!("Parameter: {}", parameter.name), &title)?;
    row += 1;

    let metadata = format!(
        "Units: {}; Description: {}",
        parameter.metadata.units, parameter.metadata.description
    );
    worksheet.write_string_with_format(row, 0, metadata, &italic)?;
    row += 1;

    let table = &parameter.table;
    if table.is_empty() {
        worksheet.write_string(row, 0, "(No data)")?;
        return Ok(row + 2);
    }

    for (col, name) in table.column_names().iter().enumerate() {
        worksheet.write_string_with_format(row, col as u16, name, &header)?;
    }
    for data_row in 0..table.row_count() {
        for (col, value) in table.row(data_row).into_iter().enumerate() {
            write_cell(worksheet, row + 1 + data_row as u32, col as u16, value)?;
        }
    }
    Ok(row + table.row_count() as u32 + 3)
}

/// Saves the scenario's parameters (or only the modified ones) to `path`.
/// The file is always written as XLSX.
pub fn save_scenario(scenario: &Scenario, path: &Path, modified_only: bool) -> Result<(), PersistenceError> {
    let selected: Vec<&Parameter> = if modified_only {
        scenario
            .modified()
            .filter_map(|name| scenario.get_parameter(name))
            .collect()
    } else {
        scenario.parameters().collect()
    };

    let mut xlsx = XlsxWorkbook::new();
    let group_title = Format::new().set_bold().set_font_size(14);

    for (group, parameters) in group_parameters(selected.iter().copied()) {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(sanitize_sheet_name(group))?;
        worksheet.write_string_with_format(0, 0, format!("{} Parameters", group), &group_title)?;

        let mut row = 2;
        for parameter in parameters {
            row = write_parameter(worksheet, parameter, row)?;
        }
    }

    xlsx.save(path)?;
    log_info!("EXPORT", "saved {} parameters to {}", selected.len(), path.display());
    Ok(())
}
