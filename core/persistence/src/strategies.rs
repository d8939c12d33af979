//! FILENAME: core/persistence/src/strategies.rs
//! PURPOSE: Sheet classification and parsing, one strategy per sheet kind.
//! CONTEXT: `ExcelParser` asks each strategy in turn whether it recognises a
//! sheet (sets first, then results, then parameters); the first one that
//! does parses it into the scenario. Sheets nobody claims are skipped.
//! Parsing never fails: rows that cannot form a record are logged and
//! dropped by the parameter factories.

use crate::sheet::{is_empty_row, RawSheet};
use model::{
    log_debug, log_info, CellValue, FactoryRegistry, MetadataOverrides, ResultType, Scenario,
    INPUT_FACTORY, RESULT_FACTORY,
};

/// Sheet names holding every set in one sheet.
const COMBINED_SET_SHEETS: &[&str] = &["sets", "set"];

/// Sheets named after a single set.
const INDIVIDUAL_SET_SHEETS: &[&str] = &[
    "node",
    "technology",
    "commodity",
    "level",
    "year",
    "mode",
    "time",
];

/// Names accepted as parameter sheets without looking at their contents.
const PARAMETER_SHEET_ALIASES: &[&str] = &["parameters", "parameter", "Parameters", "Parameter", "data"];

/// Lower-case names of sheets holding every parameter in one sheet.
const COMBINED_PARAMETER_SHEETS: &[&str] = &["parameters", "parameter", "data"];

/// Data rows inspected when looking for the text-plus-number row signature.
const MIXED_ROW_SAMPLE: usize = 5;

/// Data rows inspected when guessing whether a blank-headed first column
/// holds years.
const YEAR_SAMPLE_ROWS: usize = 9;
const YEAR_SAMPLE_MIN_HITS: usize = 3;
const YEAR_SAMPLE_RANGE: (f64, f64) = (1900.0, 2100.0);

/// Sheet names containing one of these never count as result sheets when
/// loading a results workbook.
const INPUT_SHEET_MARKERS: &[&str] = &["parameter", "parameters", "set", "sets", "data"];

// ============================================================================
// STRATEGY TRAIT
// ============================================================================

pub trait ParsingStrategy: Send + Sync {
    /// Short label used in log lines.
    fn label(&self) -> &'static str;

    fn can_parse_sheet(&self, sheet: &RawSheet) -> bool;

    /// Adds whatever the sheet yields to `scenario`. Returns the number of
    /// sets or records produced.
    fn parse_sheet(&self, sheet: &RawSheet, scenario: &mut Scenario, registry: &FactoryRegistry) -> usize;
}

fn cell_text(cell: &CellValue) -> String {
    cell.display_value().trim().to_string()
}

// ============================================================================
// SETS
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct SetParsingStrategy;

impl SetParsingStrategy {
    /// First column names the set, the rest of the row lists its elements.
    fn parse_combined(&self, sheet: &RawSheet, scenario: &mut Scenario) -> usize {
        let mut produced = 0;
        for row in sheet.data_rows() {
            let Some((first, rest)) = row.split_first() else {
                continue;
            };
            if first.is_missing() || rest.is_empty() {
                continue;
            }
            let elements: Vec<String> = rest
                .iter()
                .filter(|cell| !cell.is_missing())
                .map(cell_text)
                .filter(|text| !text.is_empty())
                .collect();
            if !elements.is_empty() {
                scenario.add_set(cell_text(first), elements);
                produced += 1;
            }
        }
        produced
    }

    /// The sheet name is the set name; elements come from the first column.
    fn parse_individual(&self, sheet: &RawSheet, scenario: &mut Scenario) -> usize {
        let mut elements: Vec<String> = Vec::new();
        for row in sheet.data_rows() {
            let Some(first) = row.first().filter(|cell| !cell.is_missing()) else {
                continue;
            };
            let text = cell_text(first);
            if !text.is_empty() && !elements.contains(&text) {
                elements.push(text);
            }
        }
        if elements.is_empty() {
            return 0;
        }
        scenario.add_set(sheet.name.clone(), elements);
        1
    }
}

impl ParsingStrategy for SetParsingStrategy {
    fn label(&self) -> &'static str {
        "set"
    }

    fn can_parse_sheet(&self, sheet: &RawSheet) -> bool {
        COMBINED_SET_SHEETS
            .iter()
            .any(|alias| sheet.name.eq_ignore_ascii_case(alias))
            || INDIVIDUAL_SET_SHEETS.contains(&sheet.name.as_str())
    }

    fn parse_sheet(&self, sheet: &RawSheet, scenario: &mut Scenario, _registry: &FactoryRegistry) -> usize {
        if COMBINED_SET_SHEETS.contains(&sheet.name.to_lowercase().as_str()) {
            self.parse_combined(sheet, scenario)
        } else {
            self.parse_individual(sheet, scenario)
        }
    }
}

// ============================================================================
// PARAMETERS
// ============================================================================

#[derive(Debug, Clone)]
pub struct ParameterParsingStrategy {
    /// Factory kind handed to the registry.
    factory_kind: String,
}

impl ParameterParsingStrategy {
    pub fn new(factory_kind: impl Into<String>) -> Self {
        ParameterParsingStrategy {
            factory_kind: factory_kind.into(),
        }
    }

    fn create(
        &self,
        registry: &FactoryRegistry,
        scenario: &mut Scenario,
        name: &str,
        rows: &[Vec<CellValue>],
        headers: &[String],
    ) -> usize {
        match registry.create_parameter(&self.factory_kind, name, rows, headers, None) {
            Some(parameter) => {
                scenario.add_parameter(parameter);
                1
            }
            None => 0,
        }
    }

    /// First column names the parameter. Consecutive rows with the same name
    /// form one record; a name that comes back after another one starts a
    /// new record, which replaces the earlier one in the scenario.
    fn parse_combined(&self, sheet: &RawSheet, scenario: &mut Scenario, registry: &FactoryRegistry) -> usize {
        let headers = sheet.leading_headers();
        if headers.len() < 2 {
            return 0;
        }
        let data_headers = &headers[1..];

        let mut produced = 0;
        let mut current: Option<String> = None;
        let mut block: Vec<Vec<CellValue>> = Vec::new();

        for row in sheet.data_rows() {
            let Some(first) = row.first().filter(|cell| !cell.is_blank()) else {
                continue;
            };
            let name = cell_text(first);

            if current.as_deref() != Some(name.as_str()) {
                if let Some(previous) = current.take() {
                    if !block.is_empty() {
                        produced += self.create(registry, scenario, &previous, &block, data_headers);
                    }
                }
                current = Some(name);
                block.clear();
            }

            if row.len() > 1 {
                block.push(row[1..].to_vec());
            }
        }

        if let Some(last) = current {
            if !block.is_empty() {
                produced += self.create(registry, scenario, &last, &block, data_headers);
            }
        }
        produced
    }

    /// The sheet name is the parameter name; every non-empty row is data.
    fn parse_individual(&self, sheet: &RawSheet, scenario: &mut Scenario, registry: &FactoryRegistry) -> usize {
        let headers = sheet.leading_headers();
        if headers.is_empty() {
            return 0;
        }
        let rows: Vec<Vec<CellValue>> = sheet
            .data_rows()
            .iter()
            .filter(|row| !is_empty_row(row))
            .cloned()
            .collect();
        if rows.is_empty() {
            return 0;
        }
        self.create(registry, scenario, &sheet.name, &rows, &headers)
    }
}

impl Default for ParameterParsingStrategy {
    fn default() -> Self {
        ParameterParsingStrategy::new(INPUT_FACTORY)
    }
}

impl ParsingStrategy for ParameterParsingStrategy {
    fn label(&self) -> &'static str {
        "parameter"
    }

    fn can_parse_sheet(&self, sheet: &RawSheet) -> bool {
        if PARAMETER_SHEET_ALIASES.contains(&sheet.name.as_str()) {
            return true;
        }
        sheet.rows.len() >= 2 && sheet.has_text_header() && sheet.has_mixed_rows(MIXED_ROW_SAMPLE)
    }

    fn parse_sheet(&self, sheet: &RawSheet, scenario: &mut Scenario, registry: &FactoryRegistry) -> usize {
        if COMBINED_PARAMETER_SHEETS.contains(&sheet.name.to_lowercase().as_str()) {
            self.parse_combined(sheet, scenario, registry)
        } else {
            self.parse_individual(sheet, scenario, registry)
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ResultParsingStrategy;

impl ResultParsingStrategy {
    pub fn has_result_prefix(name: &str) -> bool {
        name.starts_with("var_") || name.starts_with("equ_")
    }

    /// A blank-headed first column is kept as "year" when enough of its
    /// leading values look like years.
    fn first_column_holds_years(sheet: &RawSheet) -> bool {
        let hits = sheet
            .data_rows()
            .iter()
            .take(YEAR_SAMPLE_ROWS)
            .filter_map(|row| row.first())
            .filter_map(CellValue::to_numeric)
            .filter(|year| (YEAR_SAMPLE_RANGE.0..=YEAR_SAMPLE_RANGE.1).contains(year))
            .count();
        hits >= YEAR_SAMPLE_MIN_HITS
    }
}

/// Repeated names get a numeric suffix: `col`, `col.1`, `col.2`.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<(String, usize)> = Vec::new();
    headers
        .into_iter()
        .map(|header| match seen.iter_mut().find(|(name, _)| *name == header) {
            Some((_, count)) => {
                let renamed = format!("{}.{}", header, count);
                *count += 1;
                renamed
            }
            None => {
                seen.push((header.clone(), 1));
                header
            }
        })
        .collect()
}

impl ParsingStrategy for ResultParsingStrategy {
    fn label(&self) -> &'static str {
        "result"
    }

    fn can_parse_sheet(&self, sheet: &RawSheet) -> bool {
        if Self::has_result_prefix(&sheet.name) {
            return true;
        }
        sheet.rows.len() >= 2 && sheet.has_text_header() && sheet.is_numeric_only()
    }

    fn parse_sheet(&self, sheet: &RawSheet, scenario: &mut Scenario, registry: &FactoryRegistry) -> usize {
        let header_row = sheet.header_row();
        let year_column = header_row.first().is_some_and(CellValue::is_blank)
            && Self::first_column_holds_years(sheet);

        let mut headers = Vec::new();
        let mut positions = Vec::new();
        for (pos, cell) in header_row.iter().enumerate() {
            if !cell.is_blank() {
                headers.push(cell.display_value());
                positions.push(pos);
            } else if pos == 0 && year_column {
                headers.push("year".to_string());
                positions.push(pos);
            }
        }
        if headers.is_empty() {
            return 0;
        }
        let headers = dedupe_headers(headers);

        let rows: Vec<Vec<CellValue>> = sheet
            .data_rows()
            .iter()
            .filter(|row| !is_empty_row(row))
            .map(|row| {
                positions
                    .iter()
                    .filter_map(|&pos| row.get(pos).cloned())
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();
        if rows.is_empty() {
            return 0;
        }

        let overrides = MetadataOverrides::default().with_result_type(ResultType::from_sheet_name(&sheet.name));
        match registry.create_parameter(RESULT_FACTORY, &sheet.name, &rows, &headers, Some(overrides)) {
            Some(parameter) => {
                scenario.add_parameter(parameter);
                1
            }
            None => 0,
        }
    }
}

// ============================================================================
// PARSER
// ============================================================================

/// Percentage for item `index` of `total`, spread over `from..from + span`.
fn step(from: u8, span: u8, index: usize, total: usize) -> u8 {
    if total == 0 {
        return from;
    }
    let offset = (index * span as usize) / total;
    from.saturating_add(offset as u8)
}

pub struct ExcelParser {
    strategies: Vec<Box<dyn ParsingStrategy>>,
    registry: FactoryRegistry,
}

impl ExcelParser {
    pub fn new() -> Self {
        Self::with_registry(FactoryRegistry::new())
    }

    pub fn with_registry(registry: FactoryRegistry) -> Self {
        ExcelParser {
            strategies: vec![
                Box::new(SetParsingStrategy),
                Box::new(ResultParsingStrategy),
                Box::new(ParameterParsingStrategy::new(INPUT_FACTORY)),
            ],
            registry,
        }
    }

    pub fn registry(&self) -> &FactoryRegistry {
        &self.registry
    }

    pub fn strategy_for(&self, sheet: &RawSheet) -> Option<&dyn ParsingStrategy> {
        self.strategies
            .iter()
            .find(|strategy| strategy.can_parse_sheet(sheet))
            .map(|strategy| strategy.as_ref())
    }

    /// Parses every sheet with the first strategy that claims it.
    /// Progress runs from 20 to 100.
    pub fn parse_workbook(&self, sheets: &[RawSheet], scenario: &mut Scenario, progress: &mut dyn FnMut(u8, &str)) {
        for (i, sheet) in sheets.iter().enumerate() {
            progress(step(20, 80, i, sheets.len()), &format!("Parsing sheet: {}", sheet.name));
            match self.strategy_for(sheet) {
                Some(strategy) => {
                    let produced = strategy.parse_sheet(sheet, scenario, &self.registry);
                    log_debug!("PARSE", "{} sheet {}: {} items", strategy.label(), sheet.name, produced);
                }
                None => log_debug!("PARSE", "skipping unrecognised sheet {}", sheet.name),
            }
        }
        log_info!(
            "PARSE",
            "parsed {} sheets: {} parameters, {} sets",
            sheets.len(),
            scenario.parameter_count(),
            scenario.set_count()
        );
    }

    /// Results workbooks: `var_`/`equ_` sheets first, then any other sheet
    /// with text headers and numeric data whose name does not mark it as
    /// input. Progress runs from 20 to 80.
    pub fn parse_results(&self, sheets: &[RawSheet], scenario: &mut Scenario, progress: &mut dyn FnMut(u8, &str)) {
        let mut selected: Vec<&RawSheet> = sheets
            .iter()
            .filter(|sheet| ResultParsingStrategy::has_result_prefix(&sheet.name))
            .collect();
        selected.extend(sheets.iter().filter(|sheet| {
            let lower = sheet.name.to_lowercase();
            !ResultParsingStrategy::has_result_prefix(&sheet.name)
                && !INPUT_SHEET_MARKERS.iter().any(|marker| lower.contains(marker))
                && sheet.rows.len() >= 2
                && sheet.has_text_header()
                && sheet.has_numeric_data()
        }));

        let strategy = ResultParsingStrategy;
        for (i, sheet) in selected.iter().enumerate() {
            progress(
                step(20, 60, i, selected.len()),
                &format!("Parsing result sheet: {}", sheet.name),
            );
            strategy.parse_sheet(sheet, scenario, &self.registry);
        }
        log_info!("PARSE", "parsed {} result sheets", scenario.parameter_count());
    }
}

impl Default for ExcelParser {
    fn default() -> Self {
        Self::new()
    }
}
