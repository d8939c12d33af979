//! FILENAME: tests/test_csv_archive.rs
//! Integration tests for loading zip archives of CSV exports.

mod common;

use common::WorkbookFixture;
use model::{CellValue, ConstructionOptions, ParameterType, ResultType};
use persistence::{load_csv_archive, LoadMode, PersistenceError, ScenarioStore};

// ============================================================================
// INPUT MODE
// ============================================================================

#[test]
fn test_load_archive_sets_and_parameters() {
    let fixture = WorkbookFixture::new();
    let path = fixture.csv_archive();
    let scenario = load_csv_archive(&path, LoadMode::Input, ConstructionOptions::default(), None).unwrap();

    assert_eq!(scenario.get_set("node").unwrap(), ["R1".to_string(), "R2".to_string()]);
    // par_empty is skipped, par_broken fails to parse.
    assert_eq!(scenario.parameter_count(), 3);
    assert!(scenario.get_parameter("broken").is_none());

    let output = scenario.get_parameter("output").unwrap();
    assert_eq!(output.metadata.parameter_type, Some(ParameterType::Input));
    assert_eq!(output.metadata.value_column, "value");
    assert_eq!(output.metadata.units, "GWa");
    assert_eq!(
        output.metadata.dimensions,
        vec!["node_loc", "tec", "commodity", "year_act"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
    assert_eq!(output.table.row_count(), 3);
}

#[test]
fn test_results_keep_electricity_technologies_only() {
    let fixture = WorkbookFixture::new();
    let scenario =
        load_csv_archive(&fixture.csv_archive(), LoadMode::Input, ConstructionOptions::default(), None).unwrap();

    let act = scenario.get_parameter("ACT").unwrap();
    assert_eq!(act.metadata.result_type, Some(ResultType::Variable));
    assert_eq!(act.metadata.value_column, "lvl");
    assert_eq!(act.metadata.units, "unknown");
    assert_eq!(act.table.row_count(), 2);
    assert_eq!(act.table.value(0, "tec"), Some(&CellValue::text("coal_ppl")));
    assert_eq!(act.table.value(1, "tec"), Some(&CellValue::text("gas_ppl")));
    assert_eq!(act.table.value(1, "lvl"), Some(&CellValue::Number(1.5)));

    let balance = scenario.get_parameter("COMMODITY_BALANCE").unwrap();
    assert_eq!(balance.metadata.result_type, Some(ResultType::Equation));
    assert_eq!(balance.metadata.dimensions.len(), 3);
}

#[test]
fn test_construction_options_are_applied() {
    let fixture = WorkbookFixture::new();
    let path = fixture.csv_archive();

    let scenario = load_csv_archive(&path, LoadMode::Input, ConstructionOptions::default(), None).unwrap();
    let act = scenario.get_parameter("ACT").unwrap();
    assert_eq!(act.table.value(0, "mrg"), Some(&CellValue::Empty));

    let keep_zeros = ConstructionOptions {
        zero_columns_as_missing: false,
    };
    let scenario = load_csv_archive(&path, LoadMode::Input, keep_zeros, None).unwrap();
    let act = scenario.get_parameter("ACT").unwrap();
    assert_eq!(act.table.value(0, "mrg"), Some(&CellValue::Integer(0)));
}

// ============================================================================
// RESULTS MODE AND ERRORS
// ============================================================================

#[test]
fn test_results_mode_skips_inputs() {
    let fixture = WorkbookFixture::new();
    let mut steps = Vec::new();
    let mut record = |pct: u8, _: &str| steps.push(pct);
    let scenario = load_csv_archive(
        &fixture.csv_archive(),
        LoadMode::Results,
        ConstructionOptions::default(),
        Some(&mut record),
    )
    .unwrap();

    assert_eq!(scenario.set_count(), 0);
    assert_eq!(scenario.parameter_names(), vec!["ACT".to_string(), "COMMODITY_BALANCE".to_string()]);
    assert_eq!(steps.first(), Some(&0));
    assert_eq!(steps.last(), Some(&100));
}

#[test]
fn test_invalid_archives() {
    let fixture = WorkbookFixture::new();
    let missing = fixture.path("missing.zip");
    assert!(matches!(
        load_csv_archive(&missing, LoadMode::Input, ConstructionOptions::default(), None),
        Err(PersistenceError::FileNotFound(_))
    ));

    let not_zip = fixture.path("bad.zip");
    std::fs::write(&not_zip, "plain text").unwrap();
    assert!(matches!(
        load_csv_archive(&not_zip, LoadMode::Input, ConstructionOptions::default(), None),
        Err(PersistenceError::Zip(_))
    ));
}

// ============================================================================
// STORE
// ============================================================================

#[test]
fn test_store_loads_archive_and_returns_it() {
    let fixture = WorkbookFixture::new();
    let archive = fixture.csv_archive();
    let workbook = fixture.input_workbook();

    let mut store = ScenarioStore::new(LoadMode::Input);
    let loaded = store.load_file(&archive, None).unwrap();
    assert_eq!(loaded.parameter_count(), 3);

    let loaded = store.load_file(&workbook, None).unwrap();
    assert!(loaded.get_parameter("demand").is_some());
    assert!(loaded.get_set("technology").is_some());

    assert_eq!(store.len(), 2);
    assert_eq!(store.scenario_by_path(&archive).unwrap().parameter_count(), 3);
}
