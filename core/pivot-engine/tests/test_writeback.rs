//! FILENAME: tests/test_writeback.rs
//! Edits made in a pivoted view, written back to the long-format table.

mod common;

use common::{ActivityFixture, TechFixture};
use model::{CellValue, Metadata, Parameter, Scenario, UndoManager};
use pivot_engine::{edit_pivot_cell, transform_for_display, DisplayOptions, TransformError};

fn scenario_with(parameter: Parameter) -> Scenario {
    let mut scenario = Scenario::new();
    scenario.add_parameter(parameter);
    scenario
}

fn view_value(scenario: &Scenario, name: &str, options: &DisplayOptions, row: usize, label: &str) -> Option<CellValue> {
    let parameter = scenario.get_parameter(name)?;
    transform_for_display(&parameter.table, options).table().value(row, label).cloned()
}

// ============================================================================
// ROUND TRIPS
// ============================================================================

#[test]
fn test_edit_shows_in_next_transform() {
    let mut scenario = scenario_with(TechFixture::parameter());
    let mut manager = UndoManager::new();
    let options = DisplayOptions::advanced();

    let command = edit_pivot_cell(
        scenario.get_parameter("demand").unwrap(),
        &options,
        2020.into(),
        "Tech1",
        150.0.into(),
    )
    .unwrap();
    manager.execute(&mut scenario, Box::new(command)).unwrap();

    assert_eq!(view_value(&scenario, "demand", &options, 0, "Tech1"), Some(CellValue::Number(150.0)));
    assert_eq!(view_value(&scenario, "demand", &options, 0, "Tech2"), Some(CellValue::Number(200.0)));
    assert!(scenario.is_modified("demand"));
    assert_eq!(scenario.get_parameter("demand").unwrap().table.row_count(), 2);

    manager.undo(&mut scenario).unwrap();
    assert_eq!(view_value(&scenario, "demand", &options, 0, "Tech1"), Some(CellValue::Number(100.0)));
}

#[test]
fn test_edit_of_empty_view_cell_creates_row() {
    let parameter = Parameter::new("ACT", ActivityFixture::table(), Metadata::default());
    let mut scenario = scenario_with(parameter);
    let mut manager = UndoManager::new();
    let options = DisplayOptions::advanced();

    // Rows of the view are the vintages 2020, 2030, 2040 and 2050.
    assert_eq!(view_value(&scenario, "ACT", &options, 2, "coal_ppl"), Some(CellValue::Empty));

    let command = edit_pivot_cell(
        scenario.get_parameter("ACT").unwrap(),
        &options,
        2040.into(),
        "coal_ppl",
        5.0.into(),
    )
    .unwrap();
    assert_eq!(command.key().year_column, "year_vtg");
    manager.execute(&mut scenario, Box::new(command)).unwrap();

    let table = &scenario.get_parameter("ACT").unwrap().table;
    assert_eq!(table.row_count(), 7);
    assert_eq!(table.value(6, "tec"), Some(&CellValue::text("coal_ppl")));
    assert_eq!(table.value(6, "year_vtg"), Some(&CellValue::Integer(2040)));
    assert_eq!(view_value(&scenario, "ACT", &options, 2, "coal_ppl"), Some(CellValue::Number(5.0)));

    manager.undo(&mut scenario).unwrap();
    assert_eq!(scenario.get_parameter("ACT").unwrap().table.row_count(), 6);
    assert_eq!(view_value(&scenario, "ACT", &options, 2, "coal_ppl"), Some(CellValue::Empty));
}

#[test]
fn test_filtered_edit_only_touches_selected_rows() {
    let parameter = Parameter::new("ACT", ActivityFixture::table(), Metadata::default());
    let mut scenario = scenario_with(parameter);
    let options = DisplayOptions::advanced().with_filter("node_loc", "R2");

    let mut command = edit_pivot_cell(
        scenario.get_parameter("ACT").unwrap(),
        &options,
        2030.into(),
        "gas_ppl",
        7.0.into(),
    )
    .unwrap();
    model::Command::apply(&mut command, &mut scenario).unwrap();

    let table = &scenario.get_parameter("ACT").unwrap().table;
    // R1 gas_ppl 2030 is left alone.
    assert_eq!(table.value(2, "value"), Some(&CellValue::Number(4.0)));
    assert_eq!(table.value(3, "value"), Some(&CellValue::Number(7.0)));
}

#[test]
fn test_raw_view_cannot_be_written_back() {
    let parameter = TechFixture::parameter();
    let err = edit_pivot_cell(&parameter, &DisplayOptions::default(), 2020.into(), "Tech1", 1.0.into()).unwrap_err();
    assert_eq!(err, TransformError::NotPivoted);
}
