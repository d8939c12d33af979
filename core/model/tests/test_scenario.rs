//! FILENAME: tests/test_scenario.rs
//! Integration tests for record construction and scenario handling.

mod common;

use common::{strings, InvCostFixture};
use model::{
    CellValue, FactoryRegistry, ParameterType, ResultSummary, ResultType, Scenario,
    INPUT_FACTORY, RESULT_FACTORY,
};

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_fixture_metadata() {
    let parameter = InvCostFixture::parameter();
    assert_eq!(parameter.metadata.dimensions, strings(&["node_loc", "tec", "year_vtg"]));
    assert_eq!(parameter.metadata.value_column, "value");
    assert_eq!(parameter.metadata.shape, (4, 4));
    assert_eq!(parameter.metadata.parameter_type, Some(ParameterType::Input));
    assert!(parameter.schema_issues().is_empty());
}

#[test]
fn test_registry_result_factory_sets_result_type() {
    let registry = FactoryRegistry::new();
    let rows = vec![vec![CellValue::text("coal_ppl"), 2020.into(), 3.5.into()]];
    let headers = strings(&["technology", "year", "lvl"]);

    let overrides = model::MetadataOverrides::default().with_result_type(ResultType::Variable);
    let result = registry
        .create_parameter(RESULT_FACTORY, "var_ACT", &rows, &headers, Some(overrides))
        .unwrap();
    assert!(result.is_result());
    assert_eq!(result.metadata.result_type, Some(ResultType::Variable));
    assert_eq!(result.metadata.value_column, "lvl");

    let input = registry
        .create_parameter(INPUT_FACTORY, "demand", &[], &headers, None);
    assert!(input.is_none());
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_merge_two_files() {
    let mut first = Scenario::new();
    first.add_parameter(InvCostFixture::parameter());
    first.add_set("technology", strings(&["coal_ppl", "gas_ppl"]));

    let mut second = Scenario::new();
    second.add_parameter(InvCostFixture::parameter());
    second.add_set("technology", strings(&["gas_ppl", "wind_ppl"]));

    let combined = Scenario::merged([&first, &second]);
    assert_eq!(combined.get_parameter("inv_cost").unwrap().table.row_count(), 8);
    assert_eq!(
        combined.get_set("technology").unwrap(),
        strings(&["coal_ppl", "gas_ppl", "wind_ppl"]).as_slice()
    );

    // Rows repeat across files, so the combined view has duplicate keys.
    let report = combined.validate();
    assert!(!report.valid);
    assert_eq!(report.summary.total_data_points, 8);
}

#[test]
fn test_single_file_is_valid() {
    let mut scenario = Scenario::new();
    scenario.add_parameter(InvCostFixture::parameter());
    scenario.add_set("node", strings(&["R1", "R2"]));

    let report = scenario.validate();
    assert!(report.valid, "unexpected issues: {:?}", report.issues);
    assert_eq!(report.summary.parameters, 1);
    assert_eq!(report.summary.sets, 1);
}

#[test]
fn test_result_summary_of_input_scenario_counts_equations() {
    let mut scenario = Scenario::new();
    scenario.add_parameter(InvCostFixture::parameter());
    let summary = ResultSummary::from_scenario(&scenario);
    assert_eq!(summary.total_variables, 0);
    assert_eq!(summary.total_equations, 1);
    assert_eq!(summary.total_data_points, 4);
}
