//! FILENAME: core/pivot-engine/src/pipeline.rs
//! Display and chart transforms.
//!
//! Stages: classify columns, apply filters, pivot (or move the year column
//! into the index), hide empty columns. A stage that fails turns the whole
//! call into `Outcome::Degraded` carrying the data that could be shown; the
//! caller is never handed an error.

use crate::classify::classify_columns;
use crate::cleanup::hide_empty_columns;
use crate::definition::{DisplayMode, DisplayOptions};
use crate::engine::{perform_pivot, prepare_2d_format};
use crate::error::Outcome;
use crate::filter::{apply_filters, apply_year_filtering};
use model::{log_debug, log_warn, Parameter, ScenarioOptions, Table};

/// Turns a long-format table into the table shown to the user.
///
/// Raw input tables are only filtered. Result tables and advanced mode go
/// through the full pipeline; pivoting is used when a year, a pivot and a
/// value column were found.
pub fn transform_for_display(table: &Table, options: &DisplayOptions) -> Outcome<Table> {
    if table.is_empty() {
        return Outcome::Ok(table.clone());
    }
    if options.mode == DisplayMode::Raw && !options.is_results {
        return Outcome::Ok(apply_filters(table, &options.filters));
    }

    let roles = classify_columns(table, options.is_results, &options.keywords);
    log_debug!("TRANSFORM", "column roles: {:?}", roles);

    let filtered = apply_filters(table, &options.filters);

    let shaped = if !options.is_results && roles.can_pivot() {
        perform_pivot(&filtered, &roles, options.aggregation)
    } else {
        match prepare_2d_format(&filtered, &roles) {
            Ok(prepared) => Outcome::Ok(prepared),
            Err(err) => {
                log_warn!("TRANSFORM", "display transform failed: {}; showing input table", err);
                return Outcome::Degraded(table.clone(), err);
            }
        }
    };

    if options.should_hide_empty() {
        shaped.map(|t| hide_empty_columns(&t))
    } else {
        shaped
    }
}

/// Table for the chart of one parameter, or `None` when the parameter has
/// no data.
///
/// Unlike `transform_for_display`, the year window of `scenario` is applied
/// before anything else. The transform always runs in advanced mode.
pub fn prepare_chart_data(
    parameter: &Parameter,
    display: &DisplayOptions,
    scenario: Option<&ScenarioOptions>,
) -> Option<Outcome<Table>> {
    if parameter.table.is_empty() {
        return None;
    }

    let windowed = match scenario {
        Some(scenario) => apply_year_filtering(&parameter.table, scenario),
        None => parameter.table.clone(),
    };
    let options = DisplayOptions {
        mode: DisplayMode::Advanced,
        for_chart: true,
        ..display.clone()
    };

    let outcome = transform_for_display(&windowed, &options);
    if let Some(reason) = outcome.reason() {
        log_warn!("TRANSFORM", "chart data for {} degraded: {}", parameter.name, reason);
    }
    Some(outcome)
}
