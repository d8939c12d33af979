//! FILENAME: core/model/src/scenario.rs
//! PURPOSE: Scenario container: parameters, sets, edit tracking, options.
//! CONTEXT: One scenario is produced per loaded workbook. Several scenarios
//! can be merged into a combined view: rows of shared parameters are
//! concatenated, set elements are unioned.

use crate::parameter::{Parameter, ResultType};
use crate::{log_debug, log_info};
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

// ============================================================================
// OPTIONS
// ============================================================================

/// Scenario-level display options, named as the session layer stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioOptions {
    #[serde(rename = "YearsLimitEnabled")]
    pub years_limit_enabled: bool,
    #[serde(rename = "MinYear")]
    pub min_year: i32,
    #[serde(rename = "MaxYear")]
    pub max_year: i32,
}

impl Default for ScenarioOptions {
    fn default() -> Self {
        ScenarioOptions {
            years_limit_enabled: true,
            min_year: 2020,
            max_year: 2050,
        }
    }
}

impl ScenarioOptions {
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

// ============================================================================
// CHANGE HISTORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Modify,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub action: ChangeAction,
    pub parameter: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// SCENARIO
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Scenario {
    parameters: IndexMap<String, Parameter>,
    sets: IndexMap<String, Vec<String>>,
    modified: IndexSet<String>,
    change_history: Vec<ChangeRecord>,
    pub options: ScenarioOptions,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parameter_names(&self) -> Vec<String> {
        self.parameters.keys().cloned().collect()
    }

    pub fn get_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    /// Mutable access for edit commands. Callers record the edit with
    /// `mark_modified`.
    pub fn get_parameter_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.get_mut(name)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Registers a record, replacing any record with the same name.
    /// Returns the replaced record.
    pub fn add_parameter(&mut self, parameter: Parameter) -> Option<Parameter> {
        let replaced = self.parameters.insert(parameter.name.clone(), parameter);
        if let Some(old) = &replaced {
            log_debug!("SCENARIO", "parameter {} replaced ({} rows dropped)", old.name, old.table.row_count());
        }
        replaced
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<Parameter> {
        self.parameters.shift_remove(name)
    }

    pub fn set_names(&self) -> Vec<String> {
        self.sets.keys().cloned().collect()
    }

    pub fn get_set(&self, name: &str) -> Option<&[String]> {
        self.sets.get(name).map(Vec::as_slice)
    }

    pub fn sets(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.sets.iter()
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Stores a set, replacing an existing set of the same name.
    pub fn add_set(&mut self, name: impl Into<String>, elements: Vec<String>) {
        self.sets.insert(name.into(), elements);
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.sets.is_empty()
    }

    pub fn mark_modified(&mut self, name: &str) {
        self.modified.insert(name.to_string());
        self.change_history.push(ChangeRecord {
            action: ChangeAction::Modify,
            parameter: name.to_string(),
            timestamp: Utc::now(),
        });
    }

    pub fn is_modified(&self, name: &str) -> bool {
        self.modified.contains(name)
    }

    pub fn modified(&self) -> impl Iterator<Item = &String> {
        self.modified.iter()
    }

    pub fn has_modified_data(&self) -> bool {
        !self.modified.is_empty()
    }

    /// Forgets modification marks, typically after a successful save.
    /// The change history is kept.
    pub fn clear_modified(&mut self) {
        self.modified.clear();
    }

    pub fn change_history(&self) -> &[ChangeRecord] {
        &self.change_history
    }

    /// Folds `other` into `self`: set elements are unioned (first occurrence
    /// order), shared parameters get `other`'s rows appended.
    pub fn merge(&mut self, other: &Scenario) {
        for (name, elements) in &other.sets {
            match self.sets.get_mut(name) {
                None => {
                    self.sets.insert(name.clone(), elements.clone());
                }
                Some(existing) => {
                    let mut union: IndexSet<String> = existing.drain(..).collect();
                    union.extend(elements.iter().cloned());
                    existing.extend(union);
                }
            }
        }

        for (name, parameter) in &other.parameters {
            match self.parameters.get_mut(name) {
                None => {
                    self.parameters.insert(name.clone(), parameter.clone());
                }
                Some(existing) => {
                    existing.table = existing.table.concat(&parameter.table);
                    existing.refresh_shape();
                    log_debug!(
                        "SCENARIO",
                        "merged {} rows into {}",
                        parameter.table.row_count(),
                        name
                    );
                }
            }
        }
    }

    /// Combines several scenarios into a new one, in order.
    pub fn merged<'a>(scenarios: impl IntoIterator<Item = &'a Scenario>) -> Scenario {
        let mut combined = Scenario::new();
        for scenario in scenarios {
            combined.merge(scenario);
        }
        combined
    }

    // ========================================================================
    // VALIDATION
    // ========================================================================

    pub fn validate(&self) -> ValidationReport {
        let mut issues = Vec::new();

        if self.is_empty() {
            issues.push("Scenario contains no parameters or sets".to_string());
        }

        for (name, parameter) in &self.parameters {
            issues.extend(
                validate_parameter(parameter)
                    .into_iter()
                    .map(|issue| format!("Parameter '{}': {}", name, issue)),
            );
        }

        for (name, elements) in &self.sets {
            if elements.is_empty() {
                issues.push(format!("Set '{}' is empty", name));
            } else {
                let unique: IndexSet<&String> = elements.iter().collect();
                if unique.len() != elements.len() {
                    issues.push(format!("Set '{}' contains duplicate values", name));
                }
            }
        }

        let report = ValidationReport {
            valid: issues.is_empty(),
            issues,
            summary: ValidationSummary {
                parameters: self.parameters.len(),
                sets: self.sets.len(),
                total_data_points: self.parameters.values().map(|p| p.table.row_count()).sum(),
            },
        };
        log_info!(
            "SCENARIO",
            "validated {} parameters, {} issues",
            report.summary.parameters,
            report.issues.len()
        );
        report
    }
}

fn validate_parameter(parameter: &Parameter) -> Vec<String> {
    let mut issues = Vec::new();
    let table = &parameter.table;

    if table.is_empty() {
        issues.push("Parameter dataframe is empty".to_string());
        return issues;
    }

    let value_column = table
        .column(&parameter.metadata.value_column)
        .or_else(|| table.columns().last());
    if let Some(column) = value_column {
        let missing = column.values.iter().filter(|v| v.is_missing()).count();
        if missing > 0 {
            issues.push(format!(
                "{} missing values in value column '{}'",
                missing, column.name
            ));
        }
    }

    let dims = &parameter.metadata.dimensions;
    if dims.is_empty() {
        return issues;
    }

    let missing_dims = parameter.missing_dimensions();
    if !missing_dims.is_empty() {
        issues.push(format!("Missing dimension columns: {:?}", missing_dims));
        return issues;
    }

    let mut seen = IndexSet::new();
    let duplicates = (0..table.row_count())
        .filter(|&row| {
            let key: Vec<String> = dims
                .iter()
                .map(|dim| table.value(row, dim).map(|v| v.display_value()).unwrap_or_default())
                .collect();
            !seen.insert(key)
        })
        .count();
    if duplicates > 0 {
        issues.push(format!("{} duplicate dimension combinations found", duplicates));
    }

    issues
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub parameters: usize,
    pub sets: usize,
    pub total_data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<String>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Report used when there is nothing to validate.
    pub fn no_scenario() -> Self {
        ValidationReport {
            valid: false,
            issues: vec!["No scenario loaded".to_string()],
            summary: ValidationSummary {
                parameters: 0,
                sets: 0,
                total_data_points: 0,
            },
        }
    }
}

// ============================================================================
// RESULT SUMMARY
// ============================================================================

/// Counts over the result records of a scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub total_variables: usize,
    pub total_equations: usize,
    pub total_data_points: usize,
    pub result_sheets: Vec<String>,
}

impl ResultSummary {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let mut summary = ResultSummary::default();
        for parameter in scenario.parameters() {
            summary.total_data_points += parameter.table.row_count();
            if parameter.metadata.result_type == Some(ResultType::Variable) {
                summary.total_variables += 1;
            } else {
                summary.total_equations += 1;
            }
            summary.result_sheets.push(parameter.name.clone());
        }
        summary
    }
}
