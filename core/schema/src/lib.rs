//! FILENAME: core/schema/src/lib.rs
//! MESSAGEix Parameter Schema
//!
//! Static description of every valid MESSAGEix parameter: its dimension
//! columns, a short description and the type of its value column. The
//! catalogue is pure data. It is used to validate edited parameter tables and
//! to group parameters for display, never by the transformation engine.

mod catalog;

use catalog::{CATEGORIES, PARAMETERS};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

// ============================================================================
// SCHEMA ENTRY
// ============================================================================

/// Type of a parameter's value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Float,
}

/// One catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    /// Ordered dimension (index) columns.
    pub dims: &'static [&'static str],
    pub description: &'static str,
    pub value_type: ValueType,
}

impl ParameterSpec {
    pub(crate) const fn float(
        name: &'static str,
        dims: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        ParameterSpec {
            name,
            dims,
            description,
            value_type: ValueType::Float,
        }
    }
}

static BY_NAME: Lazy<HashMap<&'static str, &'static ParameterSpec>> =
    Lazy::new(|| PARAMETERS.iter().map(|spec| (spec.name, spec)).collect());

// ============================================================================
// LOOKUP
// ============================================================================

/// Returns the catalogue entry for `name`, if it is a known parameter.
pub fn lookup(name: &str) -> Option<&'static ParameterSpec> {
    BY_NAME.get(name).copied()
}

pub fn is_known(name: &str) -> bool {
    BY_NAME.contains_key(name)
}

/// All known parameter names in catalogue order.
pub fn parameter_names() -> impl Iterator<Item = &'static str> {
    PARAMETERS.iter().map(|spec| spec.name)
}

/// All catalogue entries in catalogue order.
pub fn parameters() -> &'static [ParameterSpec] {
    PARAMETERS
}

/// Category names in display order.
pub fn categories() -> impl Iterator<Item = &'static str> {
    CATEGORIES.iter().map(|(category, _)| *category)
}

/// Parameter names belonging to `category`. Empty for an unknown category.
pub fn parameters_in(category: &str) -> &'static [&'static str] {
    CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, members)| *members)
        .unwrap_or(&[])
}

/// The category a parameter is listed under.
pub fn category_of(name: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(_, members)| members.contains(&name))
        .map(|(category, _)| *category)
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Checks a parameter table against the catalogue.
///
/// `columns` are the table's column names and `rows` its cells rendered as
/// text, in column order. Returns human-readable issues; an empty list means
/// the table is valid for `name`.
pub fn validate_parameter_data(name: &str, columns: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let mut issues = Vec::new();

    let Some(spec) = lookup(name) else {
        issues.push(format!("Parameter '{}' is not a valid MessageIX parameter", name));
        return issues;
    };

    let missing: Vec<&str> = spec
        .dims
        .iter()
        .copied()
        .filter(|dim| !columns.iter().any(|c| c == dim))
        .collect();
    if !missing.is_empty() {
        issues.push(format!("Missing required index columns: {:?}", missing));
        return issues;
    }

    let key_positions: Vec<usize> = spec
        .dims
        .iter()
        .filter_map(|dim| columns.iter().position(|c| c == dim))
        .collect();

    let mut seen = HashSet::new();
    let duplicates = rows
        .iter()
        .filter(|row| {
            let key: Vec<&str> = key_positions
                .iter()
                .map(|&pos| row.get(pos).map(String::as_str).unwrap_or(""))
                .collect();
            !seen.insert(key)
        })
        .count();
    if duplicates > 0 {
        issues.push("Duplicate index combinations found".to_string());
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_catalogue_is_consistent() {
        let names: HashSet<&str> = parameter_names().collect();
        assert_eq!(names.len(), parameters().len(), "parameter names must be unique");

        // every parameter sits in exactly one category
        for name in &names {
            let count = CATEGORIES
                .iter()
                .filter(|(_, members)| members.contains(name))
                .count();
            assert_eq!(count, 1, "{} should belong to one category", name);
        }
        assert_eq!(categories().count(), 16);
    }

    #[test]
    fn test_lookup_known_parameter() {
        let spec = lookup("inv_cost").expect("inv_cost is in the catalogue");
        assert_eq!(spec.dims, &["node_loc", "tec", "year_vtg"]);
        assert_eq!(spec.value_type, ValueType::Float);
        assert_eq!(category_of("inv_cost"), Some("Cost and Economic"));
        assert!(lookup("not_a_parameter").is_none());
        assert!(!is_known("not_a_parameter"));
    }

    #[test]
    fn test_parameters_in_category() {
        assert_eq!(parameters_in("Demand & Load"), &["demand", "peak_load_factor"]);
        assert!(parameters_in("Nope").is_empty());
    }

    #[test]
    fn test_validate_unknown_parameter() {
        let issues = validate_parameter_data("bogus", &[], &[]);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("not a valid"));
    }

    #[test]
    fn test_validate_missing_columns() {
        let columns = strings(&["node_loc", "tec", "value"]);
        let issues = validate_parameter_data("inv_cost", &columns, &[]);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("year_vtg"));
    }

    #[test]
    fn test_validate_duplicate_keys() {
        let columns = strings(&["node_loc", "tec", "year_vtg", "value"]);
        let rows = vec![
            strings(&["R1", "coal_ppl", "2020", "1500"]),
            strings(&["R1", "coal_ppl", "2020", "1600"]),
            strings(&["R1", "coal_ppl", "2030", "1400"]),
        ];
        let issues = validate_parameter_data("inv_cost", &columns, &rows);
        assert_eq!(issues, vec!["Duplicate index combinations found".to_string()]);
    }

    #[test]
    fn test_validate_clean_table() {
        let columns = strings(&["node_loc", "tec", "year_vtg", "value"]);
        let rows = vec![
            strings(&["R1", "coal_ppl", "2020", "1500"]),
            strings(&["R1", "gas_ppl", "2020", "800"]),
        ];
        assert!(validate_parameter_data("inv_cost", &columns, &rows).is_empty());
    }
}
