//! FILENAME: core/pivot-engine/src/classify.rs
//! Column-role classification.
//!
//! Roles are computed fresh for every transform: `lvl` is a value column
//! only in result tables, so the same table can classify differently.

use crate::definition::{ColumnKeywords, ColumnRole, ColumnRoles};
use model::Table;

/// Literal value column name of result tables.
const RESULT_LEVEL_COLUMN: &str = "lvl";

/// Partitions the columns of `table` by role. Every column lands in exactly
/// one partition. Only the first value-like column becomes the value
/// column; later ones are left uncategorized.
pub fn classify_columns(table: &Table, is_results: bool, keywords: &ColumnKeywords) -> ColumnRoles {
    let mut roles = ColumnRoles::default();

    for column in table.columns() {
        let name = column.name.clone();
        match keywords.role_of(&name, is_results) {
            ColumnRole::Value if roles.value.is_none() => roles.value = Some(name),
            ColumnRole::Value | ColumnRole::Uncategorized => roles.uncategorized.push(name),
            ColumnRole::Year => roles.year.push(name),
            ColumnRole::Ignored => roles.ignored.push(name),
            ColumnRole::Pivot => roles.pivot.push(name),
            ColumnRole::Filter => roles.filter.push(name),
        }
    }

    // Result tables report their magnitude under "lvl" even when the
    // keyword table does not say so.
    if roles.value.is_none() && is_results {
        if let Some(pos) = roles.uncategorized.iter().position(|c| c.to_lowercase() == RESULT_LEVEL_COLUMN) {
            roles.value = Some(roles.uncategorized.remove(pos));
        }
    }

    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{CellValue, Column};

    fn table(names: &[&str]) -> Table {
        Table::new(
            names
                .iter()
                .map(|n| Column::new(*n, vec![CellValue::Integer(1)]))
                .collect(),
        )
        .unwrap()
    }

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_classify_result_table() {
        let roles = classify_columns(&table(&["node", "lvl", "mrg"]), true, &ColumnKeywords::default());
        assert_eq!(roles.value.as_deref(), Some("lvl"));
        assert_eq!(roles.ignored, owned(&["mrg"]));
        assert_eq!(roles.filter, owned(&["node"]));
        assert!(roles.year.is_empty());
        assert!(roles.pivot.is_empty());
    }

    #[test]
    fn test_classify_input_table() {
        let roles = classify_columns(
            &table(&["technology", "region", "year", "value", "unit", "emission"]),
            false,
            &ColumnKeywords::default(),
        );
        assert_eq!(roles.pivot, owned(&["technology"]));
        assert_eq!(roles.filter, owned(&["region"]));
        assert_eq!(roles.year, owned(&["year"]));
        assert_eq!(roles.value.as_deref(), Some("value"));
        assert_eq!(roles.ignored, owned(&["unit"]));
        assert_eq!(roles.uncategorized, owned(&["emission"]));
        assert!(roles.can_pivot());
    }

    #[test]
    fn test_second_value_column_is_uncategorized() {
        let roles = classify_columns(&table(&["value", "val"]), false, &ColumnKeywords::default());
        assert_eq!(roles.value.as_deref(), Some("value"));
        assert_eq!(roles.uncategorized, owned(&["val"]));
    }

    #[test]
    fn test_lvl_fallback_with_custom_keywords() {
        let keywords = ColumnKeywords {
            result_value: Vec::new(),
            ..ColumnKeywords::default()
        };
        let roles = classify_columns(&table(&["year", "lvl"]), true, &keywords);
        assert_eq!(roles.value.as_deref(), Some("lvl"));
        assert!(roles.uncategorized.is_empty());

        let roles = classify_columns(&table(&["year", "lvl"]), false, &keywords);
        assert_eq!(roles.value, None);
        assert_eq!(roles.uncategorized, owned(&["lvl"]));
    }

    #[test]
    fn test_lvl_fallback_ignores_case() {
        let keywords = ColumnKeywords {
            result_value: Vec::new(),
            ..ColumnKeywords::default()
        };
        let roles = classify_columns(&table(&["node", "LVL"]), true, &keywords);
        assert_eq!(roles.value.as_deref(), Some("LVL"));
        assert!(roles.uncategorized.is_empty());
    }

    #[test]
    fn test_every_column_assigned_once() {
        let names = ["year", "Year", "node", "value", "value", "lvl", "foo", "tec", "time"];
        for is_results in [false, true] {
            let roles = classify_columns(&table(&names), is_results, &ColumnKeywords::default());
            assert_eq!(roles.len(), names.len());
        }
    }
}
