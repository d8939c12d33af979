//! FILENAME: core/pivot-engine/src/filter.rs
//! Row filters: exact-match column selections and the year window.

use crate::definition::{FilterSelection, FILTER_ALL};
use model::{log_debug, CellValue, Index, ScenarioOptions, Table};

/// Year columns the year window applies to.
pub const YEAR_FILTER_COLUMNS: &[&str] = &["year", "year_act", "year_vtg"];

/// Text matches exactly; numbers match by their display text, so a
/// selection of "2020" matches `2020` and `2020.0`.
fn matches_selection(cell: &CellValue, selected: &str) -> bool {
    match cell {
        CellValue::Text(s) => s == selected,
        CellValue::Integer(_) | CellValue::Number(_) => !cell.is_missing() && cell.display_value() == selected,
        _ => false,
    }
}

/// Keeps rows matching every active selection. Selections on unknown
/// columns, empty selections and `"All"` are ignored.
pub fn apply_filters(table: &Table, filters: &FilterSelection) -> Table {
    let mut mask = vec![true; table.row_count()];
    let mut active = 0;

    for (column_name, selected) in filters {
        if selected.is_empty() || selected == FILTER_ALL {
            continue;
        }
        let Some(column) = table.column(column_name) else {
            log_debug!("TRANSFORM", "filter on unknown column {} ignored", column_name);
            continue;
        };
        active += 1;
        for (keep, cell) in mask.iter_mut().zip(&column.values) {
            *keep &= matches_selection(cell, selected);
        }
    }

    if active == 0 {
        return table.clone();
    }
    table.filter_rows(&mask)
}

fn year_mask(values: &[CellValue], min_year: f64, max_year: f64) -> Vec<bool> {
    values
        .iter()
        .map(|v| v.to_numeric().is_some_and(|y| y >= min_year && y <= max_year))
        .collect()
}

/// Restricts rows to the inclusive year window of `options`.
///
/// Every present year column must lie in the window. Without year columns
/// the window applies to a year level of a multi-level index, or to a flat
/// index named like a year column. Values that are not numbers never pass.
pub fn apply_year_filtering(table: &Table, options: &ScenarioOptions) -> Table {
    if !options.years_limit_enabled || table.is_empty() {
        return table.clone();
    }
    let (min_year, max_year) = (f64::from(options.min_year), f64::from(options.max_year));

    let present: Vec<&str> = YEAR_FILTER_COLUMNS
        .iter()
        .copied()
        .filter(|name| table.has_column(name))
        .collect();

    if !present.is_empty() {
        let mut mask = vec![true; table.row_count()];
        for name in present {
            if let Some(column) = table.column(name) {
                for (keep, ok) in mask.iter_mut().zip(year_mask(&column.values, min_year, max_year)) {
                    *keep &= ok;
                }
            }
        }
        return table.filter_rows(&mask);
    }

    let index_values = match table.index() {
        Index::Multi { .. } => YEAR_FILTER_COLUMNS
            .iter()
            .find_map(|name| table.index().level(name)),
        Index::Column { name, values } if YEAR_FILTER_COLUMNS.contains(&name.as_str()) => Some(values.as_slice()),
        _ => None,
    };

    match index_values {
        Some(values) => table.filter_rows(&year_mask(values, min_year, max_year)),
        None => table.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::Column;

    fn options(min_year: i32, max_year: i32) -> ScenarioOptions {
        ScenarioOptions {
            years_limit_enabled: true,
            min_year,
            max_year,
        }
    }

    fn years_table() -> Table {
        Table::new(vec![
            Column::new("year_vtg", vec![2020.into(), 2030.into(), 2040.into(), "n/a".into()]),
            Column::new("year_act", vec![2030.into(), 2030.into(), 2060.into(), 2030.into()]),
            Column::new("value", vec![1.0.into(), 2.0.into(), 3.0.into(), 4.0.into()]),
        ])
        .unwrap()
    }

    #[test]
    fn test_apply_filters_exact_match() {
        let table = Table::new(vec![
            Column::new("region", vec!["R1".into(), "R2".into(), "R1".into()]),
            Column::new("year", vec![2020.0.into(), 2020.into(), 2030.into()]),
        ])
        .unwrap();

        let mut filters = FilterSelection::new();
        filters.insert("region".to_string(), "R1".to_string());
        filters.insert("year".to_string(), "2020".to_string());
        filters.insert("missing".to_string(), "x".to_string());
        let filtered = apply_filters(&table, &filters);
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.value(0, "region"), Some(&CellValue::text("R1")));

        filters.insert("region".to_string(), FILTER_ALL.to_string());
        filters.insert("year".to_string(), String::new());
        assert_eq!(apply_filters(&table, &filters).row_count(), 3);
    }

    #[test]
    fn test_year_filter_chains_columns() {
        let filtered = apply_year_filtering(&years_table(), &options(2020, 2050));
        assert_eq!(filtered.row_count(), 2);
        assert_eq!(filtered.value(1, "value"), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn test_year_filter_disabled_is_identity() {
        let table = years_table();
        let disabled = ScenarioOptions {
            years_limit_enabled: false,
            ..options(2100, 2200)
        };
        assert_eq!(apply_year_filtering(&table, &disabled), table);
    }

    #[test]
    fn test_year_filter_is_idempotent() {
        let once = apply_year_filtering(&years_table(), &options(2025, 2045));
        let twice = apply_year_filtering(&once, &options(2025, 2045));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_year_filter_on_index() {
        let flat = Table::new(vec![Column::new("coal", vec![1.0.into(), 2.0.into()])])
            .unwrap()
            .with_index(Index::Column {
                name: "year".to_string(),
                values: vec![2010.into(), 2030.into()],
            })
            .unwrap();
        let filtered = apply_year_filtering(&flat, &options(2020, 2050));
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.index_name(), Some("year"));

        let multi = Table::new(vec![Column::new("lvl", vec![1.0.into(), 2.0.into()])])
            .unwrap()
            .with_index(Index::Multi {
                names: vec!["node".to_string(), "year_act".to_string()],
                levels: vec![vec!["R1".into(), "R1".into()], vec![2030.into(), 2090.into()]],
            })
            .unwrap();
        let filtered = apply_year_filtering(&multi, &options(2020, 2050));
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.index().level("year_act"), Some(&[CellValue::Integer(2030)][..]));

        let unnamed = Table::new(vec![Column::new("coal", vec![1.0.into()])]).unwrap();
        assert_eq!(apply_year_filtering(&unnamed, &options(2020, 2050)), unnamed);
    }
}
