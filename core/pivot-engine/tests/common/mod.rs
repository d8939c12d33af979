//! FILENAME: tests/common/mod.rs
//! Fixtures shared by the pivot-engine integration tests.

#![allow(dead_code)]

use model::{build_parameter, CellValue, Column, ConstructionOptions, Parameter, ScenarioOptions, Table};

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn year_window(min_year: i32, max_year: i32) -> ScenarioOptions {
    ScenarioOptions {
        years_limit_enabled: true,
        min_year,
        max_year,
    }
}

/// Two technologies in one region and year.
pub struct TechFixture;

impl TechFixture {
    pub fn headers() -> Vec<String> {
        strings(&["technology", "region", "year", "value"])
    }

    pub fn rows() -> Vec<Vec<CellValue>> {
        vec![
            vec!["Tech1".into(), "R1".into(), 2020.into(), 100.0.into()],
            vec!["Tech2".into(), "R1".into(), 2020.into(), 200.0.into()],
        ]
    }

    pub fn parameter() -> Parameter {
        build_parameter(
            "demand",
            &Self::rows(),
            &Self::headers(),
            None,
            ConstructionOptions::default(),
        )
        .expect("fixture parameter")
    }
}

/// Activity-style table over vintage and active years for several nodes.
pub struct ActivityFixture;

impl ActivityFixture {
    pub fn data() -> Vec<(&'static str, &'static str, i64, i64, f64)> {
        vec![
            ("R1", "coal_ppl", 2020, 2020, 10.0),
            ("R1", "coal_ppl", 2020, 2030, 8.0),
            ("R1", "gas_ppl", 2030, 2030, 4.0),
            ("R2", "gas_ppl", 2030, 2040, 6.0),
            ("R2", "wind_ppl", 2040, 2050, 0.0),
            ("R2", "wind_ppl", 2050, 2060, 0.0),
        ]
    }

    pub fn table() -> Table {
        let data = Self::data();
        Table::new(vec![
            Column::new("node_loc", data.iter().map(|r| r.0.into()).collect()),
            Column::new("tec", data.iter().map(|r| r.1.into()).collect()),
            Column::new("year_vtg", data.iter().map(|r| r.2.into()).collect()),
            Column::new("year_act", data.iter().map(|r| r.3.into()).collect()),
            Column::new("value", data.iter().map(|r| r.4.into()).collect()),
        ])
        .expect("fixture table")
    }
}
