//! FILENAME: tests/common/mod.rs
//! Fixtures shared by the model integration tests.

#![allow(dead_code)]

use model::{build_parameter, CellValue, ConstructionOptions, MetadataOverrides, Parameter};

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Long-format `inv_cost` rows: node_loc, tec, year_vtg, value.
pub struct InvCostFixture;

impl InvCostFixture {
    pub fn headers() -> Vec<String> {
        strings(&["node_loc", "tec", "year_vtg", "value"])
    }

    pub fn data() -> Vec<(&'static str, &'static str, i64, f64)> {
        vec![
            ("R1", "coal_ppl", 2020, 1500.0),
            ("R1", "coal_ppl", 2030, 1450.0),
            ("R1", "gas_ppl", 2020, 800.0),
            ("R2", "gas_ppl", 2030, 780.0),
        ]
    }

    pub fn rows() -> Vec<Vec<CellValue>> {
        Self::data()
            .into_iter()
            .map(|(node, tec, year, value)| vec![node.into(), tec.into(), year.into(), value.into()])
            .collect()
    }

    pub fn parameter() -> Parameter {
        build_parameter(
            "inv_cost",
            &Self::rows(),
            &Self::headers(),
            Some(MetadataOverrides::input()),
            ConstructionOptions::default(),
        )
        .expect("fixture parameter")
    }
}
