//! FILENAME: tests/common/mod.rs
//! Workbook fixtures for the persistence integration tests.

#![allow(dead_code)]

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A cell to write into a fixture sheet.
pub enum Fx {
    S(&'static str),
    N(f64),
    Blank,
}

fn write_rows(sheet: &mut Worksheet, rows: &[Vec<Fx>]) -> Result<(), XlsxError> {
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Fx::S(s) => {
                    sheet.write_string(r as u32, c as u16, *s)?;
                }
                Fx::N(n) => {
                    sheet.write_number(r as u32, c as u16, *n)?;
                }
                Fx::Blank => {}
            }
        }
    }
    Ok(())
}

/// Temporary directory holding fixture workbooks.
pub struct WorkbookFixture {
    pub dir: TempDir,
}

impl WorkbookFixture {
    pub fn new() -> Self {
        WorkbookFixture {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.path().join(file)
    }

    pub fn write(&self, file: &str, sheets: &[(&str, Vec<Vec<Fx>>)]) -> PathBuf {
        let path = self.path(file);
        write_workbook(&path, sheets).expect("write fixture workbook");
        path
    }

    /// Input workbook with every sheet kind the parser knows.
    pub fn input_workbook(&self) -> PathBuf {
        use Fx::*;
        self.write(
            "input.xlsx",
            &[
                (
                    "sets",
                    vec![
                        vec![S("set"), S("elements")],
                        vec![S("node"), S("R1"), S("R2")],
                        vec![S("year"), N(2020.0), N(2030.0)],
                    ],
                ),
                (
                    "technology",
                    vec![vec![S("technology")], vec![S("coal_ppl")], vec![S("gas_ppl")], vec![S("coal_ppl")]],
                ),
                (
                    "demand",
                    vec![
                        vec![S("node"), S("commodity"), S("year"), S("value")],
                        vec![S("R1"), S("electr"), N(2020.0), N(100.0)],
                        vec![S("R1"), S("electr"), N(2030.0), N(120.0)],
                    ],
                ),
                (
                    "Parameters",
                    vec![
                        vec![S("parameter"), S("node_loc"), S("tec"), S("year_vtg"), S("value")],
                        vec![S("inv_cost"), S("R1"), S("coal_ppl"), N(2020.0), N(1500.0)],
                        vec![S("inv_cost"), S("R1"), S("gas_ppl"), N(2020.0), N(800.0)],
                        vec![S("fix_cost"), S("R1"), S("coal_ppl"), N(2020.0), N(40.0)],
                    ],
                ),
                (
                    "var_ACT",
                    vec![
                        vec![Blank, S("coal_ppl"), S("gas_ppl")],
                        vec![N(2020.0), N(1.0), N(2.0)],
                        vec![N(2030.0), N(1.5), N(2.5)],
                        vec![N(2040.0), N(1.7), N(2.7)],
                    ],
                ),
                ("notes", vec![vec![S("comment")], vec![S("hand edited")]]),
            ],
        )
    }

    /// Zip archive holding the given (member name, CSV text) pairs.
    pub fn write_archive(&self, file: &str, members: &[(&str, &str)]) -> PathBuf {
        let path = self.path(file);
        write_archive(&path, members).expect("write fixture archive");
        path
    }

    /// CSV export of a solved scenario: sets, inputs and results.
    pub fn csv_archive(&self) -> PathBuf {
        self.write_archive(
            "scenario.zip",
            &[
                ("set_node.csv", "node\nR1\nR2\n"),
                (
                    "par_output.csv",
                    "node_loc,tec,commodity,year_act,value,unit\n\
                     R1,coal_ppl,electr,2020,1.0,GWa\n\
                     R1,gas_ppl,electr,2020,1.0,GWa\n\
                     R1,furnace,heat,2020,1.0,GWa\n",
                ),
                (
                    "data/var_ACT.csv",
                    "node_loc,tec,year_act,lvl,mrg\n\
                     R1,coal_ppl,2020,3.5,0\n\
                     R1,furnace,2020,2.0,0\n\
                     R1,coal_ppl_res1,2020,9.0,0\n\
                     R1,gas_ppl,2020,1.5,0\n",
                ),
                ("equ_COMMODITY_BALANCE.csv", "node,commodity,year,lvl,mrg\nR1,electr,2020,0,0.2\n"),
                ("par_empty.csv", "node,value\n"),
                ("par_broken.csv", "node,value\nR1,1,extra\n"),
                ("readme.txt", "not a table"),
            ],
        )
    }
}

pub fn write_archive(path: &Path, members: &[(&str, &str)]) -> zip::result::ZipResult<()> {
    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, text) in members {
        zip.start_file(*name, options)?;
        zip.write_all(text.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}

pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<Fx>>)]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name)?;
        write_rows(sheet, rows)?;
    }
    workbook.save(path)
}
