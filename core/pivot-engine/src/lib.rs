//! FILENAME: core/pivot-engine/src/lib.rs
//! Display transforms for parameter tables.
//!
//! Turns the long-format tables of a scenario into what a table view or a
//! chart shows. It depends on `model` for the table types and the year
//! window options.
//!
//! Layers:
//! - `definition`: Serializable configuration (keywords, aggregation, display options)
//! - `classify`: Column roles derived from column names
//! - `filter`: Exact-match selections and the year window
//! - `engine`: Pivoting and the 2D fallback
//! - `cleanup`: Empty-column elision
//! - `pipeline`: The display and chart entry points
//! - `writeback`: Edited pivot cells mapped back to long-format rows

pub mod definition;
pub mod error;
pub mod classify;
pub mod filter;
pub mod engine;
pub mod cleanup;
pub mod pipeline;
pub mod writeback;

pub use definition::*;
pub use error::{Outcome, TransformError};
pub use classify::classify_columns;
pub use filter::{apply_filters, apply_year_filtering, YEAR_FILTER_COLUMNS};
pub use engine::{perform_pivot, pivot_table, prepare_2d_format};
pub use cleanup::hide_empty_columns;
pub use pipeline::{prepare_chart_data, transform_for_display};
pub use writeback::{edit_pivot_cell, pivot_cell_key};
