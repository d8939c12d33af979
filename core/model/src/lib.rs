//! FILENAME: core/model/src/lib.rs
//! Data model for scenario browsing.
//!
//! Layers:
//! - `cell` / `table`: dynamically typed cells and column-oriented tables
//! - `parameter`: a named table plus metadata (the Parameter Record)
//! - `factory`: construction and cleaning of records from raw rows
//! - `scenario`: collections of records and sets, merging, validation
//! - `commands` / `undo`: reversible edits and their history

pub mod logging;

pub mod cell;
pub mod table;
pub mod parameter;
pub mod factory;
pub mod scenario;
pub mod commands;
pub mod undo;

pub use cell::CellValue;
pub use table::{Column, ColumnKind, Index, Table, TableError};
pub use parameter::{Metadata, MetadataOverrides, Parameter, ParameterType, ResultType};
pub use factory::{
    build_parameter, ConstructionError, ConstructionOptions, FactoryRegistry,
    InputParameterFactory, ParameterFactory, ResultParameterFactory, StandardParameterFactory,
    INPUT_FACTORY, RESULT_FACTORY, STANDARD_FACTORY,
};
pub use scenario::{
    ChangeAction, ChangeRecord, ResultSummary, Scenario, ScenarioOptions, ValidationReport,
    ValidationSummary,
};
pub use commands::{
    pasted_value, AddParameterCommand, Command, EditCellCommand, EditError, EditPivotCommand,
    PasteColumnCommand, PivotCellKey, RemoveParameterCommand,
};
pub use undo::UndoManager;
