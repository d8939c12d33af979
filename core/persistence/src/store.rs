//! FILENAME: core/persistence/src/store.rs
//! PURPOSE: The set of workbooks loaded in a session, one scenario each.
//! CONTEXT: Callers browse the combined view; with a single file loaded the
//! combined view is that file's scenario, otherwise a merged copy.

use crate::{is_csv_archive, load_csv_archive, load_workbook, LoadMode, PersistenceError};
use model::{log_info, ConstructionOptions, Parameter, Scenario, ValidationReport};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct ScenarioStore {
    mode: LoadMode,
    options: ConstructionOptions,
    entries: Vec<(PathBuf, Scenario)>,
}

impl ScenarioStore {
    pub fn new(mode: LoadMode) -> Self {
        ScenarioStore {
            mode,
            options: ConstructionOptions::default(),
            entries: Vec::new(),
        }
    }

    /// Construction policy for records read from CSV archives.
    pub fn with_options(mut self, options: ConstructionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// Loads a workbook or a `.zip` of CSV files and appends it to the
    /// store.
    pub fn load_file(
        &mut self,
        path: &Path,
        progress: Option<&mut dyn FnMut(u8, &str)>,
    ) -> Result<&Scenario, PersistenceError> {
        let scenario = if is_csv_archive(path) {
            load_csv_archive(path, self.mode, self.options, progress)?
        } else {
            load_workbook(path, self.mode, progress)?
        };
        self.entries.push((path.to_path_buf(), scenario));
        self.entries
            .last()
            .map(|(_, scenario)| scenario)
            .ok_or_else(|| PersistenceError::FileNotFound(path.to_path_buf()))
    }

    /// Adds an already built scenario under `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, scenario: Scenario) {
        self.entries.push((path.into(), scenario));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn file_paths(&self) -> Vec<&Path> {
        self.entries.iter().map(|(path, _)| path.as_path()).collect()
    }

    /// Combined view of every loaded file.
    pub fn current_scenario(&self) -> Option<Cow<'_, Scenario>> {
        match self.entries.as_slice() {
            [] => None,
            [(_, only)] => Some(Cow::Borrowed(only)),
            many => Some(Cow::Owned(Scenario::merged(many.iter().map(|(_, s)| s)))),
        }
    }

    pub fn scenario_by_index(&self, index: usize) -> Option<&Scenario> {
        self.entries.get(index).map(|(_, scenario)| scenario)
    }

    pub fn scenario_by_path(&self, path: &Path) -> Option<&Scenario> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, scenario)| scenario)
    }

    pub fn scenario_by_path_mut(&mut self, path: &Path) -> Option<&mut Scenario> {
        self.entries
            .iter_mut()
            .find(|(p, _)| p == path)
            .map(|(_, scenario)| scenario)
    }

    pub fn remove_file(&mut self, path: &Path) -> Option<Scenario> {
        let pos = self.entries.iter().position(|(p, _)| p == path)?;
        let (_, scenario) = self.entries.remove(pos);
        log_info!("SCENARIO", "removed {}", path.display());
        Some(scenario)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn parameter_names(&self) -> Vec<String> {
        self.current_scenario()
            .map(|scenario| scenario.parameter_names())
            .unwrap_or_default()
    }

    /// Parameter from the combined view.
    pub fn get_parameter(&self, name: &str) -> Option<Parameter> {
        self.current_scenario()?.get_parameter(name).cloned()
    }

    pub fn validate(&self) -> ValidationReport {
        match self.current_scenario() {
            Some(scenario) => scenario.validate(),
            None => ValidationReport::no_scenario(),
        }
    }
}
