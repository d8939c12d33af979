//! FILENAME: core/model/src/undo.rs
//! PURPOSE: Undo/Redo history of scenario edits.
//! CONTEXT: Holds applied commands. Undo reverts the most recent one and
//! moves it to the redo stack; a new edit clears the redo stack.

use crate::commands::{Command, EditError};
use crate::scenario::Scenario;
use crate::{log_debug, log_warn};
use std::collections::VecDeque;

/// Maximum number of undo operations to keep in history.
const MAX_HISTORY_SIZE: usize = 50;

#[derive(Debug)]
pub struct UndoManager {
    undo_stack: VecDeque<Box<dyn Command>>,
    redo_stack: VecDeque<Box<dyn Command>>,
    max_size: usize,
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoManager {
    pub fn new() -> Self {
        Self::with_max_size(MAX_HISTORY_SIZE)
    }

    /// History keeping at most `max_size` (at least one) commands per stack.
    pub fn with_max_size(max_size: usize) -> Self {
        UndoManager {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_size: max_size.max(1),
        }
    }

    /// Applies `command` and records it. A command that fails is not
    /// recorded and the redo stack is left alone.
    pub fn execute(&mut self, scenario: &mut Scenario, mut command: Box<dyn Command>) -> Result<(), EditError> {
        command.apply(scenario)?;
        log_debug!("PARAM", "executed: {}", command.description());
        self.redo_stack.clear();
        self.push_undo(command);
        Ok(())
    }

    /// Reverts the most recent command. `Ok(false)` when there is nothing to
    /// undo; on failure the command stays on the undo stack.
    pub fn undo(&mut self, scenario: &mut Scenario) -> Result<bool, EditError> {
        let Some(mut command) = self.undo_stack.pop_back() else {
            return Ok(false);
        };
        match command.revert(scenario) {
            Ok(()) => {
                log_debug!("PARAM", "undone: {}", command.description());
                self.push_redo(command);
                Ok(true)
            }
            Err(err) => {
                log_warn!("PARAM", "undo of '{}' failed: {}", command.description(), err);
                self.undo_stack.push_back(command);
                Err(err)
            }
        }
    }

    /// Re-applies the most recently undone command.
    pub fn redo(&mut self, scenario: &mut Scenario) -> Result<bool, EditError> {
        let Some(mut command) = self.redo_stack.pop_back() else {
            return Ok(false);
        };
        match command.apply(scenario) {
            Ok(()) => {
                log_debug!("PARAM", "redone: {}", command.description());
                self.push_undo(command);
                Ok(true)
            }
            Err(err) => {
                log_warn!("PARAM", "redo of '{}' failed: {}", command.description(), err);
                self.redo_stack.push_back(command);
                Err(err)
            }
        }
    }

    fn push_undo(&mut self, command: Box<dyn Command>) {
        while self.undo_stack.len() >= self.max_size {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(command);
    }

    fn push_redo(&mut self, command: Box<dyn Command>) {
        while self.redo_stack.len() >= self.max_size {
            self.redo_stack.pop_front();
        }
        self.redo_stack.push_back(command);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get description of next undo action (for UI).
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(|c| c.description())
    }

    /// Get description of next redo action (for UI).
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.back().map(|c| c.description())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// (undo, redo) stack sizes.
    pub fn stack_sizes(&self) -> (usize, usize) {
        (self.undo_stack.len(), self.redo_stack.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::commands::EditCellCommand;
    use crate::parameter::{Metadata, Parameter};
    use crate::table::{Column, Table};

    fn scenario() -> Scenario {
        let table = Table::new(vec![
            Column::new("tec", vec!["coal_ppl".into()]),
            Column::new("value", vec![1.0.into()]),
        ])
        .unwrap();
        let mut scenario = Scenario::new();
        scenario.add_parameter(Parameter::new("inv_cost", table, Metadata::default()));
        scenario
    }

    fn edit(value: f64) -> Box<dyn Command> {
        Box::new(EditCellCommand::new("inv_cost", 0, "value", value.into()))
    }

    fn current(scenario: &Scenario) -> CellValue {
        scenario.get_parameter("inv_cost").unwrap().table.value(0, "value").cloned().unwrap()
    }

    #[test]
    fn test_empty_history() {
        let mut manager = UndoManager::new();
        let mut scenario = scenario();
        assert!(!manager.can_undo());
        assert_eq!(manager.undo(&mut scenario), Ok(false));
        assert_eq!(manager.redo(&mut scenario), Ok(false));
        assert_eq!(manager.undo_description(), None);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut manager = UndoManager::new();
        let mut scenario = scenario();
        manager.execute(&mut scenario, edit(2.0)).unwrap();
        manager.undo(&mut scenario).unwrap();
        assert!(manager.can_redo());

        manager.execute(&mut scenario, edit(3.0)).unwrap();
        assert!(!manager.can_redo());
        assert_eq!(current(&scenario), CellValue::Number(3.0));
    }

    #[test]
    fn test_failed_command_not_recorded() {
        let mut manager = UndoManager::new();
        let mut scenario = scenario();
        let missing = Box::new(EditCellCommand::new("demand", 0, "value", 1.0.into()));
        assert!(manager.execute(&mut scenario, missing).is_err());
        assert_eq!(manager.stack_sizes(), (0, 0));
    }

    #[test]
    fn test_failed_undo_keeps_command() {
        let mut manager = UndoManager::new();
        let mut scenario = scenario();
        manager.execute(&mut scenario, edit(2.0)).unwrap();
        scenario.remove_parameter("inv_cost");

        assert!(manager.undo(&mut scenario).is_err());
        assert_eq!(manager.stack_sizes(), (1, 0));
    }

    #[test]
    fn test_max_size_drops_oldest() {
        let mut manager = UndoManager::with_max_size(2);
        let mut scenario = scenario();
        for value in [2.0, 3.0, 4.0] {
            manager.execute(&mut scenario, edit(value)).unwrap();
        }
        assert_eq!(manager.stack_sizes(), (2, 0));
        manager.undo(&mut scenario).unwrap();
        manager.undo(&mut scenario).unwrap();
        assert_eq!(current(&scenario), CellValue::Number(2.0));
        assert!(!manager.can_undo());
    }
}
