use super::{BridgeError, HandOff, SpreadsheetApp, WorkbookModel};
use crate::types::Selection;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Spreadsheet application held entirely in memory.
///
/// Workbooks are registered by path; the selection is set directly. The app
/// records how the run ended so callers can check what was released.
#[derive(Debug, Default)]
pub struct InMemoryApp {
    workbooks: HashMap<PathBuf, WorkbookModel>,
    selection: Option<Selection>,
    /// Replies received at the confirmation prompt
    pub acknowledged: Vec<String>,
    /// Workbook handed back by the last run, still "open"
    pub left_open: Option<WorkbookModel>,
    pub quit_called: bool,
}

impl InMemoryApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workbook(mut self, path: impl Into<PathBuf>, workbook: WorkbookModel) -> Self {
        self.workbooks.insert(path.into(), workbook);
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }
}

impl SpreadsheetApp for InMemoryApp {
    type Workbook = WorkbookModel;

    fn open_workbook(&mut self, path: &Path) -> Result<WorkbookModel, BridgeError> {
        self.workbooks
            .get(path)
            .cloned()
            .ok_or_else(|| BridgeError::OpenFailed {
                path: path.display().to_string(),
                reason: "no such workbook".to_string(),
            })
    }

    fn acknowledge(&mut self, reply: &str) -> Result<(), BridgeError> {
        self.acknowledged.push(reply.to_string());
        Ok(())
    }

    fn current_selection(&mut self, _workbook: &WorkbookModel) -> Result<Selection, BridgeError> {
        Ok(self.selection.clone().unwrap_or(Selection::Nothing))
    }

    fn leave_open(&mut self, workbook: WorkbookModel) -> Result<HandOff, BridgeError> {
        let handoff = HandOff {
            workbook: workbook.name.clone(),
            saved_to: None,
        };
        self.left_open = Some(workbook);
        Ok(handoff)
    }

    fn quit(&mut self) {
        self.quit_called = true;
        self.left_open = None;
    }
}
