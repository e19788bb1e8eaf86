//! Spreadsheet application bridge
//!
//! The orchestration talks to a spreadsheet application only through
//! [`SpreadsheetApp`] and [`WorkbookHandle`]. Two backends ship with the
//! crate:
//!
//! - [`XlsxFileApp`] loads a workbook file into memory and saves the result
//!   to a separate output file when the run hands the workbook back
//! - [`InMemoryApp`] keeps everything in memory, for tests and embedding

mod memory;
mod model;
mod xlsx;

pub use memory::InMemoryApp;
pub use model::{SheetGrid, WorkbookModel};
pub use xlsx::XlsxFileApp;

use crate::range::RangeError;
use crate::types::{CellValue, Selection};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by a spreadsheet backend
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to open '{path}': {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("Sheet '{0}' not found")]
    UnknownSheet(String),

    #[error("No sheet at index {0}")]
    SheetIndex(usize),

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: String },

    #[error("Selection error: {0}")]
    Selection(#[from] RangeError),

    #[error("Failed to write cells: {0}")]
    Write(String),

    #[error("Failed to save workbook: {0}")]
    Save(String),
}

/// What the application reports when a run hands the workbook back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandOff {
    /// Display name of the workbook
    pub workbook: String,
    /// File the backend persisted the workbook to, if any
    pub saved_to: Option<PathBuf>,
}

/// An open workbook inside a spreadsheet application
pub trait WorkbookHandle {
    /// Display name (usually the file name)
    fn name(&self) -> String;

    /// Sheet names in tab order
    fn sheet_names(&self) -> Result<Vec<String>, BridgeError>;

    /// Append a new sheet after the last one and return its index
    fn add_sheet_after_last(&mut self) -> Result<usize, BridgeError>;

    fn set_sheet_name(&mut self, index: usize, name: &str) -> Result<(), BridgeError>;

    /// Write a block of rows starting at A1 of the given sheet
    fn write_range_from_top_left(
        &mut self,
        index: usize,
        rows: &[Vec<CellValue>],
    ) -> Result<(), BridgeError>;
}

/// A running spreadsheet application driven through automation
pub trait SpreadsheetApp {
    type Workbook: WorkbookHandle;

    fn open_workbook(&mut self, path: &Path) -> Result<Self::Workbook, BridgeError>;

    /// Receives whatever the user typed at the "press Enter" prompt.
    ///
    /// Applications with a live pointer selection ignore it.
    fn acknowledge(&mut self, _reply: &str) -> Result<(), BridgeError> {
        Ok(())
    }

    /// Value of the user's current selection
    fn current_selection(&mut self, workbook: &Self::Workbook) -> Result<Selection, BridgeError>;

    /// Return control of the workbook to the user without closing it
    fn leave_open(&mut self, workbook: Self::Workbook) -> Result<HandOff, BridgeError>;

    /// Shut the application down, discarding anything unsaved
    fn quit(&mut self);
}
