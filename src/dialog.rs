//! Workbook file selection

use crate::console::Console;
use crate::error::UnpivotResult;
use std::path::PathBuf;

/// Extensions offered by the picker
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

pub const DIALOG_TITLE: &str = "Select the Excel file to unpivot";

/// Source of the workbook path; `None` means the user cancelled
pub trait FilePicker {
    fn pick_workbook<C: Console>(&mut self, console: &mut C) -> UnpivotResult<Option<PathBuf>>;
}

/// Path already known (`--file`)
pub struct FixedPath(pub PathBuf);

impl FilePicker for FixedPath {
    fn pick_workbook<C: Console>(&mut self, _console: &mut C) -> UnpivotResult<Option<PathBuf>> {
        Ok(Some(self.0.clone()))
    }
}

/// Ask for the path on the console; an empty answer or closed input cancels
pub struct ConsolePicker;

impl FilePicker for ConsolePicker {
    fn pick_workbook<C: Console>(&mut self, console: &mut C) -> UnpivotResult<Option<PathBuf>> {
        let prompt = format!(
            "{} ({}), or press Enter to cancel: ",
            DIALOG_TITLE,
            WORKBOOK_EXTENSIONS.join(", ")
        );
        let answer = console.ask(&prompt)?.unwrap_or_default();
        let answer = answer.trim().trim_matches('"');
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(answer)))
    }
}

/// Native open-file dialog
#[cfg(feature = "dialog")]
pub struct NativeDialog;

#[cfg(feature = "dialog")]
impl FilePicker for NativeDialog {
    fn pick_workbook<C: Console>(&mut self, _console: &mut C) -> UnpivotResult<Option<PathBuf>> {
        Ok(rfd::FileDialog::new()
            .set_title(DIALOG_TITLE)
            .add_filter("Excel files", WORKBOOK_EXTENSIONS)
            .pick_file())
    }
}
