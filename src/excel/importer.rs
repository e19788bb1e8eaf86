//! Excel importer implementation - workbook file → values-only model

use crate::bridge::{BridgeError, SheetGrid, WorkbookModel};
use crate::range::CellRef;
use crate::types::CellValue;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::debug;

/// Reads every worksheet of a workbook into a [`WorkbookModel`]
pub struct ExcelImporter {
    path: std::path::PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the workbook (xlsx, xlsm, xlsb, xls or ods)
    pub fn import(&self) -> Result<WorkbookModel, BridgeError> {
        let open_failed = |reason: String| BridgeError::OpenFailed {
            path: self.path.display().to_string(),
            reason,
        };

        let mut workbook = open_workbook_auto(&self.path).map_err(|e| open_failed(e.to_string()))?;

        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        let mut model = WorkbookModel::new(name);
        model.source = Some(self.path.clone());

        let sheet_names = workbook.sheet_names().to_vec();
        if sheet_names.is_empty() {
            return Err(open_failed("workbook contains no worksheets".to_string()));
        }

        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| open_failed(format!("sheet '{}': {}", sheet_name, e)))?;
            let sheet = Self::process_sheet(&sheet_name, &range);
            debug!(
                sheet = %sheet_name,
                rows = sheet.used_size().0,
                cols = sheet.used_size().1,
                "imported worksheet"
            );
            model.sheets.push(sheet);
        }

        Ok(model)
    }

    /// Place a calamine range at its absolute position on the sheet
    fn process_sheet(sheet_name: &str, range: &Range<Data>) -> SheetGrid {
        let mut sheet = SheetGrid::new(sheet_name);

        let Some((start_row, start_col)) = range.start() else {
            return sheet; // Empty sheet
        };

        for (r, row) in range.rows().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let value = Self::convert_cell(cell);
                if value.is_empty() {
                    continue;
                }
                sheet.set(
                    CellRef::new(start_row as usize + r, start_col as usize + c),
                    value,
                );
            }
        }

        sheet
    }

    /// Convert a calamine cell to a [`CellValue`]
    pub fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => {
                if dt.is_duration() {
                    CellValue::Duration(dt.as_f64())
                } else {
                    CellValue::DateTime(dt.as_f64())
                }
            }
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Error(e.to_string()),
        }
    }
}
