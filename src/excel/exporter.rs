//! Excel exporter implementation - values-only model → .xlsx

use crate::bridge::{BridgeError, WorkbookModel};
use crate::types::CellValue;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

/// Writes a [`WorkbookModel`] to an .xlsx file, one worksheet per sheet
pub struct ExcelExporter<'a> {
    model: &'a WorkbookModel,
    date_format: Format,
    datetime_format: Format,
    duration_format: Format,
}

impl<'a> ExcelExporter<'a> {
    /// Create a new Excel exporter
    pub fn new(model: &'a WorkbookModel) -> Self {
        Self {
            model,
            date_format: Format::new().set_num_format("yyyy-mm-dd"),
            datetime_format: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
            duration_format: Format::new().set_num_format("[h]:mm:ss"),
        }
    }

    /// Export the model to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> Result<(), BridgeError> {
        let mut workbook = Workbook::new();

        for sheet in &self.model.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .map_err(|e| BridgeError::InvalidSheetName {
                    name: sheet.name.clone(),
                    reason: e.to_string(),
                })?;

            for (row_idx, row) in sheet.cells.iter().enumerate() {
                for (col_idx, value) in row.iter().enumerate() {
                    self.write_cell(worksheet, row_idx as u32, col_idx as u16, value)?;
                }
            }
            debug!(sheet = %sheet.name, rows = sheet.cells.len(), "exported worksheet");
        }

        // Save workbook to file
        workbook
            .save(output_path)
            .map_err(|e| BridgeError::Save(format!("{}: {}", output_path.display(), e)))?;

        Ok(())
    }

    fn write_cell(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
    ) -> Result<(), BridgeError> {
        let result = match value {
            CellValue::Empty => return Ok(()),
            CellValue::Text(s) => worksheet.write_string(row, col, s.as_str()),
            CellValue::Number(n) => worksheet.write_number(row, col, *n),
            CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
            CellValue::DateTime(serial) => {
                let format = if serial.fract() == 0.0 {
                    &self.date_format
                } else {
                    &self.datetime_format
                };
                worksheet.write_number_with_format(row, col, *serial, format)
            }
            CellValue::Duration(serial) => {
                worksheet.write_number_with_format(row, col, *serial, &self.duration_format)
            }
            CellValue::Error(code) => worksheet.write_string(row, col, code.as_str()),
        };

        result
            .map(|_| ())
            .map_err(|e| BridgeError::Write(format!("row {}, column {}: {}", row + 1, col + 1, e)))
    }
}
