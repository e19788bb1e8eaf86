//! Excel file import/export for the file-backed spreadsheet application
//!
//! - Import: any workbook calamine reads → [`WorkbookModel`](crate::bridge::WorkbookModel)
//! - Export: model → .xlsx (values only; formulas and styling are not carried over)

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;
