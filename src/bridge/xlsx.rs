use super::{BridgeError, HandOff, SpreadsheetApp, WorkbookModel};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::range::RangeRef;
use crate::types::Selection;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed spreadsheet application.
///
/// A workbook file has no live pointer selection, so the selected range is
/// either preset (`--range`) or typed by the user at the confirmation
/// prompt. Results are saved to a separate .xlsx file when the workbook is
/// handed back; the source file is never overwritten.
#[derive(Debug, Default)]
pub struct XlsxFileApp {
    preset: Option<RangeRef>,
    typed: Option<RangeRef>,
    output: Option<PathBuf>,
}

impl XlsxFileApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Range to read when the user types nothing at the confirmation prompt
    pub fn with_range(mut self, range: Option<RangeRef>) -> Self {
        self.preset = range;
        self
    }

    /// Where to save the workbook; defaults to `<stem>_unpivot.xlsx` beside the source
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Output path used for a workbook loaded from `source`
    pub fn output_path_for(&self, source: &Path) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "workbook".to_string());
        source.with_file_name(format!("{}_unpivot.xlsx", stem))
    }
}

impl SpreadsheetApp for XlsxFileApp {
    type Workbook = WorkbookModel;

    fn open_workbook(&mut self, path: &Path) -> Result<WorkbookModel, BridgeError> {
        let model = ExcelImporter::new(path).import()?;
        info!(
            path = %path.display(),
            sheets = model.sheets.len(),
            "opened workbook"
        );
        Ok(model)
    }

    fn acknowledge(&mut self, reply: &str) -> Result<(), BridgeError> {
        let reply = reply.trim();
        if reply.is_empty() {
            return Ok(());
        }
        let range = RangeRef::parse(reply)?;
        debug!(range = %range, "selection typed at prompt");
        self.typed = Some(range);
        Ok(())
    }

    fn current_selection(&mut self, workbook: &WorkbookModel) -> Result<Selection, BridgeError> {
        match self.typed.as_ref().or(self.preset.as_ref()) {
            Some(range) => workbook.read_range(range),
            None => Ok(Selection::Nothing),
        }
    }

    fn leave_open(&mut self, workbook: WorkbookModel) -> Result<HandOff, BridgeError> {
        let output = match &workbook.source {
            Some(source) => self.output_path_for(source),
            None => self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{}_unpivot.xlsx", workbook.name))),
        };
        if workbook.source.as_deref() == Some(output.as_path()) {
            return Err(BridgeError::Save(format!(
                "refusing to overwrite the source workbook {}",
                output.display()
            )));
        }

        ExcelExporter::new(&workbook).export(&output)?;
        info!(path = %output.display(), "saved workbook");

        Ok(HandOff {
            workbook: workbook.name,
            saved_to: Some(output),
        })
    }

    fn quit(&mut self) {
        debug!("file-backed application quit, nothing saved");
        self.typed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::SheetGrid;

    #[test]
    fn test_default_output_path() {
        let app = XlsxFileApp::new();
        assert_eq!(
            app.output_path_for(Path::new("/data/sales.xlsx")),
            PathBuf::from("/data/sales_unpivot.xlsx")
        );
        let app = XlsxFileApp::new().with_output(Some(PathBuf::from("out.xlsx")));
        assert_eq!(
            app.output_path_for(Path::new("/data/sales.xlsx")),
            PathBuf::from("out.xlsx")
        );
    }

    #[test]
    fn test_typed_range_overrides_preset() {
        let book = WorkbookModel::new("b.xlsx").with_sheet(SheetGrid::with_rows(
            "S",
            vec![vec!["a".into(), "b".into()], vec![1.into(), 2.into()]],
        ));
        let mut app = XlsxFileApp::new().with_range(Some(RangeRef::parse("A1").unwrap()));
        assert_eq!(
            app.current_selection(&book).unwrap(),
            Selection::Scalar("a".into())
        );

        app.acknowledge("S!A1:B2").unwrap();
        assert!(matches!(
            app.current_selection(&book).unwrap(),
            Selection::Grid(_)
        ));
    }

    #[test]
    fn test_no_range_means_nothing_selected() {
        let book = WorkbookModel::new("b.xlsx");
        let mut app = XlsxFileApp::new();
        app.acknowledge("   ").unwrap();
        assert_eq!(app.current_selection(&book).unwrap(), Selection::Nothing);
    }

    #[test]
    fn test_bad_typed_range_is_an_error() {
        let mut app = XlsxFileApp::new();
        assert!(matches!(
            app.acknowledge("not a range"),
            Err(BridgeError::Selection(_))
        ));
    }
}
