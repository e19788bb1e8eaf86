use super::{BridgeError, WorkbookHandle};
use crate::naming::{unique_sheet_name, MAX_SHEET_NAME_LEN};
use crate::range::{CellRef, RangeRef};
use crate::types::{CellValue, Selection};
use std::path::PathBuf;

/// Cell values of one worksheet, anchored at A1
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetGrid {
    pub name: String,
    /// Row-major; rows may be ragged, missing cells read as empty
    pub cells: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    pub fn with_rows(name: impl Into<String>, cells: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// (rows, columns) of the used area
    pub fn used_size(&self) -> (usize, usize) {
        let width = self.cells.iter().map(Vec::len).max().unwrap_or(0);
        (self.cells.len(), width)
    }

    pub fn get(&self, cell: CellRef) -> CellValue {
        self.cells
            .get(cell.row)
            .and_then(|row| row.get(cell.col))
            .cloned()
            .unwrap_or_default()
    }

    pub fn set(&mut self, cell: CellRef, value: CellValue) {
        if self.cells.len() <= cell.row {
            self.cells.resize_with(cell.row + 1, Vec::new);
        }
        let row = &mut self.cells[cell.row];
        if row.len() <= cell.col {
            row.resize(cell.col + 1, CellValue::Empty);
        }
        row[cell.col] = value;
    }

    /// Read a range the way an automation surface reports it.
    ///
    /// A single empty cell reads as nothing selected, a single non-empty cell
    /// as a bare scalar. Larger ranges come back as the full rectangle with
    /// empty cells where there is no data, except that rows below the used
    /// area are dropped (the range's first row is always kept) so a
    /// whole-column selection does not materialize a million rows.
    pub fn read(&self, range: &RangeRef) -> Selection {
        if range.is_single_cell() {
            return match self.get(range.start) {
                CellValue::Empty => Selection::Nothing,
                value => Selection::Scalar(value),
            };
        }

        let (used_rows, _) = self.used_size();
        let last_row = range.end.row.min(used_rows.max(range.start.row + 1) - 1);

        let rows = (range.start.row..=last_row)
            .map(|r| {
                (range.start.col..=range.end.col)
                    .map(|c| self.get(CellRef::new(r, c)))
                    .collect()
            })
            .collect();
        Selection::Grid(rows)
    }

    /// Write rows with their first cell at `top_left`
    pub fn write_block(&mut self, top_left: CellRef, rows: &[Vec<CellValue>]) {
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                self.set(CellRef::new(top_left.row + r, top_left.col + c), value.clone());
            }
        }
    }
}

/// Values-only model of a workbook, shared by the bundled backends
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkbookModel {
    pub name: String,
    /// File the workbook was loaded from, if any
    pub source: Option<PathBuf>,
    pub sheets: Vec<SheetGrid>,
}

impl WorkbookModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(mut self, sheet: SheetGrid) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Look a sheet up by name, ignoring case
    pub fn sheet(&self, name: &str) -> Option<&SheetGrid> {
        self.sheets
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Read a range; a range without a sheet reads from the first sheet
    pub fn read_range(&self, range: &RangeRef) -> Result<Selection, BridgeError> {
        let sheet = match &range.sheet {
            Some(name) => self
                .sheet(name)
                .ok_or_else(|| BridgeError::UnknownSheet(name.clone()))?,
            None => self.sheets.first().ok_or(BridgeError::NoSheets)?,
        };
        Ok(sheet.read(range))
    }

    fn sheet_mut(&mut self, index: usize) -> Result<&mut SheetGrid, BridgeError> {
        self.sheets
            .get_mut(index)
            .ok_or(BridgeError::SheetIndex(index))
    }
}

impl WorkbookHandle for WorkbookModel {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn sheet_names(&self) -> Result<Vec<String>, BridgeError> {
        Ok(self.sheets.iter().map(|s| s.name.clone()).collect())
    }

    fn add_sheet_after_last(&mut self) -> Result<usize, BridgeError> {
        let names = self.sheet_names()?;
        let name = unique_sheet_name("Sheet", &names);
        self.sheets.push(SheetGrid::new(name));
        Ok(self.sheets.len() - 1)
    }

    fn set_sheet_name(&mut self, index: usize, name: &str) -> Result<(), BridgeError> {
        let invalid = |reason: &str| BridgeError::InvalidSheetName {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(invalid("name is longer than 31 characters"));
        }
        if self
            .sheets
            .iter()
            .enumerate()
            .any(|(i, s)| i != index && s.name.eq_ignore_ascii_case(name))
        {
            return Err(invalid("another sheet already has this name"));
        }
        self.sheet_mut(index)?.name = name.to_string();
        Ok(())
    }

    fn write_range_from_top_left(
        &mut self,
        index: usize,
        rows: &[Vec<CellValue>],
    ) -> Result<(), BridgeError> {
        self.sheet_mut(index)?
            .write_block(CellRef::new(0, 0), rows);
        Ok(())
    }
}
