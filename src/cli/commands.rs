use crate::bridge::{SpreadsheetApp, WorkbookHandle};
use crate::console::{ask_column_split, wait_for_confirmation, Console};
use crate::dialog::FilePicker;
use crate::error::UnpivotResult;
use crate::naming::{unique_sheet_name, DEFAULT_SHEET_NAME};
use crate::reshape::{unpivot, ColumnSplit, ReshapeOptions};
use crate::types::{CellValue, Table};
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Rows of the long table echoed after the reshape
pub const PREVIEW_ROWS: usize = 5;

/// Knobs for one interactive run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub reshape: ReshapeOptions,
    /// Base name for the result sheet
    pub sheet_name: String,
    /// Pre-answered identifier column count
    pub id_columns: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            reshape: ReshapeOptions::default(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            id_columns: None,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No file picked; the application was shut down
    Cancelled,
    /// The application rejected the file; it was shut down
    OpenFailed(String),
    /// The selection was empty; the workbook stays open for another try
    NothingSelected,
    /// The selection has fewer than two columns, so there is nothing to unpivot
    TooFewColumns(usize),
    /// Long table written; the workbook stays open and unsaved
    Written {
        workbook: String,
        sheet: String,
        rows: usize,
        saved_to: Option<PathBuf>,
    },
}

/// Execute the interactive unpivot: pick a file, open it, read the user's
/// selection, split identifier and value columns, reshape, write a new sheet.
pub fn unpivot_selection<P, A, C>(
    picker: &mut P,
    app: &mut A,
    console: &mut C,
    options: &RunOptions,
) -> UnpivotResult<Outcome>
where
    P: FilePicker,
    A: SpreadsheetApp,
    C: Console,
{
    console.say(&"📊 Unpivot - wide to long".bold().green().to_string());

    // Select file
    let Some(path) = picker.pick_workbook(console)? else {
        console.say(&"No file selected, operation cancelled.".yellow().to_string());
        app.quit();
        return Ok(Outcome::Cancelled);
    };
    console.say(&format!("   File: {}", path.display()));

    // Open workbook
    let mut workbook = match app.open_workbook(&path) {
        Ok(workbook) => workbook,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "workbook open failed");
            console.say(&format!("❌ Could not open the Excel file: {}", e).red().to_string());
            app.quit();
            return Ok(Outcome::OpenFailed(e.to_string()));
        }
    };
    info!(workbook = %workbook.name(), "workbook open");
    console.say("");
    console.say(&"✅ Workbook opened.".green().to_string());

    // Await selection
    console.say("Select the range to unpivot in the workbook (header row included).");
    console.say("If the workbook has no live selection, type its address (e.g. Sheet1!A1:F20).");
    let reply = wait_for_confirmation(console, "Press Enter when the selection is ready... ")?;
    if let Err(e) = app.acknowledge(&reply) {
        console.say(&format!("❌ {}", e).red().to_string());
        return Ok(Outcome::NothingSelected);
    }

    // Read and normalize selection
    let selection = match app.current_selection(&workbook) {
        Ok(selection) => selection,
        Err(e) => {
            console.say(&format!("❌ {}", e).red().to_string());
            return Ok(Outcome::NothingSelected);
        }
    };
    debug!(?selection, "selection read");
    let Some(grid) = selection.normalize() else {
        console.say(&"No range selected, or the selection is empty.".yellow().to_string());
        return Ok(Outcome::NothingSelected);
    };

    let table = Table::from_grid(grid);
    console.say("");
    console.say(&format!(
        "Selection loaded: {} column(s), {} data row(s).",
        table.column_count(),
        table.row_count()
    ));
    console.say(&"Columns:".bold().cyan().to_string());
    for (i, name) in table.header.iter().enumerate() {
        console.say(&format!("   {}: {}", i, name));
    }

    if table.column_count() < 2 {
        console.say(
            &"At least two columns are needed: one identifier column and one value column."
                .yellow()
                .to_string(),
        );
        return Ok(Outcome::TooFewColumns(table.column_count()));
    }

    // Split columns
    let split = choose_split(console, options.id_columns, table.column_count())?;
    let (id_names, value_names) = table.header.split_at(split.id_columns());
    console.say("");
    console.say(&format!("Identifier columns: {}", join_names(id_names)));
    console.say(&format!("Value columns:      {}", join_names(value_names)));

    // Reshape
    let long = unpivot(&table, split, &options.reshape)?;
    info!(
        rows = long.row_count(),
        columns = long.column_count(),
        "unpivot complete"
    );
    console.say("");
    console.say(&format!(
        "{} First rows:",
        "✅ Unpivot complete.".bold().green()
    ));
    for line in format_preview(&long, PREVIEW_ROWS) {
        console.say(&format!("   {}", line));
    }

    // Write result
    let sheet = write_long_table(&mut workbook, &long, &options.sheet_name)?;
    let handoff = app.leave_open(workbook)?;

    console.say("");
    console.say(&format!(
        "Result written to sheet '{}' of {}.",
        sheet.bright_blue().bold(),
        handoff.workbook
    ));
    match &handoff.saved_to {
        Some(saved) => console.say(&format!("   Saved as {}", saved.display())),
        None => console.say("The workbook is still open and unsaved; save it when you are done."),
    }

    Ok(Outcome::Written {
        workbook: handoff.workbook,
        sheet,
        rows: long.row_count(),
        saved_to: handoff.saved_to,
    })
}

/// Use the preset identifier count when it is valid, otherwise ask
fn choose_split<C: Console>(
    console: &mut C,
    preset: Option<usize>,
    column_count: usize,
) -> UnpivotResult<ColumnSplit> {
    if let Some(n) = preset {
        match ColumnSplit::new(n, column_count) {
            Ok(split) => return Ok(split),
            Err(e) => console.say(&format!("--id-columns {}: {}", n, e).yellow().to_string()),
        }
    }
    ask_column_split(console, column_count)
}

/// Add a sheet after the last one under a free name and write the long
/// table from A1. Returns the sheet name.
pub fn write_long_table<W: WorkbookHandle>(
    workbook: &mut W,
    long: &Table,
    base_name: &str,
) -> UnpivotResult<String> {
    let existing = workbook.sheet_names()?;
    let name = unique_sheet_name(base_name, &existing);

    let index = workbook.add_sheet_after_last()?;
    workbook.set_sheet_name(index, &name)?;
    workbook.write_range_from_top_left(index, &long.to_grid())?;

    debug!(sheet = %name, index, rows = long.row_count() + 1, "long table written");
    Ok(name)
}

fn join_names(names: &[CellValue]) -> String {
    names
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Header plus up to `max_rows` rows, columns padded to a common width
pub fn format_preview(table: &Table, max_rows: usize) -> Vec<String> {
    let shown: Vec<Vec<String>> = std::iter::once(&table.header)
        .chain(table.rows.iter().take(max_rows))
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();

    let widths: Vec<usize> = (0..table.column_count())
        .map(|c| {
            shown
                .iter()
                .map(|row| row.get(c).map_or(0, |s| s.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines: Vec<String> = shown
        .iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect();

    if table.row_count() > max_rows {
        lines.push(format!("... ({} more rows)", table.row_count() - max_rows));
    }
    lines
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
