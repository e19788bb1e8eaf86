use super::*;
use crate::bridge::{InMemoryApp, SheetGrid, WorkbookModel};
use crate::console::ScriptedConsole;
use crate::dialog::FixedPath;
use crate::types::Selection;
use pretty_assertions::assert_eq;

// =========================================================================
// Fixtures
// =========================================================================

const BOOK: &str = "/books/sales.xlsx";

fn wide_grid() -> Vec<Vec<CellValue>> {
    vec![
        vec!["Dept".into(), "Jan".into(), "Feb".into()],
        vec!["A".into(), 1.into(), 2.into()],
        vec!["B".into(), 3.into(), 4.into()],
    ]
}

fn app_with(sheets: &[&str], selection: Selection) -> InMemoryApp {
    let mut book = WorkbookModel::new("sales.xlsx");
    for name in sheets {
        book = book.with_sheet(SheetGrid::new(*name));
    }
    InMemoryApp::new()
        .with_workbook(BOOK, book)
        .with_selection(selection)
}

fn run(
    app: &mut InMemoryApp,
    replies: &[&str],
    options: &RunOptions,
) -> (UnpivotResult<Outcome>, ScriptedConsole) {
    let mut console = ScriptedConsole::new(replies.iter().copied());
    let mut picker = FixedPath(PathBuf::from(BOOK));
    let outcome = unpivot_selection(&mut picker, app, &mut console, options);
    (outcome, console)
}

struct Cancel;

impl FilePicker for Cancel {
    fn pick_workbook<C: Console>(&mut self, _console: &mut C) -> UnpivotResult<Option<PathBuf>> {
        Ok(None)
    }
}

// =========================================================================
// Happy path
// =========================================================================

#[test]
fn test_unpivot_writes_new_sheet() {
    let mut app = app_with(&["Data"], Selection::Grid(wide_grid()));
    let (outcome, console) = run(&mut app, &["", "1"], &RunOptions::default());

    assert_eq!(
        outcome.unwrap(),
        Outcome::Written {
            workbook: "sales.xlsx".to_string(),
            sheet: "Unpivot".to_string(),
            rows: 4,
            saved_to: None,
        }
    );
    assert!(!app.quit_called);

    let book = app.left_open.as_ref().unwrap();
    assert_eq!(book.sheet_names().unwrap(), vec!["Data", "Unpivot"]);
    let expected: Vec<Vec<CellValue>> = vec![
        vec!["Dept".into(), "Category".into(), "Value".into()],
        vec!["A".into(), "Jan".into(), 1.into()],
        vec!["A".into(), "Feb".into(), 2.into()],
        vec!["B".into(), "Jan".into(), 3.into()],
        vec!["B".into(), "Feb".into(), 4.into()],
    ];
    assert_eq!(book.sheets[1].cells, expected);

    let output = console.output();
    assert!(output.contains("0: Dept"));
    assert!(output.contains("2: Feb"));
    assert!(output.contains("Identifier columns: Dept"));
    assert!(output.contains("Value columns:      Jan, Feb"));
}

#[test]
fn test_sheet_name_avoids_collisions() {
    let mut app = app_with(&["Data", "Unpivot", "Unpivot2"], Selection::Grid(wide_grid()));
    let (outcome, _) = run(&mut app, &["", "1"], &RunOptions::default());

    match outcome.unwrap() {
        Outcome::Written { sheet, .. } => assert_eq!(sheet, "Unpivot3"),
        other => panic!("unexpected outcome {:?}", other),
    }
    let names = app.left_open.unwrap().sheet_names().unwrap();
    assert_eq!(names.last().map(String::as_str), Some("Unpivot3"));
}

#[test]
fn test_invalid_split_answers_reprompt() {
    let mut app = app_with(&["Data"], Selection::Grid(wide_grid()));
    let (outcome, console) = run(&mut app, &["", "abc", "0", "-1", "3", "2"], &RunOptions::default());

    match outcome.unwrap() {
        Outcome::Written { rows, .. } => assert_eq!(rows, 2),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(console.remaining_replies(), 0);
    assert!(console.output().contains("Please enter a number."));
}

#[test]
fn test_preset_id_columns_skips_prompt() {
    let mut app = app_with(&["Data"], Selection::Grid(wide_grid()));
    let options = RunOptions {
        id_columns: Some(1),
        sheet_name: "Long".to_string(),
        reshape: ReshapeOptions {
            category_header: "Month".to_string(),
            value_header: "Amount".to_string(),
        },
    };
    let (outcome, console) = run(&mut app, &[""], &options);

    match outcome.unwrap() {
        Outcome::Written { sheet, rows, .. } => {
            assert_eq!(sheet, "Long");
            assert_eq!(rows, 4);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(!console.output().contains("How many columns"));
    let book = app.left_open.unwrap();
    assert_eq!(
        book.sheets[1].cells[0],
        vec![CellValue::from("Dept"), "Month".into(), "Amount".into()]
    );
}

#[test]
fn test_invalid_preset_falls_back_to_prompt() {
    let mut app = app_with(&["Data"], Selection::Grid(wide_grid()));
    let options = RunOptions {
        id_columns: Some(5),
        ..RunOptions::default()
    };
    let (outcome, console) = run(&mut app, &["", "2"], &options);

    assert!(matches!(outcome.unwrap(), Outcome::Written { rows: 2, .. }));
    assert!(console.output().contains("--id-columns 5"));
}

#[test]
fn test_header_only_selection_writes_header() {
    let mut app = app_with(
        &["Data"],
        Selection::Grid(vec![vec!["Dept".into(), "Jan".into()]]),
    );
    let (outcome, _) = run(&mut app, &["", "1"], &RunOptions::default());

    assert!(matches!(outcome.unwrap(), Outcome::Written { rows: 0, .. }));
    let book = app.left_open.unwrap();
    assert_eq!(book.sheets[1].cells.len(), 1);
}

// =========================================================================
// Early exits
// =========================================================================

#[test]
fn test_cancelled_file_selection_quits() {
    let mut app = InMemoryApp::new();
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let outcome = unpivot_selection(&mut Cancel, &mut app, &mut console, &RunOptions::default());

    assert_eq!(outcome.unwrap(), Outcome::Cancelled);
    assert!(app.quit_called);
    assert!(console.output().contains("No file selected"));
}

#[test]
fn test_open_failure_quits_application() {
    let mut app = InMemoryApp::new();
    let (outcome, console) = run(&mut app, &[], &RunOptions::default());

    assert!(matches!(outcome.unwrap(), Outcome::OpenFailed(_)));
    assert!(app.quit_called);
    assert!(console.output().contains("Could not open the Excel file"));
}

#[test]
fn test_nothing_selected_leaves_application_running() {
    let mut app = app_with(&["Data"], Selection::Nothing);
    let (outcome, console) = run(&mut app, &[""], &RunOptions::default());

    assert_eq!(outcome.unwrap(), Outcome::NothingSelected);
    assert!(!app.quit_called);
    assert_eq!(app.acknowledged, vec![String::new()]);
    assert!(console.output().contains("No range selected"));
}

#[test]
fn test_single_cell_selection_reports_too_few_columns() {
    let mut app = app_with(&["Data"], Selection::Scalar("Dept".into()));
    let (outcome, console) = run(&mut app, &["", "1", "1"], &RunOptions::default());

    assert_eq!(outcome.unwrap(), Outcome::TooFewColumns(1));
    assert!(!app.quit_called);
    assert!(app.left_open.is_none());
    // Never reaches the split prompt
    assert_eq!(console.remaining_replies(), 2);
}

#[test]
fn test_closed_input_at_confirmation_is_an_error() {
    let mut app = app_with(&["Data"], Selection::Grid(wide_grid()));
    let (outcome, _) = run(&mut app, &[], &RunOptions::default());
    assert!(matches!(outcome, Err(crate::error::UnpivotError::InputClosed)));
}

// =========================================================================
// Helpers
// =========================================================================

#[test]
fn test_format_preview_truncates() {
    let table = Table::from_grid(vec![
        vec!["Dept".into(), "Category".into(), "Value".into()],
        vec!["A".into(), "Jan".into(), 1.into()],
        vec!["A".into(), "Feb".into(), 22.into()],
        vec!["B".into(), "Jan".into(), 3.into()],
    ]);
    let lines = format_preview(&table, 2);
    assert_eq!(
        lines,
        vec![
            "Dept  Category  Value".to_string(),
            "A     Jan       1".to_string(),
            "A     Feb       22".to_string(),
            "... (1 more rows)".to_string(),
        ]
    );
}

#[test]
fn test_write_long_table_on_empty_workbook() {
    let mut book = WorkbookModel::new("empty.xlsx");
    let long = Table::from_grid(vec![vec!["Dept".into(), "Category".into(), "Value".into()]]);
    let name = write_long_table(&mut book, &long, "Unpivot").unwrap();
    assert_eq!(name, "Unpivot");
    assert_eq!(book.sheets.len(), 1);
}
