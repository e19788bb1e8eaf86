use clap::Parser;
use sheet_unpivot::bridge::XlsxFileApp;
use sheet_unpivot::cli::{self, Outcome, RunOptions};
use sheet_unpivot::console::Terminal;
use sheet_unpivot::dialog::{FilePicker, FixedPath};
use sheet_unpivot::naming::DEFAULT_SHEET_NAME;
use sheet_unpivot::range::RangeRef;
use sheet_unpivot::reshape::{ReshapeOptions, DEFAULT_CATEGORY_HEADER, DEFAULT_VALUE_HEADER};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "unpivot")]
#[command(about = "Turn a wide spreadsheet range into long format on a new sheet")]
#[command(long_about = "Unpivot - wide to long, one selection at a time

Pick a workbook, select the range to reshape (header row first), and say
how many columns from the left identify a row. Every other column becomes a
(Category, Value) pair on its own row, written to a new sheet.

SELECTION:
  A workbook file has no live selection, so give the range with --range or
  type it at the \"press Enter\" prompt:
    Sheet1!A1:F20     'Q1 Sales'!B2:H40     A1:D12 (first sheet)

OUTPUT:
  The source file is left untouched. The workbook, including the new sheet,
  is saved as <name>_unpivot.xlsx next to it (or to --output). Values only:
  formulas and styling are not carried over.

EXAMPLES:
  unpivot                                      # Fully interactive
  unpivot -f sales.xlsx -r Sheet1!A1:M30 -i 2  # No prompts
  unpivot -f sales.xlsx --category-header Month --value-header Amount")]
#[command(version)]
struct Cli {
    /// Workbook to open (skips the file picker)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Range to unpivot, e.g. Sheet1!A1:F20 (skips typing it at the prompt)
    #[arg(short, long, value_parser = parse_range)]
    range: Option<RangeRef>,

    /// Where to save the workbook with the result sheet
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of identifier columns counted from the left
    #[arg(short, long)]
    id_columns: Option<usize>,

    /// Base name of the result sheet
    #[arg(long, default_value = DEFAULT_SHEET_NAME)]
    sheet_name: String,

    /// Header of the column holding the former column names
    #[arg(long, default_value = DEFAULT_CATEGORY_HEADER)]
    category_header: String,

    /// Header of the column holding the cell values
    #[arg(long, default_value = DEFAULT_VALUE_HEADER)]
    value_header: String,

    /// Show diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_range(s: &str) -> Result<RangeRef, String> {
    RangeRef::parse(s).map_err(|e| e.to_string())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("sheet_unpivot={level},unpivot={level}").into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run<P: FilePicker>(mut picker: P, args: Cli) -> anyhow::Result<Outcome> {
    let mut app = XlsxFileApp::new()
        .with_range(args.range)
        .with_output(args.output);
    let mut console = Terminal::stdio();
    let options = RunOptions {
        reshape: ReshapeOptions {
            category_header: args.category_header,
            value_header: args.value_header,
        },
        sheet_name: args.sheet_name,
        id_columns: args.id_columns,
    };

    Ok(cli::unpivot_selection(
        &mut picker,
        &mut app,
        &mut console,
        &options,
    )?)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.file.clone() {
        Some(path) => run(FixedPath(path), cli)?,
        #[cfg(feature = "dialog")]
        None => run(sheet_unpivot::dialog::NativeDialog, cli)?,
        #[cfg(not(feature = "dialog"))]
        None => run(sheet_unpivot::dialog::ConsolePicker, cli)?,
    };

    Ok(match outcome {
        Outcome::OpenFailed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
