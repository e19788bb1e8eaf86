//! Sheet Unpivot - wide-to-long reshape of a spreadsheet selection
//!
//! The user picks a workbook, selects a rectangular range (header row
//! first), says how many leading columns identify a row, and gets the range
//! back in long format, one row per (identifiers, column name, value), on a
//! new sheet of the same workbook.
//!
//! # Features
//!
//! - Deterministic row-major reshape ([`reshape::unpivot`])
//! - Collision-free result sheet names ([`naming::unique_sheet_name`])
//! - Spreadsheet access behind the [`bridge::SpreadsheetApp`] trait, with a
//!   file-backed (.xlsx/.xls/.ods) and an in-memory backend
//!
//! # Example
//!
//! ```
//! use sheet_unpivot::reshape::{unpivot, ColumnSplit, ReshapeOptions};
//! use sheet_unpivot::types::Table;
//!
//! let wide = Table::from_grid(vec![
//!     vec!["Dept".into(), "Jan".into(), "Feb".into()],
//!     vec!["A".into(), 1.into(), 2.into()],
//! ]);
//! let split = ColumnSplit::new(1, wide.column_count())?;
//! let long = unpivot(&wide, split, &ReshapeOptions::default())?;
//!
//! assert_eq!(long.row_count(), 2);
//! # Ok::<(), sheet_unpivot::error::SplitError>(())
//! ```

pub mod bridge;
pub mod cli;
pub mod console;
pub mod dialog;
pub mod error;
pub mod excel;
pub mod naming;
pub mod range;
pub mod reshape;
pub mod types;

// Re-export commonly used types
pub use error::{UnpivotError, UnpivotResult};
pub use types::{CellValue, Selection, Table};
