//! Wide-to-long reshape (unpivot / melt)
//!
//! Identifier columns are repeated on every output row; each value column
//! turns into a (column name, cell value) pair.

use crate::error::SplitError;
use crate::types::{CellValue, Table};

pub const DEFAULT_CATEGORY_HEADER: &str = "Category";
pub const DEFAULT_VALUE_HEADER: &str = "Value";

/// Number of leading identifier columns, validated against a column count.
///
/// Always satisfies `0 < id_columns < column_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSplit {
    id_columns: usize,
    column_count: usize,
}

impl ColumnSplit {
    pub fn new(id_columns: usize, column_count: usize) -> Result<Self, SplitError> {
        if column_count < 2 {
            return Err(SplitError::TooFewColumns(column_count));
        }
        if id_columns == 0 || id_columns >= column_count {
            return Err(SplitError::OutOfRange {
                value: id_columns as i64,
                max: column_count - 1,
            });
        }
        Ok(Self {
            id_columns,
            column_count,
        })
    }

    /// Parse a typed answer such as `"2"`.
    pub fn parse(input: &str, column_count: usize) -> Result<Self, SplitError> {
        let trimmed = input.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| SplitError::NotANumber(trimmed.to_string()))?;
        if column_count < 2 {
            return Err(SplitError::TooFewColumns(column_count));
        }
        if value <= 0 || value as u64 >= column_count as u64 {
            return Err(SplitError::OutOfRange {
                value,
                max: column_count - 1,
            });
        }
        Self::new(value as usize, column_count)
    }

    pub fn id_columns(&self) -> usize {
        self.id_columns
    }

    pub fn value_columns(&self) -> usize {
        self.column_count - self.id_columns
    }
}

/// Output header names for the generated pair of columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReshapeOptions {
    pub category_header: String,
    pub value_header: String,
}

impl Default for ReshapeOptions {
    fn default() -> Self {
        Self {
            category_header: DEFAULT_CATEGORY_HEADER.to_string(),
            value_header: DEFAULT_VALUE_HEADER.to_string(),
        }
    }
}

/// Convert a wide table to long format.
///
/// Output rows are row-major: every value column of input row 0, then of
/// row 1, and so on. A table without data rows yields a header-only result.
/// Fails when `split` was validated against a different column count.
pub fn unpivot(
    table: &Table,
    split: ColumnSplit,
    options: &ReshapeOptions,
) -> Result<Table, SplitError> {
    let k = split.id_columns();
    let width = table.column_count();
    if width != split.column_count {
        return Err(SplitError::WidthMismatch {
            expected: split.column_count,
            found: width,
        });
    }

    let mut header: Vec<CellValue> = table.header[..k].to_vec();
    header.push(CellValue::Text(options.category_header.clone()));
    header.push(CellValue::Text(options.value_header.clone()));

    let mut long = Table {
        header,
        rows: Vec::with_capacity(table.row_count() * split.value_columns()),
    };

    for row in &table.rows {
        for j in k..width {
            let mut out: Vec<CellValue> = (0..k)
                .map(|i| row.get(i).cloned().unwrap_or_default())
                .collect();
            out.push(table.header[j].clone());
            out.push(row.get(j).cloned().unwrap_or_default());
            long.rows.push(out);
        }
    }

    Ok(long)
}
