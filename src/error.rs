use thiserror::Error;

use crate::bridge::BridgeError;
use crate::range::RangeError;

pub type UnpivotResult<T> = Result<T, UnpivotError>;

#[derive(Error, Debug)]
pub enum UnpivotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    #[error("Console input closed before an answer was given")]
    InputClosed,

    #[error("Invalid column split: {0}")]
    Split(#[from] SplitError),
}

/// Rejected answer to the "how many identifier columns" prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{value} is out of range, enter a number between 1 and {max}")]
    OutOfRange { value: i64, max: usize },

    #[error("a selection with {0} column(s) has no value columns to unpivot")]
    TooFewColumns(usize),

    #[error("split was made for {expected} column(s) but the table has {found}")]
    WidthMismatch { expected: usize, found: usize },
}
