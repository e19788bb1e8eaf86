//! CLI command handlers

pub mod commands;

pub use commands::{unpivot_selection, write_long_table, Outcome, RunOptions};
