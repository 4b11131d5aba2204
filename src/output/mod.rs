//! Output formatting for summary rows.
//!
//! - [`csv`] - aligned CSV output
//! - [`json`] - JSON array output
//! - [`terminal`] - field formatting helpers

mod csv;
mod json;
mod terminal;

pub use csv::{csv_row, print_summary, CSV_HEADER};
pub use json::print_json;
pub use terminal::format_field;
