//! Report building for the `netcalc` binary.
//!
//! - [`summary`] - one [`SummaryRow`] per textual input

mod summary;

// Re-export public functions
pub use summary::{summarize, summarize_all, SummaryRow, SUBNET_LIST_LIMIT};
