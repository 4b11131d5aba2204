//! JSON output for summary rows.

use crate::processing::SummaryRow;

/// Print rows as a pretty JSON array to stdout.
pub fn print_json(rows: &[SummaryRow]) -> Result<(), serde_json::Error> {
    println!("{}", to_json(rows)?);
    Ok(())
}

fn to_json(rows: &[SummaryRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}
