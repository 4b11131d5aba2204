//! CSV output formatting for summary rows.

use crate::processing::SummaryRow;
use colored::Colorize;

use super::terminal::format_field;

pub const CSV_HEADER: &str = r#"          "input",    "kind", "version",                 "range",             "first",              "last",     "size",           "netmask",          "hostmask",         "broadcast",                  "reverse_dns",            "flags",  "subnets""#;

/// Print rows as aligned CSV to stdout, with a note when inputs were
/// rejected.
pub fn print_summary(rows: &[SummaryRow], rejected: usize) {
    log::info!("#Start print_summary() rows = {}", rows.len());

    println!("{CSV_HEADER}");
    for row in rows {
        println!("{}", csv_row(row, true));
    }

    if rejected > 0 {
        println!("#{}# {} input(s) rejected", "NOTE".on_red(), rejected);
    }
}

/// One CSV line. Flags are highlighted when `highlight` is set.
pub fn csv_row(row: &SummaryRow, highlight: bool) -> String {
    let flags = format_field(row.flags.join("|"), 19);
    let flags = if highlight && !row.flags.is_empty() {
        flags.yellow().to_string()
    } else {
        flags
    };
    format!(
        r#"{input},{kind},{version},{range},{first},{last},{size},{netmask},{hostmask},{broadcast},{reverse_dns},{flags},{subnets}"#,
        input = format_field(&row.input, 18),
        kind = format_field(&row.kind, 9),
        version = format_field(&row.version, 10),
        range = format_field(&row.range, 24),
        first = format_field(&row.first, 20),
        last = format_field(&row.last, 20),
        size = format_field(&row.size, 11),
        netmask = format_field(&row.netmask, 20),
        hostmask = format_field(&row.hostmask, 20),
        broadcast = format_field(&row.broadcast, 20),
        reverse_dns = format_field(&row.reverse_dns, 31),
        flags = flags,
        subnets = format_field(row.subnets.join(" "), 10),
    )
}
