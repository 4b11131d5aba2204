//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string with embedded quotes doubled
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string().replace('"', "\"\"");
    let quoted = format!("\"{value_str}\"");

    if quoted.len() >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("10.0.0.0/8", 14), "  \"10.0.0.0/8\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("::", 4), "\"::\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("2001:db8::/32", 5), "\"2001:db8::/32\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(256, 6), " \"256\"");
    }

    #[test]
    fn test_format_field_escapes_quotes() {
        assert_eq!(format_field("a\"b", 0), "\"a\"\"b\"");
    }
}
