//! Output formatters for the listing dataset.
//!
//! Numeric columns stay raw text through extraction and are coerced here:
//! everything but digits and `.` is dropped, and what is left must parse
//! as a number or the cell is empty (TSV) or `null` (JSON).

pub mod json;
pub mod tsv;

pub use json::{JsonConfig, JsonFormatter, convert_to_json};
pub use tsv::{TsvFormatter, write_tsv};

/// Coerce a raw numeric cell: `"$950,000"` to `950000.0`.
///
/// ```rust
/// use homedigest_core::formatters::coerce_numeric;
///
/// assert_eq!(coerce_numeric("$1,250,000"), Some(1_250_000.0));
/// assert_eq!(coerce_numeric("2.5"), Some(2.5));
/// assert_eq!(coerce_numeric(""), None);
/// ```
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render a coerced number; integral values print without a fraction.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 { format!("{:.0}", value) } else { value.to_string() }
}
