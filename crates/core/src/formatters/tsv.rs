use std::io::Write;

use crate::date::display_date;
use crate::listing::{COLUMNS, ExtractedListing, is_numeric_column};
use crate::Result;

use super::{coerce_numeric, format_number};

/// Write listings as tab-separated values with a header row.
///
/// Columns follow [`COLUMNS`]. Numeric columns are coerced, dates are
/// rendered in UTC, and tabs or newlines inside cells become spaces.
pub fn write_tsv<W: Write>(listings: &[ExtractedListing], mut writer: W) -> Result<()> {
    writeln!(writer, "{}", COLUMNS.join("\t"))?;

    for listing in listings {
        let cells: Vec<String> = listing.columns().map(|(column, value)| format_cell(column, value)).collect();
        writeln!(writer, "{}", cells.join("\t"))?;
    }

    writer.flush()?;
    Ok(())
}

fn format_cell(column: &str, value: &str) -> String {
    if is_numeric_column(column) {
        return coerce_numeric(value).map(format_number).unwrap_or_default();
    }
    let value = if column == "Date" { display_date(value) } else { value.to_string() };
    sanitize(&value)
}

fn sanitize(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}

/// TSV formatter
pub struct TsvFormatter;

impl TsvFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render listings to a string.
    pub fn convert(&self, listings: &[ExtractedListing]) -> Result<String> {
        let mut buffer = Vec::new();
        write_tsv(listings, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Default for TsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> ExtractedListing {
        ExtractedListing {
            date: "2026-01-05 02:00:00-08:00".into(),
            source: "Zillow".into(),
            email_subject: "New\tListings".into(),
            property_type: "House".into(),
            city: "Seattle".into(),
            zip: "98109".into(),
            address: "123 Fake St, Seattle, WA 98109".into(),
            price: "$950,000".into(),
            beds: "3".into(),
            baths: "2.5".into(),
            sqft: "".into(),
            listing_link: "https://www.zillow.com/homedetails/1_zpid".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_header_row() {
        let output = TsvFormatter::new().convert(&[]).unwrap();
        assert_eq!(
            output,
            "Date\tSource\tEmail_Subject\tProperty_Type\tCity\tZip\tAddress\tStatus\tOpen_House\tBuilder\tPrice\tBeds\tBaths\tSqft\tListing_Link\n"
        );
    }

    #[test]
    fn test_row_cells() {
        let output = TsvFormatter::new().convert(&[listing()]).unwrap();
        let row: Vec<&str> = output.lines().nth(1).unwrap().split('\t').collect();

        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], "2026-01-05 10:00:00+00:00");
        assert_eq!(row[2], "New Listings");
        assert_eq!(row[5], "98109");
        assert_eq!(row[10], "950000");
        assert_eq!(row[12], "2.5");
        assert_eq!(row[13], "");
        assert_eq!(row[14], "https://www.zillow.com/homedetails/1_zpid");
    }
}
