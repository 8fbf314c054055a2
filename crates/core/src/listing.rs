//! The extracted listing record.
//!
//! This module defines [`ExtractedListing`], one row of the output table.
//! Every field is kept as the raw matched text; numeric columns are only
//! coerced by the output formatters.

use serde::Serialize;

/// Output columns, in order.
pub const COLUMNS: [&str; 15] = [
    "Date",
    "Source",
    "Email_Subject",
    "Property_Type",
    "City",
    "Zip",
    "Address",
    "Status",
    "Open_House",
    "Builder",
    "Price",
    "Beds",
    "Baths",
    "Sqft",
    "Listing_Link",
];

/// Columns the formatters coerce to numbers.
pub const NUMERIC_COLUMNS: [&str; 5] = ["Price", "Beds", "Baths", "Sqft", "Zip"];

/// One property recovered from one anchor scope of one email.
///
/// Missing fields are empty strings, except `property_type`, which is
/// `Unknown` when every inference failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractedListing {
    pub date: String,
    pub source: String,
    #[serde(rename = "Email_Subject")]
    pub email_subject: String,
    #[serde(rename = "Property_Type")]
    pub property_type: String,
    pub city: String,
    pub zip: String,
    pub address: String,
    pub status: String,
    #[serde(rename = "Open_House")]
    pub open_house: String,
    pub builder: String,
    pub price: String,
    pub beds: String,
    pub baths: String,
    pub sqft: String,
    #[serde(rename = "Listing_Link")]
    pub listing_link: String,
}

impl ExtractedListing {
    /// Field values in [`COLUMNS`] order.
    pub fn values(&self) -> [&str; 15] {
        [
            &self.date,
            &self.source,
            &self.email_subject,
            &self.property_type,
            &self.city,
            &self.zip,
            &self.address,
            &self.status,
            &self.open_house,
            &self.builder,
            &self.price,
            &self.beds,
            &self.baths,
            &self.sqft,
            &self.listing_link,
        ]
    }

    /// Pairs of column name and value, in output order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, &str)> {
        COLUMNS.into_iter().zip(self.values())
    }
}

/// Whether `column` is coerced to a number on output.
pub fn is_numeric_column(column: &str) -> bool {
    NUMERIC_COLUMNS.contains(&column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_keys_match_columns() {
        let listing = ExtractedListing { price: "$950,000".into(), ..Default::default() };
        let value = serde_json::to_value(&listing).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), COLUMNS.len());
        for column in COLUMNS {
            assert!(object.contains_key(column), "missing key {}", column);
        }
        assert_eq!(object["Price"], "$950,000");
    }

    #[test]
    fn test_columns_pairs_values_in_order() {
        let listing = ExtractedListing { date: "2026-01-01".into(), listing_link: "https://x".into(), ..Default::default() };
        let pairs: Vec<_> = listing.columns().collect();

        assert_eq!(pairs.first(), Some(&("Date", "2026-01-01")));
        assert_eq!(pairs.last(), Some(&("Listing_Link", "https://x")));
    }

    #[test]
    fn test_numeric_columns() {
        assert!(is_numeric_column("Zip"));
        assert!(!is_numeric_column("Address"));
    }
}
