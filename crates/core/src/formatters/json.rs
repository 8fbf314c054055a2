use serde::Serialize;
use serde_json::{Map, Value};

use crate::date::display_date;
use crate::dedup::DedupReport;
use crate::digest::Dataset;
use crate::listing::{ExtractedListing, is_numeric_column};
use crate::stats::ParseStats;
use crate::{DigestError, Result};

use super::coerce_numeric;

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// One object per listing, keyed by column name
    pub listings: Vec<Map<String, Value>>,
    /// Run counters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ParseStats>,
    /// Rows removed by deduplication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup: Option<DedupReport>,
}

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Include run counters
    pub include_stats: bool,
    /// Pretty print JSON output
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { include_stats: true, pretty: false }
    }
}

/// One listing as a JSON object; numeric columns become numbers or null.
pub fn listing_to_json(listing: &ExtractedListing) -> Map<String, Value> {
    listing
        .columns()
        .map(|(column, value)| {
            let json = if is_numeric_column(column) {
                coerce_numeric(value).and_then(json_number).map(Value::Number).unwrap_or(Value::Null)
            } else if column == "Date" {
                Value::String(display_date(value))
            } else {
                Value::String(value.to_string())
            };
            (column.to_string(), json)
        })
        .collect()
}

/// Integral values become JSON integers.
fn json_number(value: f64) -> Option<serde_json::Number> {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Some(serde_json::Number::from(value as i64))
    } else {
        serde_json::Number::from_f64(value)
    }
}

/// Convert a dataset to JSON
pub fn convert_to_json(dataset: &Dataset, config: &JsonConfig) -> Result<String> {
    let output = JsonOutput {
        listings: dataset.listings.iter().map(listing_to_json).collect(),
        stats: config.include_stats.then_some(dataset.stats),
        dedup: config.include_stats.then_some(dataset.dedup),
    };

    let rendered = if config.pretty { serde_json::to_string_pretty(&output) } else { serde_json::to_string(&output) };
    rendered.map_err(|e| DigestError::SerializeError(e.to_string()))
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, dataset: &Dataset) -> Result<String> {
        convert_to_json(dataset, &self.config)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(JsonConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let listing = ExtractedListing {
            date: "2026-01-05".into(),
            price: "$950,000".into(),
            beds: "3".into(),
            baths: "2.5".into(),
            sqft: "about".into(),
            zip: "98109".into(),
            address: "123 Fake St, Seattle, WA 98109".into(),
            ..Default::default()
        };
        Dataset {
            listings: vec![listing],
            stats: ParseStats { pages_parsed: 1, properties_found: 1, ..Default::default() },
            dedup: DedupReport::default(),
        }
    }

    #[test]
    fn test_numeric_columns_coerced() {
        let json = convert_to_json(&dataset(), &JsonConfig::default()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let row = &value["listings"][0];

        assert_eq!(row["Price"], 950000);
        assert!(json.contains("\"Zip\":98109,"));
        assert_eq!(row["Baths"], 2.5);
        assert_eq!(row["Zip"], 98109.0);
        assert!(row["Sqft"].is_null());
        assert_eq!(row["Date"], "2026-01-05 00:00:00+00:00");
        assert_eq!(row["Address"], "123 Fake St, Seattle, WA 98109");
    }

    #[test]
    fn test_stats_included() {
        let json = convert_to_json(&dataset(), &JsonConfig::default()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["stats"]["pages_parsed"], 1);
        assert_eq!(value["dedup"]["strict_dropped"], 0);
    }

    #[test]
    fn test_stats_omitted() {
        let config = JsonConfig { include_stats: false, pretty: true };
        let json = JsonFormatter::new(config).convert(&dataset()).unwrap();

        assert!(json.contains('\n'));
        assert!(!json.contains("\"stats\""));
    }
}
