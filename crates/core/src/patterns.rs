//! Field recognizers.
//!
//! Each recognizer is a pure function from normalized text to the first
//! matching value, or `None`. A miss is an ordinary outcome: callers tally
//! it and move on. The library is table driven: [`Field`] names every
//! recognizer and [`PatternLibrary::recognize`] dispatches on it, so each
//! one can be exercised without building a document tree.
//!
//! # Example
//!
//! ```rust
//! use homedigest_core::{Field, PatternLibrary};
//!
//! let patterns = PatternLibrary::default();
//! let text = "$950,000 3 bds, 2 ba, 1,850 sqft";
//!
//! assert_eq!(patterns.recognize(Field::Price, text).as_deref(), Some("$950,000"));
//! assert_eq!(patterns.recognize(Field::Sqft, text).as_deref(), Some("1850"));
//! ```

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::property_type::title_case;
use crate::{DigestError, Result};

/// The state/zip constraint baked into the location recognizers.
///
/// The digest archive this engine was built for covers one region; the
/// zip, city and address patterns only accept that region's tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Two-letter state code that follows the city ("WA").
    pub state: String,
    /// Leading digits every zip in the region shares ("98").
    pub zip_prefix: String,
}

impl Default for Region {
    fn default() -> Self {
        Self { state: "WA".to_string(), zip_prefix: "98".to_string() }
    }
}

impl Region {
    /// Check the region can be turned into patterns.
    pub fn validate(&self) -> Result<()> {
        let state = self.state.trim();
        if state.is_empty() || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DigestError::InvalidRegion(format!("state {:?}", self.state)));
        }
        let prefix = &self.zip_prefix;
        if prefix.is_empty() || prefix.len() > 5 || !prefix.chars().all(|c| c.is_ascii_digit()) {
            return Err(DigestError::InvalidRegion(format!("zip prefix {:?}", self.zip_prefix)));
        }
        Ok(())
    }

    /// Regex source for a full zip in this region, e.g. `98\d{3}`.
    fn zip_pattern(&self) -> String {
        let remaining = 5 - self.zip_prefix.len();
        if remaining == 0 { self.zip_prefix.clone() } else { format!(r"{}\d{{{}}}", self.zip_prefix, remaining) }
    }
}

/// Every field the library can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    Price,
    Beds,
    Baths,
    Sqft,
    Zip,
    City,
    PropertyType,
    Address,
    Status,
    OpenHouse,
    Builder,
}

impl Field {
    /// All fields, in output column order.
    pub const ALL: [Field; 11] = [
        Field::PropertyType,
        Field::City,
        Field::Zip,
        Field::Address,
        Field::Status,
        Field::OpenHouse,
        Field::Builder,
        Field::Price,
        Field::Beds,
        Field::Baths,
        Field::Sqft,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Price => "price",
            Field::Beds => "beds",
            Field::Baths => "baths",
            Field::Sqft => "sqft",
            Field::Zip => "zip",
            Field::City => "city",
            Field::PropertyType => "type",
            Field::Address => "address",
            Field::Status => "status",
            Field::OpenHouse => "open_house",
            Field::Builder => "builder",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a raw match is turned into the stored value.
#[derive(Debug, Clone, Copy)]
enum PostProcess {
    /// The whole match.
    Whole,
    /// Capture group 1, trimmed.
    Group,
    /// Capture group 1 with grouping commas removed.
    Ungrouped,
    /// Capture group 1, title-cased.
    Titled,
}

/// One row of the recognizer table.
#[derive(Debug, Clone)]
struct Recognizer {
    field: Field,
    pattern: Regex,
    post: PostProcess,
}

impl Recognizer {
    fn new(field: Field, pattern: &str, post: PostProcess) -> Result<Self> {
        Ok(Self { field, pattern: Regex::new(pattern)?, post })
    }

    fn apply(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let value = match self.post {
            PostProcess::Whole => caps.get(0)?.as_str().to_string(),
            PostProcess::Group => caps.get(1)?.as_str().trim().to_string(),
            PostProcess::Ungrouped => caps.get(1)?.as_str().replace(',', ""),
            PostProcess::Titled => title_case(caps.get(1)?.as_str()),
        };
        if value.is_empty() { None } else { Some(value) }
    }
}

/// Words that may directly follow a street number without starting a
/// street name: unit facts that precede addresses in listing cards.
const ROOM_QUALIFIERS: &str = r"Beds?|Baths?|Sqft|Sq\.?\s*Ft\.?|bds?|ba";

/// Compiled recognizers for one region.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    region: Region,
    recognizers: Vec<Recognizer>,
    /// Free-text address: needs look-around, which `regex` lacks.
    address_text: fancy_regex::Regex,
    /// Link text that looks like a canonical address.
    address_link: Regex,
    /// Hyperlink targets that point at a listing.
    listing_link: Regex,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::for_region(&Region::default()).expect("built-in field patterns compile")
    }
}

impl PatternLibrary {
    /// Compile the recognizer table for `region`.
    ///
    /// # Errors
    ///
    /// [`DigestError::InvalidRegion`] when the region cannot form a
    /// pattern, [`DigestError::InvalidPattern`] if compilation fails.
    pub fn for_region(region: &Region) -> Result<Self> {
        region.validate()?;
        let state = regex::escape(region.state.trim());
        let zip = region.zip_pattern();

        let recognizers = vec![
            Recognizer::new(Field::Price, r"\$\d{1,3}(?:,\d{3})*", PostProcess::Whole)?,
            Recognizer::new(Field::Beds, r"(?i)(\d+)\s*(?:bd|Beds|Bds|Bedrooms?|Bed)", PostProcess::Group)?,
            Recognizer::new(
                Field::Baths,
                r"(?i)(\d+(?:\.\d+)?)\s*(?:ba|Baths|Bths|Bathrooms?|Bath)",
                PostProcess::Group,
            )?,
            Recognizer::new(
                Field::Sqft,
                r"(?i)(\d+(?:,\d+)?)\s*(?:sq\s*ft\.?|sqft|Sq\.\s*Ft\.|square\s*feet)",
                PostProcess::Ungrouped,
            )?,
            Recognizer::new(Field::Zip, &format!(r"\b({})\b", zip), PostProcess::Group)?,
            Recognizer::new(Field::City, &format!(r"([A-Za-z\s]+),\s*(?:{})\b", state), PostProcess::Group)?,
            Recognizer::new(
                Field::PropertyType,
                r"(?i)\b(Condo|Townhome|Townhouse|House|Multi-Family|Single Family Residence|Single Family|Co-?op|Apartment|Loft|Triplex|Fourplex|Duplex|Manufactured|Mobile)\b",
                PostProcess::Titled,
            )?,
            Recognizer::new(Field::Status, r"(?i)\b(Active|New|Price cut)\b", PostProcess::Titled)?,
            Recognizer::new(
                Field::OpenHouse,
                r"(?i)(?:Open:?\s*)?((?:Sun|Mon|Tue|Wed|Thu|Fri|Sat)\.?\s*[\d:apm\-\s,]+(?:am|pm))",
                PostProcess::Group,
            )?,
            Recognizer::new(Field::Builder, r"Builder:\s*([A-Za-z0-9\s]+)", PostProcess::Group)?,
        ];

        let address_text = fancy_regex::Regex::new(&format!(
            r"(?i)(?<![\$,])\b(\d+\s+(?:(?!(?:{})\b)[^,])+,?\s*[A-Za-z\s]+,\s*{}\s+{})",
            ROOM_QUALIFIERS, state, zip
        ))?;
        let address_link = Regex::new(&format!(r"{}\s+{}", state, zip))?;
        let listing_link =
            Regex::new(r"(?i)zpid|WA/|homedetails|urn:msg:|redfin\.com/.*click|click\.mail\.zillow")?;

        Ok(Self { region: region.clone(), recognizers, address_text, address_link, listing_link })
    }

    /// The region these patterns were compiled for.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Run one recognizer against normalized text.
    pub fn recognize(&self, field: Field, text: &str) -> Option<String> {
        if field == Field::Address {
            return self.address(text);
        }
        self.recognizers.iter().find(|r| r.field == field).and_then(|r| r.apply(text))
    }

    /// First currency amount with thousands separators.
    pub fn price(&self, text: &str) -> Option<String> {
        self.recognize(Field::Price, text)
    }

    /// Whether `text` contains a price token at all.
    pub fn has_price(&self, text: &str) -> bool {
        self.price(text).is_some()
    }

    /// Street-number-led address ending in `, <City>, <ST> <zip>`.
    ///
    /// The street number must not follow `$` or `,` (the tail of a price),
    /// and the street part may not open with a room or area qualifier, so
    /// "3 Beds ... 8888 Test Drive NE, Seattle, WA 98115" yields the
    /// street address and not "3 Beds ...".
    pub fn address(&self, text: &str) -> Option<String> {
        match self.address_text.captures(text) {
            Ok(Some(caps)) => caps.get(1).map(|m| m.as_str().trim().to_string()),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(error = %e, "address pattern gave up on scope text");
                None
            }
        }
    }

    /// Whether a hyperlink's text carries a region zip after the state.
    pub fn is_address_link_text(&self, text: &str) -> bool {
        self.address_link.is_match(text)
    }

    /// Whether a hyperlink target matches a known listing-URL signature.
    pub fn is_listing_link(&self, href: &str) -> bool {
        self.listing_link.is_match(href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lib() -> PatternLibrary {
        PatternLibrary::default()
    }

    #[rstest]
    #[case("$1,200,000 for this house", Some("$1,200,000"))]
    #[case("Price: $950,500", Some("$950,500"))]
    #[case("Reduced to $875", Some("$875"))]
    #[case("No price here", None)]
    fn test_price(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(lib().recognize(Field::Price, text).as_deref(), expected);
    }

    #[rstest]
    #[case("3 bds", Some("3"))]
    #[case("4 Beds", Some("4"))]
    #[case("5 Bedrooms", Some("5"))]
    #[case("1 Bed", Some("1"))]
    #[case("2bd", Some("2"))]
    #[case("Studio", None)]
    fn test_beds(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(lib().recognize(Field::Beds, text).as_deref(), expected);
    }

    #[rstest]
    #[case("2 ba", Some("2"))]
    #[case("2.5 Baths", Some("2.5"))]
    #[case("1 Bathroom", Some("1"))]
    #[case("4 Beds · 3 Baths", Some("3"))]
    #[case("no baths listed", None)]
    fn test_baths(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(lib().recognize(Field::Baths, text).as_deref(), expected);
    }

    #[rstest]
    #[case("1,850 sqft", Some("1850"))]
    #[case("2,500 Sq. Ft.", Some("2500"))]
    #[case("968 sq ft", Some("968"))]
    #[case("3200 square feet", Some("3200"))]
    #[case("big lot", None)]
    fn test_sqft(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(lib().recognize(Field::Sqft, text).as_deref(), expected);
    }

    #[test]
    fn test_zip_requires_region_prefix() {
        assert_eq!(lib().recognize(Field::Zip, "Seattle, WA 98109").as_deref(), Some("98109"));
        assert_eq!(lib().recognize(Field::Zip, "Portland, OR 97201"), None);
        assert_eq!(lib().recognize(Field::Zip, "order 981090"), None);
    }

    #[test]
    fn test_city_before_state() {
        let text = "123 Fake St, Seattle, WA 98109";
        assert_eq!(lib().recognize(Field::City, text).as_deref(), Some("Seattle"));
        assert_eq!(lib().recognize(Field::City, "Mercer Island,WA"), Some("Mercer Island".to_string()));
    }

    #[rstest]
    #[case("Gorgeous condo with views", Some("Condo"))]
    #[case("SINGLE FAMILY home", Some("Single Family"))]
    #[case("multi-family investment", Some("Multi-Family"))]
    #[case("co-op unit", Some("Co-Op"))]
    #[case("nothing here", None)]
    fn test_property_type_raw(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(lib().recognize(Field::PropertyType, text).as_deref(), expected);
    }

    #[rstest]
    #[case("$920,000 4 bd | 4 ba | 1,990 sqft 5555 Mockingbird Ln, Seattle, WA 98103", Some("5555 Mockingbird Ln, Seattle, WA 98103"))]
    #[case("$798,000 2 Beds · 2.5 Baths · 968 Sq. Ft. 1234 Fake Street, Seattle, WA 98109", Some("1234 Fake Street, Seattle, WA 98109"))]
    #[case("$880,000 3 Beds Some Text 8888 Test Drive NE, Seattle, WA 98115 More Text", Some("8888 Test Drive NE, Seattle, WA 98115"))]
    #[case("3 Beds, Seattle, WA 98115", None)]
    #[case("123 Main St, Portland, OR 97201", None)]
    fn test_address(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(lib().address(text).as_deref(), expected);
    }

    #[test]
    fn test_status_open_house_builder() {
        let text = "Builder: Acme Homes LLC. Status: New";
        assert_eq!(lib().recognize(Field::Builder, text).as_deref(), Some("Acme Homes LLC"));
        assert_eq!(lib().recognize(Field::Status, text).as_deref(), Some("New"));
        assert_eq!(lib().recognize(Field::Status, "PRICE CUT today").as_deref(), Some("Price Cut"));
        assert_eq!(
            lib().recognize(Field::OpenHouse, "Active Open: Sun. 1pm-4pm Builder: X").as_deref(),
            Some("Sun. 1pm-4pm")
        );
    }

    #[test]
    fn test_listing_link_signatures() {
        let patterns = lib();
        assert!(patterns.is_listing_link("https://zillow.com/homedetails/123_fake_st"));
        assert!(patterns.is_listing_link("https://redfin.com/WA/Seattle/456-mockingbird"));
        assert!(patterns.is_listing_link("https://click.mail.zillow.com/?qs=abc"));
        assert!(patterns.is_listing_link("https://www.redfin.com/u/click?id=9"));
        assert!(!patterns.is_listing_link("https://example.com/unsubscribe"));
    }

    #[test]
    fn test_address_link_text() {
        assert!(lib().is_address_link_text("123 Fake St, Seattle, WA 98109"));
        assert!(!lib().is_address_link_text("View listing"));
    }

    #[test]
    fn test_custom_region() {
        let region = Region { state: "OR".to_string(), zip_prefix: "97".to_string() };
        let patterns = PatternLibrary::for_region(&region).unwrap();
        let text = "$500,000 2 bd 77 Elm St, Portland, OR 97201";

        assert_eq!(patterns.recognize(Field::Zip, text).as_deref(), Some("97201"));
        assert_eq!(patterns.recognize(Field::City, text).as_deref(), Some("Portland"));
        assert_eq!(patterns.address(text).as_deref(), Some("77 Elm St, Portland, OR 97201"));
        assert_eq!(patterns.region(), &region);
    }

    #[test]
    fn test_invalid_region() {
        let region = Region { state: "WA".to_string(), zip_prefix: "9a".to_string() };
        assert!(matches!(PatternLibrary::for_region(&region), Err(DigestError::InvalidRegion(_))));

        let region = Region { state: " ".to_string(), zip_prefix: "98".to_string() };
        assert!(matches!(PatternLibrary::for_region(&region), Err(DigestError::InvalidRegion(_))));
    }
}
