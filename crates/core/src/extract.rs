//! Record assembly: anchor scopes into listing rows.
//!
//! For each scope the recognizers run against the scope text first. Fields
//! still missing go through the fallback walk, then property type gets
//! two more chances: the block's header and opening text, and the listing
//! URL. Whatever is still empty is tallied as a miss.

use crate::anchor::{AnchorScope, locate_anchors};
use crate::fallback::{linked_address, resolve_missing};
use crate::listing::ExtractedListing;
use crate::patterns::{Field, PatternLibrary};
use crate::property_type::{UNKNOWN_TYPE, infer_from_header, infer_from_url, is_unresolved, normalize_type};
use crate::segment::EmailBlock;
use crate::stats::ParseStats;
use crate::text::{clean_text, take_chars};
use crate::Result;

/// Knobs for turning scopes into records.
#[derive(Debug, Clone, Copy)]
pub struct ExtractConfig {
    /// Levels the fallback walk examines, the scope included.
    pub max_fallback_levels: usize,
    /// Characters of block text scanned for a header type hint.
    pub header_scan_chars: usize,
    /// URL prefix length in the anchor collapse key.
    pub anchor_key_url_chars: usize,
    /// Nested hyperlinks checked for a linked address at each fallback level.
    pub address_link_limit: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { max_fallback_levels: 5, header_scan_chars: 5000, anchor_key_url_chars: 50, address_link_limit: 50 }
    }
}

/// Recognized values of one scope, before header metadata is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeFields {
    pub price: String,
    pub beds: String,
    pub baths: String,
    pub sqft: String,
    pub zip: String,
    pub city: String,
    pub property_type: String,
    pub address: String,
    pub status: String,
    pub open_house: String,
    pub builder: String,
}

impl ScopeFields {
    /// Run every recognizer against the scope's own text.
    ///
    /// A hyperlink inside the scope whose text reads like an address wins
    /// over the free-text address pattern. Every link in the scope is
    /// checked; the link limit only applies to the fallback walk.
    pub fn recognize(scope: &AnchorScope<'_>, patterns: &PatternLibrary) -> Self {
        let text = scope.text.as_str();
        let get = |field| patterns.recognize(field, text).unwrap_or_default();

        let address = linked_address(scope.element, patterns, usize::MAX)
            .or_else(|| patterns.address(text))
            .unwrap_or_default();

        Self {
            price: get(Field::Price),
            beds: get(Field::Beds),
            baths: get(Field::Baths),
            sqft: get(Field::Sqft),
            zip: get(Field::Zip),
            city: get(Field::City),
            property_type: normalize_type(&get(Field::PropertyType)),
            address,
            status: get(Field::Status),
            open_house: get(Field::OpenHouse),
            builder: get(Field::Builder),
        }
    }

    /// Whether any field the fallback walk can fill is still missing.
    pub fn needs_fallback(&self) -> bool {
        self.zip.is_empty() || is_unresolved(&self.property_type) || self.city.is_empty() || self.address.is_empty()
    }

    /// Value of one field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Price => &self.price,
            Field::Beds => &self.beds,
            Field::Baths => &self.baths,
            Field::Sqft => &self.sqft,
            Field::Zip => &self.zip,
            Field::City => &self.city,
            Field::PropertyType => &self.property_type,
            Field::Address => &self.address,
            Field::Status => &self.status,
            Field::OpenHouse => &self.open_house,
            Field::Builder => &self.builder,
        }
    }
}

/// Extract every listing of one email block.
///
/// Counts the block in `emails_parsed` even when it yields nothing, and
/// tallies per-field misses for each listing produced.
pub fn extract_block(
    block: &EmailBlock, patterns: &PatternLibrary, config: &ExtractConfig, stats: &mut ParseStats,
) -> Result<Vec<ExtractedListing>> {
    stats.emails_parsed += 1;

    let scopes = locate_anchors(block, patterns, config.anchor_key_url_chars)?;
    if scopes.is_empty() {
        tracing::debug!(date = %block.header.date, source = %block.header.source, "no priced listing in email");
        return Ok(Vec::new());
    }

    let mut header_type: Option<Option<String>> = None;
    let mut listings = Vec::with_capacity(scopes.len());

    for scope in &scopes {
        let mut fields = ScopeFields::recognize(scope, patterns);

        if fields.needs_fallback() && !scope.whole_block {
            resolve_missing(scope.element, &mut fields, patterns, config.max_fallback_levels, config.address_link_limit);
        }

        if is_unresolved(&fields.property_type) {
            let from_header = header_type.get_or_insert_with(|| header_hint(block, config.header_scan_chars));
            fields.property_type = from_header
                .clone()
                .or_else(|| infer_from_url(&scope.link).map(str::to_string))
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
        }

        tally(&fields, &scope.link, stats);
        listings.push(assemble(block, scope, fields));
    }

    stats.properties_found += listings.len();
    Ok(listings)
}

fn header_hint(block: &EmailBlock, scan_chars: usize) -> Option<String> {
    let body = clean_text(&block.content.spaced_text());
    infer_from_header(&block.header.subject, take_chars(&body, scan_chars))
}

fn tally(fields: &ScopeFields, link: &str, stats: &mut ParseStats) {
    for field in Field::ALL {
        let value = fields.get(field);
        let missing = match field {
            Field::PropertyType => value == UNKNOWN_TYPE,
            _ => value.is_empty(),
        };
        if missing {
            stats.record_miss(field);
        }
    }
    if link.is_empty() {
        stats.missing_link += 1;
    }
}

fn assemble(block: &EmailBlock, scope: &AnchorScope<'_>, fields: ScopeFields) -> ExtractedListing {
    ExtractedListing {
        date: block.header.date.clone(),
        source: block.header.source.clone(),
        email_subject: block.header.subject.clone(),
        property_type: fields.property_type,
        city: fields.city,
        zip: fields.zip,
        address: fields.address,
        status: fields.status,
        open_house: fields.open_house,
        builder: fields.builder,
        price: fields.price,
        beds: fields.beds,
        baths: fields.baths,
        sqft: fields.sqft,
        listing_link: scope.link.clone(),
    }
}
