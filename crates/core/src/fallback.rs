//! Bounded ancestor walk for fields the anchor scope did not name.
//!
//! Cards often keep the location and type outside the priced element: the
//! address sits in a sibling row, the zip in a footer cell of the same
//! table. The walk starts at the scope itself and climbs, re-running only
//! the recognizers whose field is still empty. A field is committed on first
//! success, so the narrowest scope that names it wins.
//!
//! Broad ancestors may hold a neighbouring card; a value found there is
//! accepted as is.

use crate::extract::ScopeFields;
use crate::parse::Element;
use crate::patterns::{Field, PatternLibrary};
use crate::property_type::{is_unresolved, normalize_type};
use crate::text::clean_text;

/// Climb from `scope` filling missing location and type fields.
///
/// The scope counts as the first level, so at most `max_levels - 1`
/// ancestors above it are examined. Stops at a root-level element or as
/// soon as nothing is missing. Returns the number of levels examined.
pub fn resolve_missing(
    scope: Element<'_>, fields: &mut ScopeFields, patterns: &PatternLibrary, max_levels: usize, link_limit: usize,
) -> usize {
    let mut current = Some(scope);
    let mut levels = 0;

    while let Some(ancestor) = current {
        if levels >= max_levels || !fields.needs_fallback() || ancestor.is_root_level() {
            break;
        }

        let text = clean_text(&ancestor.spaced_text());
        if fields.zip.is_empty() {
            fields.zip = patterns.recognize(Field::Zip, &text).unwrap_or_default();
        }
        if is_unresolved(&fields.property_type) {
            fields.property_type =
                patterns.recognize(Field::PropertyType, &text).map(|t| normalize_type(&t)).unwrap_or_default();
        }
        if fields.city.is_empty() {
            fields.city = patterns.recognize(Field::City, &text).unwrap_or_default();
        }
        if fields.address.is_empty() {
            fields.address = linked_address(ancestor, patterns, link_limit)
                .or_else(|| patterns.address(&text))
                .unwrap_or_default();
        }

        levels += 1;
        current = ancestor.parent();
    }

    if levels > 0 {
        tracing::trace!(levels, still_missing = fields.needs_fallback(), "fallback walk finished");
    }
    levels
}

/// Text of the first nested hyperlink (among the first `link_limit`) that
/// reads like a canonical region address.
pub fn linked_address(element: Element<'_>, patterns: &PatternLibrary, link_limit: usize) -> Option<String> {
    let links = element.select("a").ok()?;
    links
        .iter()
        .take(link_limit)
        .map(|a| clean_text(&a.spaced_text()))
        .find(|text| patterns.is_address_link_text(text))
}
