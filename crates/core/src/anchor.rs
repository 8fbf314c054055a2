//! Anchor location: which parts of an email describe one listing.
//!
//! Every hyperlink whose target looks like a listing is a candidate. From
//! the link we climb until an ancestor's text carries a price; that
//! ancestor is the listing's scope. Cards usually hold several listing
//! links (photo, address, "view details"), so scopes are collapsed on
//! `(price, beds, url prefix)` before any field extraction happens.

use std::collections::HashSet;

use crate::parse::Element;
use crate::patterns::{Field, PatternLibrary};
use crate::segment::EmailBlock;
use crate::text::{clean_text, take_chars};
use crate::Result;

/// The element describing one listing, its normalized text and the link
/// that led to it.
#[derive(Debug, Clone)]
pub struct AnchorScope<'a> {
    pub element: Element<'a>,
    /// `clean_text` of the element's text.
    pub text: String,
    pub link: String,
    /// True when no link could be priced and the scope is the whole email.
    pub whole_block: bool,
}

/// Find the listing scopes of one email block.
///
/// The climb may reach the block root, so a listing link anywhere in a
/// priced block always yields a scope. When the block has no listing link
/// but its text contains a price, a single scope covering the whole block
/// is returned, carrying the block's first listing link (or nothing).
/// A block with no price at all yields no scopes.
pub fn locate_anchors<'a>(
    block: &'a EmailBlock, patterns: &PatternLibrary, key_url_chars: usize,
) -> Result<Vec<AnchorScope<'a>>> {
    let links = block.content.select("a[href]")?;
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut scopes = Vec::new();

    for link in &links {
        let href = link.attr("href").unwrap_or_default();
        if !patterns.is_listing_link(href) {
            continue;
        }

        let Some((element, text)) = priced_ancestor(link, patterns) else {
            tracing::debug!(link = href, "listing link has no priced ancestor");
            continue;
        };

        let price = patterns.recognize(Field::Price, &text).unwrap_or_default();
        let beds = patterns.recognize(Field::Beds, &text).unwrap_or_default();
        let key = (price, beds, take_chars(href, key_url_chars).to_string());
        if seen.insert(key) {
            scopes.push(AnchorScope { element, text, link: href.to_string(), whole_block: false });
        }
    }

    if scopes.is_empty() {
        let root = block.content.root();
        let text = clean_text(&root.spaced_text());
        if patterns.has_price(&text) {
            let link = links
                .iter()
                .map(|a| a.attr("href").unwrap_or_default())
                .find(|href| patterns.is_listing_link(href))
                .unwrap_or_default()
                .to_string();
            tracing::debug!(link = %link, "no priced anchor; using whole email as one listing");
            scopes.push(AnchorScope { element: root, text, link, whole_block: true });
        }
    }

    Ok(scopes)
}

/// Nearest ancestor of `link` whose normalized text contains a price.
fn priced_ancestor<'a>(link: &Element<'a>, patterns: &PatternLibrary) -> Option<(Element<'a>, String)> {
    let mut current = link.parent();
    while let Some(element) = current {
        let text = clean_text(&element.spaced_text());
        if patterns.has_price(&text) {
            return Some((element, text));
        }
        current = element.parent();
    }
    None
}
