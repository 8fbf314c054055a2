//! Property-type vocabulary and normalization.
//!
//! Vendors say "Single Family", "Townhome", "Multi-family" or "Coop" for
//! what the dataset stores as `House`, `Townhouse`, `Multi-Family` and
//! `Co-op`. [`normalize_type`] maps any raw spelling onto the canonical
//! form and is idempotent. When a listing scope never names its type,
//! [`infer_from_header`] and [`infer_from_url`] supply the fallbacks.

use std::sync::LazyLock;

use regex::Regex;

/// Sentinel for a listing whose type could not be resolved.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Words that mark a property type in subjects and digest bodies.
pub const HEADER_VOCABULARY: &[&str] = &[
    "Condo",
    "Townhome",
    "Townhouse",
    "House",
    "Multi-Family",
    "Single Family",
    "Co-op",
    "Studio",
    "Apartment",
    "Home",
    "Residence",
];

/// Raw spelling (lowercase) to canonical type.
const CANONICAL_TYPES: &[(&str, &str)] = &[
    ("single family", "House"),
    ("single family residence", "House"),
    ("house", "House"),
    ("townhome", "Townhouse"),
    ("townhouse", "Townhouse"),
    ("multi-family", "Multi-Family"),
    ("multifamily", "Multi-Family"),
    ("co-op", "Co-op"),
    ("coop", "Co-op"),
];

/// Vendor URL path fragments and the type they imply, checked in order.
const URL_TYPE_HINTS: &[(&str, &str)] = &[
    ("/condo", "Condo"),
    ("/townhouse", "Townhouse"),
    ("/townhome", "Townhouse"),
    ("/home/", "House"),
    ("/house", "House"),
    ("/apartment", "Apartment"),
    ("/multi-family", "Multi-Family"),
];

static HEADER_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<String> = HEADER_VOCABULARY.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&format!(r"(?i)\b({})\b", words.join("|"))).expect("valid header type regex")
});

/// Capitalize the first letter of every alphabetic run and lowercase the
/// rest, so "multi-family" becomes "Multi-Family" and "CONDO" "Condo".
pub fn title_case(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut at_word_start = true;

    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                output.extend(ch.to_uppercase());
            } else {
                output.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            output.push(ch);
            at_word_start = true;
        }
    }

    output
}

/// Map a raw type string onto the canonical vocabulary.
///
/// Spellings without a canonical entry are title-cased and kept, so
/// "LOFT" becomes "Loft". Empty input stays empty.
///
/// ```rust
/// use homedigest_core::normalize_type;
///
/// assert_eq!(normalize_type("Single Family"), "House");
/// assert_eq!(normalize_type("townhome"), "Townhouse");
/// assert_eq!(normalize_type(&normalize_type("Coop")), "Co-op");
/// ```
pub fn normalize_type(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_lowercase();
    CANONICAL_TYPES
        .iter()
        .find(|(spelling, _)| *spelling == lower)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| title_case(trimmed))
}

/// Whether a resolved type still needs a fallback.
pub fn is_unresolved(value: &str) -> bool {
    value.is_empty() || value == UNKNOWN_TYPE
}

/// The single type a block's subject and opening text agree on.
///
/// Every vocabulary hit in `subject` and `body` is normalized; when they
/// all collapse to exactly one canonical type it is returned. No hits, or
/// hits naming different types, give `None`.
pub fn infer_from_header(subject: &str, body: &str) -> Option<String> {
    let scan = if subject.is_empty() { body.to_string() } else { format!("{} {}", subject, body) };

    let mut found: Vec<String> = Vec::new();
    for caps in HEADER_TYPE_RE.captures_iter(&scan) {
        let normalized = normalize_type(&caps[1]);
        if !found.contains(&normalized) {
            found.push(normalized);
        }
    }

    if found.len() == 1 { found.pop() } else { None }
}

/// Type implied by a listing URL's path segments.
///
/// Only the path is consulted when the link parses as a URL; otherwise the
/// whole link text is searched.
pub fn infer_from_url(link: &str) -> Option<&'static str> {
    if link.is_empty() {
        return None;
    }
    let haystack = match url::Url::parse(link) {
        Ok(parsed) => parsed.path().to_lowercase(),
        Err(_) => link.to_lowercase(),
    };
    URL_TYPE_HINTS.iter().find(|(fragment, _)| haystack.contains(fragment)).map(|(_, kind)| *kind)
}
