//! Duplicate removal across a whole run.
//!
//! Digest pages overlap: the same email is archived on consecutive pages,
//! and vendors re-send listings. Two passes run in order:
//!
//! 1. strict: rows equal on `(Listing_Link, Price, Date)`, first kept;
//! 2. content: rows with a non-blank Address and Zip, equal on
//!    `(Price, Beds, Baths, Sqft, Zip, Address, Date)`, last kept.
//!
//! Rows without a usable location skip the content pass. Survivors are
//! stably re-sorted by date.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::date::date_key;
use crate::listing::ExtractedListing;

/// How many rows each pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DedupReport {
    pub strict_dropped: usize,
    pub content_dropped: usize,
}

impl DedupReport {
    pub fn total(&self) -> usize {
        self.strict_dropped + self.content_dropped
    }
}

/// Deduplicate and date-sort `listings`.
pub fn deduplicate(listings: Vec<ExtractedListing>) -> (Vec<ExtractedListing>, DedupReport) {
    let before = listings.len();
    let strict = strict_pass(listings);
    let strict_dropped = before - strict.len();

    let (located, exempt): (Vec<_>, Vec<_>) = strict.into_iter().partition(has_location);
    let located_count = located.len();
    let kept = content_pass(located);
    let content_dropped = located_count - kept.len();

    let mut rows = kept;
    rows.extend(exempt);
    rows.sort_by_cached_key(|row| date_key(&row.date));

    tracing::info!(strict_dropped, content_dropped, remaining = rows.len(), "deduplicated listings");
    (rows, DedupReport { strict_dropped, content_dropped })
}

/// Whether a row can take part in the content pass.
pub fn has_location(row: &ExtractedListing) -> bool {
    !row.address.trim().is_empty() && !row.zip.trim().is_empty()
}

fn strict_pass(rows: Vec<ExtractedListing>) -> Vec<ExtractedListing> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert((row.listing_link.clone(), row.price.clone(), row.date.clone())))
        .collect()
}

type ContentKey<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str, &'a str, &'a str);

fn content_key(row: &ExtractedListing) -> ContentKey<'_> {
    (&row.price, &row.beds, &row.baths, &row.sqft, &row.zip, &row.address, &row.date)
}

/// Keep the last row of each content key, in the order those last rows
/// appeared.
fn content_pass(rows: Vec<ExtractedListing>) -> Vec<ExtractedListing> {
    let last_index: HashMap<ContentKey<'_>, usize> =
        rows.iter().enumerate().map(|(idx, row)| (content_key(row), idx)).collect();
    let keep: HashSet<usize> = last_index.into_values().collect();

    rows.into_iter().enumerate().filter(|(idx, _)| keep.contains(idx)).map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, link: &str, price: &str, address: &str, zip: &str) -> ExtractedListing {
        ExtractedListing {
            date: date.into(),
            listing_link: link.into(),
            price: price.into(),
            address: address.into(),
            zip: zip.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_strict_keeps_first() {
        let mut first = row("2026-01-01", "https://z/1", "$500,000", "", "");
        first.source = "first".into();
        let mut second = first.clone();
        second.source = "second".into();

        let (rows, report) = deduplicate(vec![first, second]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source, "first");
        assert_eq!(report.strict_dropped, 1);
        assert_eq!(report.content_dropped, 0);
    }

    #[test]
    fn test_content_keeps_last() {
        let mut early = row("2026-01-01", "https://z/1", "$500,000", "1 Main St, Seattle, WA 98101", "98101");
        early.status = "New".into();
        let mut late = row("2026-01-01", "https://z/other", "$500,000", "1 Main St, Seattle, WA 98101", "98101");
        late.status = "Price Cut".into();

        let (rows, report) = deduplicate(vec![early, late]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "Price Cut");
        assert_eq!(report.content_dropped, 1);
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_rows_without_location_are_exempt() {
        let a = row("2026-01-01", "https://z/1", "$500,000", "", "98101");
        let b = row("2026-01-01", "https://z/2", "$500,000", "", "98101");
        let c = row("2026-01-01", "https://z/3", "$500,000", "  ", "");

        let (rows, report) = deduplicate(vec![a, b, c]);

        assert_eq!(rows.len(), 3);
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_sorted_by_date_unparseable_last() {
        let rows = vec![
            row("Untitled block", "l1", "$1", "", ""),
            row("2026-02-01 00:00:00+00:00", "l2", "$1", "", ""),
            row("2026-01-01", "l3", "$1", "", ""),
        ];

        let (rows, _) = deduplicate(rows);
        let links: Vec<&str> = rows.iter().map(|r| r.listing_link.as_str()).collect();

        assert_eq!(links, vec!["l3", "l2", "l1"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let rows: Vec<_> = (0..5).map(|i| row("2026-01-01", &format!("l{}", i), "$1", "", "")).collect();
        let (rows, _) = deduplicate(rows);
        let links: Vec<&str> = rows.iter().map(|r| r.listing_link.as_str()).collect();

        assert_eq!(links, vec!["l0", "l1", "l2", "l3", "l4"]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let rows = vec![
            row("2026-01-02", "https://z/1", "$500,000", "1 Main St, Seattle, WA 98101", "98101"),
            row("2026-01-02", "https://z/1", "$500,000", "1 Main St, Seattle, WA 98101", "98101"),
            row("2026-01-01", "https://z/2", "$600,000", "", ""),
        ];

        let (once, _) = deduplicate(rows);
        let (twice, report) = deduplicate(once.clone());

        assert_eq!(once, twice);
        assert_eq!(report.total(), 0);
    }
}
