//! Structured listing extraction from archived real-estate email digests.
//!
//! A digest page is a run of emails, each behind a centered header line.
//! [`Digest`] segments pages into emails, finds the priced listing cards
//! inside each one, recognizes their fields, and deduplicates the result.
//!
//! ```rust
//! use homedigest_core::{Digest, DigestPage, formatters::write_tsv};
//!
//! let page = DigestPage::from_html(
//!     "page.html",
//!     r#"<p style="text-align:center;">2026-01-05  :  Redfin</p>
//!        <div>$725,000 4 Beds 3 Baths <a href="https://www.redfin.com/WA/Seattle/home/7">view</a></div>"#,
//! );
//! let dataset = Digest::new().run([page]).unwrap();
//!
//! let mut out = Vec::new();
//! write_tsv(&dataset.listings, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
//! ```

pub mod anchor;
pub mod date;
pub mod dedup;
pub mod digest;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod fetch;
pub mod formatters;
pub mod listing;
pub mod parse;
pub mod patterns;
pub mod preprocess;
pub mod property_type;
pub mod segment;
pub mod stats;
pub mod text;

pub use anchor::{AnchorScope, locate_anchors};
pub use dedup::{DedupReport, deduplicate};
pub use digest::{Dataset, Digest, DigestConfig, DigestConfigBuilder, PageExtraction};
pub use error::{DigestError, Result};
pub use extract::{ExtractConfig, ScopeFields, extract_block};
pub use fetch::{DigestPage, collect_inputs, read_page, read_stdin};
pub use formatters::{JsonConfig, JsonFormatter, TsvFormatter, convert_to_json, write_tsv};
pub use listing::{COLUMNS, ExtractedListing};
pub use parse::Document;
pub use patterns::{Field, PatternLibrary, Region};
pub use preprocess::{PreprocessConfig, preprocess_html};
pub use property_type::{UNKNOWN_TYPE, normalize_type};
pub use segment::{EmailBlock, HeaderLine, segment_page};
pub use stats::ParseStats;
pub use text::clean_text;
