//! Main extraction API.
//!
//! This module provides the entry point for turning digest pages into a
//! deduplicated listing dataset: the [`Digest`] struct and its
//! [`DigestConfig`].
//!
//! # Example
//!
//! ```rust
//! use homedigest_core::{Digest, DigestPage};
//!
//! let html = r#"<body>
//!     <p style="text-align:center;"><b>2026-01-05 10:00:00+00:00  :  Zillow  :  New Listings</b></p>
//!     <div>$950,000 3 bds, 2 ba, 1,850 sqft
//!         <a href="https://www.zillow.com/homedetails/1_zpid">123 Fake St, Seattle, WA 98109</a></div>
//! </body>"#;
//!
//! let dataset = Digest::new().run(vec![DigestPage::from_html("page.html", html)]).unwrap();
//! assert_eq!(dataset.listings.len(), 1);
//! assert_eq!(dataset.listings[0].zip, "98109");
//! assert_eq!(dataset.stats.emails_parsed, 1);
//! ```

use serde::Serialize;

use crate::dedup::{DedupReport, deduplicate};
use crate::extract::{ExtractConfig, extract_block};
use crate::fetch::DigestPage;
use crate::listing::ExtractedListing;
use crate::parse::Document;
use crate::patterns::{PatternLibrary, Region};
use crate::preprocess::{PreprocessConfig, preprocess_html};
use crate::segment::{EmailBlock, segment_page};
use crate::stats::ParseStats;
use crate::Result;

/// Configuration for the Digest engine.
///
/// # Example
///
/// ```rust
/// use homedigest_core::{DigestConfig, Region};
///
/// let config = DigestConfig::builder()
///     .region(Region { state: "OR".into(), zip_prefix: "97".into() })
///     .max_fallback_levels(3)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// State and zip prefix the location patterns accept (default: WA / 98).
    pub region: Region,

    /// Levels the fallback walk examines, counting the scope itself (default: 5).
    pub max_fallback_levels: usize,

    /// Characters of email text scanned for a header type hint (default: 5000).
    pub header_scan_chars: usize,

    /// URL prefix length used when collapsing anchors (default: 50).
    pub anchor_key_url_chars: usize,

    /// Nested hyperlinks checked for an address at each fallback level (default: 50).
    pub address_link_limit: usize,

    /// Markup cleanup applied before parsing.
    pub preprocess: PreprocessConfig,
}

impl Default for DigestConfig {
    fn default() -> Self {
        let extract = ExtractConfig::default();
        Self {
            region: Region::default(),
            max_fallback_levels: extract.max_fallback_levels,
            header_scan_chars: extract.header_scan_chars,
            anchor_key_url_chars: extract.anchor_key_url_chars,
            address_link_limit: extract.address_link_limit,
            preprocess: PreprocessConfig::default(),
        }
    }
}

impl DigestConfig {
    /// Creates a new builder for DigestConfig.
    pub fn builder() -> DigestConfigBuilder {
        DigestConfigBuilder::new()
    }

    fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            max_fallback_levels: self.max_fallback_levels,
            header_scan_chars: self.header_scan_chars,
            anchor_key_url_chars: self.anchor_key_url_chars,
            address_link_limit: self.address_link_limit,
        }
    }
}

/// Builder for DigestConfig.
pub struct DigestConfigBuilder {
    config: DigestConfig,
}

impl DigestConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: DigestConfig::default() }
    }

    /// Sets the region constraint.
    pub fn region(mut self, value: Region) -> Self {
        self.config.region = value;
        self
    }

    /// Sets the fallback walk bound.
    pub fn max_fallback_levels(mut self, value: usize) -> Self {
        self.config.max_fallback_levels = value;
        self
    }

    /// Sets how much email text feeds header type inference.
    pub fn header_scan_chars(mut self, value: usize) -> Self {
        self.config.header_scan_chars = value;
        self
    }

    /// Sets the URL prefix length of the anchor key.
    pub fn anchor_key_url_chars(mut self, value: usize) -> Self {
        self.config.anchor_key_url_chars = value;
        self
    }

    /// Sets how many nested links are checked for an address.
    pub fn address_link_limit(mut self, value: usize) -> Self {
        self.config.address_link_limit = value;
        self
    }

    /// Sets the preprocessing configuration.
    pub fn preprocess(mut self, value: PreprocessConfig) -> Self {
        self.config.preprocess = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> DigestConfig {
        self.config
    }
}

impl Default for DigestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Listings and counters from one page or email.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageExtraction {
    pub listings: Vec<ExtractedListing>,
    pub stats: ParseStats,
}

/// The deduplicated result of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    pub listings: Vec<ExtractedListing>,
    pub stats: ParseStats,
    pub dedup: DedupReport,
}

/// Main entry point for listing extraction.
///
/// A Digest holds compiled patterns and settings. Pages are processed
/// one after another; each yields its own [`PageExtraction`], and
/// [`Digest::run`] folds them into a [`Dataset`].
pub struct Digest {
    config: DigestConfig,
    patterns: PatternLibrary,
}

impl Digest {
    /// Creates a Digest with default settings.
    pub fn new() -> Self {
        Self { config: DigestConfig::default(), patterns: PatternLibrary::default() }
    }

    /// Creates a Digest with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidRegion`](crate::DigestError::InvalidRegion)
    /// if the region cannot form patterns.
    pub fn with_config(config: DigestConfig) -> Result<Self> {
        let patterns = PatternLibrary::for_region(&config.region)?;
        Ok(Self { config, patterns })
    }

    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    /// Extract every listing from one digest page.
    ///
    /// Counts the page in `pages_parsed`. A page without header markers
    /// yields nothing.
    pub fn extract_page(&self, html: &str) -> Result<PageExtraction> {
        let cleaned = preprocess_html(html, &self.config.preprocess);
        let doc = Document::parse(&cleaned)?;
        let blocks = segment_page(&doc)?;

        let mut extraction = PageExtraction::default();
        extraction.stats.pages_parsed = 1;
        for block in &blocks {
            let listings = self.extract_block(block, &mut extraction.stats)?;
            extraction.listings.extend(listings);
        }

        tracing::debug!(
            emails = blocks.len(),
            listings = extraction.listings.len(),
            "extracted page"
        );
        Ok(extraction)
    }

    /// Extract the listings of a single email.
    pub fn extract_email(&self, block: &EmailBlock) -> Result<PageExtraction> {
        let mut extraction = PageExtraction::default();
        extraction.listings = self.extract_block(block, &mut extraction.stats)?;
        Ok(extraction)
    }

    fn extract_block(&self, block: &EmailBlock, stats: &mut ParseStats) -> Result<Vec<ExtractedListing>> {
        extract_block(block, &self.patterns, &self.config.extract_config(), stats)
    }

    /// Process pages in order, then deduplicate and date-sort the result.
    pub fn run<I>(&self, pages: I) -> Result<Dataset>
    where
        I: IntoIterator<Item = DigestPage>,
    {
        let mut stats = ParseStats::default();
        let mut listings = Vec::new();

        for page in pages {
            let extraction = self.extract_page(&page.html)?;
            tracing::info!(page = %page.name, listings = extraction.listings.len(), "parsed page");
            if page.lossy {
                stats.pages_lossy += 1;
            }
            stats += extraction.stats;
            listings.extend(extraction.listings);
        }

        Ok(self.finish(listings, stats))
    }

    /// Deduplicate accumulated listings into a dataset.
    pub fn finish(&self, listings: Vec<ExtractedListing>, stats: ParseStats) -> Dataset {
        tracing::info!(records = listings.len(), "records before deduplication");
        let (listings, dedup) = deduplicate(listings);
        Dataset { listings, stats, dedup }
    }
}

impl Default for Digest {
    fn default() -> Self {
        Self::new()
    }
}
