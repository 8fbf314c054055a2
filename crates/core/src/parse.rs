//! HTML parsing and tree navigation.
//!
//! This module provides the [`Document`] and [`Element`] types the rest of
//! the engine walks: digest pages, per-email fragments, and the ancestor
//! chains that anchor location and the fallback walk climb.
//!
//! # Example
//!
//! ```rust
//! use homedigest_core::parse::Document;
//!
//! let html = r#"<div><p>$950,000 <a href="https://zillow.com/homedetails/1">1 Main St</a></p></div>"#;
//!
//! let doc = Document::parse(html).unwrap();
//! let link = &doc.select("a[href]").unwrap()[0];
//! let scope = link.parent().unwrap();
//! assert_eq!(scope.tag_name(), "p");
//! assert!(scope.text().contains("$950,000"));
//! ```

use scraper::{ElementRef, Html, Node, Selector};

use crate::{DigestError, Result};

/// Tags treated as the top of a document: walks stop before them.
const ROOT_LEVEL_TAGS: &[&str] = &["html", "body"];

/// Represents a parsed HTML document or fragment.
///
/// A Document wraps a full digest page or the slice of one page that
/// belongs to a single email, and answers CSS selector queries over it.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a complete HTML page.
    ///
    /// Parsing is lenient: malformed markup is repaired the way browsers
    /// repair it, so this never fails on content.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Parses a run of sibling nodes cut out of a larger page.
    ///
    /// The fragment is rooted at a synthetic `html` element, which
    /// [`Element::is_root_level`] reports as root.
    pub fn parse_fragment(html: &str) -> Result<Self> {
        let html = Html::parse_fragment(html);
        Ok(Self { html })
    }

    /// Gets the raw HTML representation.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// The outermost element of the document.
    pub fn root(&self) -> Element<'_> {
        Element { element: self.html.root_element() }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Text of the whole document, text nodes joined by a single space.
    pub fn spaced_text(&self) -> String {
        self.root().spaced_text()
    }
}

/// A wrapper around scraper's ElementRef exposing the navigation the
/// extraction engine needs.
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    fn from_ref(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Gets the outer HTML of this element.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Text nodes joined by a single space.
    ///
    /// Templates split one fact across sibling spans ("3", "bd"); joining
    /// with a separator keeps such tokens apart once whitespace is collapsed.
    pub fn spaced_text(&self) -> String {
        self.text_nodes().join(" ")
    }

    /// The text nodes under this element, in document order.
    pub fn text_nodes(&self) -> Vec<&'a str> {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Whether this element is a document-root-level container.
    pub fn is_root_level(&self) -> bool {
        let name = self.element.value().name();
        ROOT_LEVEL_TAGS.iter().any(|tag| name.eq_ignore_ascii_case(tag))
    }

    /// The parent element, or `None` at the top of the tree.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(Element::from_ref)
    }

    /// Direct child elements, in document order.
    pub fn children(&self) -> Vec<Element<'a>> {
        self.element.children().filter_map(ElementRef::wrap).map(Element::from_ref).collect()
    }

    /// Element and text siblings that follow this element, in order.
    ///
    /// Comments and other node kinds are skipped.
    pub fn following_siblings(&self) -> Vec<Sibling<'a>> {
        self.element
            .next_siblings()
            .filter_map(|node| match node.value() {
                Node::Element(_) => ElementRef::wrap(node).map(|el| Sibling::Element(Element::from_ref(el))),
                Node::Text(text) => Some(Sibling::Text(&**text)),
                _ => None,
            })
            .collect()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(Element::from_ref).collect())
    }
}

/// A node that follows an element at the same tree level.
#[derive(Clone, Copy, Debug)]
pub enum Sibling<'a> {
    Element(Element<'a>),
    Text(&'a str),
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| DigestError::HtmlParseError(format!("Invalid selector: {}", e)))
}
