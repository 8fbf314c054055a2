//! Page segmentation: one digest page into per-email blocks.
//!
//! The archive writes every email behind a centered header paragraph,
//! `<p style="text-align:center;"><b>date  :  source  :  subject</b></p>`,
//! followed by the email's own markup. A block is the header plus every
//! sibling node after it up to the next header, re-parsed as a fragment so
//! that walks inside one email can never climb into its neighbours.

use crate::parse::{Document, Element, Sibling};
use crate::Result;

/// Separator between the parts of a header line.
pub const HEADER_SEPARATOR: &str = "  :  ";

/// Metadata carried by a block's header line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLine {
    pub date: String,
    pub source: String,
    pub subject: String,
}

impl HeaderLine {
    /// Split header text into date, source and subject.
    ///
    /// Without the separator the whole text is the date; with two parts
    /// the subject is empty; parts past the third are ignored.
    ///
    /// ```rust
    /// use homedigest_core::HeaderLine;
    ///
    /// let header = HeaderLine::parse("2026-01-01  :  Zillow  :  New Listings");
    /// assert_eq!(header.source, "Zillow");
    /// assert_eq!(HeaderLine::parse("Untitled block").date, "Untitled block");
    /// ```
    pub fn parse(text: &str) -> Self {
        if !text.contains(HEADER_SEPARATOR) {
            return Self { date: text.to_string(), ..Default::default() };
        }

        let mut parts = text.split(HEADER_SEPARATOR);
        let date = parts.next().unwrap_or_default().to_string();
        let source = parts.next().unwrap_or_default().to_string();
        let subject = parts.next().unwrap_or_default().to_string();
        Self { date, source, subject }
    }
}

/// One email cut out of a digest page.
pub struct EmailBlock {
    pub header: HeaderLine,
    pub content: Document,
}

impl EmailBlock {
    /// Build a block directly from header metadata and email markup.
    ///
    /// This is the entry point for collaborators that already hold
    /// individual emails rather than archived digest pages.
    pub fn from_html(header: HeaderLine, html: &str) -> Result<Self> {
        Ok(Self { header, content: Document::parse_fragment(html)? })
    }
}

/// Inline style the archiver writes on header paragraphs, verbatim.
pub const HEADER_STYLE: &str = "text-align:center;";

/// Whether an element is a block header marker.
///
/// Only the archiver's exact style counts; centered paragraphs inside the
/// emails themselves are content.
pub fn is_header(element: &Element<'_>) -> bool {
    element.tag_name() == "p" && element.attr("style") == Some(HEADER_STYLE)
}

/// Header text as written: each text node trimmed, then concatenated.
///
/// Whitespace inside a node is kept because the separator is two spaces
/// either side of the colon.
fn header_text(element: &Element<'_>) -> String {
    element.text_nodes().iter().map(|t| t.trim()).collect()
}

/// Split a parsed page into email blocks, in document order.
///
/// A page without header markers yields no blocks. The last block runs to
/// the end of its header's parent.
pub fn segment_page(page: &Document) -> Result<Vec<EmailBlock>> {
    let headers = page.select("p[style]")?;
    let mut blocks = Vec::new();

    for header in headers.iter().filter(|el| is_header(el)) {
        let line = HeaderLine::parse(&header_text(header));

        let mut chunk = String::new();
        for sibling in header.following_siblings() {
            match sibling {
                Sibling::Element(el) if is_header(&el) => break,
                Sibling::Element(el) => chunk.push_str(&el.outer_html()),
                Sibling::Text(text) => chunk.push_str(&escape_text(text)),
            }
        }

        tracing::debug!(date = %line.date, source = %line.source, bytes = chunk.len(), "segmented email block");
        blocks.push(EmailBlock { header: line, content: Document::parse_fragment(&chunk)? });
    }

    Ok(blocks)
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(html: &str) -> Vec<EmailBlock> {
        let doc = Document::parse(html).unwrap();
        segment_page(&doc).unwrap()
    }

    #[test]
    fn test_header_three_parts() {
        let header = HeaderLine::parse("2026-01-01  :  Zillow  :  3 new homes");
        assert_eq!(header.date, "2026-01-01");
        assert_eq!(header.source, "Zillow");
        assert_eq!(header.subject, "3 new homes");
    }

    #[test]
    fn test_header_two_parts() {
        let header = HeaderLine::parse("2026-01-02  :  Redfin");
        assert_eq!(header, HeaderLine { date: "2026-01-02".into(), source: "Redfin".into(), subject: String::new() });
    }

    #[test]
    fn test_header_without_separator() {
        let header = HeaderLine::parse("2026-05-01 : Test Source");
        assert_eq!(header.date, "2026-05-01 : Test Source");
        assert!(header.source.is_empty());
        assert!(header.subject.is_empty());
    }

    #[test]
    fn test_segments_between_headers() {
        let blocks = segment(
            r#"<body>
                <p style="text-align:center;"><b>2026-01-01  :  Zillow</b></p>
                <div>first $100,000</div>
                <p style="text-align:center;"><b>2026-01-02  :  Redfin  :  Hi</b></p>
                <div>second</div><span>tail</span>
            </body>"#,
        );

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].header.source, "Zillow");
        assert!(blocks[0].content.spaced_text().contains("first"));
        assert!(!blocks[0].content.spaced_text().contains("second"));
        assert_eq!(blocks[1].header.subject, "Hi");
        assert!(blocks[1].content.spaced_text().contains("tail"));
    }

    #[test]
    fn test_untitled_block() {
        let blocks = segment(r#"<p style="text-align:center;">Untitled block</p><div>$1,000</div>"#);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header.date, "Untitled block");
        assert_eq!(blocks[0].header.source, "");
    }

    #[test]
    fn test_no_headers_no_blocks() {
        assert!(segment("<div>$500,000 listing with no header</div>").is_empty());
    }

    #[test]
    fn test_loose_text_is_kept_escaped() {
        let blocks = segment(r#"<body><p style="text-align:center;">d  :  s</p>Price &lt;$500,000&gt;</body>"#);
        assert!(blocks[0].content.spaced_text().contains("<$500,000>"));
    }

    #[test]
    fn test_other_centered_styles_are_not_headers() {
        let blocks = segment(
            r#"<p style="text-align:center; margin: 0">not a header</p>
               <p style="text-align: center;">d  :  s</p><div>x</div>
               <p style="TEXT-ALIGN:CENTER;">d  :  t</p><div>y</div>
               <p style="text-align:center;">d  :  u</p><div>z</div>"#,
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header.source, "u");
        assert!(blocks[0].content.spaced_text().contains('z'));
    }
}
