use std::sync::LazyLock;

use lol_html::{HtmlRewriter, Settings, element};
use regex::Regex;

/// Outlook-only conditional blocks: `<!--[if gte mso 9]> ... <![endif]-->`.
///
/// They duplicate buttons and links as VML for Outlook, so one card
/// would otherwise contribute its listing links twice. Negated conditions
/// (`<!--[if !mso]><!-->`) wrap the markup every other client renders and
/// are left alone.
static CONDITIONAL_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--\[if\s[^\]!]*\bmso\b[^\]]*\]>.*?<!\[endif\]-->").expect("valid conditional comment regex")
});

static HIDDEN_STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("valid hidden style regex"));

/// Configuration for markup cleanup ahead of extraction
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Whether to remove script tags
    pub remove_scripts: bool,
    /// Whether to remove style tags
    pub remove_styles: bool,
    /// Whether to remove noscript tags
    pub remove_noscript: bool,
    /// Whether to remove Outlook conditional comments
    pub remove_conditional_comments: bool,
    /// Whether to remove 1x1 and hidden tracking images
    pub remove_tracking_pixels: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            remove_scripts: true,
            remove_styles: true,
            remove_noscript: true,
            remove_conditional_comments: true,
            remove_tracking_pixels: true,
        }
    }
}

impl PreprocessConfig {
    /// A configuration that leaves markup untouched.
    pub fn disabled() -> Self {
        Self {
            remove_scripts: false,
            remove_styles: false,
            remove_noscript: false,
            remove_conditional_comments: false,
            remove_tracking_pixels: false,
        }
    }

    fn is_enabled(&self) -> bool {
        self.remove_scripts
            || self.remove_styles
            || self.remove_noscript
            || self.remove_conditional_comments
            || self.remove_tracking_pixels
    }
}

/// Strip markup that carries no listing facts.
///
/// Whitespace and header paragraphs are left exactly as written. When the
/// rewriter fails the input is returned unchanged.
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    if !config.is_enabled() {
        return html.to_string();
    }

    let mut processed = html.to_string();

    if config.remove_conditional_comments {
        processed = remove_conditional_comments(&processed);
    }

    if config.remove_scripts || config.remove_styles || config.remove_noscript || config.remove_tracking_pixels {
        processed = remove_unwanted_elements(&processed, config);
    }

    processed
}

fn remove_conditional_comments(html: &str) -> String {
    CONDITIONAL_COMMENT_RE.replace_all(html, "").to_string()
}

/// Remove script, style and noscript elements and tracking images
fn remove_unwanted_elements(html: &str, config: &PreprocessConfig) -> String {
    let mut output = String::new();
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                if config.remove_scripts {
                    Some(element!("script", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
                if config.remove_styles {
                    Some(element!("style", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
                if config.remove_noscript {
                    Some(element!("noscript", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
                if config.remove_tracking_pixels {
                    Some(element!("img", |el| {
                        let tiny = |name: &str| el.get_attribute(name).is_some_and(|v| matches!(v.trim(), "0" | "1"));
                        let hidden = el.get_attribute("style").is_some_and(|s| HIDDEN_STYLE_RE.is_match(&s));
                        if (tiny("width") && tiny("height")) || hidden {
                            el.remove();
                        }
                        Ok(())
                    }))
                } else {
                    None
                },
            ]
            .into_iter()
            .flatten()
            .collect(),
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    if let Err(e) = rewriter.write(html.as_bytes()) {
        tracing::debug!(error = %e, "preprocessing failed; using original markup");
        return html.to_string();
    }

    if let Err(e) = rewriter.end() {
        tracing::debug!(error = %e, "preprocessing failed; using original markup");
        return html.to_string();
    }

    if output.is_empty() { html.to_string() } else { output }
}
