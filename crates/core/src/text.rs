//! Text normalization applied before any pattern matching.
//!
//! Mail templates sprinkle zero-width joiners and non-breaking spaces
//! between tokens ("3\u{200c}bd", "Seattle,\u{a0}WA"). Every recognizer
//! sees text only after it has been through [`clean_text`].

/// Characters removed outright.
const INVISIBLE: &[char] = &['\u{200b}', '\u{200c}', '\u{200d}', '\u{2060}', '\u{feff}', '\u{ad}'];

/// Strip invisible characters, turn non-breaking spaces into plain spaces
/// and collapse every whitespace run to a single space.
///
/// ```rust
/// use homedigest_core::clean_text;
///
/// assert_eq!(clean_text("  3\u{a0}bd \n 2\u{200b} ba "), "3 bd 2 ba");
/// ```
pub fn clean_text(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if INVISIBLE.contains(&ch) {
            continue;
        }
        if ch == '\u{a0}' || ch.is_whitespace() {
            pending_space = !output.is_empty();
            continue;
        }
        if pending_space {
            output.push(' ');
            pending_space = false;
        }
        output.push(ch);
    }

    output
}

/// First `max_chars` characters of `text`, never splitting a character.
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_text("  Hello   World  "), "Hello World");
        assert_eq!(clean_text("line\n\tbreak"), "line break");
    }

    #[test]
    fn test_removes_zero_width() {
        assert_eq!(clean_text("No\u{200b}Space"), "NoSpace");
        assert_eq!(clean_text("Zero\u{200c}Joiner\u{feff}"), "ZeroJoiner");
    }

    #[test]
    fn test_non_breaking_space() {
        assert_eq!(clean_text("Non\u{a0}Breaking\u{a0}Space"), "Non Breaking Space");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \u{200b} "), "");
    }

    #[test]
    fn test_idempotent() {
        let once = clean_text(" a \u{a0} b\u{200d}c ");
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn test_take_chars_boundary() {
        assert_eq!(take_chars("héllo", 2), "hé");
        assert_eq!(take_chars("abc", 10), "abc");
        assert_eq!(take_chars("abc", 0), "");
    }
}
