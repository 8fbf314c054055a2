//! Reading digest pages from files, directories and stdin.
//!
//! Archived pages are mostly UTF-8, but mail parts are sometimes written
//! through in their original single-byte charset. Undecodable bytes are
//! replaced rather than rejected, and the page is flagged as lossy.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::{DigestError, Result};

/// Archive landing page the page generator writes next to digest pages.
const INDEX_PAGE: &str = "index.html";

/// One digest page as read from disk or stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestPage {
    /// Path or `-` for stdin.
    pub name: String,
    pub html: String,
    /// Whether invalid UTF-8 was replaced while reading.
    pub lossy: bool,
}

impl DigestPage {
    /// A page from in-memory markup.
    pub fn from_html(name: impl Into<String>, html: impl Into<String>) -> Self {
        Self { name: name.into(), html: html.into(), lossy: false }
    }

    fn from_bytes(name: String, bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(html) => Self { name, html, lossy: false },
            Err(e) => {
                let html = String::from_utf8_lossy(e.as_bytes()).into_owned();
                tracing::warn!(page = %name, "page is not valid UTF-8; undecodable bytes replaced");
                Self { name, html, lossy: true }
            }
        }
    }
}

/// Reads one digest page from a local file.
pub fn read_page(path: &Path) -> Result<DigestPage> {
    if !path.exists() {
        return Err(DigestError::FileNotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok(DigestPage::from_bytes(path.display().to_string(), bytes))
}

/// Reads one digest page from standard input until EOF.
pub fn read_stdin() -> Result<DigestPage> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(DigestPage::from_bytes("-".to_string(), buffer))
}

/// Expand input paths into the list of page files to read.
///
/// Directories contribute their `*.html` files (not recursing, skipping
/// `index.html`) in name order; files are taken as given.
///
/// # Errors
///
/// [`DigestError::FileNotFound`] for a path that does not exist.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(DigestError::FileNotFound(path.clone()));
        }
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut pages: Vec<PathBuf> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_digest_page(p))
            .collect();
        pages.sort();
        tracing::debug!(dir = %path.display(), pages = pages.len(), "expanded input directory");
        files.extend(pages);
    }

    Ok(files)
}

fn is_digest_page(path: &Path) -> bool {
    let is_html = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
    let is_index = path.file_name().is_some_and(|name| name.eq_ignore_ascii_case(INDEX_PAGE));
    is_html && !is_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_page_not_found() {
        let result = read_page(Path::new("/nonexistent/path/page.html"));
        assert!(matches!(result, Err(DigestError::FileNotFound(_))));
    }

    #[test]
    fn test_read_page_lossy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.html");
        fs::write(&path, b"<p>Caf\xe9 $500,000</p>").unwrap();

        let page = read_page(&path).unwrap();
        assert!(page.lossy);
        assert!(page.html.contains("$500,000"));
        assert!(page.html.contains('\u{fffd}'));
    }

    #[test]
    fn test_read_page_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<p>$500,000</p>").unwrap();

        let page = read_page(&path).unwrap();
        assert!(!page.lossy);
        assert_eq!(page.html, "<p>$500,000</p>");
    }

    #[test]
    fn test_collect_inputs_expands_directories() {
        let dir = TempDir::new().unwrap();
        for name in ["b.html", "a.html", "index.html", "notes.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        let extra = dir.path().join("notes.txt");

        let files = collect_inputs(&[dir.path().to_path_buf(), extra.clone()]).unwrap();
        let names: Vec<_> = files.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect();

        assert_eq!(names, vec!["a.html", "b.html", "notes.txt"]);
    }

    #[test]
    fn test_collect_inputs_missing_path() {
        let result = collect_inputs(&[PathBuf::from("/nonexistent/dir")]);
        assert!(matches!(result, Err(DigestError::FileNotFound(_))));
    }
}
