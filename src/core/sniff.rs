//! Signature and early-text sniffing on a small prefix.
//!
//! Advisory only: the verdict is shown to the user and never feeds back
//! into extraction.

use crate::core::SniffVerdict;
use crate::utils::bytes::{is_ascii_letter, scan_window};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub const SNIFF_PREFIX_LEN: usize = 1_000;
pub const SIGNATURE_WINDOW: usize = 10;
pub const DOCUMENT_SIGNATURE: &str = "%PDF";

pub fn sniff(bytes: &[u8]) -> SniffVerdict {
    let prefix = scan_window(bytes, SNIFF_PREFIX_LEN);
    let header: String = scan_window(prefix, SIGNATURE_WINDOW)
        .iter()
        .copied()
        .map(char::from)
        .collect();

    SniffVerdict {
        looks_like_document: header.contains(DOCUMENT_SIGNATURE),
        has_early_text: prefix.iter().copied().any(is_ascii_letter),
    }
}

/// Reads at most the sniff prefix from disk. Any read failure yields the
/// all-false verdict.
pub fn sniff_path(path: &Path) -> SniffVerdict {
    match read_prefix(path) {
        Ok(prefix) => sniff(&prefix),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "sniff read failed");
            SniffVerdict::default()
        }
    }
}

fn read_prefix(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut prefix = Vec::with_capacity(SNIFF_PREFIX_LEN);
    File::open(path)?
        .take(SNIFF_PREFIX_LEN as u64)
        .read_to_end(&mut prefix)?;
    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_with_text() {
        let verdict = sniff(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n1 0 obj << /Type /Catalog >>");
        assert!(verdict.looks_like_document);
        assert!(verdict.has_early_text);
        assert!(verdict.is_text_document());
    }

    #[test]
    fn test_signature_must_be_near_start() {
        let verdict = sniff(b"garbage!!!%PDF-1.4");
        assert!(!verdict.looks_like_document);
        assert!(verdict.has_early_text);
    }

    #[test]
    fn test_letters_past_prefix_do_not_count() {
        let mut bytes = vec![0u8; SNIFF_PREFIX_LEN];
        bytes.extend_from_slice(b"late text");
        let verdict = sniff(&bytes);
        assert_eq!(verdict, SniffVerdict::default());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sniff(&[]), SniffVerdict::default());
    }

    #[test]
    fn test_missing_file_is_all_false() {
        let verdict = sniff_path(Path::new("/nonexistent/file.pdf"));
        assert_eq!(verdict, SniffVerdict::default());
    }
}
