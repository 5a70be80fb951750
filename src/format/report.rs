//! Per-file report text.
//!
//! Every path through the pipeline ends in one of these strings: recovered
//! text, the "no usable text" notice, or a read error.

use crate::core::{DocumentInfo, SelectionOutcome};
use crate::utils::bytes::char_prefix;
use std::borrow::Cow;

/// Recovered text budget per report.
pub const MAX_REPORT_CHARS: usize = 5_000;
/// Anything shorter is treated as noise rather than content.
pub const MIN_USABLE_CHARS: usize = 50;
pub const TRUNCATION_MARKER: &str = "\n\n[Text truncated]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    TextRecovered,
    NoTextFound,
    ReadError,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::TextRecovered => "text recovered",
            ReportStatus::NoTextFound => "no text found",
            ReportStatus::ReadError => "read error",
        }
    }
}

/// Cuts `text` to `max_chars` characters and appends the truncation marker
/// when anything was cut.
pub fn truncate_with_marker(text: &str, max_chars: usize) -> Cow<'_, str> {
    let prefix = char_prefix(text, max_chars);
    if prefix.len() == text.len() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{}{}", prefix, TRUNCATION_MARKER))
    }
}

fn header(name: &str, size: Option<u64>, status: ReportStatus) -> String {
    let mut out = format!("Document: {}\n", name);
    if let Some(bytes) = size {
        out.push_str(&format!("Size: {:.1} KB\n", bytes as f64 / 1024.0));
    }
    out.push_str(&format!("Status: {}\n", status.as_str()));
    out
}

/// Status implied by an outcome.
pub fn status_of(outcome: &SelectionOutcome) -> ReportStatus {
    if outcome.char_count() < MIN_USABLE_CHARS {
        ReportStatus::NoTextFound
    } else {
        ReportStatus::TextRecovered
    }
}

/// Renders the report for a completed selection.
pub fn format_report(info: &DocumentInfo, outcome: &SelectionOutcome) -> String {
    let status = status_of(outcome);
    let mut out = header(&info.name, info.size, status);
    out.push('\n');

    match status {
        ReportStatus::TextRecovered => {
            out.push_str(&truncate_with_marker(&outcome.text, MAX_REPORT_CHARS));
        }
        _ => {
            out.push_str(
                "No usable text was recovered; the file most likely contains only scanned images.\n\n",
            );
            out.push_str("Suggestions:\n");
            out.push_str("1. Use an OCR-processed version of the document\n");
            out.push_str("2. Convert the document to plain text with an external tool\n");
            out.push_str("3. Copy the text out of the document manually");
        }
    }
    out
}

/// Renders the report for a file whose bytes could not be read.
pub fn format_read_error(name: &str, error: &std::io::Error) -> String {
    let mut out = header(name, None, ReportStatus::ReadError);
    out.push('\n');
    out.push_str(&format!("The file could not be read: {}", error));
    out
}

/// Renders a plain-text file (.txt, .md, .json) read without recovery.
pub fn format_plain_text(name: &str, content: &str) -> String {
    format!(
        "Text file \"{}\":\n{}",
        name,
        truncate_with_marker(content, MAX_REPORT_CHARS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Strategy;

    fn outcome(text: &str) -> SelectionOutcome {
        SelectionOutcome {
            winner: Some(Strategy::PrintableRun),
            text: text.to_string(),
            attempts: Vec::new(),
        }
    }

    #[test]
    fn test_short_text_falls_back() {
        let info = DocumentInfo::new("scan.pdf");
        let report = format_report(&info, &outcome("only a fragment"));
        assert!(report.starts_with("Document: scan.pdf\n"));
        assert!(report.contains("Status: no text found"));
        assert!(report.contains("OCR"));
        assert!(!report.contains("only a fragment"));
    }

    #[test]
    fn test_recovered_text_is_included() {
        let info = DocumentInfo::new("q3.pdf").with_size(2048);
        let text = "The quarterly report shows revenue growth in every single region.";
        let report = format_report(&info, &outcome(text));
        assert!(report.contains("Size: 2.0 KB"));
        assert!(report.contains("Status: text recovered"));
        assert!(report.ends_with(text));
    }

    #[test]
    fn test_long_text_is_truncated() {
        let info = DocumentInfo::new("big.pdf");
        let text = "x".repeat(MAX_REPORT_CHARS + 10);
        let report = format_report(&info, &outcome(&text));
        assert!(report.ends_with(TRUNCATION_MARKER));
        let body = report.split("\n\n").nth(1).unwrap();
        assert_eq!(body.chars().count(), MAX_REPORT_CHARS);
    }

    #[test]
    fn test_exact_budget_is_not_marked() {
        let text = "y".repeat(MAX_REPORT_CHARS);
        assert!(matches!(
            truncate_with_marker(&text, MAX_REPORT_CHARS),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_read_error_names_file() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let report = format_read_error("locked.pdf", &err);
        assert!(report.contains("Document: locked.pdf"));
        assert!(report.contains("Status: read error"));
    }

    #[test]
    fn test_plain_text_truncation() {
        let report = format_plain_text("notes.md", &"z".repeat(6_000));
        assert!(report.starts_with("Text file \"notes.md\":\n"));
        assert!(report.ends_with(TRUNCATION_MARKER));
    }
}
