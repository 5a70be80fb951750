//! Core types shared across salvage modules

use serde::Serialize;
use std::path::PathBuf;

/// Events emitted during an extraction run
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// Intake has started
    StartScanning,
    /// Number of files accepted for extraction
    FilesFound(usize),
    /// A file was turned away by intake limits
    FileRejected(PathBuf, String),
    /// A file has been processed
    FileProcessed(PathBuf),
    /// Token count update
    TokenCountUpdate(usize),
    /// Run complete with message
    Complete(String),
    /// Error occurred
    Error(String),
}

/// One of the extraction heuristics. Declaration order is the tie-break
/// order used by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Permissive decode of the whole buffer, keeping long printable lines
    WideDecode,
    /// Printable byte runs from the head of the buffer
    PrintableRun,
    /// Printable bytes between `BT` / `ET` text-block markers
    MarkedTextRun,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::WideDecode,
        Strategy::PrintableRun,
        Strategy::MarkedTextRun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::WideDecode => "wide_decode",
            Strategy::PrintableRun => "printable_run",
            Strategy::MarkedTextRun => "marked_text_run",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File metadata carried alongside the raw bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub name: String,
    /// Declared size in bytes, when the intake layer knows it
    pub size: Option<u64>,
    pub media_type: String,
}

impl DocumentInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            media_type: "application/octet-stream".to_string(),
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }
}

/// Borrowed file contents plus metadata. The core only reads it.
#[derive(Debug, Clone, Copy)]
pub struct RawDocument<'a> {
    pub bytes: &'a [u8],
    pub info: &'a DocumentInfo,
}

impl<'a> RawDocument<'a> {
    pub fn new(bytes: &'a [u8], info: &'a DocumentInfo) -> Self {
        Self { bytes, info }
    }
}

/// Output of one strategy on one buffer.
///
/// `text` is always empty when `success` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionAttempt {
    pub strategy: Strategy,
    pub text: String,
    pub success: bool,
}

impl ExtractionAttempt {
    pub fn succeeded(strategy: Strategy, text: String) -> Self {
        Self {
            strategy,
            text,
            success: true,
        }
    }

    pub fn failed(strategy: Strategy) -> Self {
        Self {
            strategy,
            text: String::new(),
            success: false,
        }
    }

    /// Score used by the selector: character count, zero on failure.
    pub fn score(&self) -> usize {
        if self.success {
            self.text.chars().count()
        } else {
            0
        }
    }
}

/// Winner of a selection round.
///
/// When nothing usable came back, `winner` is `None` and `text` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOutcome {
    pub winner: Option<Strategy>,
    pub text: String,
    pub attempts: Vec<ExtractionAttempt>,
}

impl SelectionOutcome {
    pub fn none(attempts: Vec<ExtractionAttempt>) -> Self {
        Self {
            winner: None,
            text: String::new(),
            attempts,
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Cheap "is this a text-bearing document" pre-check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SniffVerdict {
    pub looks_like_document: bool,
    pub has_early_text: bool,
}

impl SniffVerdict {
    pub fn is_text_document(&self) -> bool {
        self.looks_like_document && self.has_early_text
    }
}

/// How intake routes a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Read as UTF-8 text and truncated
    PlainText,
    /// Run through the recovery strategies
    Document,
}

/// Final result for one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub info: DocumentInfo,
    pub kind: DocumentKind,
    pub winner: Option<Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sniff: Option<SniffVerdict>,
    pub report: String,
}
