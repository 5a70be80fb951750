//! Byte-level text recovery heuristics.
//!
//! Each strategy is a pure function of the input buffer. None of them
//! parses the document structure: they look for printable bytes in
//! different ways and let the selector keep whichever found the most.

use crate::core::{ExtractionAttempt, Strategy};
use crate::error::StrategyError;
use crate::utils::bytes::{
    char_prefix, find_pair, is_line_break, is_printable_ascii, is_text_byte, scan_window,
};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::panic::{self, UnwindSafe};
use tracing::{debug, warn};

/// Lines at or below this many characters (after trimming) are dropped.
pub const WIDE_MIN_LINE_CHARS: usize = 20;
pub const WIDE_MAX_LINES: usize = 50;

pub const PRINTABLE_SCAN_LIMIT: usize = 200_000;

pub const MARKED_SCAN_LIMIT: usize = 100_000;
/// Chunks at or below this many characters are dropped.
pub const MARKED_MIN_CHUNK_CHARS: usize = 10;
pub const MARKED_MAX_CHARS: usize = 5_000;

pub const BEGIN_TEXT: [u8; 2] = *b"BT";
pub const END_TEXT: [u8; 2] = *b"ET";

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    // Three or more lone word characters separated by single spaces: "T o t a l"
    static ref LETTER_SPACED: Regex = Regex::new(r"\b\w\b(?: \w\b){2,}").unwrap();
}

impl Strategy {
    /// Runs the heuristic. Total on any input, including empty buffers.
    pub fn extract(&self, bytes: &[u8]) -> String {
        match self {
            Strategy::WideDecode => wide_decode(bytes),
            Strategy::PrintableRun => printable_run(bytes),
            Strategy::MarkedTextRun => marked_text_run(bytes),
        }
    }

    /// Runs the heuristic and folds any failure into an unsuccessful attempt.
    pub fn attempt(&self, bytes: &[u8]) -> ExtractionAttempt {
        let strategy = *self;
        guarded(strategy, move || strategy.extract(bytes))
    }
}

pub(crate) fn guarded<F>(strategy: Strategy, run: F) -> ExtractionAttempt
where
    F: FnOnce() -> String + UnwindSafe,
{
    match panic::catch_unwind(run) {
        Ok(text) => {
            debug!(%strategy, chars = text.chars().count(), "strategy finished");
            ExtractionAttempt::succeeded(strategy, text)
        }
        Err(payload) => {
            let err = StrategyError::Panicked(panic_message(&*payload));
            warn!(%strategy, error = %err, "strategy failed, continuing without it");
            ExtractionAttempt::failed(strategy)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Lossy-decodes the whole buffer, blanks everything that is not printable
/// ASCII or a line/tab control, and keeps the first long lines.
fn wide_decode(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let cleaned: String = decoded
        .chars()
        .map(|c| {
            if c.is_ascii() && is_text_byte(c as u8) {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split('\n')
        .filter(|line| line.trim().chars().count() > WIDE_MIN_LINE_CHARS)
        .take(WIDE_MAX_LINES)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Linear scan of the head of the buffer, turning every non-printable run
/// into a single separator.
fn printable_run(bytes: &[u8]) -> String {
    let window = scan_window(bytes, PRINTABLE_SCAN_LIMIT);
    let mut raw = String::with_capacity(window.len());

    for &byte in window {
        if is_printable_ascii(byte) || is_line_break(byte) {
            raw.push(char::from(byte));
        } else if byte == b'\t' {
            raw.push(' ');
        } else if !raw.is_empty() && !raw.ends_with(' ') {
            raw.push(' ');
        }
    }

    let collapsed = WHITESPACE_RUN.replace_all(&raw, " ");
    let joined = LETTER_SPACED.replace_all(&collapsed, |caps: &Captures| caps[0].replace(' ', ""));
    joined.trim().to_string()
}

/// Collects printable bytes between `BT` and `ET` markers in the head of the
/// buffer. A block still open at the window edge is dropped.
fn marked_text_run(bytes: &[u8]) -> String {
    let window = scan_window(bytes, MARKED_SCAN_LIMIT);
    let mut chunks: Vec<String> = Vec::new();
    let mut total = 0usize;
    let mut cursor = 0usize;

    while let Some(begin) = find_pair(window, cursor, BEGIN_TEXT) {
        let body_start = begin + BEGIN_TEXT.len();
        let Some(end) = find_pair(window, body_start, END_TEXT) else {
            debug!(offset = begin, "unterminated text block at scan limit, dropped");
            break;
        };

        let chunk: String = window[body_start..end]
            .iter()
            .copied()
            .filter(|b| is_printable_ascii(*b))
            .map(char::from)
            .collect();

        if chunk.len() > MARKED_MIN_CHUNK_CHARS {
            total += chunk.len() + 1;
            chunks.push(chunk);
        }
        if total > MARKED_MAX_CHARS {
            break;
        }
        cursor = end + END_TEXT.len();
    }

    let joined = chunks.join(" ");
    char_prefix(&joined, MARKED_MAX_CHARS).to_string()
}
