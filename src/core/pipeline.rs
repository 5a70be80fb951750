//! Read → extract → select → format, for one file.
//!
//! Total: every input, including unreadable paths and empty files, ends in
//! a formatted report string.

use crate::core::selector::{pick_longest, run_attempts};
use crate::core::{DocumentInfo, RawDocument, Strategy};
use crate::format::report::{ReportStatus, format_read_error, format_report, status_of};
use std::path::Path;
use tracing::trace;

/// Stages of a single extraction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Reading,
    ReadFailed,
    Extracting,
    Selecting,
    Formatting,
    Done,
}

/// Result of one extraction call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salvage {
    pub report: String,
    pub winner: Option<Strategy>,
    pub status: ReportStatus,
    /// Last stage reached; `Done` unless the read failed.
    pub stage: Stage,
}

fn enter(name: &str, stage: Stage) -> Stage {
    trace!(document = name, ?stage, "stage");
    stage
}

/// Runs extraction on bytes already in memory.
pub fn salvage_bytes(doc: RawDocument<'_>, parallel: bool) -> Salvage {
    let name = doc.info.name.as_str();
    enter(name, Stage::Extracting);
    let attempts = run_attempts(doc.bytes, parallel);

    enter(name, Stage::Selecting);
    let outcome = pick_longest(attempts);

    enter(name, Stage::Formatting);
    let report = format_report(doc.info, &outcome);

    Salvage {
        report,
        winner: outcome.winner,
        status: status_of(&outcome),
        stage: enter(name, Stage::Done),
    }
}

/// Reads `path` once and runs extraction on it. A failed read goes straight
/// to the read-error report without running any strategy.
pub fn salvage_path(path: &Path, parallel: bool) -> Salvage {
    let name = display_name(path);
    enter(&name, Stage::Idle);
    enter(&name, Stage::Reading);

    match std::fs::read(path) {
        Ok(bytes) => {
            let info = DocumentInfo::new(name)
                .with_size(bytes.len() as u64)
                .with_media_type(crate::fs::media_type_for(path));
            salvage_bytes(RawDocument::new(&bytes, &info), parallel)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read input");
            Salvage {
                report: format_read_error(&name, &e),
                winner: None,
                status: ReportStatus::ReadError,
                stage: enter(&name, Stage::ReadFailed),
            }
        }
    }
}

/// File name shown in reports, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
