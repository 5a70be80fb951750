//! Input intake: collects files, applies the upload limits and decides how
//! each file is read.

use crate::config::SalvageConfig;
use crate::core::DocumentKind;
use crate::error::SalvageError;
use crate::utils::binary::is_binary;
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions read as plain UTF-8 text instead of going through recovery
pub const PLAIN_TEXT_EXTENSIONS: &[&str] = &["txt", "md", "json"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    TooManyFiles { limit: usize },
    TooLarge { size: u64, limit: u64 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TooManyFiles { limit } => {
                write!(f, "file limit reached (max {} files)", limit)
            }
            RejectReason::TooLarge { size, limit } => {
                write!(f, "file too large ({} bytes, max {})", size, limit)
            }
        }
    }
}

/// Files accepted for extraction and files turned away
#[derive(Debug, Clone, Default)]
pub struct Intake {
    pub accepted: Vec<InputFile>,
    pub rejected: Vec<(PathBuf, RejectReason)>,
}

pub fn walk_directory(path: &Path, ignore_patterns: &[String]) -> Result<Vec<PathBuf>, SalvageError> {
    let mut builder = WalkBuilder::new(path);

    // In the override builder "!glob" means ignore
    let mut override_builder = ignore::overrides::OverrideBuilder::new(path);
    for pattern in ignore_patterns {
        override_builder.add(&format!("!{}", pattern))?;
    }
    builder.overrides(override_builder.build()?);
    builder.standard_filters(true);

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => warn!("Error walking directory: {}", err),
        }
    }

    files.sort();
    Ok(files)
}

/// Expands the configured inputs and applies the size and count limits.
///
/// Oversized files are rejected first; the count limit then keeps the first
/// `max_files` of what is left, in input order.
pub fn collect_inputs(config: &SalvageConfig) -> Result<Intake, SalvageError> {
    let mut candidates = Vec::new();
    let mut seen = HashSet::new();

    for input in &config.inputs {
        let paths = if input.is_dir() {
            walk_directory(input, &config.ignore_patterns)?
        } else if input.exists() {
            vec![input.clone()]
        } else {
            return Err(SalvageError::NotFound(input.clone()));
        };
        for path in paths {
            if seen.insert(path.clone()) {
                candidates.push(path);
            }
        }
    }

    let mut intake = Intake::default();
    for path in candidates {
        // Unknown size is let through; the read itself reports the failure.
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        if size > config.max_file_size {
            intake.rejected.push((
                path,
                RejectReason::TooLarge {
                    size,
                    limit: config.max_file_size,
                },
            ));
        } else if intake.accepted.len() >= config.max_files {
            intake.rejected.push((
                path,
                RejectReason::TooManyFiles {
                    limit: config.max_files,
                },
            ));
        } else {
            intake.accepted.push(InputFile { path, size });
        }
    }

    debug!(
        accepted = intake.accepted.len(),
        rejected = intake.rejected.len(),
        "intake complete"
    );
    Ok(intake)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// Plain-text extensions are read directly, `.pdf` always goes through
/// recovery, and anything else is judged by its content.
pub fn route(path: &Path, bytes: &[u8]) -> DocumentKind {
    match extension(path) {
        Some(ext) if PLAIN_TEXT_EXTENSIONS.contains(&ext.as_str()) => DocumentKind::PlainText,
        Some(ext) if ext == "pdf" => DocumentKind::Document,
        _ if is_binary(bytes) => DocumentKind::Document,
        _ => DocumentKind::PlainText,
    }
}

/// Declared media type, from the extension alone.
pub fn media_type_for(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
