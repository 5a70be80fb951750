//! Error types for salvage.
//!
//! The extraction core never hands these to its caller: strategy errors are
//! folded into failed attempts and unreadable files into a read-error
//! report. Only intake surfaces errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting and reading input files.
#[derive(Error, Debug)]
pub enum SalvageError {
    /// Input path does not exist
    #[error("input not found: {0:?}")]
    NotFound(PathBuf),

    /// Directory walk failed
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Failure of a single extraction heuristic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("strategy panicked: {0}")]
    Panicked(String),
}
