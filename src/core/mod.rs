//! Core text-recovery engine
//!
//! Strategies, selection, sniffing and the per-file pipeline. Nothing in
//! here returns an error to its caller.

pub mod pipeline;
pub mod selector;
pub mod sniff;
pub mod strategy;
mod types;

pub use pipeline::{Salvage, Stage, salvage_bytes, salvage_path};
pub use selector::{select, select_with};
pub use sniff::{sniff, sniff_path};
pub use types::*;
