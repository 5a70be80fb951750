//! Utility modules for salvage
//!
//! - `bytes` / `binary` - byte classification and bounded scans
//! - `tokens` - token counting for the assembled context
//! - `clipboard` - system clipboard output

pub mod binary;
pub mod bytes;
pub mod clipboard;
pub mod tokens;
