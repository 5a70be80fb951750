pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod fs;
pub mod runner;
pub mod utils;

// Re-export key items for convenience
pub use config::{OutputFormat, SalvageConfig};
pub use self::core::{
    DocumentInfo, ExtractionAttempt, FileReport, RawDocument, Salvage, ScanEvent,
    SelectionOutcome, SniffVerdict, Strategy, salvage_bytes, salvage_path, select, sniff,
};
pub use error::{SalvageError, StrategyError};
pub use runner::{RunSummary, run, run_extraction};
