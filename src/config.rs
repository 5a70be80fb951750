use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the optional config file read from the working directory
pub const CONFIG_FILE: &str = "salvage.toml";

/// Observed limits of the upload layer this tool stands in for
pub const DEFAULT_MAX_FILES: usize = 5;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Output format for the assembled context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Markdown,
    Json,
    Xml,
}

/// Main configuration for salvage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SalvageConfig {
    /// Files or directories to extract from
    pub inputs: Vec<PathBuf>,
    /// Output file; stdout when unset
    pub output: Option<PathBuf>,
    /// Output format (Plain, Markdown, JSON, XML)
    pub output_format: OutputFormat,
    /// Glob patterns to skip while walking directories (e.g. "*.log")
    pub ignore_patterns: Vec<String>,
    /// Maximum number of files taken per run; the rest are rejected
    pub max_files: usize,
    /// Files larger than this many bytes are rejected
    pub max_file_size: u64,
    /// Run the extraction strategies concurrently
    pub parallel: bool,
    /// Attach the document sniff verdict to each report
    pub sniff: bool,
    /// If true, skip token counting (faster)
    pub no_tokens: bool,
    /// If true, copy output to system clipboard
    pub clipboard_copy: bool,
    /// Enable debug logging
    pub verbose: bool,
    /// Question or instruction appended after the context block
    pub prompt: Option<String>,
}

impl SalvageConfig {
    /// Validates the configuration before a run.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.inputs.is_empty() {
            anyhow::bail!("No input files given");
        }
        if self.max_files == 0 {
            anyhow::bail!("max_files must be at least 1");
        }
        if self.max_file_size == 0 {
            anyhow::bail!("max_file_size must be greater than zero");
        }
        Ok(())
    }

    /// Attempts to load configuration from `salvage.toml` in the current directory.
    pub fn load_from_file() -> Option<Self> {
        std::fs::read_to_string(CONFIG_FILE)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok())
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl Default for SalvageConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            output_format: OutputFormat::Plain,
            ignore_patterns: vec![".git".to_string(), "node_modules".to_string()],
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            parallel: true,
            sniff: false,
            no_tokens: false,
            clipboard_copy: false,
            verbose: false,
            prompt: None,
        }
    }
}
