use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use salvage::config::OutputFormat;
use salvage::core::sniff_path;
use salvage::{SalvageConfig, run};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Plain,
    Md,
    Json,
    Xml,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Plain => OutputFormat::Plain,
            CliOutputFormat::Md => OutputFormat::Markdown,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Xml => OutputFormat::Xml,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Recover readable text from PDFs and other binary documents", long_about = None)]
struct Args {
    /// Files or directories to extract from
    paths: Vec<PathBuf>,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Add ignore pattern (glob) for directory inputs
    #[arg(long)]
    ignore: Vec<String>,

    /// Maximum number of files per run
    #[arg(long)]
    max_files: Option<usize>,

    /// Maximum file size in bytes (larger files are skipped)
    #[arg(long)]
    max_size: Option<u64>,

    /// Run extraction strategies one after another instead of concurrently
    #[arg(long)]
    sequential: bool,

    /// Attach the document signature check to each report
    #[arg(long)]
    sniff: bool,

    /// Only print the signature check for each path and exit
    #[arg(long)]
    sniff_only: bool,

    /// Disable token counting
    #[arg(long)]
    no_tokens: bool,

    /// Copy output to clipboard
    #[arg(short, long)]
    copy: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Question to append after the context block
    #[arg(long)]
    prompt: Option<String>,

    /// Read the question from a file
    #[arg(long)]
    prompt_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load from file or default
    let mut config = SalvageConfig::load_from_file().unwrap_or_default();

    // 2. Override with CLI args
    if !args.paths.is_empty() {
        config.inputs = args.paths;
    }
    if let Some(o) = args.output {
        config.output = Some(o);
    }
    if let Some(f) = args.format {
        config.output_format = f.into();
    }
    if !args.ignore.is_empty() {
        // CLI ignores ADD to config ignores
        config.ignore_patterns.extend(args.ignore);
    }
    if let Some(n) = args.max_files {
        config.max_files = n;
    }
    if let Some(s) = args.max_size {
        config.max_file_size = s;
    }
    if args.sequential {
        config.parallel = false;
    }
    if args.sniff {
        config.sniff = true;
    }
    if args.no_tokens {
        config.no_tokens = true;
    }
    if args.copy {
        config.clipboard_copy = true;
    }
    if args.verbose {
        config.verbose = true;
    }

    if let Some(p) = args.prompt {
        config.prompt = Some(p);
    } else if let Some(path) = args.prompt_file {
        let prompt = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read prompt file: {:?}", path))?;
        config.prompt = Some(prompt.trim_end().to_string());
    }

    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if args.sniff_only {
        for path in &config.inputs {
            let verdict = sniff_path(path);
            println!(
                "{}\tsignature={}\tearly_text={}\ttext_document={}",
                path.display(),
                verdict.looks_like_document,
                verdict.has_early_text,
                verdict.is_text_document()
            );
        }
        return Ok(());
    }

    run(config)
}
