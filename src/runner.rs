use crate::config::SalvageConfig;
use crate::core::{
    DocumentInfo, DocumentKind, FileReport, RawDocument, ScanEvent, salvage_bytes, sniff,
};
use crate::core::pipeline::display_name;
use crate::format::report::{format_plain_text, format_read_error};
use crate::format::{HeaderContext, create_formatter};
use crate::fs::{InputFile, RejectReason, collect_inputs, media_type_for, route};
use crate::utils::clipboard::copy_to_clipboard;
use crate::utils::tokens::count_or_estimate;
use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use rayon::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    pub rejected: Vec<(PathBuf, RejectReason)>,
    pub token_count: Option<usize>,
    /// The assembled context exactly as written
    pub output: String,
}

fn notify(tx: &Option<Sender<ScanEvent>>, event: ScanEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event);
    }
}

/// Main entry point in CLI mode.
///
/// Runs the extraction on a background thread and consumes its events on
/// the calling thread, logging progress as it arrives.
pub fn run(config: SalvageConfig) -> Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded();

    let config_clone = config.clone();
    let worker = std::thread::spawn(move || {
        if let Err(e) = run_extraction(config_clone, Some(tx.clone())) {
            let _ = tx.send(ScanEvent::Error(format!("{:#}", e)));
        }
    });

    let mut failure = None;
    for event in rx {
        match event {
            ScanEvent::StartScanning => debug!("Collecting inputs..."),
            ScanEvent::FilesFound(n) => info!("Found {} files.", n),
            ScanEvent::FileRejected(p, reason) => warn!("Skipped {:?}: {}", p, reason),
            ScanEvent::FileProcessed(p) => debug!("Processed: {:?}", p),
            ScanEvent::TokenCountUpdate(t) => info!("Total tokens: {}", t),
            ScanEvent::Complete(msg) => info!("{}", msg),
            ScanEvent::Error(e) => {
                error!("{}", e);
                failure = Some(e);
            }
        }
    }

    worker
        .join()
        .map_err(|_| anyhow::anyhow!("extraction thread panicked"))?;

    match failure {
        Some(e) => anyhow::bail!(e),
        None => Ok(()),
    }
}

/// Reads one accepted file and renders its report. Never fails: a read
/// error becomes a read-error report.
pub fn process_file(file: &InputFile, config: &SalvageConfig) -> FileReport {
    let name = display_name(&file.path);
    let mut info = DocumentInfo::new(name.as_str())
        .with_size(file.size)
        .with_media_type(media_type_for(&file.path));

    let bytes = match std::fs::read(&file.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %file.path.display(), error = %e, "failed to read input");
            return FileReport {
                path: file.path.clone(),
                kind: route(&file.path, &[]),
                info,
                winner: None,
                sniff: None,
                report: format_read_error(&name, &e),
            };
        }
    };
    info.size = Some(bytes.len() as u64);

    let kind = route(&file.path, &bytes);
    let (report, winner) = match kind {
        DocumentKind::PlainText => (
            format_plain_text(&name, &String::from_utf8_lossy(&bytes)),
            None,
        ),
        DocumentKind::Document => {
            let salvage = salvage_bytes(RawDocument::new(&bytes, &info), config.parallel);
            (salvage.report, salvage.winner)
        }
    };

    FileReport {
        path: file.path.clone(),
        info,
        kind,
        winner,
        sniff: config.sniff.then(|| sniff(&bytes)),
        report,
    }
}

/// Renders the context block for a finished set of reports.
pub fn render(
    config: &SalvageConfig,
    reports: &[FileReport],
    rejected: &[(PathBuf, RejectReason)],
    token_count: Option<usize>,
) -> Result<String> {
    let context = HeaderContext {
        prompt: config.prompt.as_deref(),
        token_count,
        file_count: reports.len(),
    };

    let mut buffer = Vec::new();
    let mut formatter = create_formatter(config.output_format);
    formatter.write_header(&mut buffer, &context)?;
    for report in reports {
        formatter.write_document(&mut buffer, report)?;
    }
    formatter.write_footer(&mut buffer, &context, rejected)?;

    String::from_utf8(buffer).context("formatter produced invalid UTF-8")
}

/// Collects inputs, extracts every accepted file and writes the context.
pub fn run_extraction(config: SalvageConfig, tx: Option<Sender<ScanEvent>>) -> Result<RunSummary> {
    config.validate()?;
    notify(&tx, ScanEvent::StartScanning);

    let intake = collect_inputs(&config).context("Failed to collect inputs")?;
    notify(&tx, ScanEvent::FilesFound(intake.accepted.len()));
    for (path, reason) in &intake.rejected {
        notify(&tx, ScanEvent::FileRejected(path.clone(), reason.to_string()));
    }

    // Order follows intake regardless of which file finishes first
    let reports: Vec<FileReport> = intake
        .accepted
        .par_iter()
        .map(|file| {
            let report = process_file(file, &config);
            notify(&tx, ScanEvent::FileProcessed(file.path.clone()));
            report
        })
        .collect();

    let token_count = if config.no_tokens {
        None
    } else {
        let total = reports.iter().map(|r| count_or_estimate(&r.report)).sum();
        notify(&tx, ScanEvent::TokenCountUpdate(total));
        Some(total)
    };

    let output = render(&config, &reports, &intake.rejected, token_count)?;

    match &config.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write output: {:?}", path))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }

    if config.clipboard_copy {
        if let Err(e) = copy_to_clipboard(&output) {
            notify(&tx, ScanEvent::Error(format!("{:#}", e)));
        }
    }

    let destination = config
        .output
        .as_ref()
        .map(|p| format!("{:?}", p))
        .unwrap_or_else(|| "stdout".to_string());
    notify(
        &tx,
        ScanEvent::Complete(format!(
            "Extracted {} files, written to {}",
            reports.len(),
            destination
        )),
    );

    Ok(RunSummary {
        reports,
        rejected: intake.rejected,
        token_count,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_process_file_routes_plain_text() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("notes.md");
        fs::write(&path, "# Notes\nSome markdown content")?;

        let file = InputFile { path, size: 0 };
        let report = process_file(&file, &SalvageConfig::default());

        assert_eq!(report.kind, DocumentKind::PlainText);
        assert_eq!(report.info.size, Some(29));
        assert!(report.report.starts_with("Text file \"notes.md\":\n# Notes"));
        Ok(())
    }

    #[test]
    fn test_process_file_unreadable() {
        let file = InputFile {
            path: PathBuf::from("/nonexistent/gone.pdf"),
            size: 10,
        };
        let report = process_file(&file, &SalvageConfig::default());
        assert!(report.report.contains("Status: read error"));
        assert_eq!(report.kind, DocumentKind::Document);
    }

    #[test]
    fn test_run_extraction_summary() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "alpha")?;
        let output = root.join("out.json");

        let config = SalvageConfig {
            inputs: vec![root.join("a.txt")],
            output: Some(output.clone()),
            output_format: OutputFormat::Json,
            no_tokens: true,
            ..Default::default()
        };
        let summary = run_extraction(config, None)?;

        assert_eq!(summary.reports.len(), 1);
        assert_eq!(summary.token_count, None);
        assert_eq!(fs::read_to_string(output)?, summary.output);
        Ok(())
    }
}
