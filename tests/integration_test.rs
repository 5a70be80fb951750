use salvage::{OutputFormat, SalvageConfig, run, run_extraction};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_fixtures(root: &Path) -> anyhow::Result<()> {
    let mut pdf = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n".to_vec();
    pdf.extend_from_slice(b"BT /F1 11 Tf (The board approved the annual budget for the new plant) Tj ET\n");
    pdf.extend(vec![0u8; 512]);
    fs::write(root.join("budget.pdf"), pdf)?;

    let mut scan = b"%PDF-1.5\n".to_vec();
    scan.extend(vec![0u8; 4_096]);
    fs::write(root.join("scan.pdf"), scan)?;

    fs::write(root.join("notes.txt"), "Meeting notes: ship it on Friday.")?;
    Ok(())
}

#[test]
fn test_end_to_end_plain_context() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    write_fixtures(root)?;

    let output_path = root.join("context.txt");
    let config = SalvageConfig {
        inputs: vec![
            root.join("budget.pdf"),
            root.join("scan.pdf"),
            root.join("notes.txt"),
        ],
        output: Some(output_path.clone()),
        no_tokens: true,
        verbose: true,
        prompt: Some("What was approved?".to_string()),
        ..Default::default()
    };

    run(config)?;

    let content = fs::read_to_string(output_path)?;
    assert!(content.starts_with("Context from files:\n"));
    assert!(content.contains("Document: budget.pdf"));
    assert!(content.contains("The board approved the annual budget for the new plant"));
    assert!(content.contains("Document: scan.pdf"));
    assert!(content.contains("Status: no text found"));
    assert!(content.contains("Text file \"notes.txt\":\nMeeting notes: ship it on Friday."));
    assert!(content.trim_end().ends_with("Question: What was approved?"));

    Ok(())
}

#[test]
fn test_file_limit_rejects_extra_inputs() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    for i in 0..7 {
        fs::write(root.join(format!("doc_{}.txt", i)), format!("document {}", i))?;
    }

    let config = SalvageConfig {
        inputs: vec![root.to_path_buf()],
        output: Some(root.join("out.md")),
        output_format: OutputFormat::Markdown,
        no_tokens: true,
        ..Default::default()
    };
    let summary = run_extraction(config, None)?;

    assert_eq!(summary.reports.len(), 5);
    assert_eq!(summary.rejected.len(), 2);
    assert!(summary.output.contains("## Skipped Files"));

    Ok(())
}

#[test]
fn test_json_output_with_sniff() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    write_fixtures(root)?;

    let output_path = root.join("out.json");
    let config = SalvageConfig {
        inputs: vec![root.join("budget.pdf")],
        output: Some(output_path.clone()),
        output_format: OutputFormat::Json,
        sniff: true,
        no_tokens: true,
        ..Default::default()
    };
    run(config)?;

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(output_path)?)?;
    let doc = &value["documents"][0];
    assert_eq!(doc["kind"], "document");
    assert_eq!(doc["info"]["media_type"], "application/pdf");
    assert_eq!(doc["sniff"]["looks_like_document"], true);
    assert!(doc["winner"].is_string());

    Ok(())
}

#[test]
fn test_missing_input_fails_run() {
    let config = SalvageConfig {
        inputs: vec!["/nonexistent/missing.pdf".into()],
        no_tokens: true,
        ..Default::default()
    };
    assert!(run(config).is_err());
}
