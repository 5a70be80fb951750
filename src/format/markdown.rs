//! Markdown output format for salvage

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

use super::{Formatter, HeaderContext, kind_label};
use crate::core::FileReport;
use crate::fs::RejectReason;

pub struct MarkdownFormatter;

/// Recovered text can contain anything, including backtick fences.
fn fence_for(content: &str) -> &'static str {
    if content.contains("```") { "~~~~" } else { "```" }
}

impl Formatter for MarkdownFormatter {
    fn write_header(&mut self, output: &mut dyn Write, context: &HeaderContext) -> Result<()> {
        writeln!(output, "# Document Context")?;
        writeln!(output)?;
        writeln!(output, "> Files: {}", context.file_count)?;
        if let Some(count) = context.token_count {
            writeln!(output, "> Total tokens: {}", count)?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn write_document(&mut self, output: &mut dyn Write, report: &FileReport) -> Result<()> {
        writeln!(output, "## {}", report.info.name)?;
        writeln!(output)?;

        let mut meta = vec![format!("kind: {}", kind_label(report.kind))];
        if let Some(winner) = report.winner {
            meta.push(format!("strategy: `{}`", winner));
        }
        if let Some(sniff) = report.sniff {
            meta.push(format!(
                "signature: {}, early text: {}",
                sniff.looks_like_document, sniff.has_early_text
            ));
        }
        writeln!(output, "*{}*", meta.join(" | "))?;
        writeln!(output)?;

        let fence = fence_for(&report.report);
        writeln!(output, "{}text", fence)?;
        writeln!(output, "{}", report.report)?;
        writeln!(output, "{}", fence)?;
        writeln!(output)?;
        Ok(())
    }

    fn write_footer(
        &mut self,
        output: &mut dyn Write,
        context: &HeaderContext,
        rejected: &[(PathBuf, RejectReason)],
    ) -> Result<()> {
        if !rejected.is_empty() {
            writeln!(output, "## Skipped Files")?;
            writeln!(output)?;
            for (path, reason) in rejected {
                writeln!(output, "- `{}`: {}", path.display(), reason)?;
            }
            writeln!(output)?;
        }
        if let Some(p) = context.prompt {
            writeln!(output, "> **Question**")?;
            writeln!(output, "> {}", p.replace('\n', "\n> "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DocumentInfo, DocumentKind, Strategy};

    #[test]
    fn test_markdown_document() {
        let report = FileReport {
            path: PathBuf::from("/docs/q3.pdf"),
            info: DocumentInfo::new("q3.pdf"),
            kind: DocumentKind::Document,
            winner: Some(Strategy::WideDecode),
            sniff: None,
            report: "Document: q3.pdf\nStatus: text recovered".to_string(),
        };
        let mut output = Vec::new();
        MarkdownFormatter.write_document(&mut output, &report).unwrap();

        let result = String::from_utf8(output).unwrap();
        assert!(result.starts_with("## q3.pdf\n"));
        assert!(result.contains("strategy: `wide_decode`"));
        assert!(result.contains("```text\nDocument: q3.pdf"));
    }

    #[test]
    fn test_fence_switches_on_backticks() {
        assert_eq!(fence_for("plain"), "```");
        assert_eq!(fence_for("has ``` inside"), "~~~~");
    }

    #[test]
    fn test_markdown_question_footer() {
        let mut output = Vec::new();
        let context = HeaderContext {
            prompt: Some("Summarize\nbriefly"),
            ..Default::default()
        };
        MarkdownFormatter
            .write_footer(&mut output, &context, &[])
            .unwrap();

        let result = String::from_utf8(output).unwrap();
        assert!(result.contains("> Summarize\n> briefly"));
    }
}
