//! JSON output format for salvage

use anyhow::Result;

use std::io::Write;
use std::path::PathBuf;

use super::{Formatter, HeaderContext};
use crate::core::FileReport;
use crate::fs::RejectReason;

pub struct JsonFormatter {
    first_document: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Serialize)]
struct RejectedEntry {
    path: String,
    reason: String,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            first_document: true,
        }
    }
}

impl Formatter for JsonFormatter {
    fn write_header(&mut self, output: &mut dyn Write, context: &HeaderContext) -> Result<()> {
        writeln!(output, "{{")?;
        writeln!(output, "  \"file_count\": {},", context.file_count)?;
        write!(output, "  \"documents\": [")?;
        Ok(())
    }

    fn write_document(&mut self, output: &mut dyn Write, report: &FileReport) -> Result<()> {
        if !self.first_document {
            write!(output, ",")?;
        }
        self.first_document = false;

        // One object per line so large runs stream without buffering
        write!(output, "\n    {}", serde_json::to_string(report)?)?;
        Ok(())
    }

    fn write_footer(
        &mut self,
        output: &mut dyn Write,
        context: &HeaderContext,
        rejected: &[(PathBuf, RejectReason)],
    ) -> Result<()> {
        if self.first_document {
            writeln!(output, "],")?;
        } else {
            writeln!(output)?;
            writeln!(output, "  ],")?;
        }

        let rejected: Vec<RejectedEntry> = rejected
            .iter()
            .map(|(path, reason)| RejectedEntry {
                path: path.display().to_string(),
                reason: reason.to_string(),
            })
            .collect();
        writeln!(output, "  \"rejected\": {},", serde_json::to_string(&rejected)?)?;
        writeln!(
            output,
            "  \"token_count\": {},",
            serde_json::to_string(&context.token_count)?
        )?;
        writeln!(output, "  \"prompt\": {}", serde_json::to_string(&context.prompt)?)?;
        writeln!(output, "}}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DocumentInfo, DocumentKind, Strategy};

    fn report(name: &str) -> FileReport {
        FileReport {
            path: PathBuf::from(name),
            info: DocumentInfo::new(name).with_size(10),
            kind: DocumentKind::Document,
            winner: Some(Strategy::PrintableRun),
            sniff: None,
            report: format!("Document: {}\n\"quoted\"", name),
        }
    }

    fn render(reports: &[FileReport], rejected: &[(PathBuf, RejectReason)]) -> serde_json::Value {
        let mut output = Vec::new();
        let mut formatter = JsonFormatter::new();
        let context = HeaderContext {
            prompt: Some("Why?"),
            token_count: Some(42),
            file_count: reports.len(),
        };
        formatter.write_header(&mut output, &context).unwrap();
        for r in reports {
            formatter.write_document(&mut output, r).unwrap();
        }
        formatter
            .write_footer(&mut output, &context, rejected)
            .unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_output_is_valid() {
        let rejected = vec![(
            PathBuf::from("huge.pdf"),
            RejectReason::TooLarge { size: 20, limit: 10 },
        )];
        let value = render(&[report("a.pdf"), report("b.pdf")], &rejected);

        assert_eq!(value["documents"].as_array().unwrap().len(), 2);
        assert_eq!(value["documents"][0]["winner"], "printable_run");
        assert_eq!(value["documents"][1]["info"]["name"], "b.pdf");
        assert_eq!(value["rejected"][0]["path"], "huge.pdf");
        assert_eq!(value["token_count"], 42);
        assert_eq!(value["prompt"], "Why?");
    }

    #[test]
    fn test_json_without_documents_is_valid() {
        let value = render(&[], &[]);
        assert!(value["documents"].as_array().unwrap().is_empty());
    }
}
