//! Output format modules for salvage
//!
//! `report` renders the text for a single file; the formatters below wrap a
//! run's reports into one context block.

pub mod json;
pub mod markdown;
pub mod plain;
pub mod report;

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

pub use self::xml::XmlFormatter;

use crate::config::OutputFormat;
use crate::core::{DocumentKind, FileReport};
use crate::fs::RejectReason;

/// Run-level data shared by header and footer
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderContext<'a> {
    pub prompt: Option<&'a str>,
    pub token_count: Option<usize>,
    pub file_count: usize,
}

pub trait Formatter {
    fn write_header(&mut self, output: &mut dyn Write, context: &HeaderContext) -> Result<()>;

    fn write_document(&mut self, output: &mut dyn Write, report: &FileReport) -> Result<()>;

    fn write_footer(
        &mut self,
        output: &mut dyn Write,
        context: &HeaderContext,
        rejected: &[(PathBuf, RejectReason)],
    ) -> Result<()>;
}

pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Plain => Box::new(plain::PlainFormatter::new()),
        OutputFormat::Markdown => Box::new(markdown::MarkdownFormatter),
        OutputFormat::Json => Box::new(json::JsonFormatter::new()),
        OutputFormat::Xml => Box::new(xml::XmlFormatter),
    }
}

pub(crate) fn kind_label(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::PlainText => "text",
        DocumentKind::Document => "document",
    }
}

/// XML format
pub mod xml {
    use super::*;

    pub struct XmlFormatter;

    fn escape_attr(value: &str) -> String {
        value
            .replace('&', "&amp;")
            .replace('"', "&quot;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    fn write_cdata(output: &mut dyn Write, content: &str) -> Result<()> {
        writeln!(output, "    <![CDATA[")?;
        // Escape CDATA terminators if present
        let escaped = content.replace("]]>", "]]]]><![CDATA[>");
        writeln!(output, "{}", escaped)?;
        writeln!(output, "    ]]>")?;
        Ok(())
    }

    impl Formatter for XmlFormatter {
        fn write_header(&mut self, output: &mut dyn Write, context: &HeaderContext) -> Result<()> {
            writeln!(output, "<context files=\"{}\">", context.file_count)?;
            if let Some(count) = context.token_count {
                writeln!(output, "<token_count>{}</token_count>", count)?;
            }
            Ok(())
        }

        fn write_document(&mut self, output: &mut dyn Write, report: &FileReport) -> Result<()> {
            write!(
                output,
                "<document name=\"{}\" kind=\"{}\"",
                escape_attr(&report.info.name),
                kind_label(report.kind)
            )?;
            if let Some(winner) = report.winner {
                write!(output, " strategy=\"{}\"", winner)?;
            }
            if let Some(sniff) = report.sniff {
                write!(
                    output,
                    " signature=\"{}\" early_text=\"{}\"",
                    sniff.looks_like_document, sniff.has_early_text
                )?;
            }
            writeln!(output, ">")?;
            write_cdata(output, &report.report)?;
            writeln!(output, "</document>")?;
            Ok(())
        }

        fn write_footer(
            &mut self,
            output: &mut dyn Write,
            context: &HeaderContext,
            rejected: &[(PathBuf, RejectReason)],
        ) -> Result<()> {
            if !rejected.is_empty() {
                writeln!(output, "<skipped>")?;
                for (path, reason) in rejected {
                    writeln!(
                        output,
                        "    <file path=\"{}\" reason=\"{}\"/>",
                        escape_attr(&path.display().to_string()),
                        escape_attr(&reason.to_string())
                    )?;
                }
                writeln!(output, "</skipped>")?;
            }
            if let Some(p) = context.prompt {
                writeln!(output, "<prompt>")?;
                write_cdata(output, p)?;
                writeln!(output, "</prompt>")?;
            }
            writeln!(output, "</context>")?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::core::{DocumentInfo, Strategy};

        #[test]
        fn test_xml_document_escapes_cdata() {
            let report = FileReport {
                path: PathBuf::from("/in/a&b.pdf"),
                info: DocumentInfo::new("a&b.pdf"),
                kind: DocumentKind::Document,
                winner: Some(Strategy::MarkedTextRun),
                sniff: None,
                report: "tricky ]]> text".to_string(),
            };
            let mut output = Vec::new();
            XmlFormatter.write_document(&mut output, &report).unwrap();

            let result = String::from_utf8(output).unwrap();
            assert!(result.contains("name=\"a&amp;b.pdf\""));
            assert!(result.contains("strategy=\"marked_text_run\""));
            assert!(result.contains("]]]]><![CDATA[>"));
        }
    }
}
