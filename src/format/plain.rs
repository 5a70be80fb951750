//! Plain text output format for salvage
//!
//! Mirrors how a chat front end stitches file contents into a prompt:
//! a context block, one report per file, then the question.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

use super::{Formatter, HeaderContext};
use crate::core::FileReport;
use crate::fs::RejectReason;

pub struct PlainFormatter {
    first_document: bool,
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainFormatter {
    pub fn new() -> Self {
        Self {
            first_document: true,
        }
    }
}

impl Formatter for PlainFormatter {
    fn write_header(&mut self, output: &mut dyn Write, _context: &HeaderContext) -> Result<()> {
        writeln!(output, "Context from files:")?;
        Ok(())
    }

    fn write_document(&mut self, output: &mut dyn Write, report: &FileReport) -> Result<()> {
        if !self.first_document {
            writeln!(output)?;
            writeln!(output)?;
        }
        self.first_document = false;
        write!(output, "{}", report.report)?;
        if let Some(sniff) = report.sniff {
            write!(
                output,
                "\n(signature: {}, early text: {})",
                yes_no(sniff.looks_like_document),
                yes_no(sniff.has_early_text)
            )?;
        }
        Ok(())
    }

    fn write_footer(
        &mut self,
        output: &mut dyn Write,
        context: &HeaderContext,
        rejected: &[(PathBuf, RejectReason)],
    ) -> Result<()> {
        writeln!(output)?;
        if !rejected.is_empty() {
            writeln!(output)?;
            writeln!(output, "Skipped files:")?;
            for (path, reason) in rejected {
                writeln!(output, "- {} ({})", path.display(), reason)?;
            }
        }
        if let Some(p) = context.prompt {
            writeln!(output)?;
            writeln!(output, "Question: {}", p)?;
        }
        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
