//! Collection and rendering of unresolved links.

use std::io::Write;
use std::process::ExitCode;

use serde::Serialize;

use crate::error::Error;
use crate::types::MissingLink;

/// Header printed before the list of broken links.
const FAILURE_HEADER: &str = "Missing links:";

/// Single line printed when nothing is broken.
const SUCCESS_LINE: &str = "All checked links are valid.";

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// `{"valid": bool, "missing": [...]}` on one line.
    Json,
    /// The plain listing, one broken link per line.
    #[default]
    Text,
}

/// Every unresolved local link of one run, in discovery order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Append-only list of broken links.
    missing: Vec<MissingLink>,
}

/// Wire shape of `--format json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    /// Broken links in discovery order.
    missing: &'a [MissingLink],
    /// True when nothing is broken.
    valid: bool,
}

impl Report {
    /// Exit status for this report: 0 when clean, 1 when anything is missing.
    pub fn exit_code(&self) -> ExitCode {
        if self.is_clean() {
            return ExitCode::SUCCESS;
        }
        return ExitCode::from(1);
    }

    /// True when no local link failed to resolve.
    pub const fn is_clean(&self) -> bool {
        return self.missing.is_empty();
    }

    /// Broken links collected so far.
    pub fn missing(&self) -> &[MissingLink] {
        return &self.missing;
    }

    /// Record one broken link.
    pub fn push(&mut self, link: MissingLink) {
        self.missing.push(link);
    }

    /// Write the report in the requested format.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if writing fails, or `Error::Json` if serialization fails.
    pub fn render(&self, format: Format, out: &mut impl Write) -> Result<(), Error> {
        match format {
            Format::Json => self.render_json(out)?,
            Format::Text => self.render_text(out)?,
        }
        return Ok(());
    }

    /// One-line JSON document.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` or `Error::Io` on write failure.
    fn render_json(&self, out: &mut impl Write) -> Result<(), Error> {
        let body = JsonReport {
            missing: &self.missing,
            valid: self.is_clean(),
        };
        serde_json::to_writer(&mut *out, &body)?;
        writeln!(out)?;
        return Ok(());
    }

    /// Header plus `- <document>: <target>` lines, or the success line.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` on write failure.
    fn render_text(&self, out: &mut impl Write) -> Result<(), Error> {
        if self.is_clean() {
            writeln!(out, "{SUCCESS_LINE}")?;
            return Ok(());
        }

        writeln!(out, "{FAILURE_HEADER}")?;
        for link in &self.missing {
            writeln!(out, "- {}: {}", link.document.display(), link.target)?;
        }
        return Ok(());
    }
}
