//! Match reporting: `<file>: <trail>` lines plus a total, or one JSON document.

use std::io::Write;

use crate::error::Error;
use crate::types::UnresolvedRef;

/// Output format for the scan report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// A single JSON document written once the scan completes.
    Json,
    /// One line per match, streamed per document, then `Total: <count>`.
    #[default]
    Text,
}

/// Serialized shape of `--format json`.
#[derive(serde::Serialize)]
struct JsonReport<'a> {
    /// Every match in discovery order.
    matches: &'a [UnresolvedRef],
    /// Number of matches.
    total: usize,
}

/// Writes matches as they are found and the summary at the end.
pub struct Reporter<W> {
    /// Selected output format.
    format: Format,
    /// Destination, normally locked stdout.
    out: W,
}

impl<W: Write> Reporter<W> {
    /// Print the summary for the complete result set.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if writing fails.
    pub fn finish(mut self, all: &[UnresolvedRef]) -> Result<W, Error> {
        match self.format {
            Format::Json => {
                let report = JsonReport {
                    matches: all,
                    total: all.len(),
                };
                serde_json::to_writer_pretty(&mut self.out, &report).map_err(std::io::Error::from)?;
                writeln!(self.out)?;
            },
            Format::Text => writeln!(self.out, "Total: {}", all.len())?,
        }
        self.out.flush()?;
        return Ok(self.out);
    }

    /// Create a reporter writing to `out`.
    pub const fn new(format: Format, out: W) -> Self {
        return Self { format, out };
    }

    /// Report the matches found in one document.
    /// Text output is written and flushed immediately; JSON waits for `finish`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if writing fails.
    pub fn report_document(&mut self, found: &[UnresolvedRef]) -> Result<(), Error> {
        if self.format == Format::Json || found.is_empty() {
            return Ok(());
        }
        for entry in found {
            writeln!(self.out, "{entry}")?;
        }
        self.out.flush()?;
        return Ok(());
    }
}
