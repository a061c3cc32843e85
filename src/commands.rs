//! CLI commands for unresolved: scan, files.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Config;
use crate::discovery;
use crate::document;
use crate::error;
use crate::report::{Format, Reporter};
use crate::scanner::Scanner;
use crate::types::UnresolvedRef;

/// List every discovered document and whether it decodes.
///
/// # Errors
///
/// Returns errors from config loading or writing to stdout.
pub fn files(root: Option<PathBuf>) -> Result<ExitCode, error::Error> {
    let config = Config::load(Path::new("."))?.with_root(root);
    list_files_to(&config, std::io::stdout().lock())?;
    return Ok(ExitCode::SUCCESS);
}

/// Write one line per candidate document, marking those the scan would skip.
///
/// # Errors
///
/// Returns `Error::Io` if writing fails.
fn list_files_to<W: Write>(config: &Config, mut out: W) -> Result<(), error::Error> {
    let candidates = discovery::discover(config);
    let mut skipped = 0_usize;

    for candidate in &candidates {
        match document::parse_document(&candidate.path) {
            Err(e) => {
                skipped = skipped.saturating_add(1);
                writeln!(out, "{}  (skipped: {})", candidate.id, skip_reason(&e))?;
            },
            Ok(_) => writeln!(out, "{}", candidate.id)?,
        }
    }

    writeln!(out, "{} files, {skipped} skipped", candidates.len())?;
    out.flush()?;
    return Ok(());
}

/// Scan the configured root and print every unresolved reference.
/// Always exits 0 once the scan runs, whatever the match count.
///
/// # Errors
///
/// Returns errors from config loading or writing to stdout.
pub fn scan(root: Option<PathBuf>, format: Format) -> Result<ExitCode, error::Error> {
    let config = Config::load(Path::new("."))?.with_root(root);
    let found = scan_to(&config, format, std::io::stdout().lock())?;
    tracing::info!(total = found.len(), root = %config.root.display(), "scan complete");
    return Ok(ExitCode::SUCCESS);
}

/// Scan every discovered document in order, reporting to `out` as each one
/// finishes. Documents that fail to read or decode contribute nothing.
///
/// # Errors
///
/// Returns `Error::Io` if writing the report fails.
fn scan_to<W: Write>(config: &Config, format: Format, out: W) -> Result<Vec<UnresolvedRef>, error::Error> {
    let scanner = Scanner::new(config.rule.clone());
    let mut reporter = Reporter::new(format, out);
    let mut results: Vec<UnresolvedRef> = Vec::new();

    for candidate in discovery::discover(config) {
        let document = match document::parse_document(&candidate.path) {
            Err(e) => {
                tracing::debug!(file = %candidate.id, reason = %skip_reason(&e), "skipping document");
                continue;
            },
            Ok(d) => d,
        };

        let found = scanner.scan_document(&document, &candidate.id);
        tracing::trace!(file = %candidate.id, count = found.len(), "scanned document");
        reporter.report_document(&found)?;
        results.extend(found);
    }

    reporter.finish(&results)?;
    return Ok(results);
}

/// The cause of a skipped document, without repeating its path.
fn skip_reason(e: &error::Error) -> String {
    return match e {
        error::Error::JsonDecode { source, .. } => source.to_string(),
        error::Error::ReadFailed { source, .. } => source.to_string(),
        other => other.to_string(),
    };
}
