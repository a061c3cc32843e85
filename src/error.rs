//! Crate-level error types for unresolved diagnostics.

use std::path::PathBuf;

/// All errors in unresolved carry enough context to produce a useful diagnostic
/// without a debugger. Each variant names the file or reason for failure.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config file parsed as TOML but holds values the scanner cannot use.
    #[error("config invalid: {}: {reason}", path.display())]
    ConfigInvalid {
        /// Path to the offending config file.
        path: PathBuf,
        /// Description of the rejected value.
        reason: String,
    },

    /// Underlying I/O error, typically while writing the report.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// A candidate document is not valid JSON.
    #[error("json decode failed: {}: {source}", file.display())]
    JsonDecode {
        /// Document that failed to decode.
        file: PathBuf,
        /// The decoder's error, with line and column.
        source: serde_json::Error,
    },

    /// A candidate document could not be read from disk.
    #[error("read failed: {}: {source}", file.display())]
    ReadFailed {
        /// Document that could not be read.
        file: PathBuf,
        /// The wrapped I/O error.
        source: std::io::Error,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
