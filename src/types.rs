//! Core domain types for unresolved references.

use std::fmt;

/// One `{Name: ...}`-only object found under a qualifying ancestor.
/// Emitted by the scanner and printed by the reporter as `<file>: <trail>`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UnresolvedRef {
    /// Document identifier, always with `/` separators.
    pub file: String,
    /// `/`-joined keys and indices from the document root down to and including
    /// the `Name` key, then the stringified `Name` value: `Columns/0/Name/id`.
    pub trail: String,
}

impl fmt::Display for UnresolvedRef {
    /// Render in the report line format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}: {}", self.file, self.trail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_report_line() {
        let found = UnresolvedRef {
            file: "debug/.xtraq/procs/a.json".to_string(),
            trail: "Columns/0/Name/id".to_string(),
        };
        assert_eq!(found.to_string(), "debug/.xtraq/procs/a.json: Columns/0/Name/id");
    }
}
