use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::scanner::Rule;

/// Name of the optional config file, looked up in the working directory.
pub const CONFIG_FILE: &str = ".unresolved.toml";

/// Root scanned when neither the config file nor the command line names one.
pub const DEFAULT_ROOT: &str = "debug/.xtraq";

/// Run configuration loaded from `.unresolved.toml`.
/// Every field has a default, so a missing file scans `debug/.xtraq` for
/// `Name`-only objects under `Columns` or `Parameters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File names never scanned, compared against the final path component.
    pub exclude: Vec<String>,
    /// Extension (without the dot) a file must carry to be scanned.
    pub extension: String,
    /// Directory walked for candidate documents.
    pub root: PathBuf,
    /// Node predicate handed to the scanner.
    pub rule: Rule,
}

/// Raw TOML structure for `.unresolved.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct UnresolvedTomlConfig {
    #[serde(default)]
    ancestors: Option<Vec<String>>,
    #[serde(default)]
    exclude: Option<Vec<String>>,
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    name_key: Option<String>,
    #[serde(default)]
    root: Option<PathBuf>,
}

impl Config {
    /// Load config from `.unresolved.toml` in the given directory.
    /// Returns the defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; never silently
    /// falls back to defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed,
    /// or `Error::ConfigInvalid` if a value is unusable.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let path = dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let config = Self::parse(&content, &path)?;
        tracing::debug!(path = %path.display(), root = %config.root.display(), "loaded config");
        return Ok(config);
    }

    /// Parse config TOML, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed,
    /// or `Error::ConfigInvalid` (naming `path`) if a value is unusable.
    pub fn parse(content: &str, path: &Path) -> Result<Self, Error> {
        let raw: UnresolvedTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let config = Self {
            exclude: raw.exclude.unwrap_or(defaults.exclude),
            extension: raw.extension.unwrap_or(defaults.extension),
            root: raw.root.unwrap_or(defaults.root),
            rule: Rule {
                ancestors: raw.ancestors.unwrap_or(defaults.rule.ancestors),
                name_key: raw.name_key.unwrap_or(defaults.rule.name_key),
            },
        };
        config.validate(path)?;
        return Ok(config);
    }

    /// Check whether a discovered file should be scanned, by its file name.
    ///
    /// The name must end in `.<extension>` (case-sensitive, so a file named
    /// just `.json` qualifies); `index.json` style exclusions match the whole
    /// file name, never a directory component.
    pub fn should_scan(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };

        // Suffix test rather than `Path::extension`, which is `None` for a bare `.json`.
        let suffix = format!(".{}", self.extension);
        if !file_name.to_string_lossy().ends_with(suffix.as_str()) {
            return false;
        }
        return !self.exclude.iter().any(|name| return file_name == name.as_str());
    }

    /// Replace the scan root when one was given on the command line.
    #[must_use]
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        if let Some(root) = root {
            self.root = root;
        }
        return self;
    }

    /// Reject values that would make every scan silently empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigInvalid` naming the first bad field.
    fn validate(&self, path: &Path) -> Result<(), Error> {
        let reason = if self.rule.ancestors.is_empty() {
            "`ancestors` must name at least one key"
        } else if self.rule.ancestors.iter().any(String::is_empty) {
            "`ancestors` entries must not be empty"
        } else if self.rule.name_key.is_empty() {
            "`name_key` must not be empty"
        } else if self.extension.is_empty() || self.extension.starts_with('.') {
            "`extension` must be non-empty and given without the leading dot"
        } else {
            return Ok(());
        };

        return Err(Error::ConfigInvalid {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        });
    }
}

impl Default for Config {
    /// Scan `debug/.xtraq` for `*.json` except `index.json`.
    fn default() -> Self {
        return Self {
            exclude: vec!["index.json".to_string()],
            extension: "json".to_string(),
            root: PathBuf::from(DEFAULT_ROOT),
            rule: Rule::default(),
        };
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test code")]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Config, Error> {
        return Config::parse(content, Path::new(CONFIG_FILE));
    }

    #[test]
    fn cli_root_overrides_file_root() {
        let config = parse("root = \"from/file\"").unwrap().with_root(Some(PathBuf::from("from/cli")));
        assert_eq!(config.root, PathBuf::from("from/cli"));

        let kept = parse("root = \"from/file\"").unwrap().with_root(None);
        assert_eq!(kept.root, PathBuf::from("from/file"));
    }

    #[test]
    fn empty_ancestors_rejected() {
        let err = parse("ancestors = []").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }), "{err}");
    }

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn extension_with_dot_rejected() {
        let err = parse("extension = \".json\"").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }), "{err}");
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "root = [").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }

    #[test]
    fn overrides_individual_fields() {
        let config = parse("ancestors = [\"Fields\"]\nname_key = \"Ref\"").unwrap();
        assert_eq!(config.rule.ancestors, vec!["Fields".to_string()]);
        assert_eq!(config.rule.name_key, "Ref");
        assert_eq!(config.root, PathBuf::from(DEFAULT_ROOT));
        assert_eq!(config.exclude, vec!["index.json".to_string()]);
    }

    #[test]
    fn should_scan_filters_extension_and_excluded_names() {
        let config = Config::default();
        assert!(config.should_scan(Path::new("debug/.xtraq/a.json")));
        assert!(config.should_scan(Path::new("debug/index.json/a.json")));
        assert!(!config.should_scan(Path::new("debug/.xtraq/index.json")));
        assert!(!config.should_scan(Path::new("debug/.xtraq/a.JSON")));
        assert!(!config.should_scan(Path::new("debug/.xtraq/a.json.bak")));
        assert!(!config.should_scan(Path::new("debug/.xtraq/json")));
        assert!(config.should_scan(Path::new("debug/.xtraq/.json")));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(matches!(parse("roots = \"x\""), Err(Error::TomlDe(_))));
    }
}
