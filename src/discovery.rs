//! Candidate document discovery under the scan root.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;

/// A file the scanner will try to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Identifier attached to every match in this file, `/`-separated.
    pub id: String,
    /// On-disk location used for reading.
    pub path: PathBuf,
}

/// Recursively list scannable files under the configured root.
///
/// Entries are sorted by file name within each directory so discovery order
/// is the same on every run. Symbolic links are followed, so a linked file is
/// scanned under its link path; link loops surface as walk errors and are
/// skipped along with unreadable entries. A missing root yields no candidates.
pub fn discover(config: &Config) -> Vec<Candidate> {
    let root = config.root.as_path();
    if !root.is_dir() {
        tracing::info!(root = %root.display(), "scan root not found, nothing to scan");
        return Vec::new();
    }

    let candidates: Vec<Candidate> = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| {
            return entry
                .inspect_err(|e| tracing::debug!(error = %e, "skipping unreadable entry"))
                .ok();
        })
        .filter(|e| return e.file_type().is_file() && config.should_scan(e.path()))
        .map(|e| {
            return Candidate {
                id: file_id(e.path()),
                path: e.into_path(),
            };
        })
        .collect();

    tracing::debug!(root = %root.display(), count = candidates.len(), "discovered documents");
    return candidates;
}

/// Render a path as a match identifier, with `/` separators on every host.
pub fn file_id(path: &Path) -> String {
    return path.to_string_lossy().replace('\\', "/");
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test code")]
mod tests {
    use super::*;

    fn config_for(root: &Path) -> Config {
        return Config::default().with_root(Some(root.to_path_buf()));
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "{}").unwrap();
    }

    #[test]
    fn backslashes_become_forward_slashes() {
        assert_eq!(file_id(Path::new(r"debug\.xtraq\a.json")), "debug/.xtraq/a.json");
    }

    #[test]
    fn keeps_file_named_only_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".json");
        touch(dir.path(), "sub/.json");

        let ids: Vec<String> = discover(&config_for(dir.path())).into_iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 2, "{ids:?}");
        assert!(ids[0].ends_with("/.json"));
        assert!(ids[1].ends_with("sub/.json"));
    }

    #[test]
    fn lists_json_files_recursively_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.json");
        touch(dir.path(), "a.json");
        touch(dir.path(), "nested/c.json");
        touch(dir.path(), "nested/deeper/d.json");
        touch(dir.path(), "notes.txt");

        let names: Vec<PathBuf> = discover(&config_for(dir.path()))
            .into_iter()
            .map(|c| c.path.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("a.json"),
                PathBuf::from("b.json"),
                PathBuf::from("nested/c.json"),
                PathBuf::from("nested/deeper/d.json"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn linked_files_and_directories_are_followed() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        touch(outside.path(), "target.json");
        touch(outside.path(), "shared/inner.json");
        std::os::unix::fs::symlink(outside.path().join("target.json"), dir.path().join("link.json")).unwrap();
        std::os::unix::fs::symlink(outside.path().join("shared"), dir.path().join("shared")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let ids: Vec<String> = discover(&config_for(dir.path())).into_iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![
                file_id(&dir.path().join("link.json")),
                file_id(&dir.path().join("shared/inner.json")),
            ]
        );
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&config_for(&dir.path().join("absent"))).is_empty());
    }

    #[test]
    fn skips_index_json_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "index.json");
        touch(dir.path(), "sub/index.json");
        touch(dir.path(), "sub/real.json");

        let found = discover(&config_for(dir.path()));
        assert_eq!(found.len(), 1);
        assert!(found[0].id.ends_with("sub/real.json"), "{}", found[0].id);
    }

    #[test]
    fn skips_directories_named_like_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("folder.json")).unwrap();
        touch(dir.path(), "folder.json/inner.json");

        let found = discover(&config_for(dir.path()));
        assert_eq!(found.len(), 1);
        assert!(found[0].id.ends_with("folder.json/inner.json"));
    }
}
