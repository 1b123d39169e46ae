//! Flat archive scans
//!
//! Lists the direct children of a root, one entry per title. Both the
//! archive and the core root are scanned this way; nothing is recursed into
//! and symbolic links are never followed.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{RootRole, RotationError};

/// Noise entries created by macOS, Synology, Syncthing and similar tools
const IGNORE_NAMES: &[&str] = &[".DS_Store", "@eaDir", ".stfolder", ".stversions"];

/// A single title in the archive, snapshotted at scan time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    /// Last-modified time; `None` when the entry's metadata was unreadable
    pub modified_at: Option<DateTime<Utc>>,
}

/// List the direct children of `root` with their modification times.
///
/// An unreadable root is fatal. An unreadable timestamp on a single entry is
/// not: the entry is kept with no timestamp and classified as old later.
pub fn scan_entries(root: &Path, role: RootRole) -> Result<Vec<ArchiveEntry>, RotationError> {
    let root_error = |source: std::io::Error| RotationError::RootUnreadable {
        role,
        path: root.to_path_buf(),
        source,
    };

    let meta = std::fs::metadata(root).map_err(root_error)?;
    if !meta.is_dir() {
        return Err(root_error(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(root_error(e.into())),
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().to_string();
        if IGNORE_NAMES.contains(&name.as_str()) {
            continue;
        }

        let modified = entry
            .metadata()
            .map_err(|e| e.to_string())
            .and_then(|meta| meta.modified().map_err(|e| e.to_string()));
        let modified_at = match modified {
            Ok(modified) => Some(DateTime::<Utc>::from(modified)),
            Err(e) => {
                warn!(name = %name, error = %e, "Entry timestamp unreadable, treating as old");
                None
            }
        };

        entries.push(ArchiveEntry { name, modified_at });
    }

    Ok(entries)
}

/// List just the names under `root`. Used for the core (protected) root,
/// where only membership matters.
pub fn scan_names(root: &Path, role: RootRole) -> Result<HashSet<String>, RotationError> {
    Ok(scan_entries(root, role)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    #[test]
    fn test_scan_lists_direct_children_only() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("alpha.mkv"), b"x").unwrap();
        std::fs::create_dir(tmp.path().join("Beta (2019)")).unwrap();
        std::fs::write(tmp.path().join("Beta (2019)").join("nested.mkv"), b"x").unwrap();

        let entries = scan_entries(tmp.path(), RootRole::Archive).unwrap();
        let mut names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        names.sort();
        assert_eq!(names, ["Beta (2019)", "alpha.mkv"]);
        assert!(entries.iter().all(|e| e.modified_at.is_some()));
    }

    #[test]
    fn test_scan_filters_noise_names() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(".DS_Store"), b"x").unwrap();
        std::fs::create_dir(tmp.path().join("@eaDir")).unwrap();
        std::fs::write(tmp.path().join("real.mkv"), b"x").unwrap();

        let entries = scan_entries(tmp.path(), RootRole::Archive).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "real.mkv");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let result = scan_entries(&missing, RootRole::Core);
        assert_matches!(
            result,
            Err(RotationError::RootUnreadable { role: RootRole::Core, .. })
        );
    }

    #[test]
    fn test_scan_names_returns_set() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("kept"), b"x").unwrap();
        std::fs::write(tmp.path().join("also kept"), b"x").unwrap();

        let names = scan_names(tmp.path(), RootRole::Core).unwrap();
        assert!(names.contains("kept"));
        assert!(names.contains("also kept"));
        assert_eq!(names.len(), 2);
    }
}
