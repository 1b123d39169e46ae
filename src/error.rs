//! Fatal error taxonomy for a rotation run
//!
//! Only conditions that make the whole run unsafe to continue live here:
//! an inaccessible root or a broken state record. Per-item failures (one
//! link that cannot be created or removed) are logged and skipped instead.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which configured root a fatal filesystem error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootRole {
    Archive,
    Core,
    Rotation,
}

impl fmt::Display for RootRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootRole::Archive => write!(f, "archive root"),
            RootRole::Core => write!(f, "core root"),
            RootRole::Rotation => write!(f, "rotation root"),
        }
    }
}

/// Errors that abort the run with a non-zero exit and leave prior state intact.
#[derive(Debug, Error)]
pub enum RotationError {
    #[error("{role} {} is missing or unreadable: {source}", .path.display())]
    RootUnreadable {
        role: RootRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {} could not be read: {source}", .path.display())]
    StateUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {} is corrupt: {source}", .path.display())]
    StateCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to persist run state to {}: {source}", .path.display())]
    StateSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
