//! Rotation shelf pruning
//!
//! The rotation directory's contents ARE the selection state: each run
//! treats its listing as ground truth and reconciles it against the archive
//! and the age policy before any new links are made. Links are removed when
//! their target is gone, when their title has been promoted to the core
//! library, or when they have simply been on the shelf too long.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{RootRole, RotationError};

/// Result of pruning the rotation directory
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    /// Names of links that survived pruning
    pub surviving: HashSet<String>,
    /// Slots available for new links after pruning
    pub free_capacity: usize,
    pub removed_dangling: usize,
    pub removed_core: usize,
    pub removed_aged: usize,
    pub skipped: usize,
    /// Human-readable notes for per-item failures
    pub messages: Vec<String>,
}

enum Removal {
    Dangling,
    CorePromoted,
    AgedOut,
}

/// Prune the rotation directory and compute remaining free capacity.
///
/// `now` is supplied by the caller (captured once at the start of the run)
/// so the age policy is deterministic within a run. A removal that fails is
/// logged and the link counted as surviving. Non-symlink entries are foreign
/// objects: warned about, left alone, and not counted against capacity.
pub async fn reconcile(
    rotation_root: &Path,
    core_names: &HashSet<String>,
    max_age_days: i64,
    capacity: usize,
    now: DateTime<Utc>,
) -> Result<ReconcileOutcome, RotationError> {
    let cutoff = now - Duration::days(max_age_days);
    let mut outcome = ReconcileOutcome::default();

    for entry in WalkDir::new(rotation_root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(RotationError::RootUnreadable {
                    role: RootRole::Rotation,
                    path: rotation_root.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(e) => {
                warn!(error = %e, "Skipping unreadable rotation entry");
                outcome.skipped += 1;
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().to_string();
        let path = entry.path();

        if !entry.path_is_symlink() {
            warn!(path = %path.display(), "Foreign non-link entry on the rotation shelf, leaving it alone");
            continue;
        }

        let target_exists = match path.try_exists() {
            Ok(exists) => exists,
            Err(e) => {
                warn!(link = %name, error = %e, "Could not stat link target, keeping link");
                true
            }
        };

        let reason = if !target_exists {
            Some(Removal::Dangling)
        } else if core_names.contains(&name) {
            Some(Removal::CorePromoted)
        } else {
            // The link's own lstat mtime is its creation time for age purposes.
            match std::fs::symlink_metadata(path).and_then(|meta| meta.modified()) {
                Ok(modified) if DateTime::<Utc>::from(modified) < cutoff => Some(Removal::AgedOut),
                Ok(_) => None,
                Err(e) => {
                    warn!(link = %name, error = %e, "Could not read link age, keeping link");
                    None
                }
            }
        };

        let Some(reason) = reason else {
            outcome.surviving.insert(name);
            continue;
        };

        match tokio::fs::remove_file(path).await {
            Ok(()) => match reason {
                Removal::Dangling => {
                    outcome.removed_dangling += 1;
                    debug!(link = %name, "Removed: dangling");
                }
                Removal::CorePromoted => {
                    outcome.removed_core += 1;
                    debug!(link = %name, "Removed: promoted to core");
                }
                Removal::AgedOut => {
                    outcome.removed_aged += 1;
                    debug!(link = %name, "Removed: aged out");
                }
            },
            Err(e) => {
                warn!(link = %name, error = %e, "Failed to remove rotation link");
                outcome.skipped += 1;
                outcome.messages.push(format!("Failed to remove {}: {}", name, e));
                outcome.surviving.insert(name);
            }
        }
    }

    outcome.free_capacity = capacity.saturating_sub(outcome.surviving.len());

    info!(
        surviving = outcome.surviving.len(),
        removed_dangling = outcome.removed_dangling,
        removed_core = outcome.removed_core,
        removed_aged = outcome.removed_aged,
        free_capacity = outcome.free_capacity,
        "Rotation shelf reconciled"
    );

    Ok(outcome)
}
