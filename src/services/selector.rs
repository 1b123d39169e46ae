//! Shelf filling
//!
//! Chooses which eligible titles take the free slots and creates their
//! links. Fresh titles go first, newest first; leftover slots are filled
//! from the stale set in alphabetical order so consecutive runs walk the
//! archive deterministically.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::services::classifier::Classified;
use crate::services::scanner::ArchiveEntry;

/// Result of the link-creation pass
#[derive(Debug, Default)]
pub struct LinkOutcome {
    pub created: usize,
    pub skipped: usize,
    /// Human-readable notes for per-item failures
    pub messages: Vec<String>,
}

/// Pick up to `free_capacity` entries to link.
///
/// Names already on the shelf are never selected again. Fewer eligible
/// entries than slots is a partial fill, not an error.
pub fn select(
    classified: Classified,
    existing_names: &HashSet<String>,
    free_capacity: usize,
) -> Vec<ArchiveEntry> {
    let Classified { mut fresh, mut stale } = classified;
    fresh.retain(|entry| !existing_names.contains(&entry.name));
    stale.retain(|entry| !existing_names.contains(&entry.name));

    fresh.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
    let mut selected: Vec<ArchiveEntry> = fresh.into_iter().take(free_capacity).collect();

    if selected.len() < free_capacity {
        let remainder = free_capacity - selected.len();
        stale.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        selected.extend(stale.into_iter().take(remainder));
    }

    selected
}

/// Create one symbolic link per selected entry, pointing at the entry's
/// absolute path in the archive. One bad entry never aborts the batch.
pub async fn create_links(
    rotation_root: &Path,
    archive_root: &Path,
    selected: &[ArchiveEntry],
) -> LinkOutcome {
    let mut outcome = LinkOutcome::default();

    for entry in selected {
        let target = archive_root.join(&entry.name);
        let link = rotation_root.join(&entry.name);

        match tokio::fs::symlink(&target, &link).await {
            Ok(()) => {
                outcome.created += 1;
                debug!(link = %link.display(), target = %target.display(), "Linked");
            }
            Err(e) => {
                warn!(name = %entry.name, error = %e, "Failed to create rotation link");
                outcome.skipped += 1;
                outcome
                    .messages
                    .push(format!("Failed to link {}: {}", entry.name, e));
            }
        }
    }

    outcome
}
