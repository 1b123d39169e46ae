//! New/old partitioning of archive entries
//!
//! Pure policy: no filesystem access, so the classification rules are
//! testable without fixtures. Modification times are an external, coarse
//! signal; clock skew or bulk re-imports that touch mtimes will shift
//! entries between the two sets, which is acceptable for this domain.

use std::collections::HashSet;

use crate::services::scanner::ArchiveEntry;
use crate::services::state::RunState;

/// Archive entries partitioned by novelty against the previous run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Classified {
    /// Modified since the last run; filled into the shelf first
    pub fresh: Vec<ArchiveEntry>,
    /// Everything else eligible for rotation
    pub stale: Vec<ArchiveEntry>,
}

/// Partition `entries` relative to `baseline`.
///
/// Core names are excluded entirely; core protection takes precedence over
/// novelty. Entries are deduplicated by name. Without a baseline (first
/// run) every eligible entry is stale, as is any entry whose timestamp was
/// unreadable.
pub fn classify(
    entries: Vec<ArchiveEntry>,
    core_names: &HashSet<String>,
    baseline: Option<RunState>,
) -> Classified {
    let mut seen = HashSet::new();
    let mut classified = Classified::default();

    for entry in entries {
        if core_names.contains(&entry.name) {
            continue;
        }
        if !seen.insert(entry.name.clone()) {
            continue;
        }

        let is_fresh = match (baseline, entry.modified_at) {
            (Some(state), Some(modified)) => modified > state.last_run_at,
            _ => false,
        };

        if is_fresh {
            classified.fresh.push(entry);
        } else {
            classified.stale.push(entry);
        }
    }

    classified
}
