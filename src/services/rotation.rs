//! Rotation run orchestration
//!
//! Sequences one complete run: load state, scan the archive and core roots,
//! prune the shelf, classify, fill, persist the new baseline. The baseline
//! timestamp is captured before scanning so titles modified during a long
//! scan are still classified as new on the next run.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{RootRole, RotationError};
use crate::services::state::RunState;
use crate::services::{classifier, reconciler, scanner, selector, state};

/// Counters reported to the operator at the end of a run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub scanned: usize,
    pub fresh: usize,
    pub stale: usize,
    pub linked: usize,
    pub removed_dangling: usize,
    pub removed_core: usize,
    pub removed_aged: usize,
    pub skipped: usize,
    /// Human-readable notes for every per-item failure
    pub messages: Vec<String>,
}

/// Runs one rotation cycle against the configured roots.
pub struct RotationService {
    config: Config,
}

impl RotationService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute a single run: prune, classify, fill, persist.
    ///
    /// Fatal errors abort before the failing stage mutates anything; the
    /// new baseline is saved only after scanning and reconciliation have
    /// completed. Per-link failures never block the state save.
    pub async fn run(&self) -> Result<RunSummary, RotationError> {
        let started_at = Utc::now();

        let prior = state::load(&self.config.state_file).await?;
        match prior {
            Some(state) => info!(last_run_at = %state.last_run_at, "Loaded previous run state"),
            None => info!("No previous run state, treating the whole archive as old"),
        }

        // Canonicalizing up front both validates that each root exists and
        // makes every link target an absolute path.
        let archive_root = canonicalize(&self.config.archive_root, RootRole::Archive)?;
        let core_root = canonicalize(&self.config.core_root, RootRole::Core)?;
        let rotation_root = canonicalize(&self.config.rotation_root, RootRole::Rotation)?;

        let entries = scanner::scan_entries(&archive_root, RootRole::Archive)?;
        let core_names = scanner::scan_names(&core_root, RootRole::Core)?;
        let scanned = entries.len();
        info!(entries = scanned, core = core_names.len(), "Scanned archive and core roots");

        self.check_capacity_guidance(core_names.len());

        let pruned = reconciler::reconcile(
            &rotation_root,
            &core_names,
            self.config.max_link_age_days,
            self.config.capacity,
            started_at,
        )
        .await?;

        let classified = classifier::classify(entries, &core_names, prior);
        let fresh = classified.fresh.len();
        let stale = classified.stale.len();
        info!(fresh = fresh, stale = stale, "Classified archive entries");

        let selected = selector::select(classified, &pruned.surviving, pruned.free_capacity);
        let linked = selector::create_links(&rotation_root, &archive_root, &selected).await;
        info!(linked = linked.created, skipped = linked.skipped, "Filled free rotation slots");

        // Monotonic baseline: a backwards system clock may delay "new"
        // detection but never regresses the persisted timestamp.
        let last_run_at = match prior {
            Some(state) => state.last_run_at.max(started_at),
            None => started_at,
        };
        state::save(&self.config.state_file, &RunState { last_run_at }).await?;

        let mut messages = pruned.messages;
        messages.extend(linked.messages);

        Ok(RunSummary {
            scanned,
            fresh,
            stale,
            linked: linked.created,
            removed_dangling: pruned.removed_dangling,
            removed_core: pruned.removed_core,
            removed_aged: pruned.removed_aged,
            skipped: pruned.skipped + linked.skipped,
            messages,
        })
    }

    /// The core:rotation ratio is sizing guidance for the operator, not a
    /// runtime invariant; surface a hint when capacity is far off it.
    fn check_capacity_guidance(&self, core_count: usize) {
        if core_count == 0 || self.config.core_to_rotation_ratio <= 0.0 {
            return;
        }
        let suggested = (core_count as f64 / self.config.core_to_rotation_ratio).round() as usize;
        if suggested > 0 && (self.config.capacity > suggested * 2 || self.config.capacity * 2 < suggested) {
            info!(
                capacity = self.config.capacity,
                suggested = suggested,
                ratio = self.config.core_to_rotation_ratio,
                "Configured capacity diverges from core-to-rotation guidance"
            );
        }
    }
}

fn canonicalize(path: &Path, role: RootRole) -> Result<PathBuf, RotationError> {
    std::fs::canonicalize(path).map_err(|source| {
        warn!(role = %role, path = %path.display(), "Root is missing or unreadable");
        RotationError::RootUnreadable {
            role,
            path: path.to_path_buf(),
            source,
        }
    })
}
