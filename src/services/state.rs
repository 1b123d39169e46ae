//! Run-state persistence
//!
//! A single JSON record carrying the previous run's timestamp. Loaded once
//! at the start of a run and overwritten once at the very end; its absence
//! simply means no run has completed yet.

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::RotationError;

/// State carried between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// Start of the last successful run; the baseline for "new" detection
    pub last_run_at: DateTime<Utc>,
}

/// Load the previous run's state. `Ok(None)` means no prior run exists.
///
/// A state file that exists but cannot be read or parsed is fatal: running
/// against an unknown baseline would misclassify the whole archive.
pub async fn load(path: &Path) -> Result<Option<RunState>, RotationError> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(RotationError::StateUnreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let state = serde_json::from_str(&raw).map_err(|source| RotationError::StateCorrupt {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(state))
}

/// Persist state for the next run.
///
/// The record is written to a temp file in the same directory, synced, and
/// renamed over the old file, so a crash leaves either the old or the new
/// record observable, never a torn one.
pub async fn save(path: &Path, state: &RunState) -> Result<(), RotationError> {
    let save_error = |source: io::Error| RotationError::StateSave {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(save_error)?;
    }

    let json = serde_json::to_string_pretty(state).map_err(|e| save_error(io::Error::other(e)))?;
    let tmp = path.with_extension("json.tmp");

    let mut file = fs::File::create(&tmp).await.map_err(save_error)?;
    file.write_all(json.as_bytes()).await.map_err(save_error)?;
    file.sync_all().await.map_err(save_error)?;
    drop(file);

    fs::rename(&tmp, path).await.map_err(save_error)?;
    debug!(path = %path.display(), last_run_at = %state.last_run_at, "Run state saved");
    Ok(())
}
