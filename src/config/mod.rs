//! Application configuration management

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::CliOptions;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Full media archive; read-only from this tool's perspective
    pub archive_root: PathBuf,

    /// Protected library of permanent titles, excluded from rotation
    pub core_root: PathBuf,

    /// Rotation shelf: contains only symbolic links managed by this tool
    pub rotation_root: PathBuf,

    /// Where the last-run timestamp is persisted (outside the media roots)
    pub state_file: PathBuf,

    /// Maximum number of links the rotation shelf may hold
    pub capacity: usize,

    /// Links older than this many days are pruned regardless of replacements
    pub max_link_age_days: i64,

    /// Advisory core:rotation sizing guidance; informs capacity choice only
    pub core_to_rotation_ratio: f64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            archive_root: env::var("ARCHIVE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/mnt/movies")),

            core_root: env::var("CORE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/mnt/core_movies")),

            rotation_root: env::var("ROTATION_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/mnt/rotation_movies")),

            state_file: env::var("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_state_file()),

            capacity: env::var("ROTATION_CAPACITY")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("Invalid ROTATION_CAPACITY")?,

            max_link_age_days: env::var("MAX_LINK_AGE_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Invalid MAX_LINK_AGE_DAYS")?,

            core_to_rotation_ratio: env::var("CORE_TO_ROTATION_RATIO")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("Invalid CORE_TO_ROTATION_RATIO")?,
        })
    }

    /// Apply CLI overrides on top of the environment-derived configuration
    pub fn apply_overrides(mut self, options: CliOptions) -> Self {
        if let Some(path) = options.archive_root {
            self.archive_root = path;
        }
        if let Some(path) = options.core_root {
            self.core_root = path;
        }
        if let Some(path) = options.rotation_root {
            self.rotation_root = path;
        }
        if let Some(path) = options.state_file {
            self.state_file = path;
        }
        if let Some(capacity) = options.capacity {
            self.capacity = capacity;
        }
        if let Some(days) = options.max_age_days {
            self.max_link_age_days = days;
        }
        self
    }
}

/// Default state location: per-user data dir, with a relative fallback for
/// environments without one.
fn default_state_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("curator").join("rotation_state.json"))
        .unwrap_or_else(|| PathBuf::from("./data/rotation_state.json"))
}
