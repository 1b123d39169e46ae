//! Curator core library
//!
//! Curator maintains a bounded "rotation shelf" of symbolic links over a
//! large, append-only media archive. Each run prunes stale links, classifies
//! archive entries as new or old against the previous run's timestamp, fills
//! the free slots preferring fresh titles, and persists the run timestamp.
//! The archive itself is never modified.
//!
//! # Modules
//!
//! - `config`: environment-driven configuration
//! - `cli`: minimal flag parsing for configuration overrides
//! - `error`: fatal error taxonomy for a run
//! - `services`: the scan / reconcile / classify / select / persist pipeline

pub mod cli;
pub mod config;
pub mod error;
pub mod services;

pub use config::Config;
pub use error::{RootRole, RotationError};
pub use services::{RotationService, RunSummary};
