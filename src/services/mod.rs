//! The rotation pipeline: scan, reconcile, classify, select, persist

pub mod classifier;
pub mod reconciler;
pub mod rotation;
pub mod scanner;
pub mod selector;
pub mod state;

pub use classifier::{Classified, classify};
pub use reconciler::{ReconcileOutcome, reconcile};
pub use rotation::{RotationService, RunSummary};
pub use scanner::{ArchiveEntry, scan_entries, scan_names};
pub use selector::{LinkOutcome, create_links, select};
pub use state::RunState;
