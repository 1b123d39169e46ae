//! Curator - rotation shelf builder for large media archives
//!
//! One invocation performs one rotation run against the configured roots.
//! Scheduling is external: point a cron entry or systemd timer at this
//! binary once per desired rotation cycle. Exit status is zero when the run
//! completed and non-zero on a fatal error.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use curator::cli::CliOptions;
use curator::config::Config;
use curator::services::RotationService;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let options = CliOptions::from_args();
    let config = Config::from_env()?.apply_overrides(options);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "curator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        archive = %config.archive_root.display(),
        core = %config.core_root.display(),
        rotation = %config.rotation_root.display(),
        capacity = config.capacity,
        max_link_age_days = config.max_link_age_days,
        "Starting rotation run"
    );

    let service = RotationService::new(config);
    let summary = service.run().await?;

    tracing::info!(
        scanned = summary.scanned,
        fresh = summary.fresh,
        stale = summary.stale,
        linked = summary.linked,
        removed_dangling = summary.removed_dangling,
        removed_core = summary.removed_core,
        removed_aged = summary.removed_aged,
        skipped = summary.skipped,
        "Rotation run complete"
    );

    Ok(())
}
