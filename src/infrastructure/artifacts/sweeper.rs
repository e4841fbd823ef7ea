use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::store::ArtifactStore;

/// Spawn the background retention sweep: every `interval`, delete artifacts
/// older than `max_age`. Runs for the life of the process, decoupled from
/// request handling; a failing pass is logged and the loop continues.
pub fn spawn_retention_sweeper(
    store: Arc<ArtifactStore>,
    interval: Duration,
    max_age: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so startup is quiet
        ticker.tick().await;

        tracing::info!(
            interval_seconds = interval.as_secs(),
            max_age_seconds = max_age.as_secs(),
            "Retention sweeper started"
        );

        loop {
            ticker.tick().await;
            let deleted = store.sweep_expired(max_age).await;
            let (alive, total_bytes) = store.usage();
            if deleted > 0 {
                tracing::info!(deleted, alive, total_bytes, "Retention sweep completed");
            } else {
                tracing::debug!(alive, total_bytes, "Retention sweep found nothing to reclaim");
            }
        }
    })
}
