use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::voice::VoiceCatalog;
use crate::infrastructure::artifacts::ArtifactStore;
use crate::infrastructure::config::Config;
use crate::infrastructure::stats::ServiceStats;

pub struct StatsController {
    stats: Arc<ServiceStats>,
    store: Arc<ArtifactStore>,
    catalog: Arc<VoiceCatalog>,
    config: Arc<Config>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub requests_total: u64,
    pub requests_succeeded: u64,
    pub requests_failed: u64,
    pub artifacts_stored: usize,
    pub artifacts_bytes: u64,
    pub voices_available: usize,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub limits: ConfiguredLimits,
}

#[derive(Debug, Serialize)]
pub struct ConfiguredLimits {
    pub max_text_length: usize,
    pub max_batch_size: usize,
    pub max_concurrency: usize,
    pub queue_wait_seconds: u64,
    pub artifact_max_age_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

impl StatsController {
    pub fn new(
        stats: Arc<ServiceStats>,
        store: Arc<ArtifactStore>,
        catalog: Arc<VoiceCatalog>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            stats,
            store,
            catalog,
            config,
        }
    }

    /// GET /stats - counters, store gauges and the configured limits
    pub async fn stats(State(controller): State<Arc<StatsController>>) -> Json<StatsResponse> {
        let snapshot = controller.stats.snapshot();
        let (artifacts_stored, artifacts_bytes) = controller.store.usage();

        Json(StatsResponse {
            requests_total: snapshot.requests_total,
            requests_succeeded: snapshot.requests_succeeded,
            requests_failed: snapshot.requests_failed,
            artifacts_stored,
            artifacts_bytes,
            voices_available: controller.catalog.len(),
            uptime_seconds: snapshot.uptime_seconds,
            started_at: snapshot.started_at,
            limits: ConfiguredLimits {
                max_text_length: controller.config.max_text_length,
                max_batch_size: controller.config.max_batch_size,
                max_concurrency: controller.config.max_concurrency,
                queue_wait_seconds: controller.config.queue_wait_secs,
                artifact_max_age_seconds: controller.config.artifact_max_age_secs,
                cleanup_interval_seconds: controller.config.cleanup_interval_secs,
            },
        })
    }
}
