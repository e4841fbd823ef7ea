use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::infrastructure::config::Config;

/// GET / - service banner with the endpoint map
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "service": "voicetape-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "synthesize": "POST /tts",
            "batch": "POST /tts/batch",
            "download": "GET /audio/{id}",
            "voices": "GET /voices",
            "stats": "GET /stats",
            "health": "GET /health"
        }
    }))
}

/// GET /health - liveness signal. Reports whether the output directory is
/// writable but stays 200 either way; it never consults the artifact index.
pub async fn health(State(config): State<Arc<Config>>) -> impl IntoResponse {
    let writable = probe_writable(&config.output_dir).await;

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "output_dir_writable": writable
    }))
}

async fn probe_writable(dir: &Path) -> bool {
    let probe = dir.join(format!(".healthcheck-{}", Uuid::new_v4()));
    match tokio::fs::write(&probe, b"ok").await {
        Ok(()) => {
            let _ = tokio::fs::remove_file(&probe).await;
            true
        }
        Err(_) => false,
    }
}
