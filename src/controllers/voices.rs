use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::voice::{VoiceCatalog, VoiceInfo};

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub total: usize,
    pub voices: Vec<VoiceInfo>,
}

/// GET /voices - list the voice catalog
pub async fn list_voices(State(catalog): State<Arc<VoiceCatalog>>) -> Json<VoicesResponse> {
    let voices: Vec<VoiceInfo> = catalog.voices().iter().map(VoiceInfo::from).collect();
    Json(VoicesResponse {
        total: voices.len(),
        voices,
    })
}
