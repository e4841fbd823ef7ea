use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::speech::dto::{BatchEntry, BatchResponse, SpeechRequest, SpeechResponse};
use crate::domain::speech::SpeechService;
use crate::error::AppResult;

pub struct SpeechController {
    service: Arc<SpeechService>,
}

impl SpeechController {
    pub fn new(service: Arc<SpeechService>) -> Self {
        Self { service }
    }

    /// POST /tts - synthesize one text into an audio artifact
    pub async fn synthesize(
        State(controller): State<Arc<SpeechController>>,
        Json(request): Json<SpeechRequest>,
    ) -> AppResult<Json<SpeechResponse>> {
        tracing::info!(
            text_length = request.text.len(),
            voice = %request.voice,
            format = %request.output_format,
            "TTS request received"
        );

        let outcome = controller.service.synthesize_one(request).await?;
        Ok(Json(SpeechResponse::from_outcome(&outcome)))
    }

    /// POST /tts/batch - synthesize several texts, isolating per-item failures
    pub async fn synthesize_batch(
        State(controller): State<Arc<SpeechController>>,
        Json(requests): Json<Vec<SpeechRequest>>,
    ) -> AppResult<Json<BatchResponse>> {
        let outcomes = controller.service.synthesize_batch(requests).await?;

        let entries: Vec<BatchEntry> = outcomes
            .into_iter()
            .map(|item| BatchEntry::from_result(item.text_preview, item.result))
            .collect();

        Ok(Json(BatchResponse::from_entries(entries)))
    }
}
