use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::infrastructure::artifacts::ArtifactStore;

pub struct AudioController {
    store: Arc<ArtifactStore>,
}

impl AudioController {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    /// GET /audio/{id} - stream a stored artifact's bytes.
    /// A malformed id is indistinguishable from an expired one to the caller.
    pub async fn download(
        State(controller): State<Arc<AudioController>>,
        Path(id): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let id = Uuid::parse_str(&id)
            .map_err(|_| AppError::NotFound(format!("audio '{}' not found or expired", id)))?;

        let (artifact, bytes) = controller.store.read(id).await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            artifact.format.content_type().parse().unwrap(),
        );
        headers.insert(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", artifact.file_name)
                .parse()
                .unwrap(),
        );

        tracing::debug!(
            artifact_id = %id,
            size_bytes = bytes.len(),
            "Serving audio download"
        );

        Ok((StatusCode::OK, headers, Body::from(bytes)))
    }
}
