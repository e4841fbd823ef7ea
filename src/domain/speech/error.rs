use crate::domain::voice::VoiceCatalogError;
use crate::error::AppError;
use crate::infrastructure::artifacts::ArtifactStoreError;
use crate::infrastructure::synthesizer::SynthesizerError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("{0}")]
    Invalid(String),

    #[error("text is {length} characters, maximum is {max}")]
    TextTooLong { length: usize, max: usize },

    #[error(transparent)]
    Voice(#[from] VoiceCatalogError),

    #[error("no synthesis capacity: {0}")]
    Overloaded(String),

    #[error(transparent)]
    Synthesis(#[from] SynthesizerError),

    #[error(transparent)]
    Store(#[from] ArtifactStoreError),
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SpeechServiceError::TextTooLong { .. } => AppError::PayloadTooLarge(err.to_string()),
            SpeechServiceError::Voice(e) => e.into(),
            SpeechServiceError::Overloaded(msg) => AppError::Overloaded(msg),
            SpeechServiceError::Synthesis(e) => AppError::SynthesisFailed(e.to_string()),
            SpeechServiceError::Store(e) => e.into(),
        }
    }
}
