use super::model::Language;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum VoiceCatalogError {
    #[error("voice '{selector}' is not available for {language} (known: {known})")]
    UnknownVoice {
        selector: String,
        language: Language,
        known: String,
    },
    #[error("unsupported language '{0}'")]
    UnknownLanguage(String),
}

impl From<VoiceCatalogError> for AppError {
    fn from(err: VoiceCatalogError) -> Self {
        AppError::UnknownVoice(err.to_string())
    }
}
