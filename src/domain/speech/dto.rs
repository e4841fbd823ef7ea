use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::speech::service::SpeechOutcome;
use crate::error::AppError;

/// How many characters of the source text batch entries echo back
const PREVIEW_CHARS: usize = 50;

/// Container format of a generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Mp3 => "audio/mpeg",
        }
    }

    pub fn from_extension(ext: &str) -> Option<AudioFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Some(AudioFormat::Wav),
            "mp3" => Some(AudioFormat::Mp3),
            _ => None,
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Request for POST /tts and the items of POST /tts/batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Speaking rate offset in percent, -50 to +100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<i16>,
    /// Pitch offset in hertz, -50 to +50
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<i16>,
    /// Volume offset in percent, -50 to +50
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i16>,
    #[serde(default)]
    pub output_format: AudioFormat,
}

fn default_voice() -> String {
    "female".to_string()
}

/// Response for POST /tts
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechResponse {
    pub success: bool,
    pub message: String,
    pub audio_id: Uuid,
    pub audio_url: String,
    pub duration_seconds: f32,
    pub voice_used: String,
    pub size_bytes: u64,
    pub format: AudioFormat,
}

impl SpeechResponse {
    pub fn from_outcome(outcome: &SpeechOutcome) -> Self {
        SpeechResponse {
            success: true,
            message: "Audio generated successfully".to_string(),
            audio_id: outcome.artifact.id,
            audio_url: format!("/audio/{}", outcome.artifact.id),
            duration_seconds: outcome.artifact.duration_seconds,
            voice_used: outcome.voice_used.clone(),
            size_bytes: outcome.artifact.size_bytes,
            format: outcome.artifact.format,
        }
    }
}

/// One entry of a batch response, tagged by its `success` field
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Success {
        success: bool,
        audio_id: Uuid,
        audio_url: String,
        duration_seconds: f32,
        voice_used: String,
        size_bytes: u64,
        text_preview: String,
    },
    Failure {
        success: bool,
        code: String,
        error: String,
        text_preview: String,
    },
}

impl BatchEntry {
    pub fn from_result<E>(text_preview: String, result: Result<SpeechOutcome, E>) -> Self
    where
        E: Into<AppError>,
    {
        match result {
            Ok(outcome) => BatchEntry::Success {
                success: true,
                audio_id: outcome.artifact.id,
                audio_url: format!("/audio/{}", outcome.artifact.id),
                duration_seconds: outcome.artifact.duration_seconds,
                voice_used: outcome.voice_used,
                size_bytes: outcome.artifact.size_bytes,
                text_preview,
            },
            Err(err) => {
                let app_error = err.into();
                BatchEntry::Failure {
                    success: false,
                    code: app_error.code().to_string(),
                    error: app_error.to_string(),
                    text_preview,
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BatchEntry::Success { .. })
    }
}

/// Response for POST /tts/batch; counts are derived from the entries
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BatchEntry>,
}

impl BatchResponse {
    pub fn from_entries(results: Vec<BatchEntry>) -> Self {
        let succeeded = results.iter().filter(|e| e.is_success()).count();
        BatchResponse {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }
}

/// Shorten text for batch result entries
pub fn text_preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}
