pub mod fake;
pub mod http;

pub use fake::FakeSynthesizer;
pub use http::HttpSynthesizer;

use async_trait::async_trait;

use crate::domain::speech::dto::AudioFormat;
use crate::domain::voice::{Language, Prosody, VoiceProfile};

/// Raw output of one engine call
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub audio: Vec<u8>,
    pub duration_seconds: f32,
}

/// Engine failure, split by whether a retry can help
#[derive(Debug, thiserror::Error)]
pub enum SynthesizerError {
    #[error("transient engine failure: {0}")]
    Transient(String),
    #[error("engine rejected the request: {0}")]
    Permanent(String),
}

impl SynthesizerError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SynthesizerError::Transient(_))
    }
}

/// Abstracts the external speech-synthesis engine (network service, sidecar
/// process, or a deterministic fake in tests). Implementations have no side
/// effects on local state; the call may take seconds.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
        prosody: &Prosody,
        format: AudioFormat,
    ) -> Result<SynthesizedAudio, SynthesizerError>;
}

/// Estimate audio duration from word count and the language's speaking rate.
/// Used when the engine does not report a duration of its own.
pub fn estimate_duration_seconds(text: &str, language: Language) -> f32 {
    let word_count = text.split_whitespace().count();
    let minutes = word_count as f32 / language.words_per_minute();
    (minutes * 60.0 * 100.0).round() / 100.0
}
