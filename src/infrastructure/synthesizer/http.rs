use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{estimate_duration_seconds, SynthesizedAudio, Synthesizer, SynthesizerError};
use crate::domain::speech::dto::AudioFormat;
use crate::domain::voice::{Prosody, VoiceProfile};

/// Response header through which the engine reports the rendered duration
const DURATION_HEADER: &str = "x-duration-seconds";

/// HTTP client for the synthesis engine sidecar.
///
/// Engine API:
/// POST {base_url}/synthesize
/// Request: JSON with the text, engine voice name, prosody offsets in the
/// engine's signed-offset syntax ("+10%", "-5Hz") and the container format.
/// Response: audio bytes; duration optionally in the `x-duration-seconds`
/// header, estimated from the text otherwise.
pub struct HttpSynthesizer {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct EngineRequest<'a> {
    text: &'a str,
    voice: &'a str,
    rate: String,
    pitch: String,
    volume: String,
    format: &'a str,
}

impl<'a> EngineRequest<'a> {
    fn new(text: &'a str, voice: &'a VoiceProfile, prosody: &Prosody, format: AudioFormat) -> Self {
        EngineRequest {
            text,
            voice: &voice.engine_voice,
            rate: format_offset(prosody.rate, "%"),
            pitch: format_offset(prosody.pitch, "Hz"),
            volume: format_offset(prosody.volume, "%"),
            format: format.extension(),
        }
    }
}

/// Render a prosody offset the way the engine expects: always signed
fn format_offset(value: i16, unit: &str) -> String {
    format!("{:+}{}", value, unit)
}

impl HttpSynthesizer {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SynthesizerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SynthesizerError::Transient(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/synthesize", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Synthesizer for HttpSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
        prosody: &Prosody,
        format: AudioFormat,
    ) -> Result<SynthesizedAudio, SynthesizerError> {
        let request = EngineRequest::new(text, voice, prosody, format);

        tracing::debug!(
            url = %self.synthesize_url(),
            voice = %request.voice,
            rate = %request.rate,
            pitch = %request.pitch,
            volume = %request.volume,
            text_length = text.len(),
            "Sending synthesis request to engine"
        );

        let response = self
            .client
            .post(self.synthesize_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesizerError::Transient("engine request timed out".to_string())
                } else if e.is_connect() {
                    SynthesizerError::Transient(format!("cannot connect to engine: {}", e))
                } else {
                    SynthesizerError::Transient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retryable = status.is_server_error()
                || status == reqwest::StatusCode::TOO_MANY_REQUESTS
                || status == reqwest::StatusCode::REQUEST_TIMEOUT;
            let body = response.text().await.unwrap_or_default();
            let reason = format!("engine returned {}: {}", status, body);
            return Err(if retryable {
                SynthesizerError::Transient(reason)
            } else {
                SynthesizerError::Permanent(reason)
            });
        }

        let reported_duration = response
            .headers()
            .get(DURATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<f32>().ok());

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesizerError::Transient(format!("failed to read audio: {}", e)))?
            .to_vec();

        if audio.is_empty() {
            return Err(SynthesizerError::Transient(
                "engine returned no audio".to_string(),
            ));
        }

        let duration_seconds =
            reported_duration.unwrap_or_else(|| estimate_duration_seconds(text, voice.language));

        tracing::debug!(
            audio_size = audio.len(),
            duration_seconds,
            "Engine synthesis completed"
        );

        Ok(SynthesizedAudio {
            audio,
            duration_seconds,
        })
    }
}
