use async_trait::async_trait;
use std::time::Duration;

use super::{estimate_duration_seconds, SynthesizedAudio, Synthesizer, SynthesizerError};
use crate::domain::speech::dto::AudioFormat;
use crate::domain::voice::{Prosody, VoiceProfile};

const SAMPLE_RATE: u32 = 8000;
const TONE_HZ: f32 = 440.0;
const TONE_SECONDS: f32 = 0.25;

/// Deterministic engine stand-in: renders a short sine tone instead of
/// calling any real synthesis service. Used by the test suite and by
/// engine-less deployments (`TTS_FAKE_ENGINE=true`).
pub struct FakeSynthesizer {
    latency: Duration,
}

impl FakeSynthesizer {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(20),
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for FakeSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Synthesizer for FakeSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
        _prosody: &Prosody,
        _format: AudioFormat,
    ) -> Result<SynthesizedAudio, SynthesizerError> {
        tracing::debug!(
            text_length = text.len(),
            voice = %voice.engine_voice,
            "FakeSynthesizer: rendering tone"
        );

        tokio::time::sleep(self.latency).await;

        Ok(SynthesizedAudio {
            audio: render_tone_wav(),
            duration_seconds: estimate_duration_seconds(text, voice.language),
        })
    }
}

/// Build a minimal playable WAV: RIFF header plus mono 16-bit PCM sine tone
fn render_tone_wav() -> Vec<u8> {
    let sample_count = (SAMPLE_RATE as f32 * TONE_SECONDS) as usize;
    let mut samples = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        let t = i as f32 / SAMPLE_RATE as f32;
        let value = (t * TONE_HZ * 2.0 * std::f32::consts::PI).sin();
        samples.push((value * (i16::MAX / 4) as f32) as i16);
    }
    encode_wav(&samples, SAMPLE_RATE)
}

fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let byte_rate = sample_rate * 2;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}
