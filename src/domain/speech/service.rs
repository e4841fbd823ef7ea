use std::sync::Arc;

use super::dto::{text_preview, SpeechRequest};
use super::error::SpeechServiceError;
use super::limiter::CapacityLimiter;
use crate::domain::voice::model::{PITCH_RANGE, RATE_RANGE, VOLUME_RANGE};
use crate::domain::voice::{Prosody, VoiceCatalog, VoiceProfile};
use crate::infrastructure::artifacts::{Artifact, ArtifactStore};
use crate::infrastructure::stats::ServiceStats;
use crate::infrastructure::synthesizer::{SynthesizedAudio, Synthesizer};

/// Validation and scheduling knobs, taken from the configuration at startup
#[derive(Debug, Clone)]
pub struct SpeechLimits {
    pub max_text_length: usize,
    pub max_batch_size: usize,
    pub synthesis_retries: u32,
}

/// Result of one successful synthesis job
#[derive(Debug, Clone)]
pub struct SpeechOutcome {
    pub artifact: Artifact,
    pub voice_used: String,
}

/// One entry of a batch run: the item's outcome plus a short echo of its
/// source text, in input order
#[derive(Debug)]
pub struct BatchItemOutcome {
    pub text_preview: String,
    pub result: Result<SpeechOutcome, SpeechServiceError>,
}

/// Coordinates synthesis jobs: validates requests, resolves voices, bounds
/// in-flight engine calls through the shared capacity limiter, retries
/// transient engine failures, and registers results with the artifact store.
///
/// A request moves Received -> Validated -> Queued -> Synthesizing ->
/// Persisted -> Completed; validation failures, queue overload, and engine
/// failures after the bounded retry all terminate it early.
pub struct SpeechService {
    catalog: Arc<VoiceCatalog>,
    synthesizer: Arc<dyn Synthesizer>,
    store: Arc<ArtifactStore>,
    stats: Arc<ServiceStats>,
    limiter: CapacityLimiter,
    limits: SpeechLimits,
}

impl SpeechService {
    pub fn new(
        catalog: Arc<VoiceCatalog>,
        synthesizer: Arc<dyn Synthesizer>,
        store: Arc<ArtifactStore>,
        stats: Arc<ServiceStats>,
        limiter: CapacityLimiter,
        limits: SpeechLimits,
    ) -> Self {
        Self {
            catalog,
            synthesizer,
            store,
            stats,
            limiter,
            limits,
        }
    }

    pub fn limits(&self) -> &SpeechLimits {
        &self.limits
    }

    /// Run one synthesis job end to end
    pub async fn synthesize_one(
        &self,
        request: SpeechRequest,
    ) -> Result<SpeechOutcome, SpeechServiceError> {
        self.stats.record_request();
        let result = self.perform(request).await;
        match &result {
            Ok(outcome) => {
                self.stats.record_success();
                tracing::info!(
                    artifact_id = %outcome.artifact.id,
                    voice = %outcome.voice_used,
                    duration_seconds = outcome.artifact.duration_seconds,
                    size_bytes = outcome.artifact.size_bytes,
                    "Synthesis completed"
                );
            }
            Err(err) => {
                self.stats.record_failure();
                tracing::warn!(error = %err, "Synthesis request failed");
            }
        }
        result
    }

    /// Run up to `max_batch_size` jobs concurrently, isolating failures per
    /// item. The returned sequence matches input order regardless of which
    /// item finished first; an oversized batch fails before any engine work.
    pub async fn synthesize_batch(
        &self,
        requests: Vec<SpeechRequest>,
    ) -> Result<Vec<BatchItemOutcome>, SpeechServiceError> {
        if requests.is_empty() {
            return Err(SpeechServiceError::Invalid(
                "batch must contain at least one request".to_string(),
            ));
        }
        if requests.len() > self.limits.max_batch_size {
            return Err(SpeechServiceError::Invalid(format!(
                "batch of {} exceeds the maximum of {}",
                requests.len(),
                self.limits.max_batch_size
            )));
        }

        tracing::info!(items = requests.len(), "Processing synthesis batch");

        // join_all keeps input order in its output, so results never need
        // re-sorting by completion time
        let jobs = requests.into_iter().map(|request| async move {
            let preview = text_preview(&request.text);
            let result = self.synthesize_one(request).await;
            BatchItemOutcome {
                text_preview: preview,
                result,
            }
        });

        Ok(futures::future::join_all(jobs).await)
    }

    async fn perform(&self, request: SpeechRequest) -> Result<SpeechOutcome, SpeechServiceError> {
        // Validate and resolve before touching capacity or the engine
        let text = self.validate_text(&request.text)?;
        let profile = self
            .catalog
            .resolve_selectors(&request.voice, request.language.as_deref())?;
        let prosody = self.build_prosody(&request, profile)?;

        let permit = self
            .limiter
            .acquire()
            .await
            .map_err(|e| SpeechServiceError::Overloaded(e.to_string()))?;

        let audio = self
            .synthesize_with_retry(&text, profile, &prosody, request.output_format)
            .await?;

        // Persisting needs no engine slot
        drop(permit);

        let id = self.store.allocate();
        let artifact = self
            .store
            .persist(id, &audio.audio, request.output_format, audio.duration_seconds)
            .await?;

        Ok(SpeechOutcome {
            artifact,
            voice_used: profile.engine_voice.clone(),
        })
    }

    async fn synthesize_with_retry(
        &self,
        text: &str,
        profile: &VoiceProfile,
        prosody: &Prosody,
        format: super::dto::AudioFormat,
    ) -> Result<SynthesizedAudio, SpeechServiceError> {
        let mut attempt: u32 = 0;
        loop {
            match self
                .synthesizer
                .synthesize(text, profile, prosody, format)
                .await
            {
                Ok(audio) => return Ok(audio),
                Err(err) if err.is_transient() && attempt < self.limits.synthesis_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = self.limits.synthesis_retries,
                        error = %err,
                        "Transient engine failure, retrying"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn validate_text(&self, raw: &str) -> Result<String, SpeechServiceError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(SpeechServiceError::Invalid(
                "text cannot be empty".to_string(),
            ));
        }
        let length = text.chars().count();
        if length > self.limits.max_text_length {
            return Err(SpeechServiceError::TextTooLong {
                length,
                max: self.limits.max_text_length,
            });
        }
        Ok(text.to_string())
    }

    fn build_prosody(
        &self,
        request: &SpeechRequest,
        profile: &VoiceProfile,
    ) -> Result<Prosody, SpeechServiceError> {
        let rate = request.rate.unwrap_or(profile.default_prosody.rate);
        let pitch = request.pitch.unwrap_or(profile.default_prosody.pitch);
        let volume = request.volume.unwrap_or(profile.default_prosody.volume);

        if !RATE_RANGE.contains(&rate) {
            return Err(SpeechServiceError::Invalid(format!(
                "rate {} is outside {}..={} percent",
                rate,
                RATE_RANGE.start(),
                RATE_RANGE.end()
            )));
        }
        if !PITCH_RANGE.contains(&pitch) {
            return Err(SpeechServiceError::Invalid(format!(
                "pitch {} is outside {}..={} Hz",
                pitch,
                PITCH_RANGE.start(),
                PITCH_RANGE.end()
            )));
        }
        if !VOLUME_RANGE.contains(&volume) {
            return Err(SpeechServiceError::Invalid(format!(
                "volume {} is outside {}..={} percent",
                volume,
                VOLUME_RANGE.start(),
                VOLUME_RANGE.end()
            )));
        }

        Ok(Prosody {
            rate,
            pitch,
            volume,
        })
    }
}
