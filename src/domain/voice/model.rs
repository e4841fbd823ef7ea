use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Languages the voice catalog covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Indonesian,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Indonesian => "indonesian",
            Language::English => "english",
        }
    }

    /// Parse a caller-supplied language selector, case-insensitively
    pub fn parse(selector: &str) -> Option<Language> {
        match selector.trim().to_ascii_lowercase().as_str() {
            "indonesian" => Some(Language::Indonesian),
            "english" => Some(Language::English),
            _ => None,
        }
    }

    /// Average speaking rate, used to estimate audio duration from text
    pub fn words_per_minute(&self) -> f32 {
        match self {
            Language::Indonesian => 120.0,
            Language::English => 150.0,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
        }
    }
}

/// Accepted offset for speaking rate, in percent
pub const RATE_RANGE: RangeInclusive<i16> = -50..=100;
/// Accepted offset for pitch, in hertz
pub const PITCH_RANGE: RangeInclusive<i16> = -50..=50;
/// Accepted offset for volume, in percent
pub const VOLUME_RANGE: RangeInclusive<i16> = -50..=50;

/// Audio-shaping offsets applied on top of a voice's baseline, expressed as
/// signed deltas the engine understands (`+10%`, `-5Hz`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Prosody {
    /// Speaking rate offset in percent
    pub rate: i16,
    /// Pitch offset in hertz
    pub pitch: i16,
    /// Volume offset in percent
    pub volume: i16,
}

/// One entry of the voice catalog. Immutable after startup.
#[derive(Debug, Clone)]
pub struct VoiceProfile {
    /// Logical identifier callers select by, e.g. "female"
    pub id: String,
    /// Engine-specific voice name, e.g. "id-ID-GadisNeural"
    pub engine_voice: String,
    pub language: Language,
    pub gender: Gender,
    pub description: String,
    pub default_prosody: Prosody,
}

/// Catalog entry as exposed by GET /voices
#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub voice_id: String,
    pub name: String,
    pub language: Language,
    pub gender: Gender,
    pub description: String,
}

impl From<&VoiceProfile> for VoiceInfo {
    fn from(profile: &VoiceProfile) -> Self {
        VoiceInfo {
            voice_id: profile.id.clone(),
            name: profile.engine_voice.clone(),
            language: profile.language,
            gender: profile.gender,
            description: profile.description.clone(),
        }
    }
}
