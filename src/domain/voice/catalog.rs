use super::error::VoiceCatalogError;
use super::model::{Gender, Language, Prosody, VoiceProfile};

/// Static registry mapping logical voice identifiers to engine voice profiles.
/// Built once at startup, never mutated afterwards.
pub struct VoiceCatalog {
    voices: Vec<VoiceProfile>,
}

impl VoiceCatalog {
    pub fn new(voices: Vec<VoiceProfile>) -> Self {
        Self { voices }
    }

    /// The stock catalog: female/male Indonesian and US English neural voices
    pub fn with_default_voices() -> Self {
        Self::new(vec![
            VoiceProfile {
                id: "female".to_string(),
                engine_voice: "id-ID-GadisNeural".to_string(),
                language: Language::Indonesian,
                gender: Gender::Female,
                description: "Natural Indonesian female voice - Professional".to_string(),
                default_prosody: Prosody::default(),
            },
            VoiceProfile {
                id: "male".to_string(),
                engine_voice: "id-ID-ArdiNeural".to_string(),
                language: Language::Indonesian,
                gender: Gender::Male,
                description: "Natural Indonesian male voice - Authoritative".to_string(),
                default_prosody: Prosody::default(),
            },
            VoiceProfile {
                id: "female_us".to_string(),
                engine_voice: "en-US-AriaNeural".to_string(),
                language: Language::English,
                gender: Gender::Female,
                description: "Natural US English female voice".to_string(),
                default_prosody: Prosody::default(),
            },
            VoiceProfile {
                id: "male_us".to_string(),
                engine_voice: "en-US-GuyNeural".to_string(),
                language: Language::English,
                gender: Gender::Male,
                description: "Natural US English male voice".to_string(),
                default_prosody: Prosody::default(),
            },
        ])
    }

    /// Resolve a caller-supplied voice selector within a language.
    /// Matching is a case-insensitive exact match; an unknown selector is a
    /// client error, not a server fault.
    pub fn resolve(
        &self,
        selector: &str,
        language: Language,
    ) -> Result<&VoiceProfile, VoiceCatalogError> {
        let wanted = selector.trim();
        self.voices
            .iter()
            .filter(|v| v.language == language)
            .find(|v| v.id.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| VoiceCatalogError::UnknownVoice {
                selector: selector.to_string(),
                language,
                known: self.known_selectors(language),
            })
    }

    /// Resolve raw request selectors: parses the optional language (default
    /// Indonesian) before looking the voice up.
    pub fn resolve_selectors(
        &self,
        voice: &str,
        language: Option<&str>,
    ) -> Result<&VoiceProfile, VoiceCatalogError> {
        let language = match language {
            Some(raw) => Language::parse(raw)
                .ok_or_else(|| VoiceCatalogError::UnknownLanguage(raw.to_string()))?,
            None => Language::default(),
        };
        self.resolve(voice, language)
    }

    pub fn voices(&self) -> &[VoiceProfile] {
        &self.voices
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    fn known_selectors(&self, language: Language) -> String {
        self.voices
            .iter()
            .filter(|v| v.language == language)
            .map(|v| v.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
