pub mod catalog;
pub mod error;
pub mod model;

pub use catalog::VoiceCatalog;
pub use error::VoiceCatalogError;
pub use model::{Gender, Language, Prosody, VoiceInfo, VoiceProfile};
