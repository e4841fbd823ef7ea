pub mod dto;
pub mod error;
pub mod limiter;
pub mod service;

pub use dto::{AudioFormat, BatchResponse, SpeechRequest, SpeechResponse};
pub use error::SpeechServiceError;
pub use limiter::CapacityLimiter;
pub use service::{BatchItemOutcome, SpeechLimits, SpeechOutcome, SpeechService};
