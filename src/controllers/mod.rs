pub mod audio;
pub mod health;
pub mod speech;
pub mod stats;
pub mod voices;
