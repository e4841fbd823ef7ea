pub mod speech;
pub mod voice;
