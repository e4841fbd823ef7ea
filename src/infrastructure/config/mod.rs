use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Root directory for generated audio files
    pub output_dir: PathBuf,
    // Synthesis engine
    pub engine_url: String,
    pub engine_timeout_secs: u64,
    /// Serve the deterministic fake engine instead of HTTP
    pub fake_engine: bool,
    // Request limits
    pub max_text_length: usize,
    pub max_batch_size: usize,
    // Capacity limiter
    pub max_concurrency: usize,
    pub max_queue_depth: usize,
    pub queue_wait_secs: u64,
    pub synthesis_retries: u32,
    // Retention
    pub cleanup_interval_secs: u64,
    pub artifact_max_age_secs: u64,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8021".to_string())
                .parse()?,
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "./output".to_string())
                .into(),
            engine_url: env::var("TTS_ENGINE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8233".to_string()),
            engine_timeout_secs: env::var("TTS_ENGINE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            fake_engine: env::var("TTS_FAKE_ENGINE")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
            max_text_length: env::var("TTS_MAX_TEXT_LENGTH")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            max_batch_size: env::var("TTS_MAX_BATCH_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            max_concurrency: env::var("TTS_MAX_CONCURRENCY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()?,
            max_queue_depth: env::var("TTS_MAX_QUEUE_DEPTH")
                .unwrap_or_else(|_| "32".to_string())
                .parse()?,
            queue_wait_secs: env::var("TTS_QUEUE_WAIT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            synthesis_retries: env::var("TTS_SYNTHESIS_RETRIES")
                .unwrap_or_else(|_| "1".to_string())
                .parse()?,
            cleanup_interval_secs: env::var("TTS_CLEANUP_INTERVAL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()?,
            artifact_max_age_secs: env::var("TTS_MAX_AGE_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
        };

        Ok(config)
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }

    pub fn queue_wait(&self) -> Duration {
        Duration::from_secs(self.queue_wait_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn artifact_max_age(&self) -> Duration {
        Duration::from_secs(self.artifact_max_age_secs)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
