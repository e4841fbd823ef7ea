use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voicetape_backend::controllers::{
    audio::AudioController, speech::SpeechController, stats::StatsController,
};
use voicetape_backend::domain::speech::{CapacityLimiter, SpeechLimits, SpeechService};
use voicetape_backend::domain::voice::VoiceCatalog;
use voicetape_backend::infrastructure::artifacts::{spawn_retention_sweeper, ArtifactStore};
use voicetape_backend::infrastructure::config::{Config, LogFormat};
use voicetape_backend::infrastructure::http::start_http_server;
use voicetape_backend::infrastructure::stats::ServiceStats;
use voicetape_backend::infrastructure::synthesizer::{
    FakeSynthesizer, HttpSynthesizer, Synthesizer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting VoiceTape Backend on {}:{}",
        config.host,
        config.port
    );

    let config = Arc::new(config);

    // Artifact store: create the output directory and rebuild metadata from
    // whatever survived the last run
    let store = Arc::new(ArtifactStore::new(&config.output_dir).await?);
    let recovered = store.rescan().await?;
    tracing::info!(
        output_dir = %config.output_dir.display(),
        recovered,
        "Artifact store ready"
    );

    // Voice catalog is static for the process lifetime
    let catalog = Arc::new(VoiceCatalog::with_default_voices());
    tracing::info!(voices = catalog.len(), "Voice catalog loaded");

    // Synthesis engine: HTTP sidecar, or the deterministic fake
    let synthesizer: Arc<dyn Synthesizer> = if config.fake_engine {
        tracing::warn!("TTS_FAKE_ENGINE is set; serving generated tones instead of real speech");
        Arc::new(FakeSynthesizer::new())
    } else {
        tracing::info!(engine_url = %config.engine_url, "Using HTTP synthesis engine");
        Arc::new(HttpSynthesizer::new(
            config.engine_url.clone(),
            config.engine_timeout(),
        )?)
    };

    // === DEPENDENCY INJECTION SETUP ===
    let stats = Arc::new(ServiceStats::new());

    let speech_service = Arc::new(SpeechService::new(
        catalog.clone(),
        synthesizer,
        store.clone(),
        stats.clone(),
        CapacityLimiter::new(
            config.max_concurrency,
            config.max_queue_depth,
            config.queue_wait(),
        ),
        SpeechLimits {
            max_text_length: config.max_text_length,
            max_batch_size: config.max_batch_size,
            synthesis_retries: config.synthesis_retries,
        },
    ));

    let speech_controller = Arc::new(SpeechController::new(speech_service));
    let audio_controller = Arc::new(AudioController::new(store.clone()));
    let stats_controller = Arc::new(StatsController::new(
        stats,
        store.clone(),
        catalog.clone(),
        config.clone(),
    ));

    // Background retention sweep, decoupled from request handling
    spawn_retention_sweeper(
        store,
        config.cleanup_interval(),
        config.artifact_max_age(),
    );

    start_http_server(
        config,
        catalog,
        speech_controller,
        audio_controller,
        stats_controller,
    )
    .await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voicetape_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voicetape_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
