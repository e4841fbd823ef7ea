pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    audio::AudioController, health, speech::SpeechController, stats::StatsController, voices,
};
use crate::domain::voice::VoiceCatalog;
use crate::infrastructure::config::Config;
use self::request_id::request_id_middleware;

/// Assemble the application router. Split out from server startup so the
/// test suite can mount the same routes on an ephemeral port.
pub fn create_app(
    config: Arc<Config>,
    catalog: Arc<VoiceCatalog>,
    speech_controller: Arc<SpeechController>,
    audio_controller: Arc<AudioController>,
    stats_controller: Arc<StatsController>,
) -> Router {
    let speech_routes = Router::new()
        .route("/tts", post(SpeechController::synthesize))
        .route("/tts/batch", post(SpeechController::synthesize_batch))
        .with_state(speech_controller);

    let audio_routes = Router::new()
        .route("/audio/:audioId", get(AudioController::download))
        .with_state(audio_controller);

    let voice_routes = Router::new()
        .route("/voices", get(voices::list_voices))
        .with_state(catalog);

    let stats_routes = Router::new()
        .route("/stats", get(StatsController::stats))
        .with_state(stats_controller);

    let meta_routes = Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .with_state(config);

    Router::new()
        .merge(meta_routes)
        .merge(speech_routes)
        .merge(audio_routes)
        .merge(voice_routes)
        .merge(stats_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        // The original deployment served browsers from any origin
        .layer(CorsLayer::permissive())
}

/// Bind the listener and serve until the process exits
pub async fn start_http_server(
    config: Arc<Config>,
    catalog: Arc<VoiceCatalog>,
    speech_controller: Arc<SpeechController>,
    audio_controller: Arc<AudioController>,
    stats_controller: Arc<StatsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app(
        config.clone(),
        catalog,
        speech_controller,
        audio_controller,
        stats_controller,
    );

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
