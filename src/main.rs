// Main entry point - Dependency injection and server setup
use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use character_timeline::application::character_service::CharacterService;
use character_timeline::application::dashboard_service::DashboardService;
use character_timeline::infrastructure::config::load_app_config;
use character_timeline::infrastructure::tracker_repository::TrackerRepository;
use character_timeline::presentation::app_state::AppState;
use character_timeline::presentation::handlers::{get_sessions, get_timeline, health_check, list_characters};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(TrackerRepository::new(config.tracker.base_url.clone()));

    // Create services (application layer)
    let character_service =
        CharacterService::new(repository.clone(), config.pipeline.online_threshold());
    let dashboard_service = DashboardService::new(
        repository,
        config.pipeline.solid_threshold(),
        config.pipeline.session_params(),
    );

    let state = Arc::new(AppState {
        character_service,
        dashboard_service,
    });

    // Build router (presentation layer)
    // Compression is applied per response in json_response, so no CompressionLayer here
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/characters", get(list_characters))
        .route("/timeline", get(get_timeline))
        .route("/sessions", get(get_sessions))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(
        "Starting character-timeline service on {} (tracker at {})",
        addr,
        config.tracker.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
