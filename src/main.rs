mod config;
mod models;
mod puzzle;
mod routes;
mod utils;
mod wordlist;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use config::Config;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordsearch_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word search backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded (default size {}, max size {}, {} attempts per word)",
        config.puzzle.default_size,
        config.puzzle.max_size,
        config.puzzle.attempt_budget
    );

    let addr = config.server_addr();
    let frontend_dir = config.server.frontend_dir.clone();

    // Create application state
    let state = Arc::new(AppState { config });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Serve the worksheet UI as static files
    let frontend_service = ServeDir::new(&frontend_dir);

    // Build router
    let app: Router = routes::create_routes()
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Puzzle endpoint: http://{}/api/wordsearch", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Worksheet frontend: http://{}/ (from {})", addr, frontend_dir);

    axum::serve(listener, app).await?;

    Ok(())
}
