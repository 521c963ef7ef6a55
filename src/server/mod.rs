// Server module
// Static page assets with single-page-app fallback, plus the calendar JSON adapter

mod routes;
pub mod view;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::models::settings::Settings;
use crate::services::hebcal::{DateConverter, HebcalClient, OfflineConverter};

pub use routes::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub converter: Arc<dyn DateConverter>,
}

impl AppState {
    pub fn new(settings: Settings, converter: Arc<dyn DateConverter>) -> Self {
        Self {
            settings: Arc::new(settings),
            converter,
        }
    }

    /// Hebcal lookups, or none at all when they are disabled
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let converter: Arc<dyn DateConverter> = if settings.lookup_enabled {
            Arc::new(HebcalClient::from_settings(&settings)?)
        } else {
            log::warn!("Hebrew date lookups are disabled");
            Arc::new(OfflineConverter)
        };
        Ok(Self::new(settings, converter))
    }
}

/// Any path that is not a file serves the main document
fn static_files(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

pub fn router(state: AppState) -> Router {
    let assets = static_files(Path::new(&state.settings.static_dir));

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/calendar", get(routes::get_calendar))
        .route("/api/calendar/cycle/{position}", post(routes::post_cycle))
        .route("/api/calendar/fill", post(routes::post_fill))
        .route("/api/calendar/reset", post(routes::post_reset))
        .route("/api/calendar/split", post(routes::post_split))
        .fallback_service(assets)
        .layer(middleware::from_fn(routes::log_requests))
        .with_state(state)
}

pub async fn serve(state: AppState) -> Result<()> {
    let address = state.settings.bind_address();
    let static_dir = state.settings.static_dir.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    log::info!("Server running at http://{}/ (assets from {})", address, static_dir);
    log::info!("Press Ctrl+C to quit.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", err);
    }
}
