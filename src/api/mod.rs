//! HTTP layer exposing the inference pipelines.

pub mod routes;
pub mod types;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{config::Settings, nlp::Pipelines};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub pipelines: Pipelines,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(settings: Settings, pipelines: Pipelines) -> Self {
        Self {
            settings,
            pipelines,
            started_at: Utc::now(),
        }
    }
}

/// Routes of the public API, without listener concerns.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/analyze", get(routes::analyze))
        .route("/classify", get(routes::classify))
        .route("/extract", get(routes::extract))
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let pipelines = {
        let settings = settings.clone();
        tokio::task::spawn_blocking(move || Pipelines::load(&settings))
            .await
            .context("model loading task panicked")?
            .context("loading pipelines")?
    };
    info!(backend = %pipelines.backend, "pipelines ready");

    let router = router(AppState::new(settings, pipelines));
    let listener = bind(&host, port).await?;
    info!(addr = %listener.local_addr()?, "serving nlp-gateway API");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Listen on `host`, which may be a name such as `localhost` or a bare IPv6
/// address.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("binding {host} port {port}"))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
