//! HTTP server for wayfinderd

use crate::audit::AuditSink;
use crate::config::Config;
use crate::handlers::SkillHandler;
use crate::routes;
use crate::workbook::WorkbookCache;
use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub workbooks: WorkbookCache,
    pub handler: SkillHandler,
    pub audit: AuditSink,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: &Config, audit: AuditSink) -> Self {
        Self {
            workbooks: WorkbookCache::new(
                config.data.dir.clone(),
                Duration::from_secs(config.data.cache_ttl_secs),
            ),
            handler: SkillHandler::new(config),
            audit,
            start_time: Instant::now(),
        }
    }
}

/// Build the router with all routes and layers
pub fn app(state: AppState, config: &Config) -> Router {
    Router::new()
        .merge(routes::skill_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(DefaultBodyLimit::max(config.server.body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState, config: &Config) -> Result<()> {
    let app = app(state, config);

    let addr = config.server.bind.as_str();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down gracefully");
    }
}
