// src/health.rs

//! Liveness endpoint for uptime monitors.
//!
//! Runs on its own task and shares nothing with the scheduler.

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::models::HealthConfig;

/// `GET /` answering 200 with a fixed body.
pub fn router(body: impl Into<String>) -> Router {
    let body = body.into();
    Router::new().route(
        "/",
        get(move || {
            let body = body.clone();
            async move { body }
        }),
    )
}

/// Bind and serve until the process exits.
pub async fn serve(bind: &str, body: &str) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    log::info!("Health endpoint listening on {}", listener.local_addr()?);
    axum::serve(listener, router(body)).await?;
    Ok(())
}

/// Start the endpoint in the background. Failures are logged; the relay
/// keeps running without it.
pub fn spawn(config: &HealthConfig) -> Option<JoinHandle<()>> {
    if !config.enabled {
        log::debug!("Health endpoint disabled");
        return None;
    }
    let (bind, body) = (config.bind.clone(), config.body.clone());
    Some(tokio::spawn(async move {
        if let Err(e) = serve(&bind, &body).await {
            log::error!("Health endpoint on {bind} stopped: {e}");
        }
    }))
}
