// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::progress::ScanStatus;

#[derive(Clone)]
pub struct StatusState {
    status: watch::Receiver<ScanStatus>,
    metrics: Option<PrometheusHandle>,
}

/// Read-only status router: `/health`, `/status`, `/metrics`.
pub fn build_router(status: watch::Receiver<ScanStatus>, metrics: Option<PrometheusHandle>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(StatusState { status, metrics })
}

/// Bind `addr` and serve `app` until the process exits.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Status endpoint listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}

async fn health() -> &'static str {
    "ok"
}

async fn status_handler(State(state): State<StatusState>) -> Json<ScanStatus> {
    Json(state.status.borrow().clone())
}

async fn metrics_handler(State(state): State<StatusState>) -> Result<String, StatusCode> {
    match &state.metrics {
        Some(handle) => Ok(handle.render()),
        None => Err(StatusCode::NOT_FOUND),
    }
}
