//! Application startup and lifecycle management.

use crate::config::RenewalConfig;
use crate::handlers::{next_renewal_date, renewal_report};
use crate::services::{get_metrics, init_metrics};
use axum::{
    Json, Router, http::StatusCode, middleware, response::IntoResponse,
    routing::{get, post},
};
use marketplace_core::clock::{Clock, SystemClock};
use marketplace_core::error::AppError;
use marketplace_core::middleware::metrics::metrics_middleware;
use marketplace_core::middleware::tracing::request_id_middleware;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: RenewalConfig,
    pub clock: Arc<dyn Clock>,
}

/// Health check endpoint for Docker/K8s liveness probes.
async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "renewal-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check endpoint for K8s readiness probes.
async fn readiness_check() -> StatusCode {
    StatusCode::OK
}

/// Metrics endpoint for Prometheus scraping.
async fn metrics_handler() -> impl IntoResponse {
    let metrics = get_metrics();
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        metrics,
    )
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration and clock.
    pub async fn build(config: RenewalConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        init_metrics();

        let state = AppState {
            config: config.clone(),
            clock,
        };

        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Renewal service listener bound");

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Build with the system clock.
    pub async fn build_with_system_clock(config: RenewalConfig) -> Result<Self, AppError> {
        Self::build(config, Arc::new(SystemClock)).await
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = Router::new()
            .route("/renewals/report", post(renewal_report))
            .route("/renewals/next-date", post(next_renewal_date))
            .route("/health", get(health_check))
            .route("/ready", get(readiness_check))
            .route("/metrics", get(metrics_handler))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(metrics_middleware))
            .layer(middleware::from_fn(request_id_middleware))
            .with_state(self.state);

        tracing::info!(
            service = "renewal-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        axum::serve(self.listener, router).await
    }
}
