//! StationRelay server
//!
//! Bridges the WCS station controller and RMS: serves the WCS-facing HTTP
//! API and delivers dock callbacks to RMS with delayed, unbounded retry.

use std::sync::Arc;

use anyhow::{Context, Result};
use sr_common::logging;
use sr_config::AppConfig;
use sr_notify::{NotifierConfig, RmsNotifier};
use sr_station::api::{create_router, AppState};
use sr_station::OutboundGate;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config
        .rms
        .validate()
        .context("Invalid RMS configuration")?;

    info!(
        rms_host = %config.rms.host,
        rms_port = config.rms.port,
        "Starting StationRelay server"
    );

    let notifier = Arc::new(
        RmsNotifier::new(NotifierConfig {
            request_timeout: config.rms.request.timeout(),
            connect_timeout: config.rms.request.timeout(),
        })
        .context("Failed to build RMS notifier")?,
    );

    let state = AppState {
        notifier: notifier.clone(),
        gate: Arc::new(OutboundGate::new()),
        rms: config.rms.clone(),
        callback_delay: config.rms.request.delay(),
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.http.host, config.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "WCS API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop any retry loops still waiting on RMS
    notifier.shutdown();
    info!("StationRelay server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
