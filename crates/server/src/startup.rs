use std::net::SocketAddr;

use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use common::{admin_http::spawn_admin_server, env::ensure_env};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &configs::AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    ensure_env(&cfg.server.frontend_dir, &cfg.server.data_dir).await?;
    if cfg.upstream.base_url.is_none() {
        warn!("PLAYFOLIO_API_URL is not set; proxy routes will answer 500");
    }
    if cfg.admin.username.is_none() || cfg.admin.password.is_none() {
        warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set; login will answer 500");
    }

    let state = AppState::from_config(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    if let Some(admin_addr) = cfg.server.admin_addr.as_deref() {
        spawn_admin_server(admin_addr).await?;
    }

    let addr = bind_addr(&cfg)?;
    info!(%addr, require_session = cfg.admin.require_session, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
