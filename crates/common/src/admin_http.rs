//! Lightweight admin HTTP listener
//!
//! Exposes `/healthz` and `/metrics` on a separate address so scrapers never
//! hit the dashboard router.

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::metrics::encode_metrics;

async fn healthz() -> &'static str { "OK" }

pub fn admin_router() -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(|| async { encode_metrics() }))
}

/// Bind `addr` and serve the admin router on the current runtime.
///
/// Bind failures are returned; serve errors after startup are logged.
pub async fn spawn_admin_server(addr: &str) -> anyhow::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "admin server listening");
    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, admin_router()).await {
            error!(error = %e, "admin server stopped");
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthz_answers_ok() -> anyhow::Result<()> {
        let resp = admin_router()
            .oneshot(Request::builder().uri("/healthz").body(Body::empty())?)
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn metrics_endpoint_is_text() -> anyhow::Result<()> {
        let resp = admin_router()
            .oneshot(Request::builder().uri("/metrics").body(Body::empty())?)
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
        Ok(())
    }
}
