#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes;
use server::state::AppState;
use service::auth::service::AuthConfig;
use service::auth::AdminAuthService;
use service::file::FileApiKeyStore;
use service::lookup_cache::LookupCache;
use service::upstream::PlayfolioClient;

pub struct Options {
    pub base_url: Option<String>,
    pub admin_key: Option<String>,
    pub credentials: bool,
    pub require_session: bool,
}

impl Options {
    pub fn upstream(base_url: String) -> Self {
        Self { base_url: Some(base_url), admin_key: Some("admin-key".into()), credentials: true, require_session: false }
    }
}

pub async fn app(opts: Options) -> Router {
    let tmp = std::env::temp_dir().join(format!("server_test_{}", Uuid::new_v4()));
    let (username, password) = if opts.credentials {
        (Some("admin".to_string()), Some("s3cret".to_string()))
    } else {
        (None, None)
    };
    let state = AppState {
        client: PlayfolioClient::new(opts.base_url.as_deref(), opts.admin_key, Duration::from_secs(2)).unwrap(),
        auth: AdminAuthService::new(AuthConfig {
            username,
            password,
            session_secret: "test-secret".into(),
            session_ttl_hours: 1,
        }),
        lookups: LookupCache::new(Duration::from_millis(400)),
        api_keys: FileApiKeyStore::new(tmp.join("api_keys.json")).await.unwrap(),
        require_session: opts.require_session,
        frontend_dir: tmp.join("frontend"),
    };
    routes::build_router(state, CorsLayer::very_permissive())
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn call(app: &Router, method: Method, uri: &str, body: Option<&str>, headers: &[(&str, &str)]) -> Reply {
    let mut req = Request::builder().method(method).uri(uri);
    if body.is_some() {
        req = req.header("content-type", "application/json");
    }
    for (k, v) in headers {
        req = req.header(*k, *v);
    }
    let req = req.body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty)).unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Reply { status, headers, body }
}

pub async fn get(app: &Router, uri: &str) -> Reply {
    call(app, Method::GET, uri, None, &[]).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: &str) -> Reply {
    call(app, method, uri, Some(body), &[]).await
}
