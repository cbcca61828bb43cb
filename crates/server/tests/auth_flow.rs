mod support;

use axum::http::{header, Method, StatusCode};
use httpmock::prelude::*;
use serde_json::json;

use support::{app, call, send_json, Options};

fn offline(credentials: bool, require_session: bool) -> Options {
    Options { base_url: None, admin_key: None, credentials, require_session }
}

fn session_cookie(reply: &support::Reply) -> String {
    let raw = reply
        .headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    raw.split(';').next().unwrap_or_default().to_string()
}

#[tokio::test]
async fn login_success_sets_session_cookie() {
    let app = app(offline(true, false)).await;
    let r = send_json(&app, Method::POST, "/api/login", r#"{"username":"admin","password":"s3cret"}"#).await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body, json!({"message": "logged", "success": true}));

    let set_cookie = r.headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(set_cookie.starts_with("admin_session="));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn login_rejections() {
    let app = app(offline(true, false)).await;

    let r = send_json(&app, Method::POST, "/api/login", r#"{"username":"admin","password":"wrong"}"#).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
    assert_eq!(r.body, json!({"error": "Invalid credentials", "success": false}));
    assert!(r.headers.get(header::SET_COOKIE).is_none());

    let r = send_json(&app, Method::POST, "/api/login", r#"{"username":"admin"}"#).await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert_eq!(r.body, json!({"error": "Username and password are required"}));

    let r = send_json(&app, Method::POST, "/api/login", "not json").await;
    assert_eq!(r.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(r.body, json!({"error": "Internal server error"}));

    let r = send_json(&app, Method::POST, "/api/login", "null").await;
    assert_eq!(r.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn login_without_configured_credentials() {
    let app = app(offline(false, false)).await;
    let r = send_json(&app, Method::POST, "/api/login", r#"{"username":"admin","password":"s3cret"}"#).await;
    assert_eq!(r.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(r.body, json!({"error": "Server configuration error"}));

    // configuration is checked before field presence
    let r = send_json(&app, Method::POST, "/api/login", "{}").await;
    assert_eq!(r.body, json!({"error": "Server configuration error"}));
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = app(offline(true, false)).await;
    let r = call(&app, Method::POST, "/api/logout", None, &[("cookie", "admin_session=abc")]).await;
    assert_eq!(r.status, StatusCode::NO_CONTENT);
    let set_cookie = r.headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(set_cookie.starts_with("admin_session=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    // nothing to clear, still a successful logout
    let r = call(&app, Method::POST, "/api/logout", None, &[]).await;
    assert_eq!(r.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn open_by_default() {
    let app = app(offline(true, false)).await;
    let r = call(&app, Method::GET, "/dashboard", None, &[]).await;
    assert_eq!(r.status, StatusCode::OK);
}

#[tokio::test]
async fn gate_rejects_missing_and_invalid_sessions() {
    let app = app(offline(true, true)).await;

    let r = call(&app, Method::GET, "/api/clubs", None, &[]).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
    assert_eq!(r.body, json!({"error": "Authentication required"}));

    let r = call(&app, Method::GET, "/dashboard", None, &[("authorization", "Bearer garbage")]).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);
    assert_eq!(r.body, json!({"error": "Invalid session"}));

    let r = call(&app, Method::GET, "/dashboard", None, &[("authorization", "Basic abc")]).await;
    assert_eq!(r.status, StatusCode::UNAUTHORIZED);

    let r = call(&app, Method::GET, "/dashboard", None, &[("x-api-key", "pk_unknown")]).await;
    assert_eq!(r.body, json!({"error": "Invalid session"}));

    // public routes stay reachable
    let r = call(&app, Method::GET, "/health", None, &[]).await;
    assert_eq!(r.status, StatusCode::OK);
}

#[tokio::test]
async fn session_cookie_bearer_and_api_key_pass_the_gate() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/clubs");
            then.status(200).json_body(json!({"data": []}));
        })
        .await;
    let app = app(Options { require_session: true, ..Options::upstream(server.base_url()) }).await;

    let login = send_json(&app, Method::POST, "/api/login", r#"{"username":"admin","password":"s3cret"}"#).await;
    let cookie = session_cookie(&login);
    let token = cookie.trim_start_matches("admin_session=").to_string();

    let r = call(&app, Method::GET, "/api/clubs", None, &[("cookie", cookie.as_str())]).await;
    assert_eq!(r.status, StatusCode::OK);

    let bearer = format!("Bearer {token}");
    let r = call(&app, Method::GET, "/api/clubs", None, &[("authorization", bearer.as_str())]).await;
    assert_eq!(r.status, StatusCode::OK);

    let created = call(
        &app,
        Method::POST,
        "/dashboard/api-keys",
        Some(r#"{"name":"kiosk"}"#),
        &[("authorization", bearer.as_str())],
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let key = created.body["key"].as_str().unwrap_or_default().to_string();

    let r = call(&app, Method::GET, "/api/clubs", None, &[("x-api-key", key.as_str())]).await;
    assert_eq!(r.status, StatusCode::OK);
    m.assert_hits_async(3).await;
}
