mod support;

use axum::http::{Method, StatusCode};
use httpmock::prelude::*;
use serde_json::json;

use support::{app, call, get, send_json, Options};

#[tokio::test]
async fn overview_lists_sections() {
    let app = app(Options { base_url: None, admin_key: None, credentials: true, require_session: false }).await;
    let r = get(&app, "/dashboard").await;
    assert_eq!(r.status, StatusCode::OK);
    let titles: Vec<&str> = r.body["cards"].as_array().unwrap().iter().map(|c| c["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Clubs", "Devices", "Players", "Keychains", "Activities", "API Keys"]);
}

#[tokio::test]
async fn players_view_pages_and_indexes() {
    let server = MockServer::start_async().await;
    let players: Vec<_> = (1..=27).map(|i| json!({"uid": format!("p{i}"), "status": "present"})).collect();
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/players");
            then.status(200).json_body(json!({"data": players}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/keychains");
            then.status(200).json_body(json!({"data": [{"uid": "kc1", "auth_code": "AB12", "players": [{"player_uid": "p27"}]}]}));
        })
        .await;
    let app = app(Options::upstream(server.base_url())).await;

    let r = get(&app, "/dashboard/players?page=2").await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body["page"]["total"], 27);
    assert_eq!(r.body["page"]["showing_from"], 26);
    assert_eq!(r.body["players"].as_array().unwrap().len(), 2);
    assert_eq!(r.body["players"][1]["keychain"], json!({"uid": "kc1", "auth_code": "AB12"}));
    assert_eq!(r.body["players"][0]["status"], "present");

    // blank page means the first one
    let r = get(&app, "/dashboard/players?page=").await;
    assert_eq!(r.body["page"]["page"], 1);
}

#[tokio::test]
async fn lookup_view_states() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/keychains/lookup").query_param("auth_code", "AB12");
            then.status(200).json_body(json!({"success": true, "data": {"uid": "kc1"}}));
        })
        .await;
    let app = app(Options::upstream(server.base_url())).await;

    let r = get(&app, "/dashboard/keychains/lookup?auth_code=%20%20").await;
    assert_eq!(r.body, json!({"status": "idle"}));

    let r = get(&app, "/dashboard/keychains/lookup?auth_code=ab12").await;
    assert_eq!(r.body, json!({"status": "found", "keychain": {"uid": "kc1"}}));
    let r = get(&app, "/dashboard/keychains/lookup?auth_code=AB12").await;
    assert_eq!(r.body["status"], "found");
    m.assert_hits_async(1).await;

    let r = get(&app, "/dashboard/keychains/lookup?auth_code=ZZZZ").await;
    assert_eq!(r.body, json!({"status": "notfound"}));
}

#[tokio::test]
async fn issue_key_from_dashboard() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/clubs/c1/keys").json_body(json!({"auth_code": "AB12"}));
            then.status(200).json_body(json!({"data": {"key": "k1", "status": "active"}}));
        })
        .await;
    let app = app(Options::upstream(server.base_url())).await;

    let r = send_json(&app, Method::POST, "/dashboard/keychains/keys", r#"{"club_uid":"c1","auth_code":"ab12 "}"#).await;
    m.assert_async().await;
    assert_eq!(r.status, StatusCode::CREATED);
    assert_eq!(r.body["data"]["key"], "k1");

    let r = send_json(&app, Method::POST, "/dashboard/keychains/keys", r#"{"club_uid":"c1"}"#).await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
    assert_eq!(r.body, json!({"error": "auth_code is required"}));
}

#[tokio::test]
async fn activities_view_builds_upstream_query() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/activities")
                .query_param("limit", "50")
                .query_param("offset", "50")
                .query_param("start_date", "2025-01-01T00:00:00.000Z");
            then.status(200).json_body(json!({"data": [{"uid": "a1", "format": "attendance", "player_uid": "p1"}], "total": 51}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/clubs");
            then.status(200).json_body(json!({"data": []}));
        })
        .await;
    let app = app(Options::upstream(server.base_url())).await;

    let r = get(&app, "/dashboard/activities?page=2&start_date=2025-01-01&club_id=").await;
    m.assert_async().await;
    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.body["total"], 51);
    assert_eq!(r.body["page"]["total_pages"], 2);
    assert_eq!(r.body["activities"][0]["player_label"], "p1");
}

#[tokio::test]
async fn api_key_lifecycle() {
    let app = app(Options { base_url: None, admin_key: None, credentials: true, require_session: false }).await;

    let r = send_json(&app, Method::POST, "/dashboard/api-keys", r#"{"name":"  "}"#).await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);

    let r = send_json(&app, Method::POST, "/dashboard/api-keys", r#"{"name":"reports"}"#).await;
    assert_eq!(r.status, StatusCode::CREATED);
    let id = r.body["id"].as_str().unwrap().to_string();
    let key = r.body["key"].as_str().unwrap();
    assert!(key.starts_with("pk_") && key.len() == 29);

    let r = get(&app, "/dashboard/api-keys").await;
    assert_eq!(r.body.as_array().unwrap().len(), 1);
    assert_eq!(r.body[0]["name"], "reports");

    let uri = format!("/dashboard/api-keys/{id}");
    let r = call(&app, Method::DELETE, &uri, None, &[]).await;
    assert_eq!(r.status, StatusCode::NO_CONTENT);
    let r = call(&app, Method::DELETE, &uri, None, &[]).await;
    assert_eq!(r.status, StatusCode::NOT_FOUND);
}
