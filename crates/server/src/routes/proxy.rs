//! `/api/*`: pass-through routes onto the Playfolio REST API.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use service::services::{activity_service, club_service, device_service, keychain_service, player_service};
use service::upstream::envelope::parse_body;

use crate::errors::ApiError;
use crate::state::AppState;

type ApiResult = Result<Response, ApiError>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/clubs", get(list_clubs).post(create_club))
        .route("/api/clubs/:uid", put(update_club).delete(delete_club))
        .route("/api/clubs/:uid/members", get(club_members))
        .route("/api/clubs/:uid/keys", get(club_keys).post(create_club_key))
        .route("/api/clubs/:uid/keys/:key", axum::routing::delete(delete_club_key))
        .route("/api/devices", get(list_devices).post(create_device))
        .route("/api/devices/:uid", put(update_device).delete(delete_device))
        .route("/api/players", get(list_players).post(create_player))
        .route("/api/players/:uid", put(update_player).delete(delete_player))
        .route("/api/keychains", get(list_keychains).post(join_keychain))
        .route("/api/keychains/lookup", get(lookup_keychain))
        .route("/api/keychains/:uid", get(get_keychain).delete(delete_keychain))
        .route("/api/activities", get(list_activities))
}

fn ok(body: serde_json::Value) -> Response {
    Json(body).into_response()
}

fn created(body: serde_json::Value) -> Response {
    (StatusCode::CREATED, Json(body)).into_response()
}

fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

// clubs

async fn list_clubs(State(s): State<AppState>) -> ApiResult {
    Ok(ok(club_service::list(&s.client).await?))
}

async fn create_club(State(s): State<AppState>, raw: Bytes) -> ApiResult {
    s.client.require_admin_key()?;
    let body = parse_body(&club_service::CREATE, &raw)?;
    Ok(created(club_service::create(&s.client, body).await?))
}

async fn update_club(State(s): State<AppState>, Path(uid): Path<String>, raw: Bytes) -> ApiResult {
    s.client.require_base()?;
    let body = parse_body(&club_service::UPDATE, &raw)?;
    Ok(ok(club_service::update(&s.client, &uid, body).await?))
}

async fn delete_club(State(s): State<AppState>, Path(uid): Path<String>) -> ApiResult {
    club_service::delete(&s.client, &uid).await?;
    Ok(no_content())
}

async fn club_members(State(s): State<AppState>, Path(uid): Path<String>) -> ApiResult {
    Ok(ok(club_service::members(&s.client, &uid).await?))
}

async fn club_keys(State(s): State<AppState>, Path(uid): Path<String>) -> ApiResult {
    Ok(ok(club_service::keys(&s.client, &uid).await?))
}

async fn create_club_key(State(s): State<AppState>, Path(uid): Path<String>, raw: Bytes) -> ApiResult {
    s.client.require_base()?;
    let body = parse_body(&club_service::CREATE_KEY, &raw)?;
    Ok(created(club_service::create_key(&s.client, &uid, &body).await?))
}

async fn delete_club_key(State(s): State<AppState>, Path((uid, key)): Path<(String, String)>) -> ApiResult {
    club_service::delete_key(&s.client, &uid, &key).await?;
    Ok(no_content())
}

// devices

async fn list_devices(State(s): State<AppState>) -> ApiResult {
    Ok(ok(device_service::list(&s.client).await?))
}

async fn create_device(State(s): State<AppState>, raw: Bytes) -> ApiResult {
    s.client.require_base()?;
    let body = parse_body(&device_service::CREATE, &raw)?;
    Ok(created(device_service::create(&s.client, &body).await?))
}

async fn update_device(State(s): State<AppState>, Path(uid): Path<String>, raw: Bytes) -> ApiResult {
    s.client.require_base()?;
    let body = parse_body(&device_service::UPDATE, &raw)?;
    Ok(ok(device_service::update(&s.client, &uid, &body).await?))
}

async fn delete_device(State(s): State<AppState>, Path(uid): Path<String>) -> ApiResult {
    device_service::delete(&s.client, &uid).await?;
    Ok(no_content())
}

// players

async fn list_players(State(s): State<AppState>) -> ApiResult {
    Ok(ok(player_service::list(&s.client).await?))
}

async fn create_player(State(s): State<AppState>, raw: Bytes) -> ApiResult {
    s.client.require_base()?;
    let body = parse_body(&player_service::CREATE, &raw)?;
    Ok(created(player_service::create(&s.client, &body).await?))
}

async fn update_player(State(s): State<AppState>, Path(uid): Path<String>, raw: Bytes) -> ApiResult {
    s.client.require_base()?;
    let body = parse_body(&player_service::UPDATE, &raw)?;
    Ok(ok(player_service::update(&s.client, &uid, &body).await?))
}

async fn delete_player(State(s): State<AppState>, Path(uid): Path<String>) -> ApiResult {
    player_service::delete(&s.client, &uid).await?;
    Ok(no_content())
}

// keychains

async fn list_keychains(State(s): State<AppState>) -> ApiResult {
    Ok(ok(keychain_service::list(&s.client).await?))
}

async fn join_keychain(State(s): State<AppState>, raw: Bytes) -> ApiResult {
    s.client.require_base()?;
    let body = parse_body(&keychain_service::JOIN, &raw)?;
    Ok(ok(keychain_service::join(&s.client, &body).await?))
}

#[derive(Debug, Default, Deserialize)]
struct LookupParams {
    auth_code: Option<String>,
}

async fn lookup_keychain(State(s): State<AppState>, Query(params): Query<LookupParams>) -> ApiResult {
    s.client.require_base()?;
    Ok(ok(keychain_service::lookup(&s.client, params.auth_code.as_deref()).await?))
}

async fn get_keychain(State(s): State<AppState>, Path(uid): Path<String>) -> ApiResult {
    Ok(ok(keychain_service::get(&s.client, &uid).await?))
}

async fn delete_keychain(State(s): State<AppState>, Path(uid): Path<String>) -> ApiResult {
    Ok(ok(keychain_service::delete(&s.client, &uid).await?))
}

// activities

async fn list_activities(State(s): State<AppState>, Query(params): Query<Vec<(String, String)>>) -> ApiResult {
    Ok(ok(activity_service::list(&s.client, params).await?))
}
