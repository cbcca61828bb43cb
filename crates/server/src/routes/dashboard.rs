//! `/dashboard/*`: JSON views for the admin frontend.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use service::activity_filter::ActivityFilter;
use service::dashboard::{activities, directory, keychains, overview, players};
use service::errors::ServiceError;

use crate::errors::ApiError;
use crate::state::AppState;

type ApiResult = Result<Response, ApiError>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(overview_view))
        .route("/dashboard/clubs", get(clubs_view))
        .route("/dashboard/devices", get(devices_view))
        .route("/dashboard/players", get(players_view))
        .route("/dashboard/keychains", get(keychains_view))
        .route("/dashboard/keychains/lookup", get(lookup_view))
        .route("/dashboard/keychains/keys", post(issue_key))
        .route("/dashboard/activities", get(activities_view))
        .route("/dashboard/api-keys", get(list_api_keys).post(create_api_key))
        .route("/dashboard/api-keys/:id", delete(delete_api_key))
}

/// `?page=` is lenient: blank or garbage means the first page.
fn parse_page(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|p| p.trim().parse().ok())
}

fn json_body(raw: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(raw).map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "Invalid request body"))
}

async fn overview_view() -> Json<overview::Overview> {
    Json(overview::overview())
}

async fn clubs_view(State(s): State<AppState>) -> ApiResult {
    Ok(Json(directory::clubs(&s.client).await?).into_response())
}

async fn devices_view(State(s): State<AppState>) -> ApiResult {
    Ok(Json(directory::devices(&s.client).await?).into_response())
}

#[derive(Debug, Default, Deserialize)]
struct PageParams {
    page: Option<String>,
}

async fn players_view(State(s): State<AppState>, Query(q): Query<PageParams>) -> ApiResult {
    let view = players::players(&s.client, parse_page(q.page.as_deref())).await?;
    Ok(Json(view).into_response())
}

#[derive(Debug, Default, Deserialize)]
struct KeychainParams {
    club: Option<String>,
    page: Option<String>,
}

async fn keychains_view(State(s): State<AppState>, Query(q): Query<KeychainParams>) -> ApiResult {
    let view = keychains::keychains(&s.client, q.club.as_deref(), parse_page(q.page.as_deref())).await?;
    Ok(Json(view).into_response())
}

#[derive(Debug, Default, Deserialize)]
struct LookupParams {
    auth_code: Option<String>,
}

async fn lookup_view(State(s): State<AppState>, Query(q): Query<LookupParams>) -> ApiResult {
    s.client.require_base()?;
    let outcome = s.lookups.lookup(&s.client, q.auth_code.as_deref().unwrap_or("")).await;
    Ok(Json(outcome).into_response())
}

async fn issue_key(State(s): State<AppState>, raw: Bytes) -> ApiResult {
    let req: keychains::IssueKey = serde_json::from_value(json_body(&raw)?)
        .map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "Invalid request body"))?;
    let created = keychains::issue_key(&s.client, &req).await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

#[derive(Debug, Default, Deserialize)]
struct ActivityParams {
    page: Option<String>,
    club_id: Option<String>,
    format: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

async fn activities_view(State(s): State<AppState>, Query(q): Query<ActivityParams>) -> ApiResult {
    let filter = ActivityFilter {
        club_id: q.club_id,
        format: q.format,
        start_date: q.start_date,
        end_date: q.end_date,
    };
    let view = activities::activities(&s.client, parse_page(q.page.as_deref()), &filter).await?;
    Ok(Json(view).into_response())
}

// api keys

async fn list_api_keys(State(s): State<AppState>) -> ApiResult {
    Ok(Json(s.api_keys.list().await).into_response())
}

async fn create_api_key(State(s): State<AppState>, raw: Bytes) -> ApiResult {
    let body = json_body(&raw)?;
    let name = body.get("name").and_then(Value::as_str).unwrap_or_default();
    let record = s.api_keys.create(name).await?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

async fn delete_api_key(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult {
    match s.api_keys.delete(&id).await? {
        true => Ok(StatusCode::NO_CONTENT.into_response()),
        false => Err(ServiceError::not_found("api key").into()),
    }
}
