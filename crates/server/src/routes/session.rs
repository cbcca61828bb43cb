use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use service::auth::errors::AuthError;

use super::auth::SESSION_COOKIE;
use crate::errors::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Gate for `/api/*` and `/dashboard/*` when sessions are required.
///
/// Accepts `Authorization: Bearer <token>`, else the session cookie, else a
/// dashboard-issued key in `X-API-Key`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.require_session || req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    let path = req.uri().path().to_string();

    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let token = match bearer {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) if !t.trim().is_empty() => Some(t.trim().to_string()),
            _ => {
                warn!(%path, "invalid Authorization format (expect Bearer)");
                return Err(AuthError::InvalidSession.into());
            }
        },
        None => jar.get(SESSION_COOKIE).map(|c| c.value().to_string()).filter(|v| !v.is_empty()),
    };

    if let Some(token) = token {
        return match state.auth.verify(&token) {
            Ok(_) => Ok(next.run(req).await),
            Err(e) => {
                warn!(%path, "session validation failed");
                Err(e.into())
            }
        };
    }

    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string);
    match api_key {
        Some(key) if state.api_keys.contains_key(&key).await => Ok(next.run(req).await),
        Some(_) => {
            warn!(%path, "unknown api key");
            Err(AuthError::InvalidSession.into())
        }
        None => {
            warn!(%path, "missing session");
            Err(AuthError::MissingSession.into())
        }
    }
}
