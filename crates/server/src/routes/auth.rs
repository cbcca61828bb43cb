use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};
use tracing::error;

use service::auth::domain::LoginInput;

use crate::errors::ApiError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "admin_session";

fn session_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// `null` or an undecodable body cannot be destructured into credentials.
fn login_input(raw: &[u8]) -> Result<LoginInput, ApiError> {
    let body: Value = serde_json::from_slice(raw).map_err(|e| {
        error!(error = %e, "login body is not JSON");
        ApiError::internal()
    })?;
    if body.is_null() {
        return Err(ApiError::internal());
    }
    Ok(LoginInput {
        username: body.get("username").cloned().unwrap_or(Value::Null),
        password: body.get("password").cloned().unwrap_or(Value::Null),
    })
}

pub async fn login(State(state): State<AppState>, jar: CookieJar, raw: Bytes) -> Result<(CookieJar, Json<Value>), ApiError> {
    let input = login_input(&raw)?;
    let session = state.auth.login(&input)?;
    let jar = jar.add(session_cookie(session.token));
    Ok((jar, Json(json!({ "message": "logged", "success": true }))))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(session_cookie(String::new()));
    (jar, StatusCode::NO_CONTENT)
}
