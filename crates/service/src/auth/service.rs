use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde_json::Value;
use subtle::ConstantTimeEq;
use tracing::{info, instrument, warn};

use super::domain::{AdminSession, LoginInput, SessionClaims};
use super::errors::AuthError;
use crate::upstream::envelope::truthy;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub session_secret: String,
    pub session_ttl_hours: i64,
}

impl From<&configs::AdminConfig> for AuthConfig {
    fn from(cfg: &configs::AdminConfig) -> Self {
        Self {
            username: cfg.username.clone(),
            password: cfg.password.clone(),
            session_secret: cfg.session_secret.clone(),
            session_ttl_hours: cfg.session_ttl_hours,
        }
    }
}

/// Single-admin login independent of web framework
#[derive(Clone)]
pub struct AdminAuthService {
    cfg: AuthConfig,
}

impl AdminAuthService {
    pub fn new(cfg: AuthConfig) -> Self { Self { cfg } }

    /// Check the submitted credentials and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::service::{AdminAuthService, AuthConfig};
    /// use service::auth::domain::LoginInput;
    /// let svc = AdminAuthService::new(AuthConfig {
    ///     username: Some("admin".into()),
    ///     password: Some("hunter2".into()),
    ///     session_secret: "secret".into(),
    ///     session_ttl_hours: 12,
    /// });
    /// let input = LoginInput { username: "admin".into(), password: "hunter2".into() };
    /// let session = svc.login(&input).unwrap();
    /// assert_eq!(svc.verify(&session.token).unwrap().sub, "admin");
    /// ```
    #[instrument(skip(self, input))]
    pub fn login(&self, input: &LoginInput) -> Result<AdminSession, AuthError> {
        let (Some(expected_user), Some(expected_pass)) = (&self.cfg.username, &self.cfg.password) else {
            warn!("admin credentials are not configured");
            return Err(AuthError::Misconfigured);
        };

        if !truthy(&input.username) || !truthy(&input.password) {
            return Err(AuthError::MissingCredentials);
        }

        let user_ok = input.username.as_str().map(|u| matches(u, expected_user)).unwrap_or(false);
        let pass_ok = input.password.as_str().map(|p| matches(p, expected_pass)).unwrap_or(false);
        if !(user_ok && pass_ok) {
            warn!(username = ?input.username.as_str(), "admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue(expected_user)?;
        info!(username = %expected_user, "admin_logged_in");
        Ok(AdminSession {
            username: expected_user.clone(),
            token,
            expires_in_secs: self.cfg.session_ttl_hours * 3600,
        })
    }

    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(self.cfg.session_ttl_hours);
        let claims = SessionClaims {
            sub: username.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.session_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let key = DecodingKey::from_secret(self.cfg.session_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<SessionClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidSession)
    }
}

fn matches(given: &str, expected: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// `Value` shortcut for tests and callers holding plain strings.
pub fn login_input(username: &str, password: &str) -> LoginInput {
    LoginInput { username: Value::from(username), password: Value::from(password) }
}
