use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login body. Fields stay loosely typed: a non-string value is simply a wrong credential.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: Value,
    #[serde(default)]
    pub password: Value,
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Login result (session)
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub username: String,
    pub token: String,
    pub expires_in_secs: i64,
}
