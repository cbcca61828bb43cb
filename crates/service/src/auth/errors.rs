use thiserror::Error;

/// Business errors for admin login and session checks
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Server configuration error")]
    Misconfigured,
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Authentication required")]
    MissingSession,
    #[error("Invalid session")]
    InvalidSession,
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// HTTP status for external mapping
    pub fn status(&self) -> u16 {
        match self {
            AuthError::Misconfigured | AuthError::TokenError(_) => 500,
            AuthError::MissingCredentials => 400,
            AuthError::InvalidCredentials | AuthError::MissingSession | AuthError::InvalidSession => 401,
        }
    }
}
