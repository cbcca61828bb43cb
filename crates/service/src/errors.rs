use thiserror::Error;

/// Errors of the local stores (API key registry) and view builders.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}

/// Failure of a proxied call, already carrying the message the client sees.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProxyError {
    /// A required setting is absent, e.g. `PLAYFOLIO_API_URL`.
    #[error("{0} environment variable is not set")]
    MissingConfig(&'static str),
    #[error("{0}")]
    BadRequest(String),
    /// Upstream answered non-2xx; its status is mirrored.
    #[error("{message}")]
    Upstream { status: u16, message: String },
    /// Transport or decode failure; reported as 500 with the operation's fallback message.
    #[error("{0}")]
    Unavailable(String),
}

impl ProxyError {
    pub fn status(&self) -> u16 {
        match self {
            ProxyError::MissingConfig(_) => 500,
            ProxyError::BadRequest(_) => 400,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Unavailable(_) => 500,
        }
    }
}
