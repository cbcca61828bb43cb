use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A dashboard-issued API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    pub id: String,
    pub name: String,
    pub key: String,
    pub created: DateTime<Utc>,
}

/// Trait abstraction for API key storage.
/// Implementations can be file-backed or remote.
#[async_trait]
pub trait ApiKeyRegistry: Send + Sync {
    /// All keys, oldest first.
    async fn list(&self) -> Vec<ApiKeyRecord>;
    async fn create(&self, name: &str) -> Result<ApiKeyRecord, ServiceError>;
    /// Returns whether a key with that id existed.
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    async fn contains_key(&self, key: &str) -> bool;
}
