use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::admin::{ApiKeyRecord, ApiKeyRegistry};
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

pub const KEY_PREFIX: &str = "pk_";
const KEY_LEN: usize = 26;
const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// `pk_` followed by 26 lowercase alphanumerics.
pub fn generate_key() -> String {
    let mut rng = rand::thread_rng();
    let body: String = (0..KEY_LEN)
        .map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char)
        .collect();
    format!("{KEY_PREFIX}{body}")
}

/// File-backed API key registry.
/// Keeps a map of `id -> record` persisted as JSON.
#[derive(Clone)]
pub struct FileApiKeyStore {
    store: Arc<JsonMapStore<String, ApiKeyRecord>>,
}

impl FileApiKeyStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, ApiKeyRecord>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait::async_trait]
impl ApiKeyRegistry for FileApiKeyStore {
    async fn list(&self) -> Vec<ApiKeyRecord> {
        let mut records: Vec<ApiKeyRecord> = self.store.list().await.into_iter().map(|(_, v)| v).collect();
        records.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        records
    }

    async fn create(&self, name: &str) -> Result<ApiKeyRecord, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("name is required".into()));
        }
        let record = ApiKeyRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            key: generate_key(),
            created: Utc::now(),
        };
        self.store.insert(record.id.clone(), record.clone()).await?;
        info!(id = %record.id, name = %record.name, "api_key_created");
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let existed = self.store.remove(&id.to_string()).await?;
        if existed {
            info!(id = %id, "api_key_deleted");
        }
        Ok(existed)
    }

    async fn contains_key(&self, key: &str) -> bool {
        self.store.any_value(|r| r.key == key).await
    }
}
