use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use service::admin::ApiKeyRegistry;
use service::auth::service::AuthConfig;
use service::auth::AdminAuthService;
use service::file::FileApiKeyStore;
use service::lookup_cache::LookupCache;
use service::upstream::PlayfolioClient;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub client: PlayfolioClient,
    pub auth: AdminAuthService,
    pub lookups: LookupCache,
    pub api_keys: Arc<dyn ApiKeyRegistry>,
    pub require_session: bool,
    pub frontend_dir: PathBuf,
}

impl AppState {
    pub async fn from_config(cfg: &configs::AppConfig) -> anyhow::Result<Self> {
        let client = PlayfolioClient::from_config(&cfg.upstream)?;
        let api_keys = FileApiKeyStore::new(PathBuf::from(&cfg.server.data_dir).join("api_keys.json")).await?;
        Ok(Self {
            client,
            auth: AdminAuthService::new(AuthConfig::from(&cfg.admin)),
            lookups: LookupCache::new(Duration::from_millis(cfg.dashboard.lookup_debounce_ms)),
            api_keys,
            require_session: cfg.admin.require_session,
            frontend_dir: PathBuf::from(&cfg.server.frontend_dir),
        })
    }
}
