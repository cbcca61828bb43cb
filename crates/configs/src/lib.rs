use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Placeholder secret for local runs; refused once sessions are enforced.
pub const DEV_SESSION_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Optional `/healthz` + `/metrics` listener, e.g. `127.0.0.1:9091`
    #[serde(default)]
    pub admin_addr: Option<String>,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8081,
            worker_threads: Some(4),
            admin_addr: None,
            frontend_dir: default_frontend_dir(),
            data_dir: default_data_dir(),
        }
    }
}

/// Playfolio upstream REST API settings.
///
/// `base_url` stays optional; proxy routes report the missing value per request.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub admin_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { base_url: None, admin_key: None, timeout_secs: default_timeout() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_session_secret")]
    pub session_secret: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: i64,
    #[serde(default)]
    pub require_session: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            session_secret: default_session_secret(),
            session_ttl_hours: default_session_ttl(),
            require_session: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_debounce_ms")]
    pub lookup_debounce_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { lookup_debounce_ms: default_debounce_ms() }
    }
}

fn default_frontend_dir() -> String { "frontend".into() }
fn default_data_dir() -> String { "data".into() }
fn default_timeout() -> u64 { 10 }
fn default_session_secret() -> String { DEV_SESSION_SECRET.into() }
fn default_session_ttl() -> i64 { 12 }
fn default_debounce_ms() -> u64 { 400 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Read `config.toml` when present, otherwise start from defaults;
    /// then overlay process environment and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) => match e.downcast_ref::<std::io::Error>() {
                Some(io) if io.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
                _ => return Err(e),
            },
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from an environment lookup. Unset or blank values leave the file value.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = get("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(url) = get("PLAYFOLIO_API_URL") {
            self.upstream.base_url = Some(url);
        }
        if let Some(key) = get("PLAYFOLIO_ADMIN_KEY") {
            self.upstream.admin_key = Some(key);
        }
        if let Some(user) = get("ADMIN_USERNAME") {
            self.admin.username = Some(user);
        }
        if let Some(pass) = get("ADMIN_PASSWORD") {
            self.admin.password = Some(pass);
        }
        if let Some(secret) = get("SESSION_SECRET") {
            self.admin.session_secret = secret;
        }
        if let Some(flag) = get("REQUIRE_SESSION") {
            self.admin.require_session = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.upstream.normalize()?;
        self.admin.normalize()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl UpstreamConfig {
    fn normalize(&mut self) -> Result<()> {
        if let Some(url) = self.base_url.take() {
            let url = url.trim().trim_end_matches('/').to_string();
            if !url.is_empty() {
                let lower = url.to_lowercase();
                if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                    return Err(anyhow!("upstream.base_url must start with http:// or https://"));
                }
                self.base_url = Some(url);
            }
        }
        if self.admin_key.as_deref().map(str::trim) == Some("") {
            self.admin_key = None;
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("upstream.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl AdminConfig {
    fn normalize(&mut self) -> Result<()> {
        for field in [&mut self.username, &mut self.password] {
            if field.as_deref().map(str::trim) == Some("") {
                *field = None;
            }
        }
        if self.session_secret.trim().is_empty() {
            return Err(anyhow!("admin.session_secret must not be empty"));
        }
        if self.require_session && self.session_secret == DEV_SESSION_SECRET {
            return Err(anyhow!("admin.session_secret must be set when require_session is enabled"));
        }
        if self.session_ttl_hours <= 0 {
            return Err(anyhow!("admin.session_ttl_hours must be >= 1"));
        }
        Ok(())
    }
}
