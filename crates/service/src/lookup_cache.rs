//! Auth-code lookups for the keychain view.
//!
//! Dashboards fire a lookup per keystroke pause; identical codes inside the
//! debounce window share a single upstream call.

use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::services::keychain_service;
use crate::upstream::PlayfolioClient;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LookupOutcome {
    /// Nothing typed yet
    Idle,
    Found { keychain: Value },
    NotFound,
}

/// Trim and upper-case a typed auth code; `None` when nothing is left.
pub fn normalize_auth_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_uppercase();
    if code.is_empty() { None } else { Some(code) }
}

#[derive(Clone)]
pub struct LookupCache {
    cache: Cache<String, LookupOutcome>,
}

impl LookupCache {
    pub fn new(window: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(window)
            .build();
        Self { cache }
    }

    pub async fn lookup(&self, client: &PlayfolioClient, raw: &str) -> LookupOutcome {
        let Some(code) = normalize_auth_code(raw) else {
            return LookupOutcome::Idle;
        };
        let client = client.clone();
        self.cache
            .get_with(code.clone(), async move {
                debug!(auth_code = %code, "resolving keychain auth code");
                resolve(&client, &code).await
            })
            .await
    }
}

/// Found only when upstream answers `{success: true, data: {...}}`.
async fn resolve(client: &PlayfolioClient, code: &str) -> LookupOutcome {
    match keychain_service::lookup(client, Some(code)).await {
        Ok(body) => {
            let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
            match body.get("data") {
                Some(data) if success && !data.is_null() => LookupOutcome::Found { keychain: data.clone() },
                _ => LookupOutcome::NotFound,
            }
        }
        Err(_) => LookupOutcome::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(base: &str) -> PlayfolioClient {
        PlayfolioClient::new(Some(base), None, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn normalizes_codes() {
        assert_eq!(normalize_auth_code("  ab12 "), Some("AB12".into()));
        assert_eq!(normalize_auth_code("   "), None);
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        assert_eq!(serde_json::to_value(LookupOutcome::Idle).unwrap(), json!({"status": "idle"}));
        assert_eq!(serde_json::to_value(LookupOutcome::NotFound).unwrap(), json!({"status": "notfound"}));
        assert_eq!(
            serde_json::to_value(LookupOutcome::Found { keychain: json!({"uid": "k"}) }).unwrap(),
            json!({"status": "found", "keychain": {"uid": "k"}})
        );
    }

    #[tokio::test]
    async fn repeated_codes_hit_upstream_once() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/keychains/lookup").query_param("auth_code", "AB12");
                then.status(200).json_body(json!({"success": true, "data": {"uid": "kc1", "players": []}}));
            })
            .await;

        let cache = LookupCache::new(Duration::from_secs(5));
        let c = client(&server.base_url());
        let first = cache.lookup(&c, "ab12").await;
        let second = cache.lookup(&c, " AB12").await;

        assert_eq!(first, LookupOutcome::Found { keychain: json!({"uid": "kc1", "players": []}) });
        assert_eq!(first, second);
        m.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn unsuccessful_or_missing_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/keychains/lookup").query_param("auth_code", "NOPE");
                then.status(404).json_body(json!({"error": "no such code"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/keychains/lookup").query_param("auth_code", "EMPTY");
                then.status(200).json_body(json!({"success": false, "data": null}));
            })
            .await;

        let cache = LookupCache::new(Duration::from_millis(400));
        let c = client(&server.base_url());
        assert_eq!(cache.lookup(&c, "nope").await, LookupOutcome::NotFound);
        assert_eq!(cache.lookup(&c, "empty").await, LookupOutcome::NotFound);
        assert_eq!(cache.lookup(&c, "").await, LookupOutcome::Idle);
    }
}
