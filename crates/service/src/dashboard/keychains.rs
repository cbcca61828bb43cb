//! Club keys across one or all clubs, and key issuance by auth code.

use std::collections::HashMap;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::club_names;
use crate::domain::{Club, ClubKey, Keychain, KeyStatus};
use crate::errors::ProxyError;
use crate::lookup_cache::normalize_auth_code;
use crate::pagination::{PageInfo, Pagination, KEYS_PAGE_SIZE};
use crate::services::{club_service, keychain_service};
use crate::upstream::PlayfolioClient;

#[derive(Debug, Clone, Serialize)]
pub struct KeyRow {
    pub key: String,
    pub status: KeyStatus,
    pub keychain_id: Option<String>,
    pub auth_code: Option<String>,
    pub originating_club_id: Option<String>,
    pub club_name: Option<String>,
    pub members: Vec<String>,
    pub usage_count: Option<u64>,
    pub last_used_at: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeychainsView {
    pub clubs: Vec<Club>,
    /// `None` when showing every club
    pub selected_club: Option<String>,
    pub selected_club_name: Option<String>,
    pub total: usize,
    pub active: usize,
    pub keys: Vec<KeyRow>,
    pub page: PageInfo,
}

/// Keys of one club, or of every club when `club` is blank.
pub async fn keychains(
    client: &PlayfolioClient,
    club: Option<&str>,
    page: Option<u32>,
) -> Result<KeychainsView, ProxyError> {
    let selected = club.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string);

    let (clubs, keychains) = tokio::join!(club_service::list_typed(client), keychain_service::list_typed(client));
    let clubs = clubs?;
    let keychains = keychains.unwrap_or_else(|e| {
        warn!(error = %e, "keychain members unavailable for keys view");
        Vec::new()
    });

    let keys = match &selected {
        Some(uid) => club_service::keys_typed(client, uid).await?,
        None => keys_of_all(client, &clubs).await,
    };

    let names = club_names(&clubs);
    let by_id: HashMap<&str, &Keychain> = keychains.iter().map(|kc| (kc.uid.as_str(), kc)).collect();
    let active = keys.iter().filter(|k| k.is_active()).count();

    let (rows, info) = Pagination::new(page, KEYS_PAGE_SIZE).slice(&keys);
    let rows = rows.iter().map(|k| key_row(k, &by_id, &names)).collect();

    Ok(KeychainsView {
        selected_club_name: selected.as_ref().and_then(|uid| names.get(uid)).cloned(),
        selected_club: selected,
        total: keys.len(),
        active,
        keys: rows,
        page: info,
        clubs,
    })
}

/// Fetch every club's keys concurrently; a failing club contributes nothing.
async fn keys_of_all(client: &PlayfolioClient, clubs: &[Club]) -> Vec<ClubKey> {
    let results = join_all(clubs.iter().map(|c| club_service::keys_typed(client, &c.uid))).await;
    results
        .into_iter()
        .zip(clubs)
        .flat_map(|(res, club)| {
            res.unwrap_or_else(|e| {
                warn!(club = %club.uid, error = %e, "skipping club keys");
                Vec::new()
            })
        })
        .collect()
}

fn key_row(key: &ClubKey, keychains: &HashMap<&str, &Keychain>, names: &HashMap<String, String>) -> KeyRow {
    let keychain = key.keychain_id.as_deref().and_then(|id| keychains.get(id));
    KeyRow {
        key: key.key.clone(),
        status: key.key_status(),
        keychain_id: key.keychain_id.clone(),
        auth_code: keychain.and_then(|kc| kc.auth_code.clone()),
        originating_club_id: key.originating_club_id.clone(),
        club_name: key.originating_club_id.as_ref().and_then(|id| names.get(id)).cloned(),
        members: keychain.map(|kc| kc.players.iter().map(|m| m.label()).collect()).unwrap_or_default(),
        usage_count: key.usage_count,
        last_used_at: key.last_used_at.clone(),
        created_at: key.created_at.clone(),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueKey {
    #[serde(default)]
    pub club_uid: String,
    #[serde(default)]
    pub auth_code: String,
}

/// Issue a club key for the keychain behind a typed auth code.
pub async fn issue_key(client: &PlayfolioClient, req: &IssueKey) -> Result<Value, ProxyError> {
    let club = req.club_uid.trim();
    if club.is_empty() {
        return Err(ProxyError::BadRequest("club_uid is required".into()));
    }
    let code = normalize_auth_code(&req.auth_code)
        .ok_or_else(|| ProxyError::BadRequest("auth_code is required".into()))?;

    let created = club_service::create_key(client, club, &json!({ "auth_code": code })).await?;
    info!(club = %club, "club_key_issued");
    Ok(created)
}
