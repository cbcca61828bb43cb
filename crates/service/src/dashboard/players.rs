use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::domain::{AttendanceStatus, Keychain, Meta, Player};
use crate::errors::ProxyError;
use crate::pagination::{PageInfo, Pagination, PLAYERS_PAGE_SIZE};
use crate::services::{keychain_service, player_service};
use crate::upstream::PlayfolioClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeychainRef {
    pub uid: String,
    pub auth_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerRow {
    pub uid: String,
    pub label: String,
    pub status: AttendanceStatus,
    pub meta: Option<Meta>,
    pub created_at: Option<String>,
    pub keychain: Option<KeychainRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayersView {
    pub players: Vec<PlayerRow>,
    pub page: PageInfo,
    pub statuses: [AttendanceStatus; 5],
}

/// `player uid -> keychain` from every keychain's member list.
pub fn keychain_index(keychains: &[Keychain]) -> HashMap<String, KeychainRef> {
    let mut index = HashMap::new();
    for kc in keychains {
        for member in &kc.players {
            index.insert(
                member.player_uid.clone(),
                KeychainRef { uid: kc.uid.clone(), auth_code: kc.auth_code.clone() },
            );
        }
    }
    index
}

pub async fn players(client: &PlayfolioClient, page: Option<u32>) -> Result<PlayersView, ProxyError> {
    let (players, keychains) = tokio::join!(player_service::list_typed(client), keychain_service::list_typed(client));
    let players: Vec<Player> = players?;
    let keychains = keychains.unwrap_or_else(|e| {
        warn!(error = %e, "keychain index unavailable for players view");
        Vec::new()
    });
    let index = keychain_index(&keychains);

    let (rows, info) = Pagination::new(page, PLAYERS_PAGE_SIZE).slice(&players);
    let rows = rows
        .iter()
        .map(|p| PlayerRow {
            uid: p.uid.clone(),
            label: p.label(),
            status: p.attendance(),
            meta: p.meta.clone(),
            created_at: p.created_at.clone(),
            keychain: index.get(&p.uid).cloned(),
        })
        .collect();

    Ok(PlayersView { players: rows, page: info, statuses: AttendanceStatus::ALL })
}
