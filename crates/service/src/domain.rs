//! Typed views of upstream records, used by the dashboard layer only.
//!
//! Proxy routes pass upstream JSON through untouched; these types default
//! every field so a missing or `null` attribute never fails a page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type Meta = Map<String, Value>;

/// `#[serde(default)]` only covers absent keys; this also maps an explicit `null`.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Banned,
    Unknown,
    Inactive,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 5] = [
        AttendanceStatus::Unknown,
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Banned,
        AttendanceStatus::Inactive,
    ];

    /// Missing or unrecognised values read as `Unknown`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("present") => Self::Present,
            Some("absent") => Self::Absent,
            Some("banned") => Self::Banned,
            Some("inactive") => Self::Inactive,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    Active,
    Revoked,
    Expired,
    #[serde(untagged)]
    Other(String),
}

impl KeyStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "revoked" => Self::Revoked,
            "expired" => Self::Expired,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Club {
    #[serde(deserialize_with = "null_as_default")]
    pub uid: String,
    #[serde(rename = "displayName", deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(rename = "safeName", deserialize_with = "null_as_default")]
    pub safe_name: String,
    pub meta: Option<Meta>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    #[serde(deserialize_with = "null_as_default")]
    pub uid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub club_id: Option<String>,
    pub meta: Option<Meta>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub last_activity_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    #[serde(deserialize_with = "null_as_default")]
    pub uid: String,
    pub meta: Option<Meta>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Player {
    pub fn label(&self) -> String {
        meta_name(self.meta.as_ref()).unwrap_or_else(|| self.uid.clone())
    }

    pub fn attendance(&self) -> AttendanceStatus {
        AttendanceStatus::parse(self.status.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeychainMember {
    #[serde(deserialize_with = "null_as_default")]
    pub player_uid: String,
    pub joined_at: Option<String>,
    pub meta: Option<Meta>,
    pub status: Option<String>,
}

impl KeychainMember {
    pub fn label(&self) -> String {
        meta_name(self.meta.as_ref()).unwrap_or_else(|| self.player_uid.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Keychain {
    #[serde(deserialize_with = "null_as_default")]
    pub uid: String,
    pub auth_code: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub players: Vec<KeychainMember>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubKey {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    pub keychain_id: Option<String>,
    pub originating_club_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub usage_count: Option<u64>,
    pub last_used_at: Option<String>,
    pub created_at: Option<String>,
}

impl ClubKey {
    pub fn key_status(&self) -> KeyStatus {
        KeyStatus::parse(&self.status)
    }

    pub fn is_active(&self) -> bool {
        self.key_status() == KeyStatus::Active
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(deserialize_with = "null_as_default")]
    pub uid: String,
    pub club_id: Option<String>,
    pub device_id: Option<String>,
    pub player_uid: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub format: String,
    pub trigger: Option<String>,
    pub meta: Option<Meta>,
    pub created_at: Option<String>,
}

impl Activity {
    /// Kiosk events carry the typed-in name; fall back to the player uid.
    pub fn player_label(&self) -> Option<String> {
        self.meta_str("kiosk_player_name").or_else(|| self.player_uid.clone())
    }

    /// Login events record what started them in `meta.login_trigger`.
    pub fn login_trigger(&self) -> Option<String> {
        self.meta_str("login_trigger")
            .or_else(|| self.trigger.clone().filter(|t| !t.is_empty()))
    }

    fn meta_str(&self, key: &str) -> Option<String> {
        self.meta
            .as_ref()
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// `meta.name`, then `meta.displayName`.
fn meta_name(meta: Option<&Meta>) -> Option<String> {
    let meta = meta?;
    ["name", "displayName"]
        .iter()
        .find_map(|k| meta.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}
