use serde_json::Value;

use crate::domain::{Club, ClubKey};
use crate::errors::ProxyError;
use crate::upstream::{envelope, Collection, CountRule, Failure, Operation, PlayfolioClient, UpstreamRequest};

pub const LIST: Operation = Operation::new("Clubs GET", Failure::Reason("Failed to fetch clubs"), "Failed to connect to clubs service");
pub const CREATE: Operation = Operation::new("Clubs POST", Failure::UpstreamOrReason("Failed to create club"), "Failed to create club");
pub const UPDATE: Operation = Operation::new("Clubs PUT", Failure::UpstreamOrReason("Failed to update club"), "Failed to update club");
pub const DELETE: Operation = Operation::new("Clubs DELETE", Failure::UpstreamOrReason("Failed to delete club"), "Failed to delete club");
pub const MEMBERS: Operation = Operation::new("Members GET", Failure::Reason("Failed to fetch members"), "Failed to connect to members service");
pub const KEYS: Operation = Operation::new("Keys GET", Failure::Reason("Failed to fetch keys"), "Failed to connect to keys service");
pub const CREATE_KEY: Operation = Operation::new("Keys POST", Failure::Reason("Failed to create key"), "Failed to create key");
pub const DELETE_KEY: Operation = Operation::new("Keys DELETE", Failure::Reason("Failed to delete key"), "Failed to delete key");

pub const CLUBS: Collection = Collection::new("clubs", CountRule::UpstreamOrLen);
pub const MEMBER_LIST: Collection = Collection::new("members", CountRule::UpstreamOrLen);
pub const KEY_LIST: Collection = Collection::new("keys", CountRule::UpstreamOrLen);

/// Fields a key-issue request may carry upstream.
const KEY_FIELDS: &[&str] = &["player_uid", "auth_code"];

pub async fn list(client: &PlayfolioClient) -> Result<Value, ProxyError> {
    let raw = client.fetch_json(&LIST, UpstreamRequest::get(["clubs"])).await?;
    Ok(CLUBS.reshape(&raw))
}

pub async fn list_typed(client: &PlayfolioClient) -> Result<Vec<Club>, ProxyError> {
    let reshaped = list(client).await?;
    CLUBS.items(&LIST, &reshaped)
}

/// Club creation is the one call that needs the admin credential.
pub async fn create(client: &PlayfolioClient, body: Value) -> Result<Value, ProxyError> {
    client
        .fetch_json(&CREATE, UpstreamRequest::post(["clubs"]).json(body).with_admin_key())
        .await
}

pub async fn update(client: &PlayfolioClient, uid: &str, body: Value) -> Result<Value, ProxyError> {
    client.fetch_json(&UPDATE, UpstreamRequest::put(["clubs", uid]).json(body)).await
}

pub async fn delete(client: &PlayfolioClient, uid: &str) -> Result<(), ProxyError> {
    client.execute(&DELETE, UpstreamRequest::delete(["clubs", uid])).await
}

pub async fn members(client: &PlayfolioClient, uid: &str) -> Result<Value, ProxyError> {
    let raw = client.fetch_json(&MEMBERS, UpstreamRequest::get(["clubs", uid, "members"])).await?;
    Ok(MEMBER_LIST.reshape(&raw))
}

pub async fn keys(client: &PlayfolioClient, uid: &str) -> Result<Value, ProxyError> {
    let raw = client.fetch_json(&KEYS, UpstreamRequest::get(["clubs", uid, "keys"])).await?;
    Ok(KEY_LIST.reshape(&raw))
}

pub async fn keys_typed(client: &PlayfolioClient, uid: &str) -> Result<Vec<ClubKey>, ProxyError> {
    let reshaped = keys(client, uid).await?;
    KEY_LIST.items(&KEYS, &reshaped)
}

pub async fn create_key(client: &PlayfolioClient, uid: &str, body: &Value) -> Result<Value, ProxyError> {
    let payload = envelope::pick(body, KEY_FIELDS);
    client
        .fetch_json(&CREATE_KEY, UpstreamRequest::post(["clubs", uid, "keys"]).json(payload))
        .await
}

/// Revoke a club key.
pub async fn delete_key(client: &PlayfolioClient, uid: &str, key: &str) -> Result<(), ProxyError> {
    client.execute(&DELETE_KEY, UpstreamRequest::delete(["clubs", uid, "keys", key])).await
}
