use serde_json::Value;

use crate::domain::Keychain;
use crate::errors::ProxyError;
use crate::upstream::{envelope, Collection, CountRule, Failure, Operation, PlayfolioClient, UpstreamRequest};

pub const LIST: Operation = Operation::new("Keychains GET", Failure::Reason("Failed to fetch keychains"), "Failed to fetch keychains");
pub const JOIN: Operation = Operation::new("Keychains POST", Failure::UpstreamOrReason("Failed"), "Failed to join keychain");
pub const LOOKUP: Operation = Operation::new("Keychains lookup GET", Failure::Fixed("Not found"), "Failed to look up keychain");
pub const GET: Operation = Operation::new("Keychain GET", Failure::Reason("Failed to fetch keychain"), "Failed to fetch keychain");
pub const DELETE: Operation = Operation::new("Keychain DELETE", Failure::Reason("Failed to delete keychain"), "Failed to delete keychain");

pub const KEYCHAINS: Collection = Collection::new("keychains", CountRule::UpstreamOrZero);

const JOIN_FIELDS: &[&str] = &["auth_code", "player_uid"];

pub async fn list(client: &PlayfolioClient) -> Result<Value, ProxyError> {
    let raw = client.fetch_json(&LIST, UpstreamRequest::get(["keychains"])).await?;
    Ok(KEYCHAINS.reshape(&raw))
}

pub async fn list_typed(client: &PlayfolioClient) -> Result<Vec<Keychain>, ProxyError> {
    let reshaped = list(client).await?;
    KEYCHAINS.items(&LIST, &reshaped)
}

/// Attach a player to the keychain identified by `auth_code`.
pub async fn join(client: &PlayfolioClient, body: &Value) -> Result<Value, ProxyError> {
    let payload = envelope::pick(body, JOIN_FIELDS);
    client.fetch_json(&JOIN, UpstreamRequest::post(["keychains"]).json(payload)).await
}

pub async fn lookup(client: &PlayfolioClient, auth_code: Option<&str>) -> Result<Value, ProxyError> {
    let code = auth_code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ProxyError::BadRequest("auth_code is required".into()))?;
    client
        .fetch_json(
            &LOOKUP,
            UpstreamRequest::get(["keychains", "lookup"])
                .query(vec![("auth_code".to_string(), code.to_string())]),
        )
        .await
}

pub async fn get(client: &PlayfolioClient, uid: &str) -> Result<Value, ProxyError> {
    client.fetch_json(&GET, UpstreamRequest::get(["keychains", uid])).await
}

/// Unlike the other deletes, upstream's body is relayed.
pub async fn delete(client: &PlayfolioClient, uid: &str) -> Result<Value, ProxyError> {
    client.fetch_json(&DELETE, UpstreamRequest::delete(["keychains", uid])).await
}
