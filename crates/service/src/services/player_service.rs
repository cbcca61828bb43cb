use serde_json::{json, Value};

use crate::domain::Player;
use crate::errors::ProxyError;
use crate::upstream::{envelope, Collection, CountRule, Failure, Operation, PlayfolioClient, UpstreamRequest};

pub const LIST: Operation = Operation::new("Players GET", Failure::Reason("Failed to fetch players"), "Failed to fetch players");
pub const CREATE: Operation = Operation::new("Players POST", Failure::UpstreamOrReason("Failed to create player"), "Failed to create player");
pub const UPDATE: Operation = Operation::new("Players PUT", Failure::UpstreamOrReason("Failed to update player"), "Failed to update player");
pub const DELETE: Operation = Operation::new("Players DELETE", Failure::UpstreamOrReason("Failed to delete player"), "Failed to delete player");

pub const PLAYERS: Collection = Collection::new("players", CountRule::Len);

/// Players always go upstream as `{meta, status}`, blanks collapsed to `null`.
pub fn payload(body: &Value) -> Value {
    json!({
        "meta": envelope::or_null(body.get("meta")),
        "status": envelope::or_null(body.get("status")),
    })
}

pub async fn list(client: &PlayfolioClient) -> Result<Value, ProxyError> {
    let raw = client.fetch_json(&LIST, UpstreamRequest::get(["players"])).await?;
    Ok(PLAYERS.reshape(&raw))
}

pub async fn list_typed(client: &PlayfolioClient) -> Result<Vec<Player>, ProxyError> {
    let reshaped = list(client).await?;
    PLAYERS.items(&LIST, &reshaped)
}

pub async fn create(client: &PlayfolioClient, body: &Value) -> Result<Value, ProxyError> {
    client
        .fetch_json(&CREATE, UpstreamRequest::post(["players"]).json(payload(body)))
        .await
}

pub async fn update(client: &PlayfolioClient, uid: &str, body: &Value) -> Result<Value, ProxyError> {
    client
        .fetch_json(&UPDATE, UpstreamRequest::put(["players", uid]).json(payload(body)))
        .await
}

pub async fn delete(client: &PlayfolioClient, uid: &str) -> Result<(), ProxyError> {
    client.execute(&DELETE, UpstreamRequest::delete(["players", uid])).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_nulls_blank_fields() {
        assert_eq!(payload(&json!({})), json!({"meta": null, "status": null}));
        assert_eq!(
            payload(&json!({"meta": {"name": "Ann"}, "status": "", "junk": 1})),
            json!({"meta": {"name": "Ann"}, "status": null})
        );
        assert_eq!(payload(&json!({"status": "present"}))["status"], "present");
    }
}
