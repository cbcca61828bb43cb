use serde_json::Value;

use crate::domain::Device;
use crate::errors::ProxyError;
use crate::upstream::{envelope, Collection, CountRule, Failure, Operation, PlayfolioClient, UpstreamRequest};

pub const LIST: Operation = Operation::new("Devices GET", Failure::Reason("Failed to fetch devices"), "Failed to fetch devices");
pub const CREATE: Operation = Operation::new("Devices POST", Failure::UpstreamOrReason("Failed to create device"), "Failed to create device");
pub const UPDATE: Operation = Operation::new("Devices PUT", Failure::UpstreamOrReason("Failed to update device"), "Failed to update device");
pub const DELETE: Operation = Operation::new("Devices DELETE", Failure::UpstreamOrReason("Failed to delete device"), "Failed to delete device");

pub const DEVICES: Collection = Collection::new("devices", CountRule::Len);

/// `uid` is an optional caller-chosen id and only accepted on create.
const CREATE_FIELDS: &[&str] = &["name", "club_id", "uid"];
const UPDATE_FIELDS: &[&str] = &["name", "club_id"];

pub async fn list(client: &PlayfolioClient) -> Result<Value, ProxyError> {
    let raw = client.fetch_json(&LIST, UpstreamRequest::get(["devices"])).await?;
    Ok(DEVICES.reshape(&raw))
}

pub async fn list_typed(client: &PlayfolioClient) -> Result<Vec<Device>, ProxyError> {
    let reshaped = list(client).await?;
    DEVICES.items(&LIST, &reshaped)
}

pub async fn create(client: &PlayfolioClient, body: &Value) -> Result<Value, ProxyError> {
    let payload = envelope::pick(body, CREATE_FIELDS);
    client.fetch_json(&CREATE, UpstreamRequest::post(["devices"]).json(payload)).await
}

pub async fn update(client: &PlayfolioClient, uid: &str, body: &Value) -> Result<Value, ProxyError> {
    let payload = envelope::pick(body, UPDATE_FIELDS);
    client.fetch_json(&UPDATE, UpstreamRequest::put(["devices", uid]).json(payload)).await
}

pub async fn delete(client: &PlayfolioClient, uid: &str) -> Result<(), ProxyError> {
    client.execute(&DELETE, UpstreamRequest::delete(["devices", uid])).await
}
