use serde_json::Value;

use crate::domain::Activity;
use crate::errors::ProxyError;
use crate::upstream::{Collection, CountRule, Failure, Operation, PlayfolioClient, UpstreamRequest};

pub const LIST: Operation = Operation::new("Activities GET", Failure::Reason("Failed to fetch activities"), "Failed to fetch activities");

pub const ACTIVITIES: Collection = Collection::new("activities", CountRule::UpstreamOrZero).with_total();

/// Collapse repeated keys: the last value wins, the first position is kept.
pub fn dedupe_params(params: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::with_capacity(params.len());
    for (key, value) in params {
        match out.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => out.push((key, value)),
        }
    }
    out
}

/// Forward every client query parameter unchanged.
pub async fn list(client: &PlayfolioClient, params: Vec<(String, String)>) -> Result<Value, ProxyError> {
    let raw = client
        .fetch_json(&LIST, UpstreamRequest::get(["activities"]).query(dedupe_params(params)))
        .await?;
    Ok(ACTIVITIES.reshape(&raw))
}

/// Typed page plus upstream `total`.
pub async fn list_typed(
    client: &PlayfolioClient,
    params: Vec<(String, String)>,
) -> Result<(Vec<Activity>, u64), ProxyError> {
    let reshaped = list(client, params).await?;
    let total = reshaped.get("total").and_then(Value::as_u64).unwrap_or(0);
    Ok((ACTIVITIES.items(&LIST, &reshaped)?, total))
}
