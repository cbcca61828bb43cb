//! Reshaping of upstream `{data, count, total}` envelopes and request-body picking.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::ProxyError;
use crate::upstream::Operation;

/// JSON truthiness as the dashboard's clients understand it: `null`, `false`,
/// `0`, `""` are falsy; arrays and objects are always truthy.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `value || null`
pub fn or_null(v: Option<&Value>) -> Value {
    v.filter(|v| truthy(v)).cloned().unwrap_or(Value::Null)
}

/// Copy only the listed fields that are present in `body` (explicit `null` included).
pub fn pick(body: &Value, fields: &[&str]) -> Value {
    let mut out = Map::new();
    if let Some(obj) = body.as_object() {
        for field in fields {
            if let Some(v) = obj.get(*field) {
                out.insert((*field).to_string(), v.clone());
            }
        }
    }
    Value::Object(out)
}

/// Decode a raw client body; invalid JSON maps to the operation's fallback.
pub fn parse_body(op: &Operation, raw: &[u8]) -> Result<Value, ProxyError> {
    serde_json::from_slice(raw).map_err(|e| {
        tracing::error!(operation = op.name, error = %e, "invalid request body");
        ProxyError::Unavailable(op.fallback.to_string())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountRule {
    /// `upstream.count || data.length`
    UpstreamOrLen,
    /// `data.length`
    Len,
    /// `upstream.count || 0`
    UpstreamOrZero,
}

/// Response shape of a collection route: `{<key>: [...], success: true, count}`.
#[derive(Debug, Clone, Copy)]
pub struct Collection {
    pub key: &'static str,
    pub count: CountRule,
    /// Also carry `total: upstream.total || 0`
    pub with_total: bool,
}

impl Collection {
    pub const fn new(key: &'static str, count: CountRule) -> Self {
        Self { key, count, with_total: false }
    }

    pub const fn with_total(mut self) -> Self {
        self.with_total = true;
        self
    }

    pub fn reshape(&self, upstream: &Value) -> Value {
        let data = upstream
            .get("data")
            .filter(|d| truthy(d))
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let len = data.as_array().map(Vec::len).unwrap_or(0);
        let upstream_count = upstream.get("count").filter(|c| truthy(c)).cloned();

        let count = match self.count {
            CountRule::UpstreamOrLen => upstream_count.unwrap_or_else(|| Value::from(len)),
            CountRule::Len => Value::from(len),
            CountRule::UpstreamOrZero => upstream_count.unwrap_or_else(|| Value::from(0)),
        };

        let mut out = Map::new();
        out.insert(self.key.to_string(), data);
        out.insert("success".into(), Value::Bool(true));
        out.insert("count".into(), count);
        if self.with_total {
            let total = upstream
                .get("total")
                .filter(|t| truthy(t))
                .cloned()
                .unwrap_or_else(|| Value::from(0));
            out.insert("total".into(), total);
        }
        Value::Object(out)
    }

    /// Typed items of an already reshaped envelope.
    pub fn items<T: DeserializeOwned>(&self, op: &Operation, reshaped: &Value) -> Result<Vec<T>, ProxyError> {
        let items = reshaped.get(self.key).cloned().unwrap_or(Value::Array(Vec::new()));
        serde_json::from_value(items).map_err(|e| {
            tracing::error!(operation = op.name, error = %e, "unexpected upstream record shape");
            ProxyError::Unavailable(op.fallback.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CLUBS: Collection = Collection::new("clubs", CountRule::UpstreamOrLen);

    #[test]
    fn truthiness_matches_client_rules() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(false)));
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({})));
        assert!(truthy(&json!("present")));
        assert!(truthy(&json!(0.5)));
    }

    #[test]
    fn reshape_prefers_upstream_count() {
        let out = CLUBS.reshape(&json!({"data": [{"uid": "a"}], "count": 12}));
        assert_eq!(out, json!({"clubs": [{"uid": "a"}], "success": true, "count": 12}));
    }

    #[test]
    fn reshape_zero_count_falls_back_to_len() {
        let out = CLUBS.reshape(&json!({"data": [{"uid": "a"}, {"uid": "b"}], "count": 0}));
        assert_eq!(out["count"], 2);
    }

    #[test]
    fn reshape_missing_data_is_empty_list() {
        let out = CLUBS.reshape(&json!({"success": true}));
        assert_eq!(out, json!({"clubs": [], "success": true, "count": 0}));
        let null_data = CLUBS.reshape(&json!({"data": null}));
        assert_eq!(null_data["clubs"], json!([]));
    }

    #[test]
    fn len_rule_ignores_upstream_count() {
        let devices = Collection::new("devices", CountRule::Len);
        let out = devices.reshape(&json!({"data": [{}, {}, {}], "count": 99}));
        assert_eq!(out["count"], 3);
    }

    #[test]
    fn upstream_or_zero_with_total() {
        let activities = Collection::new("activities", CountRule::UpstreamOrZero).with_total();
        let out = activities.reshape(&json!({"data": [{}, {}]}));
        assert_eq!(out, json!({"activities": [{}, {}], "success": true, "count": 0, "total": 0}));
        let out = activities.reshape(&json!({"data": [{}], "count": 1, "total": 340}));
        assert_eq!(out["total"], 340);
    }

    #[test]
    fn pick_keeps_present_fields_only() {
        let body = json!({"name": "Kiosk 1", "club_id": null, "extra": true});
        assert_eq!(pick(&body, &["name", "club_id", "uid"]), json!({"name": "Kiosk 1", "club_id": null}));
        assert_eq!(pick(&json!([1, 2]), &["name"]), json!({}));
    }

    #[test]
    fn or_null_collapses_falsy() {
        assert_eq!(or_null(Some(&json!(""))), Value::Null);
        assert_eq!(or_null(None), Value::Null);
        assert_eq!(or_null(Some(&json!({"name": "Ann"}))), json!({"name": "Ann"}));
    }

    #[test]
    fn parse_body_maps_garbage_to_fallback() {
        let op = Operation::new("Test", crate::upstream::Failure::Fixed("x"), "Failed to create club");
        let err = parse_body(&op, b"{not json").unwrap_err();
        assert_eq!(err, ProxyError::Unavailable("Failed to create club".into()));
        assert_eq!(parse_body(&op, br#"{"a":1}"#).unwrap(), json!({"a": 1}));
    }
}
