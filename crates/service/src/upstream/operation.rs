use serde_json::Value;

/// How a non-2xx upstream answer is worded for the client.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// `"<prefix>: <statusText>"`
    Reason(&'static str),
    /// Upstream body's `error` string, else `"<prefix>: <statusText>"`
    UpstreamOrReason(&'static str),
    /// Constant message
    Fixed(&'static str),
}

impl Failure {
    pub fn message(&self, status_text: &str, body: Option<&Value>) -> String {
        match self {
            Failure::Reason(prefix) => format!("{prefix}: {status_text}"),
            Failure::UpstreamOrReason(prefix) => body
                .and_then(|b| b.get("error"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("{prefix}: {status_text}")),
            Failure::Fixed(msg) => (*msg).to_string(),
        }
    }

    /// Whether the upstream error body needs to be decoded at all.
    pub fn reads_body(&self) -> bool {
        matches!(self, Failure::UpstreamOrReason(_))
    }
}

/// One proxied upstream operation: its log name and client-facing messages.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub failure: Failure,
    /// Message for transport errors and undecodable bodies (always 500)
    pub fallback: &'static str,
}

impl Operation {
    pub const fn new(name: &'static str, failure: Failure, fallback: &'static str) -> Self {
        Self { name, failure, fallback }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reason_appends_status_text() {
        let f = Failure::Reason("Failed to fetch clubs");
        assert_eq!(f.message("Bad Gateway", None), "Failed to fetch clubs: Bad Gateway");
    }

    #[test]
    fn upstream_error_wins_when_present() {
        let f = Failure::UpstreamOrReason("Failed to create club");
        let body = json!({"error": "safeName already taken"});
        assert_eq!(f.message("Conflict", Some(&body)), "safeName already taken");
    }

    #[test]
    fn upstream_error_falls_back_on_empty_or_non_string() {
        let f = Failure::UpstreamOrReason("Failed to update player");
        assert_eq!(
            f.message("Not Found", Some(&json!({"error": ""}))),
            "Failed to update player: Not Found"
        );
        assert_eq!(
            f.message("Not Found", Some(&json!({"error": {"code": 1}}))),
            "Failed to update player: Not Found"
        );
        assert_eq!(f.message("Not Found", None), "Failed to update player: Not Found");
    }

    #[test]
    fn fixed_ignores_status() {
        let f = Failure::Fixed("Not found");
        assert_eq!(f.message("Internal Server Error", Some(&json!({"error": "x"}))), "Not found");
        assert!(!f.reads_body());
    }
}
