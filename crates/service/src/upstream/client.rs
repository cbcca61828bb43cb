use std::time::{Duration, Instant};

use common::metrics::{UPSTREAM_DURATION, UPSTREAM_ERRORS_TOTAL, UPSTREAM_REQUESTS_TOTAL};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::errors::ProxyError;
use crate::upstream::Operation;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// A call against `{base}/api/<segments...>`.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
    admin: bool,
}

impl UpstreamRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
            admin: false,
        }
    }

    pub fn get<I: IntoIterator<Item = S>, S: Into<String>>(segments: I) -> Self { Self::new(Method::GET, segments) }
    pub fn post<I: IntoIterator<Item = S>, S: Into<String>>(segments: I) -> Self { Self::new(Method::POST, segments) }
    pub fn put<I: IntoIterator<Item = S>, S: Into<String>>(segments: I) -> Self { Self::new(Method::PUT, segments) }
    pub fn delete<I: IntoIterator<Item = S>, S: Into<String>>(segments: I) -> Self { Self::new(Method::DELETE, segments) }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach the configured `x-admin-key`; the call fails with 500 when none is configured.
    pub fn with_admin_key(mut self) -> Self {
        self.admin = true;
        self
    }
}

/// Raw upstream answer with a 2xx status.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// HTTP client for the Playfolio REST API.
#[derive(Clone, Debug)]
pub struct PlayfolioClient {
    http: reqwest::Client,
    base_url: Option<Url>,
    admin_key: Option<String>,
}

impl PlayfolioClient {
    pub fn new(base_url: Option<&str>, admin_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = match base_url {
            Some(raw) => {
                let url = Url::parse(raw)?;
                if url.cannot_be_a_base() {
                    anyhow::bail!("upstream base url cannot carry a path: {raw}");
                }
                Some(url)
            }
            None => None,
        };
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url, admin_key })
    }

    pub fn from_config(cfg: &configs::UpstreamConfig) -> anyhow::Result<Self> {
        Self::new(
            cfg.base_url.as_deref(),
            cfg.admin_key.clone(),
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Checked by handlers before they read the request body.
    pub fn require_base(&self) -> Result<(), ProxyError> {
        if self.is_configured() { Ok(()) } else { Err(ProxyError::MissingConfig("PLAYFOLIO_API_URL")) }
    }

    pub fn require_admin_key(&self) -> Result<(), ProxyError> {
        self.require_base()?;
        match self.admin_key {
            Some(_) => Ok(()),
            None => Err(ProxyError::MissingConfig("PLAYFOLIO_ADMIN_KEY")),
        }
    }

    /// `{base}/api/<segments>`, each segment percent-encoded.
    pub fn url_for(&self, segments: &[String]) -> Result<Url, ProxyError> {
        let mut url = self
            .base_url
            .clone()
            .ok_or(ProxyError::MissingConfig("PLAYFOLIO_API_URL"))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ProxyError::MissingConfig("PLAYFOLIO_API_URL"))?;
            path.pop_if_empty().push("api").extend(segments.iter().map(String::as_str));
        }
        Ok(url)
    }

    /// Forward one request. Non-2xx answers become `ProxyError::Upstream`
    /// worded by `op.failure`; transport errors become `op.fallback`.
    #[instrument(skip(self, op, req), fields(operation = op.name, method = %req.method))]
    pub async fn send(&self, op: &Operation, req: UpstreamRequest) -> Result<UpstreamResponse, ProxyError> {
        let url = self.url_for(&req.segments)?;
        let admin_key = if req.admin {
            Some(
                self.admin_key
                    .clone()
                    .ok_or(ProxyError::MissingConfig("PLAYFOLIO_ADMIN_KEY"))?,
            )
        } else {
            None
        };

        let mut builder = self
            .http
            .request(req.method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(key) = admin_key {
            builder = builder.header(ADMIN_KEY_HEADER, key);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        debug!(%url, "forwarding to upstream");
        UPSTREAM_REQUESTS_TOTAL.inc();
        let started = Instant::now();
        let result = builder.send().await;
        UPSTREAM_DURATION.observe(started.elapsed().as_secs_f64());

        let resp = result.map_err(|e| {
            UPSTREAM_ERRORS_TOTAL.inc();
            error!(operation = op.name, error = %e, "upstream request failed");
            ProxyError::Unavailable(op.fallback.to_string())
        })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| {
            UPSTREAM_ERRORS_TOTAL.inc();
            error!(operation = op.name, error = %e, "reading upstream body failed");
            ProxyError::Unavailable(op.fallback.to_string())
        })?;

        if !status.is_success() {
            UPSTREAM_ERRORS_TOTAL.inc();
            let parsed = if op.failure.reads_body() {
                serde_json::from_slice::<Value>(&body).ok()
            } else {
                None
            };
            let message = op
                .failure
                .message(status.canonical_reason().unwrap_or(""), parsed.as_ref());
            warn!(operation = op.name, status = status.as_u16(), %message, "upstream rejected request");
            return Err(ProxyError::Upstream { status: status.as_u16(), message });
        }

        Ok(UpstreamResponse { status, body: body.to_vec() })
    }

    /// `send` and decode the success body as JSON.
    pub async fn fetch_json(&self, op: &Operation, req: UpstreamRequest) -> Result<Value, ProxyError> {
        let resp = self.send(op, req).await?;
        serde_json::from_slice(&resp.body).map_err(|e| {
            error!(operation = op.name, error = %e, "upstream body is not JSON");
            ProxyError::Unavailable(op.fallback.to_string())
        })
    }

    /// `send` and drop the body (delete routes answer 204 regardless).
    pub async fn execute(&self, op: &Operation, req: UpstreamRequest) -> Result<(), ProxyError> {
        self.send(op, req).await.map(|_| ())
    }
}
