use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CommonError;

/// Header carrying the server-held LiteAPI key. Never sent to browsers.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Upstream endpoint paths, relative to [`LiteApiConfig::base_url`].
pub mod paths {
    pub const HOTELS: &str = "/data/hotels";
    pub const HOTEL: &str = "/data/hotel";
    pub const CITIES: &str = "/data/cities";
    pub const COUNTRIES: &str = "/data/countries";
    pub const FACILITIES: &str = "/data/facilities";
    pub const REVIEWS: &str = "/data/reviews";
    pub const HOTEL_RATES: &str = "/hotels/rates";
    pub const HOTEL_MIN_RATES: &str = "/hotels/min-rates";
    pub const PREBOOK: &str = "/rates/prebook";
    pub const BOOK: &str = "/rates/book";
    pub const BOOKINGS: &str = "/bookings";

    pub fn booking(id: &str) -> String {
        format!("{BOOKINGS}/{id}")
    }
}

#[derive(Clone)]
pub struct LiteApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub max_error_body_bytes: usize,
}

impl std::fmt::Debug for LiteApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiteApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("max_error_body_bytes", &self.max_error_body_bytes)
            .finish()
    }
}

impl LiteApiConfig {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    const DEFAULT_MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: Self::DEFAULT_TIMEOUT,
            max_error_body_bytes: Self::DEFAULT_MAX_ERROR_BODY_BYTES,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load the upstream configuration from the process environment.
    ///
    /// Required:
    /// - `LITEAPI_KEY`: secret API key
    /// - `LITEAPI_BASE_URL`: e.g. "https://api.liteapi.travel/v3.0"
    ///
    /// Optional:
    /// - `LITEAPI_TIMEOUT_SECS`: per-request timeout (default 30)
    pub fn from_env() -> Result<Self, CommonError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`LiteApiConfig::from_env`], reading variables through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self, CommonError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    CommonError::Config(format!("{key} environment variable is required"))
                })
        };

        let api_key = required("LITEAPI_KEY")?;
        let base_url = required("LITEAPI_BASE_URL")?;

        let timeout = lookup("LITEAPI_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Self::DEFAULT_TIMEOUT);

        Ok(Self::new(base_url, api_key).with_timeout(timeout))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LiteApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("upstream returned error: status={status} message={message}")]
    Upstream { status: StatusCode, message: String },

    #[error("upstream returned non-JSON error: status={status} body={body}")]
    UpstreamBody { status: StatusCode, body: String },
}

impl LiteApiError {
    /// HTTP status reported by the upstream, when there was a response at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            LiteApiError::Upstream { status, .. } | LiteApiError::UpstreamBody { status, .. } => {
                Some(*status)
            }
            LiteApiError::Request(e) => e.status(),
            LiteApiError::InvalidJson(_) => None,
        }
    }

    /// Human-readable message suitable for the `message` field of an error response.
    pub fn message(&self) -> String {
        match self {
            LiteApiError::Upstream { message, .. } => message.clone(),
            LiteApiError::UpstreamBody { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("upstream error")
                        .to_string()
                } else {
                    body.to_string()
                }
            }
            LiteApiError::Request(e) if e.is_timeout() => "upstream request timed out".to_string(),
            LiteApiError::Request(e) => e.to_string(),
            LiteApiError::InvalidJson(e) => format!("invalid response JSON from upstream: {e}"),
        }
    }
}

/// Thin JSON client for the LiteAPI hotel provider.
///
/// Every call is a single attempt bounded by the configured timeout; failures are
/// returned to the caller untouched so proxy routes can surface the upstream status.
#[derive(Clone)]
pub struct LiteApiClient {
    config: LiteApiConfig,
    http: reqwest::Client,
}

impl LiteApiClient {
    pub fn new(config: LiteApiConfig) -> Result<Self, LiteApiError> {
        let http = reqwest::Client::builder()
            .user_agent("halal-stays/stays-proxy")
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, LiteApiError> {
        let url = self.url(path);
        let request = self.http.get(&url).query(query);
        self.execute(request, Method::GET, &url).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, LiteApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = self.http.post(&url).json(body);
        self.execute(request, Method::POST, &url).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, LiteApiError> {
        let url = self.url(path);
        let request = self.http.delete(&url);
        self.execute(request, Method::DELETE, &url).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        method: Method,
        url: &str,
    ) -> Result<Value, LiteApiError> {
        debug!(%method, url, "liteapi request");
        let resp = request
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, %method, url, "liteapi request failed"))?;

        let status = resp.status();
        debug!(status = status.as_u16(), url, "liteapi response");

        if status.is_success() {
            let bytes = resp.bytes().await?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let err = Self::to_upstream_error(resp, self.config.max_error_body_bytes).await;
        warn!(status = status.as_u16(), error = %err, %method, url, "liteapi error");
        Err(err)
    }

    async fn to_upstream_error(resp: reqwest::Response, max_error_body_bytes: usize) -> LiteApiError {
        let status = resp.status();
        let body = read_limited_text(resp, max_error_body_bytes).await;
        match serde_json::from_str::<Value>(&body) {
            Ok(parsed) => {
                let message = upstream_message(&parsed)
                    .unwrap_or_else(|| "unknown upstream error".to_string());
                LiteApiError::Upstream { status, message }
            }
            Err(_) => LiteApiError::UpstreamBody { status, body },
        }
    }
}

/// Pull a message out of the error envelopes LiteAPI uses:
/// `{"error": {"message": ..}}`, `{"error": ".."}` or `{"message": ..}`.
fn upstream_message(body: &Value) -> Option<String> {
    let nested = match body.get("error") {
        Some(Value::Object(obj)) => obj.get("message").and_then(Value::as_str),
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    };
    nested
        .or_else(|| body.get("message").and_then(Value::as_str))
        .map(str::to_string)
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}
