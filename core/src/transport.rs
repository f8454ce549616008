//! Authenticated JSON transport for TestRail API v2.
//!
//! # Design
//! `Transport` is the only seam between records and the network: records and
//! the client hold an `Arc<dyn Transport>` and call `send`, so tests swap in a
//! fake without touching the record code.
//!
//! `HttpTransport` splits each call into three steps. `build_request` and
//! `parse_response` are pure and carry all of the wire contract (URL layout,
//! Basic auth, error translation); `execute` is the thin ureq round-trip in
//! between.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::config::{ClientConfig, Credentials};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const NO_ERROR_MESSAGE: &str = "No additional error message received";

/// Issues one API call and returns the decoded JSON body.
///
/// `path` is relative to the API root, e.g. `get_suites/3`. `body` is only
/// meaningful for POST.
pub trait Transport: fmt::Debug + Send + Sync {
    fn send(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<Value, ApiError>;
}

/// Blocking HTTP transport backed by a ureq agent.
pub struct HttpTransport {
    api_root: String,
    credentials: RwLock<Credentials>,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Self {
        // Non-2xx responses must come back as data so their `error` field can
        // be surfaced.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self {
            api_root: config.api_root(),
            credentials: RwLock::new(config.credentials.clone()),
            agent,
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Replace the credentials used by every subsequent call.
    pub fn set_credentials(&self, credentials: Credentials) {
        *self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = credentials;
    }

    pub fn credentials(&self) -> Credentials {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Build the request for one call without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<HttpRequest, ApiError> {
        let credentials = self.credentials();
        let token = STANDARD.encode(format!("{}:{}", credentials.user, credentials.password));

        let body = match method {
            HttpMethod::Get => None,
            HttpMethod::Post => Some(
                serde_json::to_string(body.unwrap_or(&Value::Null))
                    .map_err(|e| ApiError::Serialization(e.to_string()))?,
            ),
        };

        Ok(HttpRequest {
            method,
            url: format!("{}{path}", self.api_root),
            headers: vec![
                ("authorization".to_string(), format!("Basic {token}")),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body,
        })
    }

    /// Run the round-trip. Only failures that prevent a response from being
    /// read are errors here; HTTP status is interpreted by `parse_response`.
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.send(request.body.as_deref().unwrap_or_default().as_bytes())
            }
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        // Listings are unpaginated; no cap on body size.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// Translate a raw response into the decoded body or an `ApiError::Http`.
    pub fn parse_response(response: HttpResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            let message = serde_json::from_str::<Value>(&response.body)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(|e| format!("\"{e}\"")))
                .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string());
            return Err(ApiError::Http {
                status: response.status,
                message,
            });
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

impl Transport for HttpTransport {
    #[instrument(level = "debug", skip(self, body))]
    fn send(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let request = self.build_request(method, path, body)?;
        let response = self.execute(request).inspect_err(|e| warn!(error = %e, "request failed"))?;
        debug!(status = response.status, bytes = response.body.len(), "response received");
        Self::parse_response(response).inspect_err(|e| warn!(error = %e, "TestRail call failed"))
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_root", &self.api_root)
            .field("credentials", &self.credentials())
            .finish_non_exhaustive()
    }
}
