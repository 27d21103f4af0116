use std::fmt;
use std::time::Duration;

use dashboard_logging::{dash_debug, dash_trace, dash_warn};
use serde_json::{Map, Value};

use crate::{ApiError, EngineError, ErrorKind};

/// Characters of a non-JSON error body kept in the surfaced message.
pub const ERROR_BODY_PREVIEW_CHARS: usize = 120;

#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Base URL the API paths are appended to.
    pub api_base: String,
    /// `None` imposes no limit; set to layer a watchdog on top.
    pub connect_timeout: Option<Duration>,
    /// `None` imposes no limit; set to layer a watchdog on top.
    pub request_timeout: Option<Duration>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// One API call, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// A POST without a body.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Performs a single request and normalizes the outcome.
///
/// Implementations make exactly one network call per invocation: no retry,
/// no caching. A successful call without a usable payload yields an empty
/// JSON object.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: &Request) -> Result<Value, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base: String,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, EngineError> {
        let base = settings.api_base.trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base).map_err(|err| EngineError::InvalidBaseUrl {
            url: settings.api_base.clone(),
            reason: err.to_string(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;

        Ok(Self { base, client })
    }

    fn url_for(&self, request: &Request) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&format!("{}{}", self.base, request.path))
            .map_err(|err| ApiError::new(ErrorKind::InvalidUrl, err.to_string()))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn request(&self, request: &Request) -> Result<Value, ApiError> {
        let url = self.url_for(request)?;
        dash_debug!("{} {}", request.method, url);

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let response = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        // Read text first so non-JSON error bodies still reach the message.
        let body = response.text().await.map_err(map_reqwest_error)?;
        dash_trace!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.path,
            status.as_u16(),
            body.len()
        );
        let payload = parse_maybe_json(&body);

        if !status.is_success() {
            let message = http_error_message(status.as_u16(), payload.as_ref(), &body);
            dash_warn!(
                "{} {} failed with {}: {}",
                request.method,
                request.path,
                status.as_u16(),
                message
            );
            return Err(ApiError::new(ErrorKind::Http(status.as_u16()), message));
        }

        Ok(payload.unwrap_or_else(|| Value::Object(Map::new())))
    }
}

/// Parses a body as JSON. Invalid JSON, an empty body and a literal `null`
/// all count as no payload.
pub fn parse_maybe_json(body: &str) -> Option<Value> {
    serde_json::from_str::<Value>(body)
        .ok()
        .filter(|value| !value.is_null())
}

/// Message for a non-2xx response: the payload's `detail` or `message`
/// string, else the start of the raw body, else `HTTP <status>`.
pub fn http_error_message(status: u16, payload: Option<&Value>, body: &str) -> String {
    let from_payload = payload.and_then(|value| {
        ["detail", "message"].iter().find_map(|field| {
            value
                .get(field)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
        })
    });
    if let Some(message) = from_payload {
        return message.to_string();
    }

    let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    if !preview.is_empty() {
        return preview;
    }
    format!("HTTP {status}")
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ErrorKind::Network, format!("request timed out: {err}"));
    }
    ApiError::new(ErrorKind::Network, err.to_string())
}
