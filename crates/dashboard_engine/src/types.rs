use std::fmt;

use dashboard_core::{DataPage, EtlSummary, HealthStatus, RequestId};
use thiserror::Error;

/// Failure of one API call, already reduced to a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a response.
    Network,
    /// Non-2xx response.
    Http(u16),
    /// A 2xx payload did not have the expected shape.
    Parse,
    InvalidUrl,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Http(code) => write!(f, "http status {code}"),
            ErrorKind::Parse => write!(f, "unexpected payload"),
            ErrorKind::InvalidUrl => write!(f, "invalid url"),
        }
    }
}

/// Errors raised while setting up the engine, before any request is made.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid api base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("http client error: {0}")]
    Client(String),
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    DataLoaded {
        request_id: RequestId,
        result: Result<DataPage, ApiError>,
    },
    HealthProbed(HealthStatus),
    EtlFinished(Result<EtlSummary, ApiError>),
}
