// Client-side error types
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use thiserror::Error;

/// Where a request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    // Backend answered with a code other than 1
    Backend,
    // No connectivity, or the transport failed before a status arrived
    Fetch,
    // Non-2xx HTTP status
    Http,
}

/// Backend codes are numbers, client-synthesised codes are strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(n) => write!(f, "{}", n),
            ErrorCode::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(value: &str) -> Self {
        ErrorCode::Text(value.to_string())
    }
}

impl From<i64> for ErrorCode {
    fn from(value: i64) -> Self {
        ErrorCode::Number(value)
    }
}

impl From<u16> for ErrorCode {
    fn from(value: u16) -> Self {
        ErrorCode::Number(value as i64)
    }
}

/// Normalised `{type, code, msg}` request failure
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{msg}")]
pub struct RequestError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub msg: String,
}

impl RequestError {
    pub fn new(kind: ErrorKind, code: impl Into<ErrorCode>, msg: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            msg: msg.into(),
        }
    }

    /// Error code for client handling
    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.msg
    }

    pub fn to_json(&self) -> Value {
        json!({
            "type": self.kind,
            "code": self.code,
            "msg": self.msg,
        })
    }
}

// Static constructor methods
impl RequestError {
    pub fn backend(code: impl Into<ErrorCode>, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Backend, code, msg)
    }

    pub fn no_token() -> Self {
        Self::backend("NO_TOKEN", "Login failed: no token received")
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fetch, "DECODE_ERROR", msg)
    }

    pub fn network() -> Self {
        Self::new(ErrorKind::Fetch, "NETWORK_ERROR", "Network Unavailable~")
    }

    pub fn fetch() -> Self {
        Self::new(ErrorKind::Fetch, "DEFAULT", "Request Error~")
    }

    pub fn http(status: u16) -> Self {
        Self::new(ErrorKind::Http, status, format!("NETWORK_ERROR: {}", status))
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return RequestError::http(status.as_u16());
        }
        if err.is_connect() || err.is_timeout() {
            tracing::debug!("transport unavailable: {}", err);
            RequestError::network()
        } else if err.is_decode() {
            RequestError::decode(err.to_string())
        } else {
            tracing::debug!("transport error: {}", err);
            RequestError::fetch()
        }
    }
}

/// Persisted client state errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session orchestration errors. Clonable so one in-flight route
/// initialisation can hand the same outcome to every waiter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    /// The session was reset while the call was in flight; its result was discarded
    #[error("Session was reset")]
    Superseded,
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        SessionError::Storage(err.to_string())
    }
}
