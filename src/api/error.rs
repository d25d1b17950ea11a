//! Errors raised while talking to the admissions backend

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS, TLS or timeout failure
    #[error("Could not reach the admissions server: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("{}", backend_message(.status, .detail))]
    Backend { status: u16, detail: Option<String> },

    /// 2xx response whose body did not match the expected shape
    #[error("Unexpected response from the admissions server: {0}")]
    Decode(String),
}

fn backend_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("Error: {}", detail),
        None => format!("Request failed with status {}", status),
    }
}

impl ApiError {
    /// Backend `detail` text, when the server supplied one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Backend { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Pull the `detail` field out of an error body.
/// Strings are used as-is; structured details (validation lists) are rendered as JSON.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
