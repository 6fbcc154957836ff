use serde::Deserialize;
use thiserror::Error;

/// Shown when the server rejects a request without saying why.
pub const GENERIC_ERROR: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. Displays as the server-provided message.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Body of a non-2xx response. `message` is a string for most errors and an
/// array of strings for validation failures.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        let text = match self.message? {
            serde_json::Value::String(s) => s,
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => return None,
        };
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl ApiError {
    pub fn from_status(status: u16, body: Option<ErrorBody>) -> Self {
        let message = body
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| GENERIC_ERROR.to_string());
        ApiError::Status { status, message }
    }

    /// The session cookie is missing or expired.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }

    /// Text for inline display, or `fallback` when there is nothing useful to show.
    pub fn message_or(&self, fallback: &str) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            fallback.to_string()
        } else {
            text
        }
    }
}

impl From<ApiError> for String {
    fn from(err: ApiError) -> Self {
        err.to_string()
    }
}
