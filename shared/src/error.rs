//! Error types shared between the SDK and its consumers

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not name a member of one of the domain enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Error body returned by the backend on every non-success response.
///
/// ```json
/// { "error": "Invalid credentials" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Extracts the message from a raw response body.
    ///
    /// Falls back to the trimmed body text when it is not an error object,
    /// and to `None` when the body is empty.
    pub fn message_from(body: &str) -> Option<String> {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            return Some(parsed.error);
        }
        let trimmed = body.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
