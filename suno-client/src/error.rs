//! Client error types

use reqwest::StatusCode;
use shared::ErrorBody;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication required or credentials rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected by the server (400) or by a local pre-flight check
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local file access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more media uploads failed and the report was not submitted
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Geocoding service failed or returned nothing usable
    #[error("Geocoding error: {0}")]
    Geocode(String),
}

impl ClientError {
    /// Maps a non-success status and its body to an error.
    ///
    /// The backend reports failures as `{"error": "..."}`; that message is
    /// kept verbatim so callers can show it as-is.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = ErrorBody::message_from(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the failure may go away on its own (transport or server fault)
    /// as opposed to a rejected request.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Geocode(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether the session is missing or expired
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Message suitable for an inline error line
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Validation(m)
            | Self::Conflict(m) => m.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::Http(_) => "Network error. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
