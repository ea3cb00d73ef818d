//! Error Types

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Fallback message when the server gives no usable `detail`
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (DNS, refused, CORS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status. Displays as the server-supplied message.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A successful body did not match the expected record
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Form input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Token storage unavailable or refused the write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Build a status error from an HTTP code and optional server detail
    pub fn status(status: u16, detail: Option<&str>) -> Self {
        Self::Status {
            status,
            message: detail.unwrap_or(DEFAULT_FAILURE_MESSAGE).to_string(),
        }
    }

    /// HTTP status code, when the server answered
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server rejected our credentials
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// Convert to the string shown in a view's status line
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Unable to reach the server. Please try again.".into(),
            Self::Status { message, .. } | Self::Validation(message) => message.clone(),
            Self::Decode(_) => "The server sent an unexpected response.".into(),
            Self::Storage(_) => "Your session could not be saved in this browser.".into(),
            Self::Config(msg) => format!("Service configuration error: {msg}"),
        }
    }
}
