use http::StatusCode;
use thiserror::Error;

/// Message shown when a failed response carries nothing usable.
pub const GENERIC_FAILURE: &str = "Operation failed";

/// The portal client's error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, TLS).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A non-2xx response. `message` is `None` when the body had nothing usable.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or(GENERIC_FAILURE))]
    Http {
        status: StatusCode,
        message: Option<String>,
    },

    /// A protected call was rejected with 401/403; the session has been dropped.
    #[error("Session expired")]
    AuthExpired,

    /// A protected call was attempted without a token.
    #[error("Login required")]
    MustLogIn,

    /// Login was refused.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Input rejected before reaching the network.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A resource not found error.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body was not valid JSON for the expected type.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The response was JSON but matched no known envelope.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// The session was replaced or cleared while the request was in flight.
    #[error("Session changed during request")]
    SessionChanged,
}

/// A `Result` type that uses `ApiError` as the error type.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Builds an `Http` error, keeping the message only when it has content.
    pub fn http(status: StatusCode, message: Option<String>) -> Self {
        ApiError::Http {
            status,
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// Whether the backend refused the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Http { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }

    /// The server-provided message, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            ApiError::NotFound(message) => Some(message),
            _ => None,
        }
    }

    /// Converts the error into the inline message a screen displays.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(e) => {
                tracing::error!("Network error: {}", e);
                "A network error occurred. Check your connection and try again.".to_string()
            }

            ApiError::Http { status, message } => {
                tracing::warn!("HTTP {} from backend", status);
                message.clone().unwrap_or_else(|| GENERIC_FAILURE.to_string())
            }

            ApiError::AuthExpired => {
                tracing::warn!("Session expired");
                "Session expired or unauthorized. Please log in again.".to_string()
            }

            ApiError::MustLogIn => {
                tracing::debug!("Login required");
                "You must be logged in to do that.".to_string()
            }

            ApiError::Authentication(msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                msg.clone()
            }

            ApiError::Validation(msg) => {
                tracing::debug!("Validation error: {}", msg);
                msg.clone()
            }

            ApiError::NotFound(msg) => {
                tracing::debug!("Resource not found: {}", msg);
                msg.clone()
            }

            ApiError::Decode(msg) => {
                tracing::error!("Decode error: {}", msg);
                "The server sent a response that could not be read.".to_string()
            }

            ApiError::UnexpectedShape(msg) => {
                tracing::error!("Unexpected response shape: {}", msg);
                "The server sent data in an unexpected format.".to_string()
            }

            ApiError::SessionChanged => {
                tracing::debug!("Result dropped after session change");
                "Your session changed. Please reload.".to_string()
            }
        }
    }
}
