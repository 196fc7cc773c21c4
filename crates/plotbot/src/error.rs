//! Error types for the sentiment bot

use plotbot_utils::EnvError;
use thiserror::Error;

/// Errors raised while polling, analyzing and replying
#[derive(Debug, Error)]
pub enum PlotbotError {
    /// Missing credentials or invalid settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The platform rejected our credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The requested account or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success API status
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected record
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Chart drawing failed
    #[error("Render error: {0}")]
    Render(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, PlotbotError>;

impl From<EnvError> for PlotbotError {
    fn from(err: EnvError) -> Self {
        PlotbotError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for PlotbotError {
    fn from(err: serde_json::Error) -> Self {
        PlotbotError::InvalidResponse(err.to_string())
    }
}

impl PlotbotError {
    /// Map a non-success HTTP status and body to an error
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => PlotbotError::Authentication(body),
            404 => PlotbotError::NotFound(body),
            429 => PlotbotError::RateLimited(body),
            _ => PlotbotError::Api {
                status,
                message: body,
            },
        }
    }

    /// Whether this error means the target simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlotbotError::NotFound(_))
    }
}
