//! Error types for the Predscope application.

use std::fmt;
use thiserror::Error;

/// Maximum number of characters of a response body kept in an [`ApiError`].
pub const BODY_SNIPPET_LEN: usize = 120;

/// A non-success HTTP response from the prediction API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP method of the failed request.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status.
    pub status_text: String,
    /// Response body, truncated to [`BODY_SNIPPET_LEN`] characters.
    pub body_snippet: String,
}

impl ApiError {
    /// Build an error from a raw response, truncating the body.
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        status_text: impl Into<String>,
        body: &str,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            status,
            status_text: status_text.into(),
            body_snippet: body.chars().take(BODY_SNIPPET_LEN).collect(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} failed: {} {}",
            self.method, self.url, self.status, self.status_text
        )?;
        if !self.body_snippet.is_empty() {
            write!(f, " – {}", self.body_snippet)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// The main error type for Predscope.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Non-success response from the prediction API
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Transport-level failures (DNS, refused connection, timeouts)
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Local key/value storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid input or state
    #[error("{0}")]
    InvalidInput(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Check if this error is recoverable (user can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Api(_) | Self::Http(_) | Self::Channel(_))
    }
}
