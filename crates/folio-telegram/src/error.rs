//! Error types for Bot API operations.

/// Result type alias for Bot API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Bot API error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error (connection refused, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The Bot API answered with `ok: false`.
    #[error("Bot API rejected request: {description}")]
    Rejected {
        /// Error code reported by the API (usually mirrors the HTTP status).
        error_code: Option<i64>,
        /// Human-readable description.
        description: String,
    },

    /// The response could not be interpreted as a Bot API envelope.
    #[error("Invalid response (HTTP {status}): {body}")]
    InvalidResponse {
        /// HTTP status code.
        status: u16,
        /// Raw response body, truncated.
        body: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Creates a rejection error from an API envelope.
    #[must_use]
    pub fn rejected(error_code: Option<i64>, description: impl Into<String>) -> Self {
        Self::Rejected {
            error_code,
            description: description.into(),
        }
    }

    /// Returns true when the request reached the API and was refused.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Returns true when the request timed out in transit.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
