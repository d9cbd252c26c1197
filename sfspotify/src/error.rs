//! Error types for the Spotify client

/// Result type alias for Spotify operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the Spotify client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-2xx answer
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Token refused or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Client id, secret or refresh token not configured
    #[error("Missing Spotify credential: {0}")]
    MissingCredential(String),

    /// Response does not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn status(status: reqwest::StatusCode, url: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            url: url.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(e)
        }
    }
}
