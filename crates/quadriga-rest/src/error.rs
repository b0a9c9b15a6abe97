//! Error types for REST API operations

use quadriga_auth::AuthError;
use quadriga_types::ParseError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed (network, DNS, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credentials are incomplete or unusable
    #[error("Invalid credentials: {0}")]
    Credentials(#[from] AuthError),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Parameter outside its closed set
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParseError),

    /// Base URL could not be parsed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Server answered with a non-2xx status
    #[error("HTTP status {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Server answered with an error envelope
    #[error("API error {}: {message}", display_code(.code))]
    Api {
        /// Exchange error code, if one was given
        code: Option<i64>,
        /// Error message from the exchange
        message: String,
    },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl RestError {
    /// Raised while building the client
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Credentials(_) | Self::Url(_))
    }

    /// Raised locally because an argument was rejected
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }

    /// The server answered, but not with a usable result
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Api { .. } | Self::Parse(_))
    }

    /// Transport failures and 5xx answers may succeed if sent again
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

fn display_code(code: &Option<i64>) -> String {
    code.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string())
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
