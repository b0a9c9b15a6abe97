//! Error types for authentication operations

/// Errors that can occur while building or applying credentials
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// API secret given without an API key
    #[error("Missing `api_key`: an API secret was supplied without a key")]
    MissingApiKey,

    /// API key given without an API secret
    #[error("Missing `api_secret`: an API key was supplied without a secret")]
    MissingApiSecret,

    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// A credential field cannot be carried in an HTTP header
    #[error("Invalid header value for `{0}`")]
    InvalidHeader(&'static str),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
