//! API credentials for QuadrigaCX private endpoints
//!
//! Implements HMAC-SHA256 signing as required by the v2 private endpoints.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// API credentials for authenticated requests
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// API secret (zeroized on drop)
    api_secret: SecretString,
    /// Client (account) number shown in the exchange's API settings
    client_id: String,
}

impl Credentials {
    /// Client id used when none is given
    pub const DEFAULT_CLIENT_ID: &'static str = "1";

    /// Create new credentials from an API key and secret
    ///
    /// The client id defaults to [`Credentials::DEFAULT_CLIENT_ID`]; use
    /// [`Credentials::with_client_id`] to override it.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
            client_id: Self::DEFAULT_CLIENT_ID.to_string(),
        })
    }

    /// Set the client (account) id
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Build credentials from individually optional parts
    ///
    /// Returns `Ok(None)` when neither key nor secret is given (an
    /// unauthenticated client). Supplying only one of the two is an error.
    /// Empty strings count as absent.
    pub fn from_parts(
        api_key: Option<String>,
        api_secret: Option<String>,
        client_id: Option<String>,
    ) -> AuthResult<Option<Self>> {
        let api_key = api_key.filter(|k| !k.is_empty());
        let api_secret = api_secret.filter(|s| !s.is_empty());

        match (api_key, api_secret) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(AuthError::MissingApiSecret),
            (None, Some(_)) => Err(AuthError::MissingApiKey),
            (Some(key), Some(secret)) => {
                let creds = Self::new(key, secret)?;
                Ok(Some(match client_id.filter(|id| !id.is_empty()) {
                    Some(id) => creds.with_client_id(id),
                    None => creds,
                }))
            }
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `QUADRIGACX_API_KEY`, `QUADRIGACX_API_SECRET` and, optionally,
    /// `QUADRIGACX_CLIENT_ID` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var("QUADRIGACX_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("QUADRIGACX_API_KEY".to_string()))?;
        let api_secret = std::env::var("QUADRIGACX_API_SECRET")
            .map_err(|_| AuthError::EnvVarNotSet("QUADRIGACX_API_SECRET".to_string()))?;
        let client_id = std::env::var("QUADRIGACX_CLIENT_ID").ok();

        Self::from_parts(Some(api_key), Some(api_secret), client_id)?
            .ok_or_else(|| AuthError::InvalidCredentials("empty credentials".to_string()))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the client id
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Sign for a given nonce
    ///
    /// QuadrigaCX signature algorithm:
    /// 1. message = nonce + client_id + api_key (no separators)
    /// 2. HMAC-SHA256(api_secret, message)
    /// 3. Lowercase hex encode
    pub fn sign(&self, nonce: u64) -> String {
        let message = format!("{}{}{}", nonce, self.client_id, self.api_key);

        let mut mac = HmacSha256::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
            client_id: self.client_id.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("api_secret", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .finish()
    }
}
