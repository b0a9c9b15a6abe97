//! Request signer for private endpoints
//!
//! Two call sites share one signature: JSON bodies for private POSTs, and
//! HTTP headers for callers that attach auth to an arbitrary request.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::trace;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};
use crate::nonce::NonceGenerator;

/// The three authentication fields added to a private request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthFields {
    /// API key
    pub key: String,
    /// Unix seconds at signing time
    pub nonce: u64,
    /// Lowercase hex HMAC-SHA256
    pub signature: String,
}

impl AuthFields {
    /// Merge `key`, `nonce` and `signature` into a JSON body
    ///
    /// Existing entries with the same names are overwritten.
    pub fn apply_to_body(&self, body: &mut Map<String, Value>) {
        body.insert("key".to_string(), Value::from(self.key.clone()));
        body.insert("nonce".to_string(), Value::from(self.nonce));
        body.insert("signature".to_string(), Value::from(self.signature.clone()));
    }

    /// Merge `key`, `nonce` and `signature` into HTTP headers
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) -> AuthResult<()> {
        let key = HeaderValue::from_str(&self.key).map_err(|_| AuthError::InvalidHeader("key"))?;
        let signature = HeaderValue::from_str(&self.signature)
            .map_err(|_| AuthError::InvalidHeader("signature"))?;

        headers.insert(HeaderName::from_static("key"), key);
        headers.insert(HeaderName::from_static("nonce"), HeaderValue::from(self.nonce));
        headers.insert(HeaderName::from_static("signature"), signature);
        Ok(())
    }
}

/// Signs private requests with one set of credentials
///
/// Clones share the nonce source, so every request signed through any clone
/// gets a nonce larger than the one before it.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
    nonces: Arc<NonceGenerator>,
}

impl RequestSigner {
    /// Create a signer with a wall-clock seeded nonce source
    pub fn new(credentials: Credentials) -> Self {
        Self::with_nonces(credentials, Arc::new(NonceGenerator::new()))
    }

    /// Create a signer with an explicit nonce source
    pub fn with_nonces(credentials: Credentials, nonces: Arc<NonceGenerator>) -> Self {
        Self { credentials, nonces }
    }

    /// Credentials this signer uses
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign with the next nonce
    pub fn sign(&self) -> AuthFields {
        self.sign_with_nonce(self.nonces.next_nonce())
    }

    /// Sign with a caller-chosen nonce
    pub fn sign_with_nonce(&self, nonce: u64) -> AuthFields {
        trace!(nonce, "Signing request");
        AuthFields {
            key: self.credentials.api_key().to_string(),
            nonce,
            signature: self.credentials.sign(nonce),
        }
    }

    /// Sign and merge the auth fields into a JSON body
    pub fn sign_body(&self, body: &mut Map<String, Value>) -> AuthFields {
        let fields = self.sign();
        fields.apply_to_body(body);
        fields
    }

    /// Sign and merge the auth fields into HTTP headers
    pub fn sign_headers(&self, headers: &mut HeaderMap) -> AuthResult<AuthFields> {
        let fields = self.sign();
        fields.apply_to_headers(headers)?;
        Ok(fields)
    }
}
