//! Credentials and request signing for the QuadrigaCX API
//!
//! Private endpoints expect three extra fields on every request: `key`,
//! `nonce` and `signature`, where the signature is the lowercase hex
//! HMAC-SHA256 of `nonce + client_id + api_key` keyed with the API secret.
//!
//! # Example
//!
//! ```no_run
//! use quadriga_auth::{Credentials, RequestSigner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from environment
//!     let creds = Credentials::from_env()?;
//!
//!     // Sign a JSON body for a private POST
//!     let signer = RequestSigner::new(creds);
//!     let mut body = serde_json::Map::new();
//!     let fields = signer.sign_body(&mut body);
//!     println!("nonce: {}", fields.nonce);
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod nonce;
mod signer;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use nonce::NonceGenerator;
pub use signer::{AuthFields, RequestSigner};
