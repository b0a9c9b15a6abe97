//! REST API client for the QuadrigaCX cryptocurrency exchange
//!
//! This crate wraps the v2 REST API: public market data and the private
//! account endpoints.
//!
//! # Features
//!
//! - **Market Data**: Ticker, order book, recent trades
//! - **Account**: Balances, transaction history
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Each private call carries
//! `key`, `nonce` and `signature` in its JSON body, where the signature is
//! a hex HMAC-SHA256 over `nonce + client_id + api_key`.
//!
//! # Example
//!
//! ```no_run
//! use quadriga_rest::{Credentials, OrderBook, QuadrigaRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = QuadrigaRestClient::new()?;
//!     let ticker = client.ticker(Some(OrderBook::EthCad)).await?;
//!     println!("ETH/CAD: {}", ticker.last);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = QuadrigaRestClient::with_credentials(creds)?;
//!     let balance = auth_client.get_balance().await?;
//!     println!("Balances: {:?}", balance);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Argument and authentication problems are reported before any request is
//! sent. Nothing is retried; see [`RestError::is_retryable`].

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{build_url, ClientConfig, QuadrigaRestClient, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{RestError, RestResult};
pub use transport::{HttpRequest, RawResponse, ReqwestTransport, Transport};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    OrderBookSnapshot, PriceLevel, Ticker, Trade,
    // Account
    Balance, TransactionKind, UserTransaction, UserTransactionsQuery,
};

pub use quadriga_auth::{AuthError, Credentials, RequestSigner};
pub use quadriga_types::{Currency, OrderBook, ParseError, Side, SortOrder, Timeframe};
