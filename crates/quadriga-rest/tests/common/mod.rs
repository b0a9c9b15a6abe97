//! Common test utilities and fixtures for integration tests
//!
//! Contains sample JSON bodies shaped like the v2 API responses

use quadriga_rest::{ClientConfig, Credentials, QuadrigaRestClient};
use wiremock::MockServer;

/// Sample ticker response
pub const TICKER_RESPONSE: &str = r#"{
    "high": "5600.00",
    "last": "5500.10",
    "timestamp": "1504110120",
    "volume": "123.45670000",
    "vwap": "5450.50",
    "low": "5300.00",
    "ask": "5501.00",
    "bid": "5499.00"
}"#;

/// Sample order book response
pub const ORDER_BOOK_RESPONSE: &str = r#"{
    "timestamp": "1504110120",
    "bids": [["5499.00", "0.50000000"], ["5498.00", "1.25000000"]],
    "asks": [["5501.00", "0.75000000"], ["5510.00", "2.00000000"]]
}"#;

/// Sample public transactions response
pub const TRANSACTIONS_RESPONSE: &str = r#"[
    {"date": "1504110120", "tid": 1001, "price": "5500.00", "amount": "0.02000000", "side": "sell"},
    {"date": "1504110100", "tid": 1000, "price": "5499.00", "amount": "0.10000000", "side": "buy"}
]"#;

/// Sample balance response
pub const BALANCE_RESPONSE: &str = r#"{
    "cad_balance": "1000.50",
    "cad_reserved": "100.00",
    "cad_available": "900.50",
    "btc_balance": "0.25000000",
    "btc_reserved": "0.00000000",
    "btc_available": "0.25000000",
    "fee": "0.5000"
}"#;

/// Sample user transactions response
pub const USER_TRANSACTIONS_RESPONSE: &str = r#"[
    {"datetime": "2017-08-30 16:22:00", "id": 98765, "type": 2, "method": null,
     "btc": "-0.01000000", "cad": "55.00", "order_id": "abc123", "fee": "0.27", "rate": "5500.00"},
    {"datetime": "2017-08-29 10:00:00", "id": 98700, "type": 0, "method": "interac",
     "cad": "500.00", "fee": "0.00"}
]"#;

/// Sample exchange error envelope
pub const AUTH_ERROR_RESPONSE: &str = r#"{
    "error": {"code": 101, "message": "Invalid API Code or Invalid Signature"}
}"#;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// API root on the mock server
pub fn base_url(server: &MockServer) -> String {
    format!("{}/v2/", server.uri())
}

/// Deterministic test credentials
pub fn test_credentials() -> Credentials {
    Credentials::new("K", "S")
        .expect("valid test credentials")
        .with_client_id("7")
}

/// Unauthenticated client pointed at the mock server
pub fn public_client(server: &MockServer) -> QuadrigaRestClient {
    QuadrigaRestClient::with_config(ClientConfig::new().with_base_url(base_url(server)))
        .expect("client should build")
}

/// Authenticated client pointed at the mock server
#[allow(dead_code)]
pub fn private_client(server: &MockServer) -> QuadrigaRestClient {
    let config = ClientConfig::new()
        .with_base_url(base_url(server))
        .with_credentials(test_credentials());
    QuadrigaRestClient::with_config(config).expect("client should build")
}
