//! Main REST client implementation

use quadriga_auth::{Credentials, RequestSigner};
use quadriga_types::{OrderBook, Timeframe};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

use crate::endpoints::{AccountEndpoints, MarketEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::{RawResponse, ReqwestTransport, Transport};
use crate::types::{Balance, OrderBookSnapshot, Ticker, Trade, UserTransaction, UserTransactionsQuery};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.quadrigacx.com/v2/";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent, e.g. `quadriga-rest/0.1.0`
pub const DEFAULT_USER_AGENT: &str = concat!("quadriga-rest/", env!("CARGO_PKG_VERSION"));

/// QuadrigaCX REST API client
///
/// Provides access to both public and private endpoints. Private endpoints
/// are reached through [`QuadrigaRestClient::account`], which fails with
/// [`RestError::AuthRequired`] before any request is made when the client
/// has no credentials.
///
/// # Example
///
/// ```no_run
/// use quadriga_rest::{Credentials, QuadrigaRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = QuadrigaRestClient::new()?;
///     let ticker = client.ticker(None).await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = QuadrigaRestClient::with_credentials(creds)?;
///     let balance = auth_client.get_balance().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct QuadrigaRestClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
    signer: Option<RequestSigner>,
}

impl QuadrigaRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a client from individually optional credential parts
    ///
    /// Giving only one of `api_key` / `api_secret` is a configuration error.
    /// `client_id` defaults to `"1"`.
    pub fn from_parts(
        api_key: Option<String>,
        api_secret: Option<String>,
        client_id: Option<String>,
    ) -> RestResult<Self> {
        let mut config = ClientConfig::new();
        config.credentials = Credentials::from_parts(api_key, api_secret, client_id)?;
        Self::with_config(config)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs), user_agent)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends through the given transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> RestResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(RestError::Configuration(format!(
                "base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        info!(
            base_url = %base_url,
            authenticated = config.credentials.is_some(),
            "Created QuadrigaCX REST client"
        );

        Ok(Self {
            transport,
            base_url,
            signer: config.credentials.map(RequestSigner::new),
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn is_authenticated(&self) -> bool {
        self.signer.is_some()
    }

    /// API root every endpoint path is joined onto
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self.transport.as_ref(), &self.base_url)
    }

    /// Get ticker information, unparsed
    pub async fn get_ticker(&self, book: Option<OrderBook>) -> RestResult<RawResponse> {
        self.market().get_ticker(book).await
    }

    /// Get ticker information, parsed
    pub async fn ticker(&self, book: Option<OrderBook>) -> RestResult<Ticker> {
        self.market().ticker(book).await
    }

    /// Get open orders for a book
    pub async fn get_order_book(
        &self,
        book: Option<OrderBook>,
        group_by_price: Option<bool>,
    ) -> RestResult<OrderBookSnapshot> {
        self.market().get_order_book(book, group_by_price).await
    }

    /// Get recent public trades for a book
    pub async fn get_transactions(
        &self,
        book: Option<OrderBook>,
        timeframe: Option<Timeframe>,
    ) -> RestResult<Vec<Trade>> {
        self.market().get_transactions(book, timeframe).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let signer = self.signer.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(self.transport.as_ref(), &self.base_url, signer))
    }

    /// Get account balance
    pub async fn get_balance(&self) -> RestResult<Balance> {
        self.account()?.get_balance().await
    }

    /// Get the account's own transactions
    pub async fn get_user_transactions(
        &self,
        query: &UserTransactionsQuery,
    ) -> RestResult<Vec<UserTransaction>> {
        self.account()?.get_user_transactions(query).await
    }
}

impl std::fmt::Debug for QuadrigaRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadrigaRestClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Join path segments onto the API root, percent-encoding each one
///
/// A `/`, `?` or `#` inside a segment is escaped rather than changing the
/// URL's structure.
pub fn build_url(base: &Url, parts: &[&str]) -> RestResult<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| RestError::Configuration(format!("base URL cannot carry a path: {}", base)))?;
        segments.pop_if_empty().extend(parts);
    }
    Ok(url)
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// API root
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpRequest;
    use async_trait::async_trait;
    use quadriga_auth::AuthError;
    use reqwest::{Method, StatusCode};
    use std::sync::Mutex;

    /// Records every request and answers with a fixed body
    #[derive(Debug)]
    struct RecordingTransport {
        requests: Mutex<Vec<HttpRequest>>,
        body: &'static str,
    }

    impl RecordingTransport {
        fn new(body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                body,
            })
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: HttpRequest) -> RestResult<RawResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(RawResponse::new(StatusCode::OK, self.body))
        }
    }

    const TICKER: &str = r#"{"high":"5600","last":"5500","timestamp":"1504110120","volume":"1","vwap":"5450","low":"5300","ask":"5501","bid":"5499"}"#;
    const ORDER_BOOK: &str = r#"{"timestamp":"1504110120","bids":[["5499","1"]],"asks":[["5501","2"]]}"#;
    const BALANCE: &str = r#"{"cad_balance":"10.00","fee":"0.5"}"#;

    fn public_client(transport: Arc<RecordingTransport>) -> QuadrigaRestClient {
        QuadrigaRestClient::with_transport(ClientConfig::default(), transport).unwrap()
    }

    fn private_client(transport: Arc<RecordingTransport>) -> QuadrigaRestClient {
        let creds = Credentials::new("K", "S").unwrap().with_client_id("7");
        QuadrigaRestClient::with_transport(ClientConfig::new().with_credentials(creds), transport)
            .unwrap()
    }

    #[test]
    fn test_client_without_credentials() {
        let client = QuadrigaRestClient::new().unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_base_url("http://localhost:8080/v2/");

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.base_url, "http://localhost:8080/v2/");
    }

    #[test]
    fn test_default_user_agent() {
        assert!(DEFAULT_USER_AGENT.starts_with("quadriga-rest/"));
    }

    #[test]
    fn test_from_parts() {
        let client = QuadrigaRestClient::from_parts(None, None, None).unwrap();
        assert!(!client.is_authenticated());

        let client =
            QuadrigaRestClient::from_parts(Some("key".into()), Some("secret".into()), None).unwrap();
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_partial_credentials_rejected() {
        let err = QuadrigaRestClient::from_parts(Some("key".into()), None, None).unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, RestError::Credentials(AuthError::MissingApiSecret)));

        let err = QuadrigaRestClient::from_parts(None, Some("secret".into()), Some("7".into()))
            .unwrap_err();
        assert!(matches!(err, RestError::Credentials(AuthError::MissingApiKey)));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::new().with_base_url("not a url");
        let err = QuadrigaRestClient::with_transport(config, RecordingTransport::new("{}")).unwrap_err();
        assert!(err.is_configuration());

        let config = ClientConfig::new().with_base_url("mailto:desk@example.com");
        let err = QuadrigaRestClient::with_transport(config, RecordingTransport::new("{}")).unwrap_err();
        assert!(matches!(err, RestError::Configuration(_)));
    }

    #[test]
    fn test_build_url() {
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            build_url(&base, &["ticker"]).unwrap().as_str(),
            "https://api.quadrigacx.com/v2/ticker"
        );
        assert_eq!(
            build_url(&base, &["user_transactions"]).unwrap().as_str(),
            "https://api.quadrigacx.com/v2/user_transactions"
        );

        let no_slash = Url::parse("https://api.quadrigacx.com/v2").unwrap();
        assert_eq!(
            build_url(&no_slash, &["balance"]).unwrap().as_str(),
            "https://api.quadrigacx.com/v2/balance"
        );
    }

    #[test]
    fn test_build_url_escapes_segments() {
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let url = build_url(&base, &["../balance?x=1"]).unwrap();
        assert_eq!(url.path(), "/v2/..%2Fbalance%3Fx=1");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_auth_required_error() {
        let client = QuadrigaRestClient::new().unwrap();
        let result = client.account();
        assert!(matches!(result, Err(RestError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_private_calls_fail_without_network_when_unauthenticated() {
        let transport = RecordingTransport::new(BALANCE);
        let client = public_client(transport.clone());

        assert!(matches!(client.get_balance().await, Err(RestError::AuthRequired)));
        assert!(matches!(
            client.get_user_transactions(&UserTransactionsQuery::default()).await,
            Err(RestError::AuthRequired)
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_book_text_fails_without_network() {
        let transport = RecordingTransport::new(TICKER);
        let client = public_client(transport.clone());

        async fn ticker_for(client: &QuadrigaRestClient, book: &str) -> RestResult<Ticker> {
            let book: OrderBook = book.parse()?;
            client.ticker(Some(book)).await
        }

        let err = ticker_for(&client, "doge_cad").await.unwrap_err();
        assert!(err.is_validation());
        assert!(transport.requests().is_empty());

        ticker_for(&client, "eth_cad").await.unwrap();
        assert_eq!(transport.requests()[0].query_param("book"), Some("eth_cad"));
    }

    #[tokio::test]
    async fn test_invalid_timeframe_text_fails_without_network() {
        let transport = RecordingTransport::new("[]");
        let client = public_client(transport.clone());

        async fn trades_over(client: &QuadrigaRestClient, timeframe: &str) -> RestResult<Vec<Trade>> {
            let timeframe: Timeframe = timeframe.parse()?;
            client.get_transactions(None, Some(timeframe)).await
        }

        assert!(trades_over(&client, "day").await.unwrap_err().is_validation());
        assert!(transport.requests().is_empty());

        assert!(trades_over(&client, "hour").await.unwrap().is_empty());
        assert_eq!(transport.requests()[0].query_param("time"), Some("hour"));
    }

    #[tokio::test]
    async fn test_book_defaults_to_btc_cad() {
        let transport = RecordingTransport::new(ORDER_BOOK);
        let client = public_client(transport.clone());

        // The order book body doesn't parse as a ticker; only the request matters here
        let _ = client.get_ticker(None).await.unwrap();
        client.get_order_book(None, None).await.unwrap();

        let transport_tx = RecordingTransport::new("[]");
        let client_tx = public_client(transport_tx.clone());
        client_tx.get_transactions(None, None).await.unwrap();

        for request in transport.requests().iter().chain(transport_tx.requests().iter()) {
            assert_eq!(request.method, Method::GET);
            assert_eq!(request.query_param("book"), Some("btc_cad"));
            assert!(request.body.is_none());
        }
        assert_eq!(transport_tx.requests()[0].query_param("time"), Some("minute"));
    }

    #[tokio::test]
    async fn test_order_book_group_flag() {
        let transport = RecordingTransport::new(ORDER_BOOK);
        let client = public_client(transport.clone());

        client.get_order_book(None, None).await.unwrap();
        client.get_order_book(None, Some(true)).await.unwrap();
        client.get_order_book(Some(OrderBook::BtcUsd), Some(false)).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].query_param("group"), Some("1"));
        assert_eq!(requests[1].query_param("group"), Some("1"));
        assert_eq!(requests[2].query_param("group"), Some("0"));
        assert_eq!(requests[2].query_param("book"), Some("btc_usd"));
        assert_eq!(requests[2].url.path(), "/v2/order_book");
    }

    #[tokio::test]
    async fn test_balance_request_is_signed() {
        let transport = RecordingTransport::new(BALANCE);
        let client = private_client(transport.clone());

        let balance = client.get_balance().await.unwrap();
        assert_eq!(balance.fee(), Some(rust_decimal::Decimal::new(5, 1)));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url.as_str(), "https://api.quadrigacx.com/v2/balance");

        let body = requests[0].body.as_ref().unwrap();
        let nonce = body["nonce"].as_u64().unwrap();
        let expected = Credentials::new("K", "S").unwrap().with_client_id("7").sign(nonce);
        assert_eq!(body["key"], "K");
        assert_eq!(body["signature"], expected.as_str());
        assert_eq!(body.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_user_transactions_body() {
        let transport = RecordingTransport::new("[]");
        let client = private_client(transport.clone());

        client
            .get_user_transactions(&UserTransactionsQuery::default())
            .await
            .unwrap();
        client
            .get_user_transactions(
                &UserTransactionsQuery::new()
                    .descending(false)
                    .with_offset(100)
                    .with_limit(25)
                    .with_book(OrderBook::EthBtc),
            )
            .await
            .unwrap();

        let requests = transport.requests();
        let first = requests[0].body.as_ref().unwrap();
        assert_eq!(first["offset"], 0);
        assert_eq!(first["limit"], 50);
        assert_eq!(first["sort"], "desc");
        assert_eq!(first["book"], "btc_cad");

        let second = requests[1].body.as_ref().unwrap();
        assert_eq!(second["offset"], 100);
        assert_eq!(second["limit"], 25);
        assert_eq!(second["sort"], "asc");
        assert_eq!(second["book"], "eth_btc");

        assert!(second["nonce"].as_u64().unwrap() > first["nonce"].as_u64().unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_nonce_source() {
        let transport = RecordingTransport::new(BALANCE);
        let client = private_client(transport.clone());
        let clone = client.clone();

        client.get_balance().await.unwrap();
        clone.get_balance().await.unwrap();

        let requests = transport.requests();
        let first = requests[0].body.as_ref().unwrap()["nonce"].as_u64().unwrap();
        let second = requests[1].body.as_ref().unwrap()["nonce"].as_u64().unwrap();
        assert!(second > first);
    }
}
