//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use quadriga_types::{OrderBook, Timeframe};
use tracing::{debug, instrument};
use url::Url;

use crate::client::build_url;
use crate::error::RestResult;
use crate::transport::{HttpRequest, RawResponse, Transport};
use crate::types::{OrderBookSnapshot, Ticker, Trade};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    transport: &'a dyn Transport,
    base_url: &'a Url,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(transport: &'a dyn Transport, base_url: &'a Url) -> Self {
        Self { transport, base_url }
    }

    /// Get current ticker information, unparsed
    ///
    /// The response is returned whatever its status; use
    /// [`RawResponse::json`] to parse it, or [`MarketEndpoints::ticker`].
    ///
    /// # Arguments
    /// * `book` - Order book (defaults to `btc_cad`)
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, book: Option<OrderBook>) -> RestResult<RawResponse> {
        let book = OrderBook::or_default(book);
        let request = HttpRequest::get(build_url(self.base_url, &["ticker"])?)
            .with_query("book", book);

        debug!("Fetching ticker for {}", book);
        self.transport.send(request).await
    }

    /// Get current ticker information, parsed
    pub async fn ticker(&self, book: Option<OrderBook>) -> RestResult<Ticker> {
        self.get_ticker(book).await?.json()
    }

    /// List all open orders
    ///
    /// # Arguments
    /// * `book` - Order book (defaults to `btc_cad`)
    /// * `group_by_price` - Merge orders at the same price (defaults to true)
    #[instrument(skip(self))]
    pub async fn get_order_book(
        &self,
        book: Option<OrderBook>,
        group_by_price: Option<bool>,
    ) -> RestResult<OrderBookSnapshot> {
        let book = OrderBook::or_default(book);
        let group = if group_by_price.unwrap_or(true) { 1 } else { 0 };
        let request = HttpRequest::get(build_url(self.base_url, &["order_book"])?)
            .with_query("book", book)
            .with_query("group", group);

        debug!("Fetching order book for {} (group={})", book, group);
        self.transport.send(request).await?.json()
    }

    /// Get recent public trades
    ///
    /// # Arguments
    /// * `book` - Order book (defaults to `btc_cad`)
    /// * `timeframe` - Window to fetch (defaults to the last minute)
    #[instrument(skip(self))]
    pub async fn get_transactions(
        &self,
        book: Option<OrderBook>,
        timeframe: Option<Timeframe>,
    ) -> RestResult<Vec<Trade>> {
        let book = OrderBook::or_default(book);
        let timeframe = timeframe.unwrap_or_default();
        let request = HttpRequest::get(build_url(self.base_url, &["transactions"])?)
            .with_query("book", book)
            .with_query("time", timeframe);

        debug!("Fetching transactions for {} over the last {}", book, timeframe);
        self.transport.send(request).await?.json()
    }
}
