//! Private account endpoints
//!
//! These endpoints require authentication.

use quadriga_auth::RequestSigner;
use quadriga_types::OrderBook;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument};
use url::Url;

use crate::client::build_url;
use crate::error::RestResult;
use crate::transport::{HttpRequest, Transport};
use crate::types::{Balance, UserTransaction, UserTransactionsQuery};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    transport: &'a dyn Transport,
    base_url: &'a Url,
    signer: &'a RequestSigner,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(transport: &'a dyn Transport, base_url: &'a Url, signer: &'a RequestSigner) -> Self {
        Self {
            transport,
            base_url,
            signer,
        }
    }

    /// Make an authenticated POST request
    async fn post<T: DeserializeOwned>(&self, path: &str, mut params: Map<String, Value>) -> RestResult<T> {
        let url = build_url(self.base_url, &[path])?;
        let fields = self.signer.sign_body(&mut params);

        debug!(nonce = fields.nonce, "Making authenticated request to {}", path);

        self.transport
            .send(HttpRequest::post(url, Value::Object(params)))
            .await?
            .json()
    }

    /// Get account balances
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> RestResult<Balance> {
        self.post("balance", Map::new()).await
    }

    /// Get the account's own transactions
    ///
    /// # Arguments
    /// * `query` - Paging, sort order and book (defaults to `btc_cad`)
    #[instrument(skip(self))]
    pub async fn get_user_transactions(
        &self,
        query: &UserTransactionsQuery,
    ) -> RestResult<Vec<UserTransaction>> {
        let book = OrderBook::or_default(query.book);

        let mut params = Map::new();
        params.insert("offset".to_string(), Value::from(query.offset));
        params.insert("limit".to_string(), Value::from(query.limit));
        params.insert("sort".to_string(), Value::from(query.sort.as_str()));
        params.insert("book".to_string(), Value::from(book.as_str()));

        self.post("user_transactions", params).await
    }
}
