//! Types for QuadrigaCX REST API requests and responses

use chrono::{DateTime, NaiveDateTime, Utc};
use quadriga_types::{Currency, OrderBook, Side, SortOrder};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

// ============================================================================
// Helpers
// ============================================================================

/// The exchange sends integers both bare and as strings
fn u64_from_str_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrNum {
        Num(u64),
        Str(String),
    }

    match StrOrNum::deserialize(deserializer)? {
        StrOrNum::Num(n) => Ok(n),
        StrOrNum::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn unix_time(secs: u64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::try_from(secs).ok()?, 0)
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Trading information for one order book
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Last traded price
    pub last: Decimal,
    /// 24h high
    pub high: Decimal,
    /// 24h low
    pub low: Decimal,
    /// 24h volume weighted average price
    pub vwap: Decimal,
    /// 24h volume
    pub volume: Decimal,
    /// Highest buy order
    pub bid: Decimal,
    /// Lowest sell order
    pub ask: Decimal,
    /// Unix seconds
    #[serde(deserialize_with = "u64_from_str_or_number")]
    pub timestamp: u64,
}

impl Ticker {
    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Decimal {
        (self.ask + self.bid) / Decimal::TWO
    }

    /// Ask minus bid
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    /// Get spread in basis points
    pub fn spread_bps(&self) -> Option<Decimal> {
        let mid = self.mid_price();
        if mid.is_zero() {
            return None;
        }
        Some(self.spread() / mid * Decimal::from(10000))
    }

    /// Timestamp as a UTC date
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_time(self.timestamp)
    }
}

/// One price level of an order book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Decimal>")]
pub struct PriceLevel {
    /// Price
    pub price: Decimal,
    /// Amount at this price
    pub amount: Decimal,
}

impl TryFrom<Vec<Decimal>> for PriceLevel {
    type Error = String;

    fn try_from(values: Vec<Decimal>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [price, amount, ..] => Ok(Self {
                price: *price,
                amount: *amount,
            }),
            _ => Err(format!("price level needs [price, amount], got {} values", values.len())),
        }
    }
}

/// Open buy and sell orders for a book
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookSnapshot {
    /// Unix seconds
    #[serde(deserialize_with = "u64_from_str_or_number")]
    pub timestamp: u64,
    /// Buy orders, best (highest) first
    pub bids: Vec<PriceLevel>,
    /// Sell orders, best (lowest) first
    pub asks: Vec<PriceLevel>,
}

impl OrderBookSnapshot {
    /// Highest bid
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Lowest ask
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    /// Best ask minus best bid
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }

    /// Timestamp as a UTC date
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_time(self.timestamp)
    }
}

/// A public trade
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    /// Unix seconds
    #[serde(deserialize_with = "u64_from_str_or_number")]
    pub date: u64,
    /// Trade id
    #[serde(deserialize_with = "u64_from_str_or_number")]
    pub tid: u64,
    /// Price
    pub price: Decimal,
    /// Amount
    pub amount: Decimal,
    /// Taker side
    pub side: Side,
}

impl Trade {
    /// Value of the trade in the quote currency
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }

    /// Trade date as UTC
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_time(self.date)
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Account balances, keyed as the exchange sends them
///
/// Keys look like `cad_balance`, `btc_available`, `eth_reserved` and `fee`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Balance {
    /// Raw entries
    pub entries: HashMap<String, Value>,
}

impl Balance {
    /// Numeric entry by raw key
    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.entries.get(key).and_then(decimal_from_value)
    }

    /// Total balance for a currency
    pub fn total(&self, currency: Currency) -> Option<Decimal> {
        self.get(&format!("{}_balance", currency))
    }

    /// Amount free to trade or withdraw
    pub fn available(&self, currency: Currency) -> Option<Decimal> {
        self.get(&format!("{}_available", currency))
    }

    /// Amount held by open orders
    pub fn reserved(&self, currency: Currency) -> Option<Decimal> {
        self.get(&format!("{}_reserved", currency))
    }

    /// Trading fee in percent
    pub fn fee(&self) -> Option<Decimal> {
        self.get("fee")
    }

    /// Currencies with a non-zero total
    pub fn non_zero(&self) -> Vec<(Currency, Decimal)> {
        Currency::ALL
            .into_iter()
            .filter_map(|c| self.total(c).filter(|v| !v.is_zero()).map(|v| (c, v)))
            .collect()
    }
}

/// Kind of an account transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Trade,
    /// Code not known to this client
    Other(u64),
}

impl From<u64> for TransactionKind {
    fn from(code: u64) -> Self {
        match code {
            0 => Self::Deposit,
            1 => Self::Withdrawal,
            2 => Self::Trade,
            other => Self::Other(other),
        }
    }
}

/// An entry from the account's own transaction history
#[derive(Debug, Clone, Deserialize)]
pub struct UserTransaction {
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub datetime: String,
    /// Transaction id
    #[serde(deserialize_with = "u64_from_str_or_number")]
    pub id: u64,
    /// Numeric transaction type
    #[serde(rename = "type", deserialize_with = "u64_from_str_or_number")]
    pub kind_code: u64,
    /// Funding method, for deposits and withdrawals
    #[serde(default)]
    pub method: Option<String>,
    /// Order id, for trades
    #[serde(default)]
    pub order_id: Option<String>,
    /// Fee charged
    #[serde(default)]
    pub fee: Option<Decimal>,
    /// Exchange rate, for trades
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Per-currency amounts (`btc`, `cad`, ...) and any other fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl UserTransaction {
    /// Transaction kind
    pub fn kind(&self) -> TransactionKind {
        TransactionKind::from(self.kind_code)
    }

    /// Signed amount moved in a currency
    pub fn amount(&self, currency: Currency) -> Option<Decimal> {
        self.extra.get(currency.as_str()).and_then(decimal_from_value)
    }

    /// Parsed timestamp
    pub fn time(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.datetime, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Paging and filtering for `user_transactions`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserTransactionsQuery {
    /// Entries to skip
    pub offset: u64,
    /// Maximum entries returned
    pub limit: u64,
    /// Newest or oldest first
    pub sort: SortOrder,
    /// Book filter, defaults to `btc_cad`
    pub book: Option<OrderBook>,
}

impl Default for UserTransactionsQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
            sort: SortOrder::Desc,
            book: None,
        }
    }
}

impl UserTransactionsQuery {
    /// Create a query with default paging
    pub fn new() -> Self {
        Self::default()
    }

    /// Set offset
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Set limit
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Newest first when `desc` is true, oldest first otherwise
    pub fn descending(mut self, desc: bool) -> Self {
        self.sort = SortOrder::from_desc(desc);
        self
    }

    /// Filter by book
    pub fn with_book(mut self, book: OrderBook) -> Self {
        self.book = Some(book);
        self
    }
}
