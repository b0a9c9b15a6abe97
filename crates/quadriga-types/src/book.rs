//! Order books (trading pairs) supported by the exchange

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::enums::Currency;
use crate::error::ParseError;

/// Trading pair identifier, sent as the `book` parameter
///
/// Defaults to [`OrderBook::BtcCad`] wherever an operation is called without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderBook {
    /// Bitcoin priced in Canadian dollars
    #[serde(rename = "btc_cad")]
    #[default]
    BtcCad,
    /// Bitcoin priced in US dollars
    #[serde(rename = "btc_usd")]
    BtcUsd,
    /// Ether priced in bitcoin
    #[serde(rename = "eth_btc")]
    EthBtc,
    /// Ether priced in Canadian dollars
    #[serde(rename = "eth_cad")]
    EthCad,
}

impl OrderBook {
    /// Every supported book
    pub const ALL: [OrderBook; 4] = [Self::BtcCad, Self::BtcUsd, Self::EthBtc, Self::EthCad];

    /// Returns the book identifier as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BtcCad => "btc_cad",
            Self::BtcUsd => "btc_usd",
            Self::EthBtc => "eth_btc",
            Self::EthCad => "eth_cad",
        }
    }

    /// Resolve an optional book to the one actually transmitted
    pub fn or_default(book: Option<OrderBook>) -> OrderBook {
        book.unwrap_or_default()
    }

    /// Asset being bought or sold
    pub fn base(&self) -> Currency {
        match self {
            Self::BtcCad | Self::BtcUsd => Currency::Btc,
            Self::EthBtc | Self::EthCad => Currency::Eth,
        }
    }

    /// Asset the price is quoted in
    pub fn quote(&self) -> Currency {
        match self {
            Self::BtcCad | Self::EthCad => Currency::Cad,
            Self::BtcUsd => Currency::Usd,
            Self::EthBtc => Currency::Btc,
        }
    }
}

impl FromStr for OrderBook {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|book| book.as_str() == s)
            .ok_or_else(|| ParseError::UnknownOrderBook(s.to_string()))
    }
}

impl TryFrom<&str> for OrderBook {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for OrderBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for OrderBook {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
