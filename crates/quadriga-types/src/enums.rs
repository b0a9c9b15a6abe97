//! Currency, Timeframe, Side, and SortOrder enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Fiat and crypto currency codes traded on the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// Canadian dollar
    Cad,
    /// US dollar
    Usd,
    /// Bitcoin
    Btc,
    /// Ether
    Eth,
}

impl Currency {
    /// Every supported currency
    pub const ALL: [Currency; 4] = [Self::Cad, Self::Usd, Self::Btc, Self::Eth];

    /// Returns the currency code as used in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cad => "cad",
            Self::Usd => "usd",
            Self::Btc => "btc",
            Self::Eth => "eth",
        }
    }

    /// Returns true for government-issued currencies
    pub fn is_fiat(&self) -> bool {
        matches!(self, Self::Cad | Self::Usd)
    }
}

impl FromStr for Currency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Window for public transaction queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// Trades from the last minute
    #[default]
    Minute,
    /// Trades from the last hour
    Hour,
}

impl Timeframe {
    /// Returns the timeframe as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
        }
    }
}

impl FromStr for Timeframe {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            other => Err(ParseError::UnknownTimeframe(other.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// Ordering of paginated account history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first
    #[default]
    Desc,
    /// Oldest first
    Asc,
}

impl SortOrder {
    /// `Desc` when `desc` is true, `Asc` otherwise
    pub fn from_desc(desc: bool) -> Self {
        if desc {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Returns the sort order as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desc => "desc",
            Self::Asc => "asc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desc" => Ok(Self::Desc),
            "asc" => Ok(Self::Asc),
            other => Err(ParseError::UnknownSortOrder(other.to_string())),
        }
    }
}
