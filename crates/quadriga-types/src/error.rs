//! Errors for parsing closed-set parameters

/// Text that is not a member of one of the closed parameter sets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown order book: {0} (expected one of btc_cad, btc_usd, eth_btc, eth_cad)")]
    UnknownOrderBook(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("timeframe must be one of `minute` or `hour`, got: {0}")]
    UnknownTimeframe(String),

    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),
}
