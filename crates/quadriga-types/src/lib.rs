//! Shared types for the QuadrigaCX v2 REST API
//!
//! This crate holds the closed sets the exchange accepts as parameters.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`OrderBook`] - Supported trading pairs (e.g., `btc_cad`)
//! - [`Currency`] - Fiat and crypto currency codes
//! - [`Timeframe`] - Window for public transaction queries
//! - [`Side`], [`SortOrder`] - Trade side and result ordering
//! - [`ParseError`] - Returned when text is outside a closed set

pub mod book;
pub mod enums;
pub mod error;

pub use book::*;
pub use enums::*;
pub use error::*;
