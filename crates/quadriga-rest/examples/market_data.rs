//! Example: public market data
//!
//! Fetches the ticker, order book and recent trades for every supported book.
//!
//! Run with: cargo run --example market_data

use quadriga_rest::{OrderBook, QuadrigaRestClient, Timeframe};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("=== QuadrigaCX Market Data ===\n");

    let client = QuadrigaRestClient::new()?;

    for book in OrderBook::ALL {
        println!("--- {} ---", book);

        match client.ticker(Some(book)).await {
            Ok(ticker) => {
                println!("  Last:   {}", ticker.last);
                println!("  Bid:    {}", ticker.bid);
                println!("  Ask:    {}", ticker.ask);
                if let Some(bps) = ticker.spread_bps() {
                    println!("  Spread: {:.1} bps", bps);
                }
            }
            Err(e) => println!("  Ticker error: {}", e),
        }

        match client.get_order_book(Some(book), None).await {
            Ok(snapshot) => {
                println!("  Top bids:");
                for level in snapshot.bids.iter().take(3) {
                    println!("    {} @ {}", level.amount, level.price);
                }
                println!("  Top asks:");
                for level in snapshot.asks.iter().take(3) {
                    println!("    {} @ {}", level.amount, level.price);
                }
            }
            Err(e) => println!("  Order book error: {}", e),
        }

        match client.get_transactions(Some(book), Some(Timeframe::Hour)).await {
            Ok(trades) => println!("  Trades in the last hour: {}", trades.len()),
            Err(e) => println!("  Transactions error: {}", e),
        }

        println!();
    }

    Ok(())
}
