//! Example: private account data
//!
//! Run with: cargo run --example account
//!
//! NOTE: Set QUADRIGACX_API_KEY, QUADRIGACX_API_SECRET and QUADRIGACX_CLIENT_ID
//! environment variables first.

use quadriga_rest::{Credentials, Currency, QuadrigaRestClient, UserTransactionsQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let credentials = match Credentials::from_env() {
        Ok(creds) => creds,
        Err(e) => {
            println!("Skipping private endpoints: {}", e);
            return Ok(());
        }
    };

    let client = QuadrigaRestClient::with_credentials(credentials)?;

    println!("--- Balances ---");
    let balance = client.get_balance().await?;
    for currency in Currency::ALL {
        if let Some(total) = balance.total(currency) {
            let available = balance.available(currency).unwrap_or_default();
            println!("  {}: {} (available {})", currency, total, available);
        }
    }
    if let Some(fee) = balance.fee() {
        println!("  Fee: {}%", fee);
    }

    println!("\n--- Recent Transactions ---");
    let query = UserTransactionsQuery::new().with_limit(10);
    for tx in client.get_user_transactions(&query).await? {
        println!("  #{} {:?} at {}", tx.id, tx.kind(), tx.datetime);
    }

    Ok(())
}
