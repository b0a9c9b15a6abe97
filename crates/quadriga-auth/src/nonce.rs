//! Strictly increasing nonce source
//!
//! The exchange rejects a nonce that is not larger than the previous one
//! for the same key. Nonces are unix seconds, so two requests in the same
//! second would collide; the generator bumps past the last issued value
//! instead.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-client nonce generator
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    /// Create a generator seeded from the wall clock on first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator whose next nonce is at least `seed + 1`
    pub fn starting_after(seed: u64) -> Self {
        Self {
            last: AtomicU64::new(seed),
        }
    }

    /// Issue the next nonce: `max(now_secs, last + 1)`
    pub fn next_nonce(&self) -> u64 {
        let now = unix_now_secs();
        let bump = |last: u64| now.max(last.saturating_add(1));

        // The closure always returns Some, so both arms carry the previous value
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
        {
            Ok(prev) | Err(prev) => prev,
        };

        bump(previous)
    }

    /// Last nonce issued, or the seed if none has been issued yet
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
