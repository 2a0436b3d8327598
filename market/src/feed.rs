use async_trait::async_trait;

use crate::dexscreener::FeedError;
use crate::types::{PairKey, Quote};

/// Source of current quotes for a tracked pair.
///
/// Implementations make one bounded attempt per call and never retry;
/// the next scheduled tick is the retry.
#[async_trait]
pub trait PriceFeed: Send + Sync + 'static {
    async fn fetch(&self, key: &PairKey) -> Result<Quote, FeedError>;
}
