use async_trait::async_trait;

use crate::errors::CoreError;

/// Trait abstraction for anything that can quote a current price.
///
/// The built-in implementation is a static table, but the contract
/// (`symbol → price, or absent`) is the same for a live market-data feed.
/// Returning `Ok(None)` means "no quote for this symbol", which is not an
/// error: callers then treat the position as unchanged.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Get the current price of a symbol, or `None` if this source has no quote.
    async fn get_price(&self, symbol: &str) -> Result<Option<f64>, CoreError>;
}
