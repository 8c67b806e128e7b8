use std::collections::HashSet;
use tracing::{debug, warn};

use crate::models::price::{is_valid_price, PriceTable};

use super::static_table::StaticPriceSource;
use super::traits::PriceSource;

/// Ordered list of price sources.
///
/// Sources are asked in registration order; the first valid quote wins.
/// A source that errors or returns an unusable price is skipped in favour
/// of the next one.
pub struct PriceSourceRegistry {
    sources: Vec<Box<dyn PriceSource>>,
}

impl PriceSourceRegistry {
    /// Create an empty registry. Every lookup resolves to "absent".
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Create a registry with the built-in mock quote table.
    pub fn new_with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(StaticPriceSource::mock()));
        registry
    }

    /// Register a new price source after the existing ones.
    pub fn register(&mut self, source: Box<dyn PriceSource>) {
        self.sources.push(source);
    }

    /// Register a price source ahead of the existing ones (e.g., user overrides).
    pub fn register_first(&mut self, source: Box<dyn PriceSource>) {
        self.sources.insert(0, source);
    }

    /// Names of all registered sources, in lookup order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Ask each source in turn for a quote. Returns `None` if no source has
    /// a finite, positive price for the symbol.
    pub async fn get_price(&self, symbol: &str) -> Option<f64> {
        for source in &self.sources {
            match source.get_price(symbol).await {
                Ok(Some(price)) if is_valid_price(price) => {
                    debug!(source = source.name(), symbol, price, "price resolved");
                    return Some(price);
                }
                Ok(Some(price)) => {
                    warn!(
                        source = source.name(),
                        symbol, price, "ignoring invalid price (must be finite and positive)"
                    );
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(source = source.name(), symbol, error = %e, "price source failed");
                }
            }
        }
        None
    }

    /// Resolve every distinct symbol into a [`PriceTable`] snapshot.
    /// Symbols without a quote are left out, so lookups fall back to cost basis.
    pub async fn snapshot<'a, I>(&self, symbols: I) -> PriceTable
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = PriceTable::new();
        let mut seen = HashSet::new();
        for symbol in symbols {
            if !seen.insert(symbol.to_uppercase()) {
                continue;
            }
            if let Some(price) = self.get_price(symbol).await {
                table.insert(symbol, price);
            } else {
                debug!(symbol, "no quote available, falling back to cost basis");
            }
        }
        table
    }
}

impl Default for PriceSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
