use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;

use super::holding::Holding;

/// Built-in quotes used when no other price source is configured.
pub const MOCK_PRICES: &[(&str, f64)] = &[
    ("AAPL", 178.50),
    ("GOOGL", 142.30),
    ("MSFT", 415.20),
    ("TSLA", 242.80),
    ("AMZN", 175.40),
    ("NVDA", 495.60),
    ("META", 485.30),
    ("NFLX", 485.90),
    ("AMD", 163.20),
    ("INTC", 43.80),
    ("SPY", 548.20),
    ("QQQ", 475.30),
];

/// A quote is usable only when it is finite and strictly positive.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Symbol → current price lookup.
///
/// Symbols are uppercased on insert and lookup. A lookup miss is not an
/// error: [`PriceTable::resolve`] falls back to the holding's own cost basis,
/// i.e. the position is treated as unchanged. Unusable quotes are kept as
/// stored but resolve the same way as a miss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct PriceTable {
    prices: BTreeMap<String, f64>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The static mock quote table.
    pub fn mock() -> Self {
        let mut table = Self::new();
        for (symbol, price) in MOCK_PRICES {
            table.insert(*symbol, *price);
        }
        table
    }

    /// Parse a JSON object of `{"SYMBOL": price}` pairs.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Insert or replace the price of a symbol.
    pub fn insert(&mut self, symbol: impl Into<String>, price: f64) {
        self.prices.insert(symbol.into().trim().to_uppercase(), price);
    }

    /// Look up the price of a symbol. Returns None if the table has no quote.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.prices.get(&symbol.to_uppercase()).copied()
    }

    /// Current price for a holding, falling back to its average cost when
    /// the table has no usable quote (missing, zero, negative or NaN).
    pub fn resolve(&self, holding: &Holding) -> f64 {
        self.get(&holding.symbol)
            .filter(|price| is_valid_price(*price))
            .unwrap_or(holding.avg_price)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Iterate over `(symbol, price)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(s, p)| (s.as_str(), *p))
    }
}

impl From<BTreeMap<String, f64>> for PriceTable {
    fn from(raw: BTreeMap<String, f64>) -> Self {
        let mut table = Self::new();
        for (symbol, price) in raw {
            table.insert(symbol, price);
        }
        table
    }
}

impl From<PriceTable> for BTreeMap<String, f64> {
    fn from(table: PriceTable) -> Self {
        table.prices
    }
}
