use serde::{Deserialize, Serialize};

/// A single user-entered position.
///
/// `shares` and `avg_price` are expected to be positive and finite; the
/// portfolio service validates them before a holding enters a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Ticker symbol, uppercased (e.g., "AAPL", "TSLA")
    pub symbol: String,

    /// Number of shares held
    pub shares: f64,

    /// Average cost per share (cost basis)
    pub avg_price: f64,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, shares: f64, avg_price: f64) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            shares,
            avg_price,
        }
    }

    /// Total amount paid for this position (`shares × avg_price`).
    pub fn cost(&self) -> f64 {
        self.shares * self.avg_price
    }

    /// Market value of this position at `price`.
    pub fn value_at(&self, price: f64) -> f64 {
        self.shares * price
    }

    /// Percentage change of `price` relative to the cost basis.
    pub fn percent_change_at(&self, price: f64) -> f64 {
        ((price - self.avg_price) / self.avg_price) * 100.0
    }
}
