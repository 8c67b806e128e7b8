use std::collections::HashMap;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::analytics::{AllocationEntry, Diversification, PortfolioMetrics, RiskLevel};
use crate::models::holding::Holding;
use crate::models::price::PriceTable;

/// Folds holdings and a price table into portfolio aggregates.
///
/// Pure business logic: no I/O, no mutation of its inputs.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Compute total value, total cost, gain/loss and per-symbol allocation.
    ///
    /// A symbol missing from `prices` is valued at its own average cost.
    /// Holdings of the same symbol share one allocation entry, placed where
    /// the symbol first appears.
    ///
    /// Fails with `EmptyPortfolio` for an empty list and `ZeroCostBasis`
    /// when the total cost is not a positive finite number, since the
    /// percentages would otherwise be undefined.
    pub fn compute(
        &self,
        holdings: &[Holding],
        prices: &PriceTable,
    ) -> Result<PortfolioMetrics, CoreError> {
        if holdings.is_empty() {
            return Err(CoreError::EmptyPortfolio);
        }

        let mut total_value = 0.0;
        let mut total_cost = 0.0;
        let mut allocation: Vec<AllocationEntry> = Vec::new();
        let mut bucket_index: HashMap<&str, usize> = HashMap::new();

        for holding in holdings {
            let current_price = prices.resolve(holding);
            let value = holding.value_at(current_price);

            total_value += value;
            total_cost += holding.cost();

            match bucket_index.get(holding.symbol.as_str()) {
                Some(&idx) => allocation[idx].value += value,
                None => {
                    bucket_index.insert(holding.symbol.as_str(), allocation.len());
                    allocation.push(AllocationEntry {
                        name: holding.symbol.clone(),
                        value,
                        percentage: 0.0, // filled below
                    });
                }
            }
        }

        if !total_cost.is_finite() || total_cost <= 0.0 {
            return Err(CoreError::ZeroCostBasis);
        }

        for entry in &mut allocation {
            entry.percentage = if total_value > 0.0 {
                (entry.value / total_value) * 100.0
            } else {
                0.0
            };
        }

        let gain_loss = total_value - total_cost;
        let gain_loss_percent = (gain_loss / total_cost) * 100.0;

        debug!(
            holdings = holdings.len(),
            symbols = allocation.len(),
            total_value,
            total_cost,
            gain_loss_percent,
            "portfolio metrics computed"
        );

        Ok(PortfolioMetrics {
            total_value,
            total_cost,
            gain_loss,
            gain_loss_percent,
            allocation,
        })
    }

    /// Diversification label for already computed metrics.
    pub fn diversification(&self, metrics: &PortfolioMetrics) -> Diversification {
        Diversification::from_max_allocation(metrics.max_allocation())
    }

    /// Risk label for already computed metrics.
    pub fn risk_level(&self, metrics: &PortfolioMetrics) -> RiskLevel {
        RiskLevel::from_gain_loss_percent(metrics.gain_loss_percent)
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
