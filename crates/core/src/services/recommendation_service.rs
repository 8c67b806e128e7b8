use tracing::debug;

use crate::models::holding::Holding;
use crate::models::price::PriceTable;
use crate::models::recommendation::{
    Priority, Recommendation, RecommendationType, PORTFOLIO_SYMBOL,
};

/// Below this many holding entries a diversification nudge is added.
pub const MIN_DIVERSIFIED_POSITIONS: usize = 5;

/// Turns per-holding price moves into canned, prioritized recommendations.
///
/// The rules are a fixed threshold ladder on the percentage change from
/// cost basis, checked in this order:
///
/// | change            | type    | priority |
/// |-------------------|---------|----------|
/// | > 30              | sell    | high     |
/// | < -15             | warning | medium   |
/// | > 10 and < 20     | hold    | low      |
/// | anything else     | buy     | low      |
///
/// Exactly 10, exactly 20 and the whole 20..=30 band land in the last row.
pub struct RecommendationService;

impl RecommendationService {
    pub fn new() -> Self {
        Self
    }

    /// Generate recommendations for every holding plus, for portfolios with
    /// fewer than [`MIN_DIVERSIFIED_POSITIONS`] holding entries, one
    /// portfolio-level entry. Repeated entries of a symbol each count. The result is stably sorted by descending
    /// priority, so equal priorities keep holding order with the portfolio
    /// entry last.
    pub fn generate(&self, holdings: &[Holding], prices: &PriceTable) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = holdings
            .iter()
            .map(|holding| {
                let change = holding.percent_change_at(prices.resolve(holding));
                self.classify(&holding.symbol, change)
            })
            .collect();

        if holdings.len() < MIN_DIVERSIFIED_POSITIONS {
            recommendations.push(Self::diversification_nudge());
        }

        // Vec::sort_by_key is stable
        recommendations.sort_by_key(|r| std::cmp::Reverse(r.priority.weight()));

        debug!(
            count = recommendations.len(),
            positions = holdings.len(),
            "recommendations generated"
        );
        recommendations
    }

    /// Map a single percentage change to its recommendation.
    pub fn classify(&self, symbol: &str, change: f64) -> Recommendation {
        if change > 30.0 {
            Recommendation::new(
                RecommendationType::Sell,
                symbol,
                "Consider taking profits",
                format!(
                    "{symbol} is up {change:.1}% from your entry. Consider selling 25-50% to lock in gains."
                ),
                Priority::High,
            )
        } else if change < -15.0 {
            Recommendation::new(
                RecommendationType::Warning,
                symbol,
                "Review position",
                format!(
                    "{symbol} is down {:.1}%. Reassess fundamentals before averaging down.",
                    change.abs()
                ),
                Priority::Medium,
            )
        } else if change > 10.0 && change < 20.0 {
            Recommendation::new(
                RecommendationType::Hold,
                symbol,
                "Hold current position",
                format!("{symbol} showing healthy growth of {change:.1}%. Maintain position."),
                Priority::Low,
            )
        } else {
            Recommendation::new(
                RecommendationType::Buy,
                symbol,
                "Consider averaging up",
                format!("{symbol} showing moderate growth. Consider adding to position on dips."),
                Priority::Low,
            )
        }
    }

    fn diversification_nudge() -> Recommendation {
        Recommendation::new(
            RecommendationType::Buy,
            PORTFOLIO_SYMBOL,
            "Increase diversification",
            "Consider adding more positions to reduce concentration risk. Target 8-12 positions.",
            Priority::High,
        )
    }
}

impl Default for RecommendationService {
    fn default() -> Self {
        Self::new()
    }
}
