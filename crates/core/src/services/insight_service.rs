use crate::models::analytics::{Diversification, Insight, PortfolioMetrics, RiskLevel};

/// Writes the three narrative insights shown next to an analysis:
/// diversification, performance and risk, in that order.
pub struct InsightService;

impl InsightService {
    pub fn new() -> Self {
        Self
    }

    /// `position_count` is the number of entered holdings, duplicates included.
    pub fn generate(
        &self,
        metrics: &PortfolioMetrics,
        diversification: Diversification,
        risk_level: RiskLevel,
        position_count: usize,
    ) -> Vec<Insight> {
        vec![
            Self::diversification_insight(diversification, position_count),
            Self::performance_insight(metrics),
            Self::risk_insight(risk_level),
        ]
    }

    fn diversification_insight(diversification: Diversification, position_count: usize) -> Insight {
        let advice = match diversification {
            Diversification::Low => "Consider adding more positions to reduce concentration risk.",
            Diversification::Medium => "Decent spread, but could benefit from 2-3 additional positions.",
            Diversification::High => "Well diversified across multiple positions.",
        };
        Insight {
            title: "Diversification Score".into(),
            description: format!(
                "Your portfolio has {} diversification with {position_count} positions. {advice}",
                diversification.to_string().to_lowercase()
            ),
        }
    }

    fn performance_insight(metrics: &PortfolioMetrics) -> Insight {
        let direction = if metrics.gain_loss >= 0.0 { "up" } else { "down" };
        let pct = metrics.gain_loss_percent;
        let advice = if pct > 15.0 {
            "Strong performance! Consider taking some profits on winners."
        } else if pct > 0.0 {
            "Positive returns. Continue monitoring your positions."
        } else {
            "Negative returns. Review fundamentals of underperforming positions."
        };
        Insight {
            title: "Performance Analysis".into(),
            description: format!(
                "Your portfolio is {direction} {:.2}% overall. {advice}",
                pct.abs()
            ),
        }
    }

    fn risk_insight(risk_level: RiskLevel) -> Insight {
        let advice = match risk_level {
            RiskLevel::High => "High volatility detected. Consider rebalancing to reduce exposure.",
            RiskLevel::Medium => "Moderate risk profile. Maintain your risk management strategy.",
            RiskLevel::Low => "Low risk profile. You may be missing growth opportunities.",
        };
        Insight {
            title: "Risk Assessment".into(),
            description: format!("Current risk level: {risk_level}. {advice}"),
        }
    }
}

impl Default for InsightService {
    fn default() -> Self {
        Self::new()
    }
}
