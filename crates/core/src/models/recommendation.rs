use serde::{Deserialize, Serialize};

/// What a recommendation suggests doing with a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Buy,
    Sell,
    Hold,
    Warning,
}

impl std::fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationType::Buy => write!(f, "buy"),
            RecommendationType::Sell => write!(f, "sell"),
            RecommendationType::Hold => write!(f, "hold"),
            RecommendationType::Warning => write!(f, "warning"),
        }
    }
}

/// Urgency of a recommendation. Lists are ordered by [`Priority::weight`], highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort weight: high = 3, medium = 2, low = 1.
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// A single canned recommendation, either for one holding or for the
/// whole portfolio (symbol [`PORTFOLIO_SYMBOL`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,

    /// Ticker symbol, or "PORTFOLIO" for the portfolio-level entry
    pub symbol: String,

    /// Short label (e.g., "Review position")
    pub action: String,

    /// Human-readable explanation
    pub reason: String,

    pub priority: Priority,
}

/// Symbol used by the synthetic portfolio-level recommendation.
pub const PORTFOLIO_SYMBOL: &str = "PORTFOLIO";

impl Recommendation {
    pub fn new(
        recommendation_type: RecommendationType,
        symbol: impl Into<String>,
        action: impl Into<String>,
        reason: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            recommendation_type,
            symbol: symbol.into(),
            action: action.into(),
            reason: reason.into(),
            priority,
        }
    }

    /// True for the synthetic portfolio-level entry.
    pub fn is_portfolio_level(&self) -> bool {
        self.symbol == PORTFOLIO_SYMBOL
    }
}
