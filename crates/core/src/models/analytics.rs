use serde::{Deserialize, Serialize};

use super::recommendation::Recommendation;

/// Coarse diversification label derived from the largest single-symbol allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diversification {
    Low,
    Medium,
    High,
}

impl Diversification {
    /// `Low` above 40%, `Medium` above 25%, otherwise `High`.
    /// Both comparisons are strict: exactly 40.0 is `Medium`, exactly 25.0 is `High`.
    pub fn from_max_allocation(max_pct: f64) -> Self {
        if max_pct > 40.0 {
            Diversification::Low
        } else if max_pct > 25.0 {
            Diversification::Medium
        } else {
            Diversification::High
        }
    }
}

impl std::fmt::Display for Diversification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diversification::Low => write!(f, "Low"),
            Diversification::Medium => write!(f, "Medium"),
            Diversification::High => write!(f, "High"),
        }
    }
}

/// Coarse risk label derived from the overall percentage gain/loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `High` above +20%, `Medium` above 0%, otherwise `Low` (a flat portfolio is `Low`).
    pub fn from_gain_loss_percent(pct: f64) -> Self {
        if pct > 20.0 {
            RiskLevel::High
        } else if pct > 0.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Share of total portfolio value held in one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    /// Ticker symbol
    pub name: String,

    /// Current market value of all holdings of this symbol
    pub value: f64,

    /// `value / total_value × 100`
    pub percentage: f64,
}

/// Aggregates produced by the metrics reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    /// Sum of `shares × current price` over all holdings
    pub total_value: f64,

    /// Sum of `shares × avg price` over all holdings
    pub total_cost: f64,

    /// `total_value - total_cost`
    pub gain_loss: f64,

    /// `gain_loss / total_cost × 100`
    pub gain_loss_percent: f64,

    /// One entry per distinct symbol, in order of first appearance
    pub allocation: Vec<AllocationEntry>,
}

impl PortfolioMetrics {
    /// Largest single-symbol allocation percentage (0.0 when there are no entries).
    pub fn max_allocation(&self) -> f64 {
        self.allocation
            .iter()
            .map(|a| a.percentage)
            .fold(0.0, f64::max)
    }
}

/// A short narrative paragraph about one aspect of the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
}

/// Full result of one analysis run. Recomputed from scratch every time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_value: f64,
    pub total_cost: f64,
    pub gain_loss: f64,
    pub gain_loss_percent: f64,
    pub diversification: Diversification,
    pub risk_level: RiskLevel,

    /// Sorted by descending priority
    pub recommendations: Vec<Recommendation>,

    pub allocation: Vec<AllocationEntry>,

    /// Diversification, performance and risk narratives, in that order
    pub insights: Vec<Insight>,
}
