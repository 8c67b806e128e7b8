use crate::errors::CoreError;
use crate::models::analytics::AnalysisResult;
use crate::models::holding::Holding;
use crate::models::price::PriceTable;
use crate::services::insight_service::InsightService;
use crate::services::metrics_service::MetricsService;
use crate::services::recommendation_service::RecommendationService;

/// Runs the full derivation: metrics, labels, recommendations and insights.
///
/// Every call recomputes from scratch. The same holdings and price table
/// always produce an identical result.
pub struct AnalysisService {
    metrics_service: MetricsService,
    recommendation_service: RecommendationService,
    insight_service: InsightService,
}

impl AnalysisService {
    pub fn new() -> Self {
        Self {
            metrics_service: MetricsService::new(),
            recommendation_service: RecommendationService::new(),
            insight_service: InsightService::new(),
        }
    }

    /// Analyze `holdings` against `prices`.
    ///
    /// Fails with `EmptyPortfolio` or `ZeroCostBasis` (see [`MetricsService::compute`]).
    pub fn analyze(
        &self,
        holdings: &[Holding],
        prices: &PriceTable,
    ) -> Result<AnalysisResult, CoreError> {
        let metrics = self.metrics_service.compute(holdings, prices)?;
        let diversification = self.metrics_service.diversification(&metrics);
        let risk_level = self.metrics_service.risk_level(&metrics);

        let recommendations = self.recommendation_service.generate(holdings, prices);
        let insights =
            self.insight_service
                .generate(&metrics, diversification, risk_level, holdings.len());

        Ok(AnalysisResult {
            total_value: metrics.total_value,
            total_cost: metrics.total_cost,
            gain_loss: metrics.gain_loss,
            gain_loss_percent: metrics.gain_loss_percent,
            diversification,
            risk_level,
            recommendations,
            allocation: metrics.allocation,
            insights,
        })
    }
}

impl Default for AnalysisService {
    fn default() -> Self {
        Self::new()
    }
}
