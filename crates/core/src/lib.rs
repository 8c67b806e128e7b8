pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::{DateTime, Utc};
use models::{
    analytics::AnalysisResult,
    holding::Holding,
    portfolio::Portfolio,
    price::PriceTable,
    settings::{validate_currency, Settings},
};
use providers::registry::PriceSourceRegistry;
use services::{analysis_task::AnalysisTask, portfolio_service::PortfolioService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use errors::CoreError;

/// Main entry point for the Investment Agent core library.
/// Owns the session state: holdings, price sources, settings, the busy
/// flag and the most recent analysis result.
#[must_use]
pub struct InvestmentAgent {
    portfolio: Portfolio,
    portfolio_service: PortfolioService,
    registry: Arc<PriceSourceRegistry>,
    settings: Settings,
    /// Set while an `AnalysisTask` started from this session is alive.
    busy: Arc<AtomicBool>,
    last_result: Option<AnalysisResult>,
    last_analyzed_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for InvestmentAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestmentAgent")
            .field("holdings", &self.portfolio.holdings.len())
            .field("settings", &self.settings)
            .field("price_sources", &self.registry.source_names())
            .field("analyzing", &self.is_analyzing())
            .field("has_result", &self.last_result.is_some())
            .finish()
    }
}

impl InvestmentAgent {
    /// Create an empty session with default settings and the mock price table.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Create an empty session with the mock price table.
    pub fn with_settings(settings: Settings) -> Self {
        Self::with_registry(settings, PriceSourceRegistry::new_with_defaults())
    }

    /// Create an empty session with a custom set of price sources.
    pub fn with_registry(settings: Settings, registry: PriceSourceRegistry) -> Self {
        Self {
            portfolio: Portfolio::new(),
            portfolio_service: PortfolioService::new(),
            registry: Arc::new(registry),
            settings,
            busy: Arc::new(AtomicBool::new(false)),
            last_result: None,
            last_analyzed_at: None,
        }
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add a holding. The symbol is uppercased; share count and price
    /// must be finite and positive.
    pub fn add_holding(
        &mut self,
        symbol: impl Into<String>,
        shares: f64,
        avg_price: f64,
    ) -> Result<(), CoreError> {
        let holding = Holding::new(symbol, shares, avg_price);
        self.portfolio_service
            .add_holding(&mut self.portfolio, holding)
    }

    /// Add a holding from raw text fields, as typed into a form.
    pub fn add_holding_from_input(
        &mut self,
        symbol: &str,
        shares: &str,
        avg_price: &str,
    ) -> Result<(), CoreError> {
        let holding = self
            .portfolio_service
            .parse_holding(symbol, shares, avg_price)?;
        self.portfolio_service
            .add_holding(&mut self.portfolio, holding)
    }

    /// Remove the holding at `index` (0-based, in entry order).
    pub fn remove_holding(&mut self, index: usize) -> Result<Holding, CoreError> {
        self.portfolio_service
            .remove_holding(&mut self.portfolio, index)
    }

    /// Remove all holdings. The last analysis result is kept.
    pub fn clear_holdings(&mut self) {
        self.portfolio.holdings.clear();
    }

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.portfolio.holdings
    }

    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.portfolio.len()
    }

    // ── Analysis ────────────────────────────────────────────────────

    /// Start an analysis of the current holdings.
    ///
    /// The returned task owns a snapshot of the holdings and keeps the
    /// session busy until it completes (or is dropped). While busy, further
    /// calls fail with `AnalysisInProgress`. An empty portfolio fails with
    /// `EmptyPortfolio`.
    pub fn start_analysis(&self) -> Result<AnalysisTask, CoreError> {
        AnalysisTask::start(
            &self.portfolio.holdings,
            Duration::from_millis(self.settings.analysis_delay_ms),
            Arc::clone(&self.registry),
            &self.busy,
        )
    }

    /// Store a finished result, replacing the previous one.
    pub fn apply_result(&mut self, result: AnalysisResult) -> &AnalysisResult {
        self.last_analyzed_at = Some(Utc::now());
        self.last_result.insert(result)
    }

    /// Start, run and store an analysis in one call.
    pub async fn analyze(&mut self) -> Result<&AnalysisResult, CoreError> {
        let task = self.start_analysis()?;
        let result = task.run().await?;
        Ok(self.apply_result(result))
    }

    /// Returns `true` while an analysis started from this session is pending.
    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    /// When the last result was applied, if any.
    #[must_use]
    pub fn last_analyzed_at(&self) -> Option<DateTime<Utc>> {
        self.last_analyzed_at
    }

    // ── Prices ──────────────────────────────────────────────────────

    /// Resolve the current quotes for every held symbol.
    pub async fn current_prices(&self) -> PriceTable {
        self.registry
            .snapshot(self.portfolio.holdings.iter().map(|h| h.symbol.as_str()))
            .await
    }

    /// Names of the configured price sources, in lookup order.
    #[must_use]
    pub fn price_source_names(&self) -> Vec<String> {
        self.registry.source_names()
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change the simulated latency used by analyses started after this call.
    pub fn set_analysis_delay_ms(&mut self, delay_ms: u64) {
        self.settings.analysis_delay_ms = delay_ms;
    }

    /// Set the display currency. Must be a 3-letter alphabetic code.
    pub fn set_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        self.settings.currency = validate_currency(currency)?;
        Ok(())
    }
}

impl Default for InvestmentAgent {
    fn default() -> Self {
        Self::new()
    }
}
