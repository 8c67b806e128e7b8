use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::errors::CoreError;
use crate::models::analytics::AnalysisResult;
use crate::models::holding::Holding;
use crate::providers::registry::PriceSourceRegistry;
use crate::services::analysis_service::AnalysisService;

/// Holds the session's busy flag for the lifetime of one analysis.
///
/// Acquiring fails while another guard is alive; dropping releases the flag.
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, CoreError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::AnalysisInProgress)?;
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// One pending analysis: a snapshot of the holdings, waiting to be run.
///
/// The task owns everything it needs, so later edits to the session's
/// holdings do not affect it. There is no way to cancel a started task;
/// [`AnalysisTask::run`] always waits out the delay and then computes.
/// The busy flag stays set until the task completes or is dropped.
#[must_use = "an analysis task does nothing until `run` is awaited"]
pub struct AnalysisTask {
    holdings: Vec<Holding>,
    delay: Duration,
    registry: Arc<PriceSourceRegistry>,
    busy: BusyGuard,
}

impl std::fmt::Debug for AnalysisTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisTask")
            .field("holdings", &self.holdings.len())
            .field("delay", &self.delay)
            .finish()
    }
}

impl AnalysisTask {
    /// Snapshot `holdings` and claim `busy`.
    ///
    /// Fails with `EmptyPortfolio` if there is nothing to analyze and with
    /// `AnalysisInProgress` if the flag is already held.
    pub fn start(
        holdings: &[Holding],
        delay: Duration,
        registry: Arc<PriceSourceRegistry>,
        busy: &Arc<AtomicBool>,
    ) -> Result<Self, CoreError> {
        if holdings.is_empty() {
            return Err(CoreError::EmptyPortfolio);
        }
        let busy = BusyGuard::acquire(busy)?;
        Ok(Self {
            holdings: holdings.to_vec(),
            delay,
            registry,
            busy,
        })
    }

    /// The holdings this task will analyze.
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// Wait for the simulated latency, resolve prices, then compute.
    ///
    /// Must be polled inside a Tokio runtime (the delay uses `tokio::time`).
    pub async fn run(self) -> Result<AnalysisResult, CoreError> {
        let AnalysisTask {
            holdings,
            delay,
            registry,
            busy,
        } = self;

        info!(
            holdings = holdings.len(),
            delay_ms = delay.as_millis() as u64,
            "analysis started"
        );
        tokio::time::sleep(delay).await;

        fn symbol_of(h: &Holding) -> &str {
            h.symbol.as_str()
        }
        let prices = registry.snapshot(holdings.iter().map(symbol_of)).await;
        let result = AnalysisService::new().analyze(&holdings, &prices);

        drop(busy);

        match &result {
            Ok(r) => info!(
                total_value = r.total_value,
                gain_loss_percent = r.gain_loss_percent,
                recommendations = r.recommendations.len(),
                "analysis finished"
            ),
            Err(e) => info!(error = %e, "analysis failed"),
        }
        result
    }
}
