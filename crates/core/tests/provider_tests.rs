// ═══════════════════════════════════════════════════════════════════
// Provider Tests: StaticPriceSource, PriceSourceRegistry fallback
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use investment_agent_core::errors::CoreError;
use investment_agent_core::models::price::PriceTable;
use investment_agent_core::providers::registry::PriceSourceRegistry;
use investment_agent_core::providers::static_table::StaticPriceSource;
use investment_agent_core::providers::traits::PriceSource;

// ═══════════════════════════════════════════════════════════════════
// Mock sources
// ═══════════════════════════════════════════════════════════════════

/// Always fails, counting how often it was asked.
struct FailingSource {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl PriceSource for FailingSource {
    fn name(&self) -> &str {
        "Failing"
    }

    async fn get_price(&self, _symbol: &str) -> Result<Option<f64>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CoreError::PriceSource {
            provider: "Failing".into(),
            message: "service unavailable".into(),
        })
    }
}

/// Returns the same (possibly invalid) quote for every symbol.
struct ConstantSource {
    price: f64,
}

#[async_trait]
impl PriceSource for ConstantSource {
    fn name(&self) -> &str {
        "Constant"
    }

    async fn get_price(&self, _symbol: &str) -> Result<Option<f64>, CoreError> {
        Ok(Some(self.price))
    }
}

fn table(entries: &[(&str, f64)]) -> PriceTable {
    let mut t = PriceTable::new();
    for (symbol, price) in entries {
        t.insert(*symbol, *price);
    }
    t
}

// ═══════════════════════════════════════════════════════════════════
// StaticPriceSource
// ═══════════════════════════════════════════════════════════════════

mod static_source {
    use super::*;

    #[tokio::test]
    async fn mock_quotes() {
        let source = StaticPriceSource::mock();
        assert_eq!(source.name(), "MockPrices");
        assert_eq!(source.get_price("AAPL").await.unwrap(), Some(178.50));
        assert_eq!(source.get_price("aapl").await.unwrap(), Some(178.50));
        assert_eq!(source.get_price("ZZZZ").await.unwrap(), None);
        assert_eq!(source.table(), &PriceTable::mock());
    }

    #[tokio::test]
    async fn custom_table() {
        let source = StaticPriceSource::new("Custom", table(&[("ABC", 9.5)]));
        assert_eq!(source.name(), "Custom");
        assert_eq!(source.get_price("ABC").await.unwrap(), Some(9.5));
        assert_eq!(source.get_price("AAPL").await.unwrap(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// PriceSourceRegistry
// ═══════════════════════════════════════════════════════════════════

mod registry {
    use super::*;

    #[tokio::test]
    async fn empty_registry_has_no_quotes() {
        let registry = PriceSourceRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.get_price("AAPL").await, None);
    }

    #[tokio::test]
    async fn defaults_use_mock_table() {
        let registry = PriceSourceRegistry::new_with_defaults();
        assert_eq!(registry.source_names(), vec!["MockPrices".to_string()]);
        assert_eq!(registry.get_price("NVDA").await, Some(495.60));
    }

    #[tokio::test]
    async fn first_source_wins() {
        let mut registry = PriceSourceRegistry::new();
        registry.register(Box::new(StaticPriceSource::new("A", table(&[("AAPL", 1.0)]))));
        registry.register(Box::new(StaticPriceSource::new("B", table(&[("AAPL", 2.0)]))));
        assert_eq!(registry.get_price("AAPL").await, Some(1.0));
    }

    #[tokio::test]
    async fn register_first_takes_precedence() {
        let mut registry = PriceSourceRegistry::new_with_defaults();
        registry.register_first(Box::new(StaticPriceSource::new(
            "Override",
            table(&[("AAPL", 200.0)]),
        )));
        assert_eq!(
            registry.source_names(),
            vec!["Override".to_string(), "MockPrices".to_string()]
        );
        assert_eq!(registry.get_price("AAPL").await, Some(200.0));
        // Symbols the override lacks still come from the mock table
        assert_eq!(registry.get_price("MSFT").await, Some(415.20));
    }

    #[tokio::test]
    async fn falls_back_when_source_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = PriceSourceRegistry::new();
        registry.register(Box::new(FailingSource {
            calls: Arc::clone(&calls),
        }));
        registry.register(Box::new(StaticPriceSource::mock()));
        assert_eq!(registry.get_price("TSLA").await, Some(242.80));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn all_sources_failing_means_absent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = PriceSourceRegistry::new();
        registry.register(Box::new(FailingSource {
            calls: Arc::clone(&calls),
        }));
        assert_eq!(registry.get_price("TSLA").await, None);
    }

    #[tokio::test]
    async fn invalid_prices_are_skipped() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut registry = PriceSourceRegistry::new();
            registry.register(Box::new(ConstantSource { price: bad }));
            registry.register(Box::new(StaticPriceSource::mock()));
            assert_eq!(registry.get_price("AAPL").await, Some(178.50), "bad = {bad}");
        }
    }

    #[tokio::test]
    async fn snapshot_resolves_distinct_symbols() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = PriceSourceRegistry::new();
        registry.register(Box::new(FailingSource {
            calls: Arc::clone(&calls),
        }));
        registry.register(Box::new(StaticPriceSource::mock()));

        let snapshot = registry
            .snapshot(["AAPL", "ZZZZ", "AAPL", "aapl", "ZZZZ"])
            .await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("AAPL"), Some(178.50));
        assert_eq!(snapshot.get("ZZZZ"), None);
        // One lookup per distinct symbol
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
