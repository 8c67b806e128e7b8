// ═══════════════════════════════════════════════════════════════════
// Integration Tests: InvestmentAgent session: holdings lifecycle,
// busy flag, delayed analysis, result replacement
// ═══════════════════════════════════════════════════════════════════

use std::time::Duration;

use investment_agent_core::errors::CoreError;
use investment_agent_core::models::analytics::{Diversification, RiskLevel};
use investment_agent_core::models::price::PriceTable;
use investment_agent_core::models::recommendation::{Priority, RecommendationType, PORTFOLIO_SYMBOL};
use investment_agent_core::models::settings::Settings;
use investment_agent_core::providers::registry::PriceSourceRegistry;
use investment_agent_core::providers::static_table::StaticPriceSource;
use investment_agent_core::InvestmentAgent;

fn agent_with(holdings: &[(&str, f64, f64)]) -> InvestmentAgent {
    let mut agent = InvestmentAgent::new();
    for (symbol, shares, avg) in holdings {
        agent.add_holding(*symbol, *shares, *avg).unwrap();
    }
    agent
}

// ═══════════════════════════════════════════════════════════════════
// Holdings
// ═══════════════════════════════════════════════════════════════════

mod holdings {
    use super::*;

    #[test]
    fn new_session_is_empty() {
        let agent = InvestmentAgent::new();
        assert_eq!(agent.holding_count(), 0);
        assert!(agent.holdings().is_empty());
        assert!(!agent.is_analyzing());
        assert!(agent.last_result().is_none());
        assert!(agent.last_analyzed_at().is_none());
        assert_eq!(agent.settings(), &Settings::default());
    }

    #[test]
    fn add_and_remove() {
        let mut agent = agent_with(&[("aapl", 10.0, 150.0), ("tsla", 5.0, 300.0)]);
        assert_eq!(agent.holding_count(), 2);
        assert_eq!(agent.holdings()[0].symbol, "AAPL");

        let removed = agent.remove_holding(0).unwrap();
        assert_eq!(removed.symbol, "AAPL");
        assert_eq!(agent.holding_count(), 1);
        assert_eq!(agent.holdings()[0].symbol, "TSLA");

        assert!(matches!(
            agent.remove_holding(5).unwrap_err(),
            CoreError::HoldingNotFound(5)
        ));
    }

    #[test]
    fn invalid_holdings_are_not_added() {
        let mut agent = InvestmentAgent::new();
        assert!(agent.add_holding("AAPL", 0.0, 150.0).is_err());
        assert!(agent.add_holding("", 1.0, 150.0).is_err());
        assert!(agent.add_holding_from_input("AAPL", "x", "1").is_err());
        assert!(agent.add_holding_from_input("AAPL", "", "1").is_err());
        assert_eq!(agent.holding_count(), 0);
    }

    #[test]
    fn add_from_form_input() {
        let mut agent = InvestmentAgent::new();
        agent.add_holding_from_input("nvda", "1", "300").unwrap();
        assert_eq!(agent.holdings()[0].symbol, "NVDA");
        assert_eq!(agent.holdings()[0].avg_price, 300.0);
    }

    #[test]
    fn duplicates_count_and_clear() {
        let mut agent = agent_with(&[("A", 1.0, 1.0), ("B", 1.0, 1.0), ("A", 1.0, 2.0)]);
        assert_eq!(agent.holding_count(), 3);
        agent.clear_holdings();
        assert_eq!(agent.holding_count(), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Analysis
// ═══════════════════════════════════════════════════════════════════

mod analysis {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn analyze_single_gaining_holding() {
        let mut agent = agent_with(&[("AAPL", 10.0, 150.0)]);
        let result = agent.analyze().await.unwrap().clone();

        assert!((result.total_value - 1785.0).abs() < 1e-9);
        assert!((result.gain_loss_percent - 19.0).abs() < 1e-9);
        assert_eq!(result.diversification, Diversification::Low);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.recommendations[0].symbol, PORTFOLIO_SYMBOL);
        assert_eq!(
            result.recommendations[1].recommendation_type,
            RecommendationType::Hold
        );

        assert_eq!(agent.last_result(), Some(&result));
        assert!(agent.last_analyzed_at().is_some());
        assert!(!agent.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_portfolio_is_rejected_up_front() {
        let mut agent = InvestmentAgent::new();
        assert!(matches!(
            agent.start_analysis().unwrap_err(),
            CoreError::EmptyPortfolio
        ));
        assert!(matches!(
            agent.analyze().await.unwrap_err(),
            CoreError::EmptyPortfolio
        ));
        assert!(!agent.is_analyzing());
        assert!(agent.last_result().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_configured_delay() {
        let agent = agent_with(&[("AAPL", 1.0, 150.0)]);
        let start = tokio::time::Instant::now();
        agent.start_analysis().unwrap().run().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_is_allowed() {
        let mut agent = agent_with(&[("AAPL", 1.0, 150.0)]);
        agent.set_analysis_delay_ms(0);
        assert_eq!(agent.settings().analysis_delay_ms, 0);
        let start = tokio::time::Instant::now();
        agent.analyze().await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn busy_flag_blocks_second_start() {
        let mut agent = agent_with(&[("NVDA", 1.0, 300.0)]);

        let task = agent.start_analysis().unwrap();
        assert!(agent.is_analyzing());
        assert!(matches!(
            agent.start_analysis().unwrap_err(),
            CoreError::AnalysisInProgress
        ));

        let result = task.run().await.unwrap();
        assert!(!agent.is_analyzing());

        let stored = agent.apply_result(result.clone());
        assert_eq!(stored, &result);
        assert!(agent.start_analysis().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn busy_while_delay_is_pending() {
        let agent = agent_with(&[("TSLA", 5.0, 300.0)]);
        let task = agent.start_analysis().unwrap();

        let (result, second) = tokio::join!(task.run(), async {
            tokio::task::yield_now().await;
            let busy = agent.is_analyzing();
            (busy, agent.start_analysis().map(|_| ()))
        });

        let (busy, second) = second;
        assert!(busy);
        assert!(matches!(second, Err(CoreError::AnalysisInProgress)));
        let result = result.unwrap();
        let tsla = result.recommendations.iter().find(|r| r.symbol == "TSLA").unwrap();
        assert_eq!(tsla.recommendation_type, RecommendationType::Warning);
        assert_eq!(tsla.priority, Priority::Medium);
        assert!(!agent.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_a_task_releases_the_flag() {
        let agent = agent_with(&[("AAPL", 1.0, 150.0)]);
        let task = agent.start_analysis().unwrap();
        assert!(agent.is_analyzing());
        drop(task);
        assert!(!agent.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn task_works_on_a_snapshot() {
        let mut agent = agent_with(&[("AAPL", 10.0, 150.0)]);
        let task = agent.start_analysis().unwrap();
        assert_eq!(task.holdings().len(), 1);

        // Edits after the start do not leak into the pending analysis
        agent.add_holding("MSFT", 1.0, 400.0).unwrap();
        let result = task.run().await.unwrap();
        assert_eq!(result.allocation.len(), 1);
        assert!((result.total_value - 1785.0).abs() < 1e-9);
        assert_eq!(agent.holding_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn task_can_run_on_another_task() {
        let agent = agent_with(&[("NVDA", 1.0, 300.0), ("ZZZZ", 1.0, 100.0)]);
        let task = agent.start_analysis().unwrap();
        let handle = tokio::spawn(task.run());
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.recommendations.len(), 3);
        assert!(!agent.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn new_result_replaces_previous() {
        let mut agent = agent_with(&[("NVDA", 1.0, 300.0)]);
        let first = agent.analyze().await.unwrap().clone();
        assert_eq!(first.risk_level, RiskLevel::High);

        agent.remove_holding(0).unwrap();
        agent.add_holding("TSLA", 5.0, 300.0).unwrap();
        let second = agent.analyze().await.unwrap().clone();

        assert_eq!(second.risk_level, RiskLevel::Low);
        assert_ne!(first, second);
        assert_eq!(agent.last_result(), Some(&second));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_analysis_is_identical() {
        let mut agent = agent_with(&[
            ("AAPL", 10.0, 150.0),
            ("MSFT", 3.0, 300.0),
            ("ZZZZ", 2.0, 50.0),
        ]);
        let first = agent.analyze().await.unwrap().clone();
        let second = agent.analyze().await.unwrap().clone();
        assert_eq!(first, second);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Prices & Settings
// ═══════════════════════════════════════════════════════════════════

mod prices_and_settings {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn custom_registry_overrides_quotes() {
        let mut overrides = PriceTable::new();
        overrides.insert("ZZZZ", 150.0);
        let mut registry = PriceSourceRegistry::new_with_defaults();
        registry.register_first(Box::new(StaticPriceSource::new("Overrides", overrides)));

        let mut agent = InvestmentAgent::with_registry(Settings::default(), registry);
        agent.add_holding("ZZZZ", 1.0, 100.0).unwrap();
        assert_eq!(
            agent.price_source_names(),
            vec!["Overrides".to_string(), "MockPrices".to_string()]
        );

        let result = agent.analyze().await.unwrap();
        let zzzz = result.recommendations.iter().find(|r| r.symbol == "ZZZZ").unwrap();
        // +50% → sell
        assert_eq!(zzzz.recommendation_type, RecommendationType::Sell);
    }

    #[tokio::test(start_paused = true)]
    async fn no_sources_means_every_position_is_flat() {
        let mut agent = InvestmentAgent::with_registry(Settings::default(), PriceSourceRegistry::new());
        agent.add_holding("AAPL", 10.0, 150.0).unwrap();
        let result = agent.analyze().await.unwrap();
        assert_eq!(result.gain_loss, 0.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[tokio::test]
    async fn current_prices_cover_held_symbols() {
        let agent = agent_with(&[("AAPL", 1.0, 1.0), ("ZZZZ", 1.0, 1.0)]);
        let prices = agent.current_prices().await;
        assert_eq!(prices.get("AAPL"), Some(178.50));
        assert_eq!(prices.get("ZZZZ"), None);
        assert_eq!(prices.len(), 1);
    }

    #[test]
    fn set_currency_validates() {
        let mut agent = InvestmentAgent::with_settings(Settings {
            analysis_delay_ms: 0,
            currency: "USD".into(),
        });
        agent.set_currency("eur").unwrap();
        assert_eq!(agent.settings().currency, "EUR");
        assert!(agent.set_currency("EURO").is_err());
        assert_eq!(agent.settings().currency, "EUR");
    }

    #[test]
    fn debug_output_summarizes_state() {
        let agent = agent_with(&[("AAPL", 1.0, 1.0)]);
        let debug = format!("{agent:?}");
        assert!(debug.contains("InvestmentAgent"));
        assert!(debug.contains("holdings: 1"));
        assert!(debug.contains("MockPrices"));
    }
}
