//! # investment-agent
//!
//! Command-line front end: enter holdings, run the analysis, print the report.

mod logging;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use investment_agent_core::models::holding::Holding;
use investment_agent_core::models::price::PriceTable;
use investment_agent_core::models::settings::Settings;
use investment_agent_core::providers::registry::PriceSourceRegistry;
use investment_agent_core::providers::static_table::StaticPriceSource;
use investment_agent_core::InvestmentAgent;

#[derive(Parser, Debug)]
#[command(name = "investment-agent")]
#[command(about = "Portfolio analysis with rule-based recommendations", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG overrides it.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a set of holdings
    Analyze {
        /// Holding as SYMBOL:SHARES:AVG_PRICE (repeatable)
        #[arg(short = 'H', long = "holding", value_name = "SYM:SHARES:AVG")]
        holdings: Vec<String>,

        /// JSON file with an array of {"symbol", "shares", "avgPrice"} objects
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// JSON file of {"SYMBOL": price} overriding the built-in quotes
        #[arg(short, long)]
        prices: Option<PathBuf>,

        /// JSON settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Simulated analysis latency in milliseconds (overrides the config)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Print the result as JSON instead of a text report
        #[arg(long)]
        json: bool,
    },

    /// List the quotes the analysis would use
    Prices {
        /// JSON file of {"SYMBOL": price} overriding the built-in quotes
        #[arg(short, long)]
        prices: Option<PathBuf>,

        /// JSON settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    match cli.command {
        Commands::Analyze {
            holdings,
            file,
            prices,
            config,
            delay_ms,
            json,
        } => {
            let mut settings = load_settings(config.as_deref())?;
            if let Some(delay_ms) = delay_ms {
                settings.analysis_delay_ms = delay_ms;
            }
            let registry = build_registry(prices.as_deref())?;
            let mut agent = InvestmentAgent::with_registry(settings, registry);

            if let Some(path) = file.as_deref() {
                for holding in load_holdings(path)? {
                    let symbol = holding.symbol.clone();
                    agent
                        .add_holding(holding.symbol, holding.shares, holding.avg_price)
                        .with_context(|| format!("invalid holding {symbol} in {}", path.display()))?;
                }
            }
            for spec in &holdings {
                let (symbol, shares, avg_price) = split_holding_arg(spec)?;
                agent
                    .add_holding_from_input(symbol, shares, avg_price)
                    .with_context(|| format!("invalid holding '{spec}'"))?;
            }

            if agent.holding_count() == 0 {
                bail!("no holdings given; use --holding SYM:SHARES:AVG or --file");
            }

            let currency = agent.settings().currency.clone();
            let result = agent.analyze().await.context("analysis failed")?.clone();

            if json {
                let out = serde_json::to_string_pretty(&result)
                    .context("failed to serialize analysis result")?;
                println!("{out}");
            } else {
                print!("{}", report::render_analysis(&result, agent.holdings(), &currency));
            }
        }

        Commands::Prices { prices, config } => {
            let settings = load_settings(config.as_deref())?;
            let table = effective_prices(prices.as_deref()).await?;
            print!("{}", report::render_prices(&table, &settings.currency));
        }
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn load_price_file(path: &Path) -> Result<PriceTable> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    PriceTable::from_json_str(&json)
        .with_context(|| format!("failed to parse prices from {}", path.display()))
}

fn load_overrides(prices: Option<&Path>) -> Result<Option<PriceTable>> {
    let Some(path) = prices else {
        return Ok(None);
    };
    let table = load_price_file(path)?;
    debug!(quotes = table.len(), path = %path.display(), "loaded price overrides");
    Ok(Some(table))
}

/// Price file quotes (if any) take precedence over the built-in table.
fn registry_with(overrides: Option<PriceTable>) -> PriceSourceRegistry {
    let mut registry = PriceSourceRegistry::new_with_defaults();
    if let Some(table) = overrides {
        registry.register_first(Box::new(StaticPriceSource::new("PriceFile", table)));
    }
    registry
}

fn build_registry(prices: Option<&Path>) -> Result<PriceSourceRegistry> {
    Ok(registry_with(load_overrides(prices)?))
}

/// Quotes `analyze` would see for every known symbol, resolved through the
/// same registry so unusable overrides fall through to the built-in table.
async fn effective_prices(prices: Option<&Path>) -> Result<PriceTable> {
    let overrides = load_overrides(prices)?;
    let mut symbols: Vec<String> = PriceTable::mock().iter().map(|(s, _)| s.to_string()).collect();
    if let Some(table) = &overrides {
        symbols.extend(table.iter().map(|(s, _)| s.to_string()));
    }
    let registry = registry_with(overrides);
    Ok(registry.snapshot(symbols.iter().map(String::as_str)).await)
}

fn load_holdings(path: &Path) -> Result<Vec<Holding>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("failed to parse holdings from {}", path.display()))
}

/// Split `SYM:SHARES:AVG` into its three raw fields.
fn split_holding_arg(spec: &str) -> Result<(&str, &str, &str)> {
    let parts: Vec<&str> = spec.split(':').collect();
    match parts.as_slice() {
        [symbol, shares, avg_price] => Ok((*symbol, *shares, *avg_price)),
        _ => bail!("expected SYMBOL:SHARES:AVG_PRICE, got '{spec}'"),
    }
}
