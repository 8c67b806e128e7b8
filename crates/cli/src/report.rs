//! Plain-text rendering of an analysis result.

use std::fmt::Write;

use investment_agent_core::models::analytics::AnalysisResult;
use investment_agent_core::models::holding::Holding;
use investment_agent_core::models::price::PriceTable;

/// Width of the allocation bar at 100%.
const BAR_WIDTH: usize = 30;

pub fn render_analysis(result: &AnalysisResult, holdings: &[Holding], currency: &str) -> String {
    let mut out = String::new();
    let sign = if result.gain_loss_percent >= 0.0 { "+" } else { "" };

    let _ = writeln!(out, "Portfolio ({} positions)", holdings.len());
    for h in holdings {
        let _ = writeln!(
            out,
            "  {:<8} {:>10.2} shares @ {:>10.2}",
            h.symbol, h.shares, h.avg_price
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Total value:     {:>14.2} {currency}", result.total_value);
    let _ = writeln!(out, "Total cost:      {:>14.2} {currency}", result.total_cost);
    let _ = writeln!(
        out,
        "Gain/loss:       {:>14.2} {currency} ({sign}{:.2}%)",
        result.gain_loss, result.gain_loss_percent
    );
    let _ = writeln!(out, "Diversification: {:>14}", result.diversification.to_string());
    let _ = writeln!(out, "Risk level:      {:>14}", result.risk_level.to_string());

    let _ = writeln!(out);
    let _ = writeln!(out, "Allocation");
    for entry in &result.allocation {
        let filled = ((entry.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<8} {:>6.2}% {}",
            entry.name,
            entry.percentage,
            "#".repeat(filled.min(BAR_WIDTH))
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendations");
    for rec in &result.recommendations {
        let _ = writeln!(
            out,
            "  [{}] {} {}: {}",
            rec.priority, rec.recommendation_type, rec.symbol, rec.action
        );
        let _ = writeln!(out, "      {}", rec.reason);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Insights");
    for insight in &result.insights {
        let _ = writeln!(out, "  {}", insight.title);
        let _ = writeln!(out, "      {}", insight.description);
    }

    out
}

pub fn render_prices(table: &PriceTable, currency: &str) -> String {
    let mut out = String::new();
    for (symbol, price) in table.iter() {
        let _ = writeln!(out, "{symbol:<8} {price:>10.2} {currency}");
    }
    out
}
