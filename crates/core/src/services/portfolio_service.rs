use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::models::portfolio::Portfolio;

/// Manages the holdings list: input parsing, validation, add and remove.
///
/// Pure business logic: no I/O, no price lookups.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Append a holding to the portfolio after validating it.
    pub fn add_holding(&self, portfolio: &mut Portfolio, holding: Holding) -> Result<(), CoreError> {
        self.validate_holding(&holding)?;
        portfolio.holdings.push(holding);
        Ok(())
    }

    /// Remove the holding at `index`, returning it.
    pub fn remove_holding(&self, portfolio: &mut Portfolio, index: usize) -> Result<Holding, CoreError> {
        if index >= portfolio.holdings.len() {
            return Err(CoreError::HoldingNotFound(index));
        }
        Ok(portfolio.holdings.remove(index))
    }

    /// Build a holding from raw form fields.
    ///
    /// All three fields must be non-empty after trimming; share count and
    /// price must parse as numbers. The result is validated like any other
    /// holding.
    pub fn parse_holding(
        &self,
        symbol: &str,
        shares: &str,
        avg_price: &str,
    ) -> Result<Holding, CoreError> {
        let symbol = symbol.trim();
        let shares = shares.trim();
        let avg_price = avg_price.trim();

        if symbol.is_empty() || shares.is_empty() || avg_price.is_empty() {
            return Err(CoreError::ValidationError(
                "Symbol, shares and average price are all required".into(),
            ));
        }

        let holding = Holding::new(
            symbol,
            parse_number("shares", shares)?,
            parse_number("avg_price", avg_price)?,
        );
        self.validate_holding(&holding)?;
        Ok(holding)
    }

    /// Validate a holding before it enters a portfolio.
    ///
    /// Rules:
    /// - Symbol must be non-empty
    /// - Shares and average price must be finite and positive
    fn validate_holding(&self, holding: &Holding) -> Result<(), CoreError> {
        if holding.symbol.is_empty() {
            return Err(CoreError::ValidationError("Symbol must not be empty".into()));
        }
        if !holding.shares.is_finite() || holding.shares <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Share count for {} must be a positive number, got {}",
                holding.symbol, holding.shares
            )));
        }
        if !holding.avg_price.is_finite() || holding.avg_price <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Average price for {} must be a positive number, got {}",
                holding.symbol, holding.avg_price
            )));
        }
        Ok(())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_number(field: &str, raw: &str) -> Result<f64, CoreError> {
    raw.parse::<f64>().map_err(|_| CoreError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}
