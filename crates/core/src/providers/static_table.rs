use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::price::PriceTable;

use super::traits::PriceSource;

/// Price source backed by a fixed in-memory [`PriceTable`].
pub struct StaticPriceSource {
    name: String,
    table: PriceTable,
}

impl StaticPriceSource {
    pub fn new(name: impl Into<String>, table: PriceTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    /// The built-in mock quotes.
    pub fn mock() -> Self {
        Self::new("MockPrices", PriceTable::mock())
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_price(&self, symbol: &str) -> Result<Option<f64>, CoreError> {
        Ok(self.table.get(symbol))
    }
}
