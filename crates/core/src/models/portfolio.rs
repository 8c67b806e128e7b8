use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// The in-memory list of holdings for one session.
///
/// Order is the order in which holdings were entered; it determines the
/// order of allocation entries and of equal-priority recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// All entered holdings. The same symbol may appear more than once.
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }
}

impl From<Vec<Holding>> for Portfolio {
    fn from(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }
}
