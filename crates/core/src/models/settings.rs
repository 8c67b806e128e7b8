use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CoreError;

/// Default simulated analysis latency, in milliseconds.
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 1500;

/// User-configurable session settings.
///
/// Missing fields in a settings file take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long an analysis waits before computing, to simulate async work.
    pub analysis_delay_ms: u64,

    /// Display currency code (e.g., "USD"). Prices are assumed to be in it.
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis_delay_ms: DEFAULT_ANALYSIS_DELAY_MS,
            currency: "USD".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.currency = validate_currency(&settings.currency)?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Serialization(e.to_string()))
    }
}

/// Normalize and check a currency code: exactly 3 ASCII letters, uppercased.
pub fn validate_currency(currency: &str) -> Result<String, CoreError> {
    let trimmed = currency.trim().to_uppercase();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::ValidationError(format!(
            "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)"
        )));
    }
    Ok(trimmed)
}
