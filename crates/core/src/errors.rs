use thiserror::Error;

/// Unified error type for the entire investment-agent-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Holding input ───────────────────────────────────────────────
    #[error("Holding validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("No holding at position {0}")]
    HoldingNotFound(usize),

    // ── Analysis ────────────────────────────────────────────────────
    #[error("Cannot analyze an empty portfolio")]
    EmptyPortfolio,

    #[error("Portfolio total cost must be positive to compute returns")]
    ZeroCostBasis,

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    // ── Prices ──────────────────────────────────────────────────────
    #[error("Price source error ({provider}): {message}")]
    PriceSource { provider: String, message: String },

    // ── Configuration / File ────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
