use thiserror::Error;

/// Errors raised by the strict (formula-level) computation paths.
///
/// Documented fallback defaults (the 0.20 volatility floor, the 5%/7% VaR
/// floors, the heuristic asset-class table) are policy, not errors — they are
/// returned as ordinary values when their preconditions trigger.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Series size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}
