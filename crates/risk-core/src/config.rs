use serde::{Deserialize, Serialize};

/// Configuration for the risk metrics engine.
///
/// The risk-free rate is in FRACTIONAL units (0.04 = 4% annual). A separate
/// percentage-point convention exists for the percent-scaled Sharpe variant;
/// the two are never mixed inside one computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Annual risk-free rate, fractional (default 0.04).
    pub risk_free_rate: f64,
    /// Risk-free rate in percentage points for the percent-scaled Sharpe
    /// variant (default 2.0).
    pub risk_free_rate_percent: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.04,
            risk_free_rate_percent: 2.0,
        }
    }
}

/// Configuration for the VaR engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarConfig {
    /// Confidence level in (0, 1), e.g. 0.95.
    pub confidence_level: f64,
    /// Horizon in trading days, >= 1.
    pub time_horizon_days: u32,
    /// Window (trading days) for realized-volatility estimates.
    pub volatility_window: usize,
    /// Seed for the Monte Carlo RNG. Fixed seed => identical output.
    /// `None` draws a fresh seed per call.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for VarConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            time_horizon_days: 1,
            volatility_window: 252,
            seed: None,
        }
    }
}

impl VarConfig {
    pub fn with_confidence(confidence_level: f64) -> Self {
        Self {
            confidence_level,
            ..Default::default()
        }
    }

    pub fn with_horizon(mut self, days: u32) -> Self {
        self.time_horizon_days = days;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
