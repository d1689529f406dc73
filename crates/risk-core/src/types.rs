use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single position in a portfolio.
///
/// Immutable snapshot input to every calculation; there is no lifecycle
/// beyond construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub name: String,
    pub quantity: f64,
    pub current_price: f64,
    pub purchase_price: f64,
    /// Cost basis override. When `None`, quantity × purchase price is used.
    #[serde(default)]
    pub initial_investment: Option<f64>,
}

impl Holding {
    pub fn new(name: &str, quantity: f64, purchase_price: f64, current_price: f64) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            current_price,
            purchase_price,
            initial_investment: None,
        }
    }

    pub fn with_initial_investment(mut self, initial_investment: f64) -> Self {
        self.initial_investment = Some(initial_investment);
        self
    }

    /// Current market value of the position.
    pub fn market_value(&self) -> f64 {
        self.quantity * self.current_price
    }

    /// Cost basis, defaulting to quantity × purchase price.
    pub fn initial_investment(&self) -> f64 {
        self.initial_investment
            .unwrap_or(self.quantity * self.purchase_price)
    }
}

/// Which computation strategy produced a set of risk metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsPath {
    /// Computed directly from a supplied historical value/return series.
    Historical,
    /// Estimated from the asset-class lookup table, value-weighted.
    Heuristic,
}

/// Portfolio-level risk metrics. Recomputed on every request — a pure value
/// object, never authoritative state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Volatility of daily returns (fractional, e.g. 0.20 = 20%).
    pub volatility: f64,
    /// Largest peak-to-trough decline, in [0, 1].
    pub max_drawdown: f64,
    /// Sensitivity to market returns.
    pub beta: f64,
    /// Unique-holdings ratio scaled to 0–100.
    pub diversification_score: f64,
    /// Return on investment, fractional.
    pub roi: f64,
    pub sharpe_ratio: f64,
    pub path: MetricsPath,
    pub computed_at: DateTime<Utc>,
}

impl RiskMetrics {
    /// Neutral defaults substituted by the forgiving aggregate path when a
    /// sub-computation fails.
    pub fn neutral(path: MetricsPath) -> Self {
        Self {
            volatility: 0.0,
            max_drawdown: 0.0,
            beta: 1.0,
            diversification_score: 0.0,
            roi: 0.0,
            sharpe_ratio: 1.0,
            path,
            computed_at: Utc::now(),
        }
    }
}

/// Full Value-at-Risk report across all four estimation methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarResult {
    pub historical_var: f64,
    pub parametric_var: f64,
    pub monte_carlo_var: f64,
    pub conditional_var: f64,
    /// Volatility of the supplied return series (fractional).
    pub volatility: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    /// Mean of the supplied return series.
    pub expected_return: f64,
    /// Name → fraction of total portfolio value. Sums to 1.0 when total
    /// value is positive; empty for an empty portfolio.
    pub asset_weights: HashMap<String, f64>,
    pub confidence_level: f64,
    pub time_horizon_days: u32,
    pub computed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holding_market_value() {
        let h = Holding::new("AAPL", 10.0, 150.0, 160.0);
        assert!((h.market_value() - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_initial_investment_defaults_to_cost_basis() {
        let h = Holding::new("AAPL", 10.0, 150.0, 160.0);
        assert!((h.initial_investment() - 1500.0).abs() < 1e-9);

        let h = h.with_initial_investment(1234.0);
        assert!((h.initial_investment() - 1234.0).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_metrics() {
        let m = RiskMetrics::neutral(MetricsPath::Heuristic);
        assert_eq!(m.volatility, 0.0);
        assert_eq!(m.beta, 1.0);
        assert_eq!(m.sharpe_ratio, 1.0);
        assert_eq!(m.max_drawdown, 0.0);
        assert_eq!(m.diversification_score, 0.0);
    }

    #[test]
    fn test_metrics_path_serde() {
        let json = serde_json::to_string(&MetricsPath::Heuristic).unwrap();
        assert_eq!(json, "\"heuristic\"");
    }
}
