use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use portfolio_stats::{
    asset_weights, kurtosis, mean, percentile_index, percentile_value, skewness, std_dev,
    total_value, z_score,
};
use risk_core::heuristics::profile_for;
use risk_core::{AnalyticsError, ComputePool, Holding, VarConfig, VarResult, VolatilityEstimator};

use crate::monte_carlo;

/// Minimum historical sample size below which the flat-percentage policy
/// applies instead of the percentile computation.
pub const MIN_VAR_SAMPLES: usize = 30;

/// Flat fraction of portfolio value returned by historical and Monte Carlo
/// VaR when the sample-size policy triggers.
pub const HISTORICAL_VAR_FLOOR: f64 = 0.05;

/// Flat fraction of portfolio value returned by expected shortfall when the
/// sample-size policy triggers. Deliberately above the VaR floor.
pub const CONDITIONAL_VAR_FLOOR: f64 = 0.07;

/// Value-at-Risk across four estimation methods.
///
/// Each method reads only from the immutable holdings/returns snapshot, so
/// the four are independent and safe to compute concurrently.
pub struct VarEngine {
    config: VarConfig,
    pool: Option<ComputePool>,
}

impl VarEngine {
    pub fn new(config: VarConfig) -> Self {
        Self { config, pool: None }
    }

    /// Attach a dedicated compute pool for the Monte Carlo map. Without one,
    /// the global rayon pool is used.
    pub fn with_pool(mut self, pool: ComputePool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn config(&self) -> &VarConfig {
        &self.config
    }

    fn horizon_scale(&self) -> f64 {
        (self.config.time_horizon_days as f64).sqrt()
    }

    /// Historical-simulation VaR: tail percentile of the sorted return
    /// series, scaled by portfolio value and horizon.
    ///
    /// Fewer than [`MIN_VAR_SAMPLES`] returns triggers the flat
    /// [`HISTORICAL_VAR_FLOOR`] policy — returned, not an error.
    pub fn historical_var(&self, returns: &[f64], portfolio_value: f64) -> f64 {
        if returns.len() < MIN_VAR_SAMPLES {
            debug!(
                samples = returns.len(),
                "insufficient history, applying flat historical VaR policy"
            );
            return portfolio_value * HISTORICAL_VAR_FLOOR;
        }
        let mut sorted = returns.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let tail = percentile_value(&sorted, self.config.confidence_level);
        (tail * portfolio_value * self.horizon_scale()).abs()
    }

    /// Parametric (variance-covariance) VaR under a Gaussian assumption:
    /// |z × volatility × sqrt(horizon) × portfolio value|.
    pub fn parametric_var(&self, volatility: f64, portfolio_value: f64) -> f64 {
        let z = z_score(self.config.confidence_level);
        (z * volatility * self.horizon_scale() * portfolio_value).abs()
    }

    /// Monte Carlo VaR over simulated one-day portfolio returns.
    ///
    /// `asset_volatilities` maps holding name to an annualized volatility;
    /// names without an entry fall back to the asset-class table. An empty
    /// portfolio gets the flat [`HISTORICAL_VAR_FLOOR`] policy.
    pub fn monte_carlo_var(
        &self,
        holdings: &[Holding],
        asset_volatilities: &HashMap<String, f64>,
        portfolio_value: f64,
    ) -> Result<f64, AnalyticsError> {
        if holdings.is_empty() {
            debug!("empty portfolio, applying flat Monte Carlo VaR policy");
            return Ok(portfolio_value * HISTORICAL_VAR_FLOOR);
        }
        let total = total_value(holdings);
        if total == 0.0 {
            return Err(AnalyticsError::DegenerateInput(
                "total portfolio value is zero, weights undefined".to_string(),
            ));
        }
        // Per-holding weights computed directly so duplicate names keep
        // their individual contributions.
        let weighted_vols: Vec<(f64, f64)> = holdings
            .iter()
            .map(|h| {
                let vol = asset_volatilities
                    .get(&h.name)
                    .copied()
                    .unwrap_or_else(|| profile_for(&h.name).volatility);
                (h.market_value() / total, vol)
            })
            .collect();

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let run = || monte_carlo::simulate_returns(&weighted_vols, seed);
        let mut simulated = match &self.pool {
            Some(pool) => pool.install(run)?,
            None => run()?,
        };
        simulated.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let tail = percentile_value(&simulated, self.config.confidence_level);
        Ok((tail * portfolio_value * self.horizon_scale()).abs())
    }

    /// Conditional VaR (expected shortfall): average of the sorted returns
    /// from the worst observation through the VaR cutoff, inclusive.
    ///
    /// Fewer than [`MIN_VAR_SAMPLES`] returns triggers the flat
    /// [`CONDITIONAL_VAR_FLOOR`] policy.
    pub fn conditional_var(&self, returns: &[f64], portfolio_value: f64) -> f64 {
        if returns.len() < MIN_VAR_SAMPLES {
            debug!(
                samples = returns.len(),
                "insufficient history, applying flat expected-shortfall policy"
            );
            return portfolio_value * CONDITIONAL_VAR_FLOOR;
        }
        let mut sorted = returns.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let cutoff = percentile_index(sorted.len(), self.config.confidence_level);
        let tail = &sorted[..=cutoff];
        let tail_mean = tail.iter().sum::<f64>() / tail.len() as f64;
        (tail_mean * portfolio_value * self.horizon_scale()).abs()
    }

    /// Resolve per-asset volatilities for the Monte Carlo draw: a realized
    /// estimate over the configured window when the estimator has one, else
    /// the asset-class table.
    pub async fn asset_volatilities(
        &self,
        holdings: &[Holding],
        estimator: &dyn VolatilityEstimator,
    ) -> HashMap<String, f64> {
        let mut vols = HashMap::with_capacity(holdings.len());
        for h in holdings {
            let vol = match estimator
                .realized_volatility(&h.name, self.config.volatility_window)
                .await
            {
                Some(v) => v,
                None => {
                    debug!(asset = %h.name, "no realized volatility, using asset-class estimate");
                    profile_for(&h.name).volatility
                }
            };
            vols.insert(h.name.clone(), vol);
        }
        vols
    }

    /// Full report: all four VaR variants plus the distribution moments of
    /// the supplied return series and the portfolio weight map.
    pub fn full_report(
        &self,
        holdings: &[Holding],
        returns: &[f64],
        asset_volatilities: &HashMap<String, f64>,
    ) -> Result<VarResult, AnalyticsError> {
        let portfolio_value = total_value(holdings);
        let volatility = std_dev(returns);
        Ok(VarResult {
            historical_var: self.historical_var(returns, portfolio_value),
            parametric_var: self.parametric_var(volatility, portfolio_value),
            monte_carlo_var: self.monte_carlo_var(holdings, asset_volatilities, portfolio_value)?,
            conditional_var: self.conditional_var(returns, portfolio_value),
            volatility,
            skewness: skewness(returns),
            kurtosis: kurtosis(returns),
            expected_return: mean(returns),
            asset_weights: asset_weights(holdings)?,
            confidence_level: self.config.confidence_level,
            time_horizon_days: self.config.time_horizon_days,
            computed_at: Utc::now(),
        })
    }
}
