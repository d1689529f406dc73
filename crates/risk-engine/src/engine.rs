use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use portfolio_stats::{daily_returns, roi, std_dev, total_value};
use risk_core::heuristics::{profile_for, AssetClassProfile};
use risk_core::{
    AnalyticsError, ComputePool, Holding, MetricsPath, ReturnsProvider, RiskConfig, RiskMetrics,
};

use crate::metrics;

/// Historical portfolio value series, optionally paired with market returns
/// for beta. Assembled by the caller before the engine runs; the engine does
/// no I/O.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioHistory {
    /// Daily portfolio values, chronological.
    pub values: Vec<f64>,
    /// Daily market-index returns aligned with the portfolio's daily returns
    /// (so one element shorter than `values`).
    #[serde(default)]
    pub market_returns: Option<Vec<f64>>,
}

/// Unweighted profile applied when the portfolio has zero total value and
/// nothing to weight by.
const ZERO_VALUE_PROFILE: AssetClassProfile = AssetClassProfile {
    volatility: 0.15,
    beta: 1.0,
    max_drawdown: 0.20,
    sharpe: 1.0,
};

/// Computes portfolio risk metrics over either the historical or the
/// heuristic path.
///
/// Formula-level computations are strict ([`AnalyticsError`] on degenerate
/// input); [`RiskEngine::comprehensive_metrics`] is the forgiving surface
/// that substitutes neutral defaults instead of propagating partial failures.
pub struct RiskEngine {
    config: RiskConfig,
    pool: Option<ComputePool>,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config, pool: None }
    }

    /// Attach a dedicated compute pool for the batch APIs. Without one, the
    /// global rayon pool is used.
    pub fn with_pool(mut self, pool: ComputePool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Value-weighted asset-class profile across the holdings.
    pub fn heuristic_profile(&self, holdings: &[Holding]) -> AssetClassProfile {
        let total = total_value(holdings);
        if total == 0.0 {
            debug!("zero portfolio value, using unweighted default profile");
            return ZERO_VALUE_PROFILE;
        }
        let mut combined = AssetClassProfile {
            volatility: 0.0,
            beta: 0.0,
            max_drawdown: 0.0,
            sharpe: 0.0,
        };
        for h in holdings {
            let weight = h.market_value() / total;
            let p = profile_for(&h.name);
            combined.volatility += weight * p.volatility;
            combined.beta += weight * p.beta;
            combined.max_drawdown += weight * p.max_drawdown;
            combined.sharpe += weight * p.sharpe;
        }
        combined
    }

    /// Heuristic-path metrics: asset-class estimates, value-weighted.
    pub fn heuristic_metrics(&self, holdings: &[Holding]) -> Result<RiskMetrics, AnalyticsError> {
        let profile = self.heuristic_profile(holdings);
        Ok(RiskMetrics {
            volatility: profile.volatility,
            max_drawdown: profile.max_drawdown,
            beta: profile.beta,
            diversification_score: metrics::diversification_score(holdings),
            roi: roi(holdings)?,
            sharpe_ratio: profile.sharpe,
            path: MetricsPath::Heuristic,
            computed_at: Utc::now(),
        })
    }

    /// Historical-path metrics from a portfolio value series. Strict: an
    /// empty or unusable series is an error, never a silent default.
    pub fn historical_metrics(
        &self,
        holdings: &[Holding],
        history: &PortfolioHistory,
    ) -> Result<RiskMetrics, AnalyticsError> {
        if history.values.is_empty() {
            return Err(AnalyticsError::InsufficientData(
                "no historical data for portfolio".to_string(),
            ));
        }
        let returns = daily_returns(&history.values);
        if returns.is_empty() {
            return Err(AnalyticsError::InsufficientData(
                "historical series too short to form returns".to_string(),
            ));
        }
        let beta = match &history.market_returns {
            Some(market) => metrics::beta(&returns, market)?,
            None => {
                debug!("no market series supplied, beta falls back to asset-class estimate");
                self.heuristic_profile(holdings).beta
            }
        };
        Ok(RiskMetrics {
            volatility: std_dev(&returns),
            max_drawdown: metrics::max_drawdown(&history.values)?,
            beta,
            diversification_score: metrics::diversification_score(holdings),
            roi: roi(holdings)?,
            sharpe_ratio: metrics::sharpe_ratio(&returns, self.config.risk_free_rate)?,
            path: MetricsPath::Historical,
            computed_at: Utc::now(),
        })
    }

    /// Fetch per-asset return series from the provider and compute
    /// historical-path metrics over the value-weighted portfolio series.
    ///
    /// Any asset with empty history drops the whole portfolio onto the
    /// heuristic path — the upstream data fetch is allowed to return nothing.
    pub async fn metrics_from_provider(
        &self,
        holdings: &[Holding],
        provider: &dyn ReturnsProvider,
    ) -> Result<RiskMetrics, AnalyticsError> {
        let total = total_value(holdings);
        if total == 0.0 {
            return self.heuristic_metrics(holdings);
        }
        let mut series = Vec::with_capacity(holdings.len());
        for h in holdings {
            let returns = provider.returns_for(&h.name).await?;
            if returns.is_empty() {
                debug!(asset = %h.name, "no return history from provider, using heuristic path");
                return self.heuristic_metrics(holdings);
            }
            series.push((h.market_value() / total, returns));
        }
        let len = series.iter().map(|(_, r)| r.len()).min().unwrap_or(0);
        if len == 0 {
            return self.heuristic_metrics(holdings);
        }
        // Compound the weighted daily returns into a value series so drawdown
        // and returns come from one consistent curve.
        let mut values = Vec::with_capacity(len + 1);
        values.push(total);
        for t in 0..len {
            let portfolio_return: f64 = series.iter().map(|(w, r)| w * r[t]).sum();
            let prev = values[values.len() - 1];
            values.push(prev * (1.0 + portfolio_return));
        }
        self.historical_metrics(
            holdings,
            &PortfolioHistory {
                values,
                market_returns: None,
            },
        )
    }

    /// Forgiving aggregate surface: picks the historical path when history is
    /// supplied, the heuristic path otherwise, and substitutes documented
    /// neutral defaults if the chosen path fails.
    pub fn comprehensive_metrics(
        &self,
        holdings: &[Holding],
        history: Option<&PortfolioHistory>,
    ) -> RiskMetrics {
        let (result, path) = match history {
            Some(h) => (self.historical_metrics(holdings, h), MetricsPath::Historical),
            None => (self.heuristic_metrics(holdings), MetricsPath::Heuristic),
        };
        match result {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "risk metrics computation failed, substituting neutral defaults");
                RiskMetrics::neutral(path)
            }
        }
    }

    /// Metrics for many independent portfolios, computed as a parallel map.
    pub fn metrics_for_portfolios(
        &self,
        portfolios: &[(Vec<Holding>, Option<PortfolioHistory>)],
    ) -> Vec<RiskMetrics> {
        let run = || {
            portfolios
                .par_iter()
                .map(|(holdings, history)| self.comprehensive_metrics(holdings, history.as_ref()))
                .collect()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}
