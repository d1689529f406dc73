//! Historical-path risk formulas. Strict: degenerate or missing input is an
//! error here; the forgiving substitution happens only in [`crate::RiskEngine`].

use portfolio_stats::{mean, std_dev};
use risk_core::{AnalyticsError, Holding};

/// Volatility of a daily return series.
pub fn volatility(returns: &[f64]) -> Result<f64, AnalyticsError> {
    if returns.is_empty() {
        return Err(AnalyticsError::InsufficientData(
            "no historical returns for volatility".to_string(),
        ));
    }
    Ok(std_dev(returns))
}

/// Sharpe ratio in FRACTIONAL units: (mean return - risk-free rate) / std.
///
/// `risk_free_rate` is fractional (0.04 = 4%). See [`sharpe_ratio_percent`]
/// for the percentage-point convention; the two are never mixed.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> Result<f64, AnalyticsError> {
    if returns.is_empty() {
        return Err(AnalyticsError::InsufficientData(
            "no historical returns for Sharpe ratio".to_string(),
        ));
    }
    let s = std_dev(returns);
    if s < 1e-12 {
        return Err(AnalyticsError::DegenerateInput(
            "zero return volatility, Sharpe undefined".to_string(),
        ));
    }
    Ok((mean(returns) - risk_free_rate) / s)
}

/// Sharpe ratio in PERCENTAGE POINTS: inputs are percent-scaled returns and a
/// percent risk-free rate (2.0 = 2%). Same formula, distinct unit convention.
pub fn sharpe_ratio_percent(
    returns_percent: &[f64],
    risk_free_rate_percent: f64,
) -> Result<f64, AnalyticsError> {
    sharpe_ratio(returns_percent, risk_free_rate_percent)
}

/// Maximum peak-to-trough drawdown of a value series, in [0, 1].
pub fn max_drawdown(values: &[f64]) -> Result<f64, AnalyticsError> {
    if values.is_empty() {
        return Err(AnalyticsError::InsufficientData(
            "no historical values for max drawdown".to_string(),
        ));
    }
    let mut peak = values[0];
    let mut max_dd = 0.0_f64;
    for &v in values {
        if v > peak {
            peak = v;
        }
        if peak > 0.0 {
            let dd = (peak - v) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    Ok(max_dd)
}

/// Beta: covariance(asset, market) / variance(market). Population moments.
pub fn beta(asset_returns: &[f64], market_returns: &[f64]) -> Result<f64, AnalyticsError> {
    if asset_returns.len() != market_returns.len() {
        return Err(AnalyticsError::SizeMismatch {
            expected: asset_returns.len(),
            actual: market_returns.len(),
        });
    }
    if asset_returns.is_empty() {
        return Err(AnalyticsError::InsufficientData(
            "no returns for beta".to_string(),
        ));
    }
    let n = asset_returns.len() as f64;
    let asset_mean = mean(asset_returns);
    let market_mean = mean(market_returns);
    let covariance = asset_returns
        .iter()
        .zip(market_returns)
        .map(|(a, m)| (a - asset_mean) * (m - market_mean))
        .sum::<f64>()
        / n;
    let market_variance = market_returns
        .iter()
        .map(|m| (m - market_mean).powi(2))
        .sum::<f64>()
        / n;
    if market_variance < 1e-12 {
        return Err(AnalyticsError::DegenerateInput(
            "zero market variance, beta undefined".to_string(),
        ));
    }
    Ok(covariance / market_variance)
}

fn unique_name_ratio(holdings: &[Holding]) -> f64 {
    if holdings.is_empty() {
        return 0.0;
    }
    let unique = holdings
        .iter()
        .map(|h| h.name.trim().to_lowercase())
        .collect::<std::collections::HashSet<_>>()
        .len();
    unique as f64 / holdings.len() as f64
}

/// Diversification on the 0–100 scale: unique normalized names / total × 100.
pub fn diversification_score(holdings: &[Holding]) -> f64 {
    unique_name_ratio(holdings) * 100.0
}

/// Diversification on the 0–10 scale. Kept as a distinct operation from
/// [`diversification_score`]; both scales are part of the public contract.
pub fn diversification_index(holdings: &[Holding]) -> f64 {
    unique_name_ratio(holdings) * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volatility_empty_errors() {
        assert!(matches!(
            volatility(&[]),
            Err(AnalyticsError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_volatility_single_sample_uses_floor() {
        // One sample falls through to the 0.20 insufficient-data floor.
        assert_eq!(volatility(&[0.01]).unwrap(), 0.20);
    }

    #[test]
    fn test_sharpe_ratio_fractional() {
        let returns = [0.06, 0.10];
        // mean 0.08, population std 0.02, rf 0.04 => (0.08 - 0.04) / 0.02 = 2.0
        let s = sharpe_ratio(&returns, 0.04).unwrap();
        assert!((s - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sharpe_zero_std_errors() {
        assert!(matches!(
            sharpe_ratio(&[0.01, 0.01, 0.01], 0.04),
            Err(AnalyticsError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_sharpe_percent_convention() {
        let returns_pct = [6.0, 10.0];
        let s = sharpe_ratio_percent(&returns_pct, 2.0).unwrap();
        // mean 8.0, std 2.0 => (8 - 2) / 2 = 3.0
        assert!((s - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_drawdown() {
        let values = [100.0, 110.0, 95.0, 100.0, 115.0, 108.0];
        let dd = max_drawdown(&values).unwrap();
        // Peak 110, trough 95.
        assert!((dd - 15.0 / 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_drawdown_monotonic_is_zero() {
        assert_eq!(max_drawdown(&[1.0, 2.0, 3.0]).unwrap(), 0.0);
        assert!(matches!(
            max_drawdown(&[]),
            Err(AnalyticsError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_beta_identity() {
        let market = [0.01, -0.02, 0.015, 0.005];
        let b = beta(&market, &market).unwrap();
        assert!((b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_beta_scaled() {
        let market = [0.01, -0.02, 0.015, 0.005];
        let asset: Vec<f64> = market.iter().map(|m| m * 1.5).collect();
        let b = beta(&asset, &market).unwrap();
        assert!((b - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_beta_size_mismatch() {
        assert!(matches!(
            beta(&[0.01, 0.02], &[0.01]),
            Err(AnalyticsError::SizeMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_beta_flat_market_errors() {
        assert!(matches!(
            beta(&[0.01, 0.02], &[0.0, 0.0]),
            Err(AnalyticsError::DegenerateInput(_))
        ));
        // A constant nonzero market has a rounded variance of ~1e-34, which
        // is still flat.
        assert!(matches!(
            beta(&[0.01, 0.02, 0.03], &[0.01, 0.01, 0.01]),
            Err(AnalyticsError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_diversification_scales() {
        let holdings = vec![
            Holding::new("AAPL", 1.0, 1.0, 1.0),
            Holding::new("aapl ", 1.0, 1.0, 1.0),
            Holding::new("GOOGL", 1.0, 1.0, 1.0),
            Holding::new("MSFT", 1.0, 1.0, 1.0),
        ];
        // 3 unique names out of 4 holdings.
        assert!((diversification_score(&holdings) - 75.0).abs() < 1e-9);
        assert!((diversification_index(&holdings) - 7.5).abs() < 1e-9);
        assert_eq!(diversification_score(&[]), 0.0);
    }
}
