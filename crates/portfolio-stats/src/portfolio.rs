//! Portfolio aggregation: total value, per-asset weights, ROI.

use std::collections::HashMap;

use risk_core::{AnalyticsError, Holding};

/// Total market value of the portfolio. Empty input is 0.0.
pub fn total_value(holdings: &[Holding]) -> f64 {
    holdings.iter().map(|h| h.market_value()).sum()
}

/// Per-asset weight map: name → market value / total value.
///
/// Weights sum to 1.0 (within floating tolerance) whenever total value is
/// positive. An empty portfolio yields an empty map; a non-empty portfolio
/// with zero total value is a degenerate ratio and errors rather than
/// producing NaN.
pub fn asset_weights(holdings: &[Holding]) -> Result<HashMap<String, f64>, AnalyticsError> {
    if holdings.is_empty() {
        return Ok(HashMap::new());
    }
    let total = total_value(holdings);
    if total == 0.0 {
        return Err(AnalyticsError::DegenerateInput(
            "total portfolio value is zero, weights undefined".to_string(),
        ));
    }
    Ok(holdings
        .iter()
        .map(|h| (h.name.clone(), h.market_value() / total))
        .collect())
}

/// Return on investment over holdings with positive cost basis:
/// (current value - initial investment) / initial investment.
///
/// Holdings with a non-positive initial investment are excluded; if none
/// remain, there is nothing to measure against and the caller must surface
/// the error rather than swallow it.
pub fn roi(holdings: &[Holding]) -> Result<f64, AnalyticsError> {
    let valid: Vec<&Holding> = holdings
        .iter()
        .filter(|h| h.initial_investment() > 0.0)
        .collect();
    if valid.is_empty() {
        return Err(AnalyticsError::InsufficientData(
            "no holdings with positive initial investment".to_string(),
        ));
    }
    let current: f64 = valid.iter().map(|h| h.market_value()).sum();
    let invested: f64 = valid.iter().map(|h| h.initial_investment()).sum();
    Ok((current - invested) / invested)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_holdings() -> Vec<Holding> {
        vec![
            Holding::new("AAPL", 10.0, 150.0, 160.0),
            Holding::new("GOOGL", 5.0, 2800.0, 2900.0),
        ]
    }

    #[test]
    fn test_total_value_scenario() {
        // 10 * 160 + 5 * 2900 = 1600 + 14500
        assert!((total_value(&sample_holdings()) - 16100.0).abs() < 1e-9);
        assert_eq!(total_value(&[]), 0.0);
    }

    #[test]
    fn test_roi_scenario() {
        // (16100 - 15500) / 15500
        let r = roi(&sample_holdings()).unwrap();
        assert!((r - 600.0 / 15500.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let weights = asset_weights(&sample_holdings()).unwrap();
        let sum: f64 = weights.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!((weights["AAPL"] - 1600.0 / 16100.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_empty_portfolio() {
        assert!(asset_weights(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_weights_zero_total_value_errors() {
        let holdings = vec![Holding::new("ZERO", 10.0, 5.0, 0.0)];
        assert!(matches!(
            asset_weights(&holdings),
            Err(AnalyticsError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_roi_empty_errors() {
        assert!(matches!(roi(&[]), Err(AnalyticsError::InsufficientData(_))));
    }

    #[test]
    fn test_roi_all_zero_investment_errors() {
        let holdings = vec![Holding::new("FREE", 0.0, 0.0, 100.0)];
        assert!(matches!(
            roi(&holdings),
            Err(AnalyticsError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_roi_skips_zero_cost_holdings() {
        let holdings = vec![
            Holding::new("AAPL", 10.0, 150.0, 160.0),
            Holding::new("AIRDROP", 5.0, 0.0, 10.0),
        ];
        // Airdropped position excluded: ROI measured on AAPL only.
        let r = roi(&holdings).unwrap();
        assert!((r - 100.0 / 1500.0).abs() < 1e-9);
    }
}
