use std::collections::HashMap;

use async_trait::async_trait;

use crate::AnalyticsError;

/// Source of historical daily returns, keyed by asset name.
///
/// An empty vector means "no data available" — the caller then switches to
/// the heuristic path rather than treating it as an error.
#[async_trait]
pub trait ReturnsProvider: Send + Sync {
    async fn returns_for(&self, name: &str) -> Result<Vec<f64>, AnalyticsError>;
}

/// Realized-volatility estimator over a trailing window of trading days.
///
/// `None` signals that not enough history exists for the requested window; the
/// caller falls back to the asset-class table.
#[async_trait]
pub trait VolatilityEstimator: Send + Sync {
    async fn realized_volatility(&self, name: &str, window: usize) -> Option<f64>;
}

/// In-memory provider backed by a fixed map. Used by tests and demos to force
/// either computation path deterministically.
#[derive(Debug, Clone, Default)]
pub struct StaticReturnsProvider {
    series: HashMap<String, Vec<f64>>,
}

impl StaticReturnsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, returns: Vec<f64>) {
        self.series.insert(name.to_string(), returns);
    }
}

#[async_trait]
impl ReturnsProvider for StaticReturnsProvider {
    async fn returns_for(&self, name: &str) -> Result<Vec<f64>, AnalyticsError> {
        Ok(self.series.get(name).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl VolatilityEstimator for StaticReturnsProvider {
    async fn realized_volatility(&self, name: &str, window: usize) -> Option<f64> {
        let returns = self.series.get(name)?;
        if returns.len() < window {
            return None;
        }
        let tail = &returns[returns.len() - window..];
        let n = tail.len() as f64;
        let mean = tail.iter().sum::<f64>() / n;
        let variance = tail.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
        Some(variance.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_returns_empty_for_unknown() {
        let provider = StaticReturnsProvider::new();
        let returns = provider.returns_for("AAPL").await.unwrap();
        assert!(returns.is_empty());
    }

    #[tokio::test]
    async fn test_static_provider_round_trip() {
        let mut provider = StaticReturnsProvider::new();
        provider.insert("AAPL", vec![0.01, -0.02, 0.015]);
        let returns = provider.returns_for("AAPL").await.unwrap();
        assert_eq!(returns.len(), 3);
    }

    #[tokio::test]
    async fn test_volatility_requires_full_window() {
        let mut provider = StaticReturnsProvider::new();
        provider.insert("AAPL", vec![0.01; 10]);
        assert!(provider.realized_volatility("AAPL", 252).await.is_none());
        let vol = provider.realized_volatility("AAPL", 10).await.unwrap();
        // Constant returns have zero variance.
        assert!(vol.abs() < 1e-12);
    }
}
