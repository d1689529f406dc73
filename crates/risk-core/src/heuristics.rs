//! Asset-class estimates used when no historical series is available.
//!
//! The upstream market-data fetch is a stub that returns empty history, so
//! per-asset risk figures fall back to a lookup keyed by case-insensitive
//! substring match on the holding name. This is an explicit, documented
//! strategy (`MetricsPath::Heuristic`), not hidden behavior.

use serde::{Deserialize, Serialize};

/// Per-asset-class risk estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetClassProfile {
    pub volatility: f64,
    pub beta: f64,
    pub max_drawdown: f64,
    pub sharpe: f64,
}

const CLASSES: &[(&[&str], AssetClassProfile)] = &[
    (
        &["bitcoin", "btc", "crypto"],
        AssetClassProfile { volatility: 0.80, beta: 0.3, max_drawdown: 0.60, sharpe: 1.2 },
    ),
    (
        &["ethereum", "eth"],
        AssetClassProfile { volatility: 0.75, beta: 0.4, max_drawdown: 0.55, sharpe: 1.1 },
    ),
    (
        &["stock", "equity"],
        AssetClassProfile { volatility: 0.20, beta: 1.0, max_drawdown: 0.30, sharpe: 0.8 },
    ),
    (
        &["bond", "treasury"],
        AssetClassProfile { volatility: 0.05, beta: 0.1, max_drawdown: 0.05, sharpe: 0.5 },
    ),
    (
        &["gold", "commodity"],
        AssetClassProfile { volatility: 0.15, beta: -0.1, max_drawdown: 0.20, sharpe: 0.3 },
    ),
];

/// Profile for an asset whose name matches no known class.
pub const UNKNOWN_ASSET: AssetClassProfile =
    AssetClassProfile { volatility: 0.25, beta: 0.8, max_drawdown: 0.25, sharpe: 0.7 };

/// Look up the risk profile for a holding by name.
///
/// First matching class wins; matching is case-insensitive substring.
pub fn profile_for(name: &str) -> AssetClassProfile {
    let lower = name.to_lowercase();
    for (keywords, profile) in CLASSES {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *profile;
        }
    }
    UNKNOWN_ASSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_profile() {
        let p = profile_for("Bitcoin Fund");
        assert_eq!(p.volatility, 0.80);
        assert_eq!(p.beta, 0.3);
        assert_eq!(p.max_drawdown, 0.60);
        assert_eq!(p.sharpe, 1.2);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(profile_for("ETHEREUM Classic"), profile_for("ethereum classic"));
        assert_eq!(profile_for("BTC"), profile_for("btc"));
    }

    #[test]
    fn test_bond_and_gold_profiles() {
        assert_eq!(profile_for("US Treasury 10Y").volatility, 0.05);
        assert_eq!(profile_for("Gold ETF").beta, -0.1);
    }

    #[test]
    fn test_unknown_asset_falls_through() {
        let p = profile_for("Mystery Asset");
        assert_eq!(p, UNKNOWN_ASSET);
        assert_eq!(p.volatility, 0.25);
        assert_eq!(p.beta, 0.8);
    }
}
