//! Statistics primitives shared by every higher-level metric.
//! Stateless functions — no I/O, no async, no shared state.

/// Population standard deviation assumed when fewer than two samples exist
/// ("insufficient data, assume typical 20% volatility").
pub const DEFAULT_STD_DEV: f64 = 0.20;

/// Kurtosis of the normal distribution, returned for degenerate input.
pub const NORMAL_KURTOSIS: f64 = 3.0;

/// Arithmetic mean. Empty input returns 0.0 — the single empty-input
/// convention for this module.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation (divide by N, not N-1).
///
/// Fewer than two samples returns [`DEFAULT_STD_DEV`].
pub fn std_dev(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return DEFAULT_STD_DEV;
    }
    let m = mean(xs);
    let variance = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64;
    variance.sqrt()
}

/// Third standardized moment: average of ((x - mean) / std)^3.
///
/// Returns 0.0 with fewer than three samples or zero standard deviation.
pub fn skewness(xs: &[f64]) -> f64 {
    if xs.len() < 3 {
        return 0.0;
    }
    let m = mean(xs);
    let s = std_dev(xs);
    // Constant series round to a tiny nonzero std; treat them as degenerate.
    if s < 1e-12 {
        return 0.0;
    }
    xs.iter().map(|x| ((x - m) / s).powi(3)).sum::<f64>() / xs.len() as f64
}

/// Fourth standardized moment: average of ((x - mean) / std)^4.
///
/// Raw kurtosis, not excess. Returns [`NORMAL_KURTOSIS`] with fewer than four
/// samples or zero standard deviation.
pub fn kurtosis(xs: &[f64]) -> f64 {
    if xs.len() < 4 {
        return NORMAL_KURTOSIS;
    }
    let m = mean(xs);
    let s = std_dev(xs);
    if s < 1e-12 {
        return NORMAL_KURTOSIS;
    }
    xs.iter().map(|x| ((x - m) / s).powi(4)).sum::<f64>() / xs.len() as f64
}

/// Tail-percentile index into a sorted series of length `n`:
/// `ceil((1 - confidence) * n) - 1`, clamped to `[0, n - 1]`.
///
/// Historical VaR, Monte Carlo VaR, and expected shortfall all rely on this
/// exact index arithmetic; do not swap in a different quantile definition.
pub fn percentile_index(n: usize, confidence_level: f64) -> usize {
    if n == 0 {
        return 0;
    }
    // Nudge below the ceil boundary: 1.0 - 0.95 lands at 0.050000000000000044
    // in f64, which would push the index one sample deep of the tail.
    let raw = (((1.0 - confidence_level) * n as f64) - 1e-9).ceil() as i64 - 1;
    raw.clamp(0, n as i64 - 1) as usize
}

/// Tail-percentile lookup used by historical and Monte Carlo VaR.
/// Empty input returns 0.0.
pub fn percentile_value(sorted_ascending: &[f64], confidence_level: f64) -> f64 {
    if sorted_ascending.is_empty() {
        return 0.0;
    }
    sorted_ascending[percentile_index(sorted_ascending.len(), confidence_level)]
}

/// Daily returns from a chronological value series, pairwise
/// `(v[i+1] - v[i]) / v[i]`, skipping zero-base windows.
pub fn daily_returns(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }
    values
        .windows(2)
        .filter_map(|w| {
            if w[0] != 0.0 {
                Some((w[1] - w[0]) / w[0])
            } else {
                None
            }
        })
        .collect()
}

const Z_TABLE: &[(f64, f64)] = &[
    (0.99, 2.326),
    (0.975, 1.96),
    (0.95, 1.645),
    (0.90, 1.282),
    (0.85, 1.036),
    (0.80, 0.842),
];

/// One-tailed z-score for a confidence level.
///
/// Exact-match table lookup, no interpolation; unmatched levels fall back to
/// the 95% value (1.645).
pub fn z_score(confidence_level: f64) -> f64 {
    for (level, z) in Z_TABLE {
        if (confidence_level - level).abs() < 1e-9 {
            return *z;
        }
    }
    1.645
}
