pub mod portfolio;
pub mod stats;

pub use portfolio::{asset_weights, roi, total_value};
pub use stats::{
    daily_returns, kurtosis, mean, percentile_index, percentile_value, skewness, std_dev, z_score,
};
