pub mod config;
pub mod error;
pub mod heuristics;
pub mod pool;
pub mod traits;
pub mod types;

pub use config::{RiskConfig, VarConfig};
pub use error::AnalyticsError;
pub use heuristics::AssetClassProfile;
pub use pool::{ComputePool, PoolConfig};
pub use traits::{ReturnsProvider, StaticReturnsProvider, VolatilityEstimator};
pub use types::{Holding, MetricsPath, RiskMetrics, VarResult};
