pub mod engine;
pub mod metrics;

pub use engine::{PortfolioHistory, RiskEngine};
pub use metrics::{
    beta, diversification_index, diversification_score, max_drawdown, sharpe_ratio,
    sharpe_ratio_percent, volatility,
};
