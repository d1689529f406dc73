pub mod engine;
pub mod monte_carlo;

pub use engine::{VarEngine, CONDITIONAL_VAR_FLOOR, HISTORICAL_VAR_FLOOR, MIN_VAR_SAMPLES};
pub use monte_carlo::SIMULATION_COUNT;
