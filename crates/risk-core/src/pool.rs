//! Explicit compute pool for the embarrassingly-parallel analytics maps.
//!
//! Every formula in this workspace is a pure function over an immutable
//! snapshot, so parallelism is a plain map. The pool is an object passed by
//! configuration rather than process-wide mutable state.

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Worker thread count; 0 lets rayon pick one per core.
    pub threads: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { threads: 0 }
    }
}

/// Wrapper around a dedicated rayon thread pool.
pub struct ComputePool {
    inner: rayon::ThreadPool,
}

impl ComputePool {
    pub fn new(config: &PoolConfig) -> Result<Self> {
        let inner = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("analytics-{i}"))
            .build()?;
        Ok(Self { inner })
    }

    /// Run `op` inside this pool; rayon parallel iterators invoked within it
    /// are scheduled on the pool's workers.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.inner.install(op)
    }

    pub fn threads(&self) -> usize {
        self.inner.current_num_threads()
    }
}

impl std::fmt::Debug for ComputePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputePool")
            .field("threads", &self.threads())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_pool_runs_parallel_map() {
        let pool = ComputePool::new(&PoolConfig { threads: 2 }).unwrap();
        let squares: Vec<i64> = pool.install(|| (0..100i64).into_par_iter().map(|x| x * x).collect());
        assert_eq!(squares.len(), 100);
        assert_eq!(squares[99], 99 * 99);
        assert_eq!(pool.threads(), 2);
    }
}
