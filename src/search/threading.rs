//! Threading configuration and the engine-owned worker pool.
//!
//! Tree construction and tree search are both fork-join workloads. They run
//! one after the other on the same pool, which the engine starts explicitly
//! and shuts down by dropping it.

use std::num::NonZeroUsize;
use std::str::FromStr;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::chess_errors::{EngineError, EngineResult};

/// Search execution model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadingModel {
    /// Serial tree build and serial alpha-beta.
    SingleThreaded,
    /// Root-partitioned tree build and young-brothers-wait search.
    ForkJoin,
}

impl FromStr for ThreadingModel {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "SingleThreaded" => Ok(ThreadingModel::SingleThreaded),
            "ForkJoin" => Ok(ThreadingModel::ForkJoin),
            _ => Err(EngineError::InvalidOption {
                name: "ThreadingModel".to_owned(),
                value: value.to_owned(),
            }),
        }
    }
}

/// Threading configuration owned by the engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    pub model: ThreadingModel,
    /// `0` means "one per hardware thread".
    pub requested_threads: usize,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            model: ThreadingModel::ForkJoin,
            requested_threads: 0,
        }
    }
}

/// Upper bound on worker threads, whatever the caller requests.
pub const MAX_WORKER_THREADS: usize = 256;

impl ThreadingConfig {
    #[inline]
    pub fn normalized_threads(self) -> usize {
        if self.requested_threads > 0 {
            return self.requested_threads.min(MAX_WORKER_THREADS);
        }
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .min(MAX_WORKER_THREADS)
    }
}

/// Bounded pool of worker threads shared by tree construction and search.
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    pub fn start(config: ThreadingConfig) -> EngineResult<Self> {
        let threads = config.normalized_threads();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("ply-worker-{index}"))
            .build()
            .map_err(|err| EngineError::WorkerPool(err.to_string()))?;
        debug!(threads, "worker pool started");
        Ok(Self { pool })
    }

    #[inline]
    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `op` inside the pool, blocking the caller until it returns.
    #[inline]
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.thread_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threading_config_normalizes_threads() {
        let cfg = ThreadingConfig {
            model: ThreadingModel::ForkJoin,
            requested_threads: 0,
        };
        assert!(cfg.normalized_threads() >= 1);

        let cfg = ThreadingConfig {
            requested_threads: 3,
            ..cfg
        };
        assert_eq!(cfg.normalized_threads(), 3);

        let cfg = ThreadingConfig {
            requested_threads: 100_000,
            ..cfg
        };
        assert_eq!(cfg.normalized_threads(), MAX_WORKER_THREADS);
    }

    #[test]
    fn model_parses_option_values() {
        assert_eq!("ForkJoin".parse::<ThreadingModel>(), Ok(ThreadingModel::ForkJoin));
        assert_eq!(
            "SingleThreaded".parse::<ThreadingModel>(),
            Ok(ThreadingModel::SingleThreaded)
        );
        assert!("LazySmp".parse::<ThreadingModel>().is_err());
    }

    #[test]
    fn pool_runs_work_with_requested_size() {
        let pool = WorkerPool::start(ThreadingConfig {
            model: ThreadingModel::ForkJoin,
            requested_threads: 2,
        })
        .expect("pool should start");
        assert_eq!(pool.thread_count(), 2);
        assert_eq!(pool.install(|| 40 + 2), 42);
    }
}
