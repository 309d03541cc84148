//! Data-parallel execution across groups/variables within one iteration (spec §5).
//! Grounded in the teacher's `radiate-core::domain::executor::Executor`, trimmed to
//! the two variants this crate actually needs: synchronous and Rayon-backed
//! `execute_batch`. The teacher's custom thread-pool variant
//! (`FixedSizedWorkerPool`, backed by its own `thread_pool` module) has no
//! counterpart here since this crate's parallelism need is "run N independent,
//! equal-cost closures and collect the results", exactly what `rayon`'s `par_iter`
//! already gives for free.

#[cfg(feature = "rayon")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Iterations are strictly sequential (spec §5); this only governs how the
/// independent per-group/per-variable work *within* one iteration is scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Executor {
    #[default]
    Serial,
    #[cfg(feature = "rayon")]
    Rayon,
}

impl Executor {
    /// Runs each closure in `jobs` and collects results in the same order they were
    /// given — the deterministic reduction order spec §5 requires regardless of
    /// executor.
    pub fn execute_batch<F, R>(&self, jobs: Vec<F>) -> Vec<R>
    where
        F: Fn() -> R + Send + Sync,
        R: Send,
    {
        match self {
            Executor::Serial => jobs.iter().map(|f| f()).collect(),
            #[cfg(feature = "rayon")]
            Executor::Rayon => jobs.into_par_iter().map(|f| f()).collect(),
        }
    }

    /// Runs `f(i)` for `i in 0..len` and collects results in index order.
    pub fn map_range<F, R>(&self, len: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Send + Sync,
        R: Send,
    {
        match self {
            Executor::Serial => (0..len).map(&f).collect(),
            #[cfg(feature = "rayon")]
            Executor::Rayon => (0..len).into_par_iter().map(f).collect(),
        }
    }
}
