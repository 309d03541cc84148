//! Driver configuration (spec §4.4, §4.6). Unlike the teacher's `EngineConfig`
//! (`radiate-engines/src/config.rs`), `temperature`/`damping`/`logsumexp_temp` are not
//! held here: spec.md §6 gives `run` its own `(num_iters, temperature, damping)` /
//! `(num_iters, logsumexp_temp)` signatures, so those are `run` parameters, validated
//! on every call (spec §7 "Raised at `run`") rather than config fields validated once
//! at construction — a config fixed for the `Inferer`'s lifetime would also foreclose
//! a caller running an annealing schedule that lowers temperature across successive
//! `run` calls on the same arena. What's left here is the handful of knobs that really
//! are fixed per driver: the concurrency strategy, and (for SDLP) the optional
//! explicit step size.

use crate::executor::Executor;

/// Loopy BP driver configuration (spec §4.4): just the concurrency strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct BpConfig {
    executor: Executor,
}

impl BpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    pub fn executor(&self) -> Executor {
        self.executor
    }
}

/// SDLP driver configuration (spec §4.6). `step` of `None` defers to the
/// `temperature / max_edge_degree` default decided in spec §9, resolved at `run` time
/// since `temperature` itself is now a `run` parameter.
#[derive(Clone, Copy, Debug, Default)]
pub struct SdlpConfig {
    step: Option<f64>,
    executor: Executor,
}

impl SdlpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    pub fn step(&self) -> Option<f64> {
        self.step
    }

    pub fn executor(&self) -> Executor {
        self.executor
    }
}
