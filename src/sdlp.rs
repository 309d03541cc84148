//! SDLPD — the smoothed dual LP-MAP driver (spec §4.6). Runs Nesterov accelerated
//! gradient ascent on a temperature-smoothed dual, reusing the same factor/variable
//! passes BPD uses (spec §9 "shared scaffolding"): the dual variables are the arena's
//! `f2v` array, and each step's gradient is the disagreement between the
//! variable-side and factor-side pseudo-marginals at a Nesterov look-ahead point.

use crate::arena::ArenaState;
use crate::config::SdlpConfig;
use crate::decode::{compute_energy, decode_map_states};
use crate::error::{FactorFlowError, Result};
use crate::executor::Executor;
use crate::fgr::Fgr;
use crate::ids::VarId;
use crate::kernel::gradient::edge_gradient;
use crate::message_pass;
use crate::numerics::log_sum_exp_temp;

pub struct SdlpDriver;

impl SdlpDriver {
    pub fn init(fgr: &Fgr) -> ArenaState {
        ArenaState::init(fgr)
    }

    /// Runs `num_iters` Nesterov accelerated gradient steps in place at the given
    /// `logsumexp_temp` (`>= 0`), validated up front (spec §7) before the arena is
    /// touched.
    pub fn run(
        fgr: &Fgr,
        arena: &mut ArenaState,
        config: &SdlpConfig,
        num_iters: usize,
        temperature: f64,
    ) -> Result<()> {
        Self::run_with_objvals(fgr, arena, config, num_iters, temperature)?;
        Ok(())
    }

    /// Same as [`Self::run`] but also returns `D_T(μ)` after each iteration, for
    /// convergence inspection (spec §8 monotonicity-modulo-epsilon property).
    pub fn run_with_objvals(
        fgr: &Fgr,
        arena: &mut ArenaState,
        config: &SdlpConfig,
        num_iters: usize,
        temperature: f64,
    ) -> Result<Vec<f64>> {
        if temperature < 0.0 {
            return Err(FactorFlowError::BadTemperature { temperature });
        }

        arena.step = config.step().unwrap_or_else(|| {
            let max_degree = (0..fgr.num_vars())
                .map(|v| fgr.edges_of_var(VarId::from(v)).len())
                .max()
                .unwrap_or(1)
                .max(1) as f64;
            temperature / max_degree
        });

        let mut objvals = Vec::with_capacity(num_iters);
        let mut t = 1usize;

        for _ in 0..num_iters {
            let beta = (t as f64 - 1.0) / (t as f64 + 2.0);
            let y: Vec<f64> = arena
                .f2v
                .iter()
                .zip(arena.momentum.iter())
                .map(|(&x, &m)| x + beta * m)
                .collect();

            let derived_v2f = message_pass::variable_pass(fgr, &y, arena);
            let factor_marginal = message_pass::factor_pass(
                fgr,
                &derived_v2f,
                config.executor(),
                temperature,
                &arena.log_potentials_override,
            );
            let totals = message_pass::variable_totals(fgr, &y, arena);

            let mut grad = vec![0.0; y.len()];
            for v in 0..fgr.num_vars() {
                let var = VarId::from(v);
                for &e in fgr.edges_of_var(var) {
                    let range = fgr.edge_range(e);
                    let g = edge_gradient(&totals[v], &factor_marginal[range.clone()], temperature);
                    grad[range].copy_from_slice(&g);
                }
            }

            let step = arena.step;
            let x_new: Vec<f64> = y.iter().zip(grad.iter()).map(|(&yy, &g)| yy + step * g).collect();

            for i in 0..arena.f2v.len() {
                arena.momentum[i] = x_new[i] - arena.f2v[i];
            }
            arena.prev_grad = grad;
            arena.f2v = x_new;
            t += 1;

            let variable_term: f64 = totals.iter().map(|b| log_sum_exp_temp(b, temperature)).sum();
            let factor_term = message_pass::factor_log_partition(
                fgr,
                &derived_v2f,
                config.executor(),
                temperature,
                &arena.log_potentials_override,
            );
            objvals.push(variable_term + factor_term);
        }

        Ok(objvals)
    }

    /// `D_T(μ)` at the arena's current point (spec §4.5): the sum over every factor's
    /// T-smoothed local-score max plus every variable's T-smoothed belief max. An
    /// upper bound on the true MAP score that tightens as `T -> 0`.
    pub fn primal_upper_bound(fgr: &Fgr, arena: &ArenaState, temperature: f64) -> f64 {
        let v2f = message_pass::variable_pass(fgr, &arena.f2v, arena);
        let variable_term: f64 = message_pass::variable_totals(fgr, &arena.f2v, arena)
            .iter()
            .map(|b| log_sum_exp_temp(b, temperature))
            .sum();
        let factor_term = message_pass::factor_log_partition(
            fgr,
            &v2f,
            Executor::default(),
            temperature,
            &arena.log_potentials_override,
        );
        variable_term + factor_term
    }

    /// Decodes a feasible assignment directly from the current dual point and scores
    /// it, a valid lower bound on the true MAP score (spec §4.6).
    pub fn map_lower_bound(fgr: &Fgr, arena: &ArenaState) -> f64 {
        -compute_energy(fgr, arena, &decode_primal_unaries(fgr, arena))
    }
}

/// Decodes the argmax-per-variable assignment from the dual's current unary beliefs.
pub fn decode_primal_unaries(fgr: &Fgr, arena: &ArenaState) -> Vec<usize> {
    decode_map_states(fgr, arena)
}
