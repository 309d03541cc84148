//! BPD — the loopy belief propagation driver (spec §4.4). Synchronous: every edge's
//! new `f2v` and `v2f` messages for iteration `t+1` are computed entirely from
//! iteration `t`'s arena, then written back together with damping, so there is no
//! ordering dependence within an iteration (spec §5).

use crate::arena::ArenaState;
use crate::config::BpConfig;
use crate::error::{FactorFlowError, Result};
use crate::fgr::Fgr;
use crate::message_pass;

pub struct BpDriver;

impl BpDriver {
    pub fn init(fgr: &Fgr) -> ArenaState {
        ArenaState::init(fgr)
    }

    /// Runs `num_iters` synchronous BP sweeps in place at the given `temperature`
    /// (`>= 0`) and `damping` (`[0, 1)`), validated up front (spec §7) before the arena
    /// is touched.
    #[tracing::instrument(skip(fgr, arena, config), fields(num_iters, damping, temperature))]
    pub fn run(
        fgr: &Fgr,
        arena: &mut ArenaState,
        config: &BpConfig,
        num_iters: usize,
        temperature: f64,
        damping: f64,
    ) -> Result<()> {
        if temperature < 0.0 {
            return Err(FactorFlowError::BadTemperature { temperature });
        }
        if !(0.0..1.0).contains(&damping) {
            return Err(FactorFlowError::BadDamping { damping });
        }

        for iter in 0..num_iters {
            let new_f2v = message_pass::factor_pass(
                fgr,
                &arena.v2f,
                config.executor(),
                temperature,
                &arena.log_potentials_override,
            );
            let new_v2f = message_pass::variable_pass(fgr, &arena.f2v, arena);

            for i in 0..arena.f2v.len() {
                arena.f2v[i] = damping * arena.f2v[i] + (1.0 - damping) * new_f2v[i];
            }
            for i in 0..arena.v2f.len() {
                arena.v2f[i] = damping * arena.v2f[i] + (1.0 - damping) * new_v2f[i];
            }
            tracing::trace!(iter, "bp sweep complete");
        }
        Ok(())
    }

    /// The unnormalized log-belief (evidence plus every incident `f2v`) for every
    /// variable, in variable-id order.
    pub fn get_beliefs(fgr: &Fgr, arena: &ArenaState) -> Vec<Vec<f64>> {
        message_pass::variable_totals(fgr, &arena.f2v, arena)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor_spec::{FactorGroupSpec, PairwiseFactor, PairwiseFactorGroup, VarRef};
    use crate::variable::VariableGroup;

    fn chain_fgr() -> Fgr {
        let vars = vec![VariableGroup::uniform("x", 2, 3).unwrap()];
        let groups = vec![FactorGroupSpec::Pairwise(PairwiseFactorGroup {
            name: "edges".into(),
            dims: (2, 2),
            factors: vec![
                PairwiseFactor {
                    scope: (VarRef::new("x", 0), VarRef::new("x", 1)),
                    log_potentials: vec![1.0, 0.0, 0.0, 1.0],
                },
                PairwiseFactor {
                    scope: (VarRef::new("x", 1), VarRef::new("x", 2)),
                    log_potentials: vec![1.0, 0.0, 0.0, 1.0],
                },
            ],
        })];
        Fgr::compile(&vars, groups).unwrap()
    }

    #[test]
    fn uniform_evidence_keeps_beliefs_symmetric() {
        let fgr = chain_fgr();
        let mut arena = BpDriver::init(&fgr);
        let config = BpConfig::new();
        BpDriver::run(&fgr, &mut arena, &config, 5, 1.0, 0.0).unwrap();
        let beliefs = BpDriver::get_beliefs(&fgr, &arena);
        for b in &beliefs {
            assert!((b[0] - b[1]).abs() < 1e-9);
        }
    }

    #[test]
    fn strong_evidence_dominates_belief() {
        let fgr = chain_fgr();
        let mut arena = BpDriver::init(&fgr);
        arena
            .set_group_evidence(&fgr, "x", &[10.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();
        let config = BpConfig::new();
        BpDriver::run(&fgr, &mut arena, &config, 10, 1.0, 0.0).unwrap();
        let beliefs = BpDriver::get_beliefs(&fgr, &arena);
        assert!(beliefs[0][0] > beliefs[0][1]);
    }

    #[test]
    fn damping_does_not_change_fixed_point() {
        let fgr = chain_fgr();
        let mut undamped = BpDriver::init(&fgr);
        let mut damped = BpDriver::init(&fgr);
        let config = BpConfig::new();
        BpDriver::run(&fgr, &mut undamped, &config, 30, 1.0, 0.0).unwrap();
        BpDriver::run(&fgr, &mut damped, &config, 60, 1.0, 0.5).unwrap();
        let b1 = BpDriver::get_beliefs(&fgr, &undamped);
        let b2 = BpDriver::get_beliefs(&fgr, &damped);
        for (x, y) in b1.iter().zip(b2.iter()) {
            assert!((x[0] - x[1] - (y[0] - y[1])).abs() < 1e-6);
        }
    }

    #[test]
    fn run_rejects_bad_temperature_and_damping() {
        let fgr = chain_fgr();
        let mut arena = BpDriver::init(&fgr);
        let config = BpConfig::new();
        assert!(BpDriver::run(&fgr, &mut arena, &config, 1, -1.0, 0.0).is_err());
        assert!(BpDriver::run(&fgr, &mut arena, &config, 1, 1.0, 1.0).is_err());
    }
}
