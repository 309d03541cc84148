//! FACADE (spec §4.5): the single entry point the rest of the world is expected to
//! use. `build_inferer` compiles nothing itself — it takes an already-compiled `Fgr`
//! and a backend choice, and returns a closed `Inferer` enum (not a `dyn Trait`: there
//! are exactly two backends, spec §9) that owns its arena and dispatches `run`/decode
//! calls to the matching driver.

use crate::arena::ArenaState;
use crate::bp::BpDriver;
use crate::config::{BpConfig, SdlpConfig};
use crate::decode;
use crate::error::Result;
use crate::fgr::Fgr;
use crate::sdlp::SdlpDriver;

/// Which driver `build_inferer` should wire up.
pub enum Backend {
    Bp(BpConfig),
    Sdlp(SdlpConfig),
}

/// A compiled graph bound to one inference backend and its live arena.
pub enum Inferer {
    Bp {
        fgr: Fgr,
        arena: ArenaState,
        config: BpConfig,
    },
    Sdlp {
        fgr: Fgr,
        arena: ArenaState,
        config: SdlpConfig,
    },
}

/// Builds an `Inferer` for `fgr` with the chosen `backend`, allocating and
/// zero-initializing its arena (spec §4.5).
pub fn build_inferer(fgr: Fgr, backend: Backend) -> Inferer {
    match backend {
        Backend::Bp(config) => {
            let arena = BpDriver::init(&fgr);
            Inferer::Bp { fgr, arena, config }
        }
        Backend::Sdlp(config) => {
            let arena = SdlpDriver::init(&fgr);
            Inferer::Sdlp { fgr, arena, config }
        }
    }
}

impl Inferer {
    pub fn fgr(&self) -> &Fgr {
        match self {
            Inferer::Bp { fgr, .. } => fgr,
            Inferer::Sdlp { fgr, .. } => fgr,
        }
    }

    fn arena(&self) -> &ArenaState {
        match self {
            Inferer::Bp { arena, .. } => arena,
            Inferer::Sdlp { arena, .. } => arena,
        }
    }

    pub fn set_group_evidence(&mut self, group_name: &str, values: &[f64]) -> Result<()> {
        match self {
            Inferer::Bp { fgr, arena, .. } => arena.set_group_evidence(fgr, group_name, values),
            Inferer::Sdlp { fgr, arena, .. } => arena.set_group_evidence(fgr, group_name, values),
        }
    }

    /// Overwrites a factor group's log-potential table for this run (spec §4.2
    /// `log_potentials_override`).
    pub fn set_group_log_potentials(&mut self, group_name: &str, values: &[f64]) -> Result<()> {
        match self {
            Inferer::Bp { fgr, arena, .. } => arena.set_group_log_potentials(fgr, group_name, values),
            Inferer::Sdlp { fgr, arena, .. } => arena.set_group_log_potentials(fgr, group_name, values),
        }
    }

    /// Runs `num_iters` of the selected driver in place at `temperature`, with BP's
    /// `damping` ignored by the SDLP backend (spec §6's per-backend `run` signatures).
    pub fn run(&mut self, num_iters: usize, temperature: f64, damping: f64) -> Result<()> {
        match self {
            Inferer::Bp { fgr, arena, config } => {
                BpDriver::run(fgr, arena, config, num_iters, temperature, damping)
            }
            Inferer::Sdlp { fgr, arena, config } => {
                SdlpDriver::run(fgr, arena, config, num_iters, temperature)
            }
        }
    }

    pub fn decode_map_states(&self) -> Vec<usize> {
        match self {
            Inferer::Bp { fgr, arena, .. } => decode::decode_map_states(fgr, arena),
            Inferer::Sdlp { fgr, arena, .. } => decode::decode_map_states(fgr, arena),
        }
    }

    pub fn get_marginals(&self, temperature: f64) -> Vec<Vec<f64>> {
        decode::get_marginals(self.fgr(), self.arena(), temperature)
    }

    pub fn compute_energy(&self, assignment: &[usize]) -> f64 {
        decode::compute_energy(self.fgr(), self.arena(), assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor_spec::{FactorGroupSpec, PairwiseFactor, PairwiseFactorGroup, VarRef};
    use crate::variable::VariableGroup;

    fn two_var_fgr() -> Fgr {
        let vars = vec![VariableGroup::uniform("x", 2, 2).unwrap()];
        let groups = vec![FactorGroupSpec::Pairwise(PairwiseFactorGroup {
            name: "edge".into(),
            dims: (2, 2),
            factors: vec![PairwiseFactor {
                scope: (VarRef::new("x", 0), VarRef::new("x", 1)),
                log_potentials: vec![0.0, 0.0, 0.0, 5.0],
            }],
        })];
        Fgr::compile(&vars, groups).unwrap()
    }

    #[test]
    fn bp_backend_runs_and_decodes() {
        let fgr = two_var_fgr();
        let mut inferer = build_inferer(fgr, Backend::Bp(BpConfig::new()));
        inferer.run(20, 1.0, 0.0).unwrap();
        assert_eq!(inferer.decode_map_states(), vec![1, 1]);
    }

    #[test]
    fn sdlp_backend_runs_and_decodes() {
        let fgr = two_var_fgr();
        let mut inferer = build_inferer(fgr, Backend::Sdlp(SdlpConfig::new()));
        inferer.run(200, 0.5, 0.0).unwrap();
        assert_eq!(inferer.decode_map_states(), vec![1, 1]);
    }

    #[test]
    fn evidence_update_rejects_unknown_group() {
        let fgr = two_var_fgr();
        let mut inferer = build_inferer(fgr, Backend::Bp(BpConfig::default()));
        assert!(inferer.set_group_evidence("nope", &[0.0, 0.0]).is_err());
    }

    #[test]
    fn log_potentials_update_rejects_unknown_group() {
        let fgr = two_var_fgr();
        let mut inferer = build_inferer(fgr, Backend::Bp(BpConfig::default()));
        assert!(inferer.set_group_log_potentials("nope", &[0.0, 0.0, 0.0, 0.0]).is_err());
    }
}
