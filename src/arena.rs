//! ARENA (spec §4.2): the mutable, per-run state a driver iterates over. Everything
//! here is flat `Vec<f64>` storage sized from the compiled `Fgr`, in the spirit of the
//! teacher's `radiate-core::domain::arena::Arena<T>` slab — except this arena holds
//! one run's numeric working set rather than a generational node pool, so it is
//! rebuilt fresh per `init` rather than reused across insert/remove cycles.

use crate::error::{FactorFlowError, Result};
use crate::fgr::Fgr;
use crate::ids::VarId;

/// Per-run mutable state: messages, evidence, and (for SDLP) optimizer auxiliaries.
///
/// `f2v`/`v2f` are flat over `Fgr::edge_range`: edge `e`'s slice is
/// `arena.f2v[fgr.edge_range(e)]`. `evidence` is flat over `Fgr::var_state_range`.
pub struct ArenaState {
    pub f2v: Vec<f64>,
    pub v2f: Vec<f64>,
    pub evidence: Vec<f64>,
    /// Per-factor log-potential tables, flat over `Fgr::table_range`/`Fgr::group_table_range`
    /// (spec §4.2). Defaults to the graph's compiled baseline (`Fgr::baseline_log_potentials`)
    /// until overridden via `set_group_log_potentials`. Logical (OR/AND) factors have no
    /// table and so contribute nothing to this array.
    pub log_potentials_override: Vec<f64>,
    /// SDLP-only: Nesterov momentum buffer, same shape as `f2v`.
    pub momentum: Vec<f64>,
    /// SDLP-only: previous iteration's gradient, same shape as `f2v`.
    pub prev_grad: Vec<f64>,
    /// SDLP-only: the step size in effect for the run (spec §4.6, §9 open question).
    pub step: f64,
}

impl ArenaState {
    /// Builds a zero-initialized arena: all messages at `0.0` (uniform log-belief),
    /// all evidence at `0.0` (uninformative prior), matching spec §4.2 `init`.
    pub fn init(fgr: &Fgr) -> Self {
        let total_msg = fgr.total_message_len();
        let total_state = fgr.total_var_state_len();
        Self {
            f2v: vec![0.0; total_msg],
            v2f: vec![0.0; total_msg],
            evidence: vec![0.0; total_state],
            log_potentials_override: fgr.baseline_log_potentials(),
            momentum: vec![0.0; total_msg],
            prev_grad: vec![0.0; total_msg],
            step: 0.0,
        }
    }

    pub fn evidence_of<'a>(&'a self, fgr: &Fgr, var: VarId) -> &'a [f64] {
        &self.evidence[fgr.var_state_range(var)]
    }

    pub fn evidence_of_mut<'a>(&'a mut self, fgr: &Fgr, var: VarId) -> &'a mut [f64] {
        &mut self.evidence[fgr.var_state_range(var)]
    }

    /// Overwrites the evidence for every variable in `group_name`, row-major in
    /// variable order within the group (spec §6 evidence update). `values` must be
    /// exactly `sum(num_states)` over the group's variables.
    pub fn set_group_evidence(&mut self, fgr: &Fgr, group_name: &str, values: &[f64]) -> Result<()> {
        let range = fgr
            .var_range(group_name)
            .ok_or_else(|| FactorFlowError::unknown_variable_group(group_name))?;
        let expected: usize = range.clone().map(|v| fgr.var_num_states[v]).sum();
        if values.len() != expected {
            return Err(FactorFlowError::shape(format!(
                "evidence update for group '{}': expected {} values, got {}",
                group_name,
                expected,
                values.len()
            )));
        }
        let mut cursor = 0usize;
        for v in range {
            let k = fgr.var_num_states[v];
            let var = VarId::from(v);
            self.evidence_of_mut(fgr, var)
                .copy_from_slice(&values[cursor..cursor + k]);
            cursor += k;
        }
        Ok(())
    }

    /// Overwrites every factor's log-potential table in `group_name`, flattened in
    /// factor order, replacing the graph's compiled baseline for this arena (spec
    /// §4.2 `log_potentials_override`). Mirrors `set_group_evidence`'s validation.
    pub fn set_group_log_potentials(
        &mut self,
        fgr: &Fgr,
        group_name: &str,
        values: &[f64],
    ) -> Result<()> {
        let range = match fgr.group_table_range(group_name) {
            None => return Err(FactorFlowError::unknown_factor_group(group_name)),
            Some(None) => {
                return Err(FactorFlowError::unsupported_factor_type(format!(
                    "factor group '{}' has no log-potential table to override (OR/AND groups are purely structural)",
                    group_name
                )));
            }
            Some(Some(range)) => range,
        };
        if values.len() != range.len() {
            return Err(FactorFlowError::shape(format!(
                "log-potentials update for group '{}': expected {} values, got {}",
                group_name,
                range.len(),
                values.len()
            )));
        }
        self.log_potentials_override[range].copy_from_slice(values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor_spec::{FactorGroupSpec, PairwiseFactor, PairwiseFactorGroup, VarRef};
    use crate::variable::VariableGroup;

    fn tiny_fgr() -> Fgr {
        let vars = vec![VariableGroup::uniform("x", 2, 2).unwrap()];
        let groups = vec![FactorGroupSpec::Pairwise(PairwiseFactorGroup {
            name: "edge".into(),
            dims: (2, 2),
            factors: vec![PairwiseFactor {
                scope: (VarRef::new("x", 0), VarRef::new("x", 1)),
                log_potentials: vec![0.0, 0.0, 0.0, 0.0],
            }],
        })];
        Fgr::compile(&vars, groups).unwrap()
    }

    #[test]
    fn init_is_all_zero() {
        let fgr = tiny_fgr();
        let arena = ArenaState::init(&fgr);
        assert!(arena.f2v.iter().all(|&x| x == 0.0));
        assert!(arena.v2f.iter().all(|&x| x == 0.0));
        assert!(arena.evidence.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn set_group_evidence_roundtrips() {
        let fgr = tiny_fgr();
        let mut arena = ArenaState::init(&fgr);
        arena.set_group_evidence(&fgr, "x", &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(arena.evidence_of(&fgr, VarId::from(0usize)), &[1.0, 2.0]);
        assert_eq!(arena.evidence_of(&fgr, VarId::from(1usize)), &[3.0, 4.0]);
    }

    #[test]
    fn set_group_evidence_rejects_unknown_group() {
        let fgr = tiny_fgr();
        let mut arena = ArenaState::init(&fgr);
        assert!(arena.set_group_evidence(&fgr, "nope", &[0.0, 0.0]).is_err());
    }

    #[test]
    fn set_group_evidence_rejects_wrong_length() {
        let fgr = tiny_fgr();
        let mut arena = ArenaState::init(&fgr);
        assert!(arena.set_group_evidence(&fgr, "x", &[0.0]).is_err());
    }

    #[test]
    fn log_potentials_override_defaults_to_baseline() {
        let fgr = tiny_fgr();
        let arena = ArenaState::init(&fgr);
        assert_eq!(arena.log_potentials_override, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn set_group_log_potentials_overwrites_baseline() {
        let fgr = tiny_fgr();
        let mut arena = ArenaState::init(&fgr);
        arena
            .set_group_log_potentials(&fgr, "edge", &[1.0, 2.0, 3.0, 4.0])
            .unwrap();
        assert_eq!(arena.log_potentials_override, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn set_group_log_potentials_rejects_unknown_group() {
        let fgr = tiny_fgr();
        let mut arena = ArenaState::init(&fgr);
        assert!(arena
            .set_group_log_potentials(&fgr, "nope", &[0.0, 0.0, 0.0, 0.0])
            .is_err());
    }

    #[test]
    fn set_group_log_potentials_rejects_wrong_length() {
        let fgr = tiny_fgr();
        let mut arena = ArenaState::init(&fgr);
        assert!(arena.set_group_log_potentials(&fgr, "edge", &[0.0]).is_err());
    }

    #[test]
    fn set_group_log_potentials_rejects_logical_groups() {
        use crate::factor_spec::{ANDFactorGroup, FactorGroupSpec, LogicalFactor};
        let vars = vec![VariableGroup::uniform("b", 2, 3).unwrap()];
        let groups = vec![FactorGroupSpec::And(ANDFactorGroup {
            name: "gate".into(),
            factors: vec![LogicalFactor {
                parents: vec![VarRef::new("b", 0), VarRef::new("b", 1)],
                child: VarRef::new("b", 2),
            }],
        })];
        let fgr = Fgr::compile(&vars, groups).unwrap();
        let mut arena = ArenaState::init(&fgr);
        assert!(arena.set_group_log_potentials(&fgr, "gate", &[0.0]).is_err());
    }
}
