//! DEC — decoding and readout (spec §4.7): turning a converged (or in-progress)
//! arena into MAP states, marginal distributions, and the joint log-potential score
//! of a concrete assignment.

use crate::fgr::{FactorKind, Fgr};
use crate::ids::VarId;
use crate::message_pass;
use crate::numerics::{argmax_ties_lowest, softmax_temp};

/// One state index per variable, by the deterministic lowest-index tie-break
/// (spec §4.7, §8 determinism property).
pub fn decode_map_states(fgr: &Fgr, arena: &crate::arena::ArenaState) -> Vec<usize> {
    message_pass::variable_totals(fgr, &arena.f2v, arena)
        .iter()
        .map(|belief| argmax_ties_lowest(belief))
        .collect()
}

/// Per-variable marginal distribution (softmax of the total belief) at `temperature`.
pub fn get_marginals(fgr: &Fgr, arena: &crate::arena::ArenaState, temperature: f64) -> Vec<Vec<f64>> {
    message_pass::variable_totals(fgr, &arena.f2v, arena)
        .iter()
        .map(|belief| softmax_temp(belief, temperature))
        .collect()
}

/// The energy of a concrete assignment (spec §4.7): the negated sum of
/// `evidence[v, assignment[v]]` over every variable plus, over every factor, that
/// factor's log-potential (table lookup for enumerated/pairwise, using
/// `arena.log_potentials_override` rather than the graph's compiled baseline, spec
/// §4.2; `0.0`/`-inf` indicator for the logical OR/AND gates) at the states
/// `assignment` gives its scope. Lower is better. `assignment.len()` must equal
/// `fgr.num_vars()`.
pub fn compute_energy(fgr: &Fgr, arena: &crate::arena::ArenaState, assignment: &[usize]) -> f64 {
    let mut score = 0.0;
    for (v, &state) in assignment.iter().enumerate() {
        score += arena.evidence_of(fgr, VarId::from(v))[state];
    }
    for (gid, group) in fgr.groups() {
        for (fi, scope) in group.scopes.iter().enumerate() {
            let config: Vec<usize> = scope.iter().map(|&v| assignment[usize::from(v)]).collect();
            score += match group.kind {
                FactorKind::Enumerated | FactorKind::Pairwise => {
                    let table = group.table(fi);
                    let idx = table
                        .dims
                        .iter()
                        .zip(table.strides.iter())
                        .zip(config.iter())
                        .fold(0usize, |acc, ((_, &stride), &c)| acc + c * stride);
                    let offset = fgr.table_range(gid, fi).map(|r| r.start).unwrap_or(0);
                    arena.log_potentials_override[offset + idx]
                }
                FactorKind::Or => {
                    let child = *config.last().unwrap();
                    let parents_on = config[..config.len() - 1].iter().any(|&c| c == 1);
                    if (parents_on as usize) == child { 0.0 } else { f64::NEG_INFINITY }
                }
                FactorKind::And => {
                    let child = *config.last().unwrap();
                    let parents_all_on = config[..config.len() - 1].iter().all(|&c| c == 1);
                    if (parents_all_on as usize) == child { 0.0 } else { f64::NEG_INFINITY }
                }
            };
        }
    }
    -score
}

pub fn var_belief_at(fgr: &Fgr, arena: &crate::arena::ArenaState, var: VarId) -> Vec<f64> {
    message_pass::variable_totals(fgr, &arena.f2v, arena)
        .into_iter()
        .nth(usize::from(var))
        .expect("var out of range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bp::BpDriver;
    use crate::config::BpConfig;
    use crate::factor_spec::{FactorGroupSpec, PairwiseFactor, PairwiseFactorGroup, VarRef};
    use crate::variable::VariableGroup;

    fn two_var_fgr(log_potentials: Vec<f64>) -> Fgr {
        let vars = vec![VariableGroup::uniform("x", 2, 2).unwrap()];
        let groups = vec![FactorGroupSpec::Pairwise(PairwiseFactorGroup {
            name: "edge".into(),
            dims: (2, 2),
            factors: vec![PairwiseFactor {
                scope: (VarRef::new("x", 0), VarRef::new("x", 1)),
                log_potentials,
            }],
        })];
        Fgr::compile(&vars, groups).unwrap()
    }

    #[test]
    fn decode_picks_the_favored_joint_state() {
        let fgr = two_var_fgr(vec![0.0, 0.0, 0.0, 5.0]);
        let mut arena = BpDriver::init(&fgr);
        let config = BpConfig::new();
        BpDriver::run(&fgr, &mut arena, &config, 20, 1.0, 0.0).unwrap();
        assert_eq!(decode_map_states(&fgr, &arena), vec![1, 1]);
    }

    #[test]
    fn marginals_sum_to_one_per_variable() {
        let fgr = two_var_fgr(vec![1.0, 0.0, 0.0, 1.0]);
        let arena = BpDriver::init(&fgr);
        let marginals = get_marginals(&fgr, &arena, 1.0);
        for m in marginals {
            let s: f64 = m.iter().sum();
            assert!((s - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn compute_energy_matches_negated_table_lookup() {
        let fgr = two_var_fgr(vec![0.1, 0.2, 0.3, 0.4]);
        let arena = BpDriver::init(&fgr);
        assert_eq!(compute_energy(&fgr, &arena, &[0, 0]), -0.1);
        assert_eq!(compute_energy(&fgr, &arena, &[0, 1]), -0.2);
        assert_eq!(compute_energy(&fgr, &arena, &[1, 0]), -0.3);
        assert_eq!(compute_energy(&fgr, &arena, &[1, 1]), -0.4);
    }

    #[test]
    fn compute_energy_includes_the_evidence_term() {
        // spec §8 scenario 1's worked example: pairwise log_pot [[1,-1],[-1,1]],
        // evidence a:[0.1,0], b:[0,0.2], MAP (0,0), expected energy -1.1.
        let fgr = two_var_fgr(vec![1.0, -1.0, -1.0, 1.0]);
        let mut arena = BpDriver::init(&fgr);
        arena.set_group_evidence(&fgr, "x", &[0.1, 0.0, 0.0, 0.2]).unwrap();
        assert!((compute_energy(&fgr, &arena, &[0, 0]) - (-1.1)).abs() < 1e-9);
    }

    #[test]
    fn compute_energy_additive_constant_invariance() {
        let fgr_a = two_var_fgr(vec![0.1, 0.2, 0.3, 0.4]);
        let fgr_b = two_var_fgr(vec![1.1, 1.2, 1.3, 1.4]);
        let arena_a = BpDriver::init(&fgr_a);
        let arena_b = BpDriver::init(&fgr_b);
        let diff_a = compute_energy(&fgr_a, &arena_a, &[1, 1]) - compute_energy(&fgr_a, &arena_a, &[0, 0]);
        let diff_b = compute_energy(&fgr_b, &arena_b, &[1, 1]) - compute_energy(&fgr_b, &arena_b, &[0, 0]);
        assert!((diff_a - diff_b).abs() < 1e-9);
    }
}
