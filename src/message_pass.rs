//! The two elementary passes both drivers are built from (spec §4.4 BP, §4.6 SDLP):
//! a factor-side pass (every factor's kernel reducing its current incoming
//! variable-to-factor messages into new factor-to-variable messages) and a
//! variable-side pass (every variable's evidence plus its incident factor-to-variable
//! messages reduced into a total belief, then split back out per edge). BPD calls
//! these once per iteration on its own message arrays; SDLPD calls them on trial
//! points of its accelerated-gradient iterate (spec §9 "shared scaffolding").

use crate::arena::ArenaState;
use crate::executor::Executor;
use crate::fgr::Fgr;
use crate::ids::VarId;
use crate::kernel::{self, variable_update};
use crate::numerics::log_sum_exp_temp;

/// Computes every edge's new `f2v` message from the given `v2f` array (which need not
/// be `arena.v2f` — SDLP calls this on a trial point) and `log_potentials` (normally
/// `arena.log_potentials_override`, spec §4.2).
pub fn factor_pass(
    fgr: &Fgr,
    v2f: &[f64],
    executor: Executor,
    temperature: f64,
    log_potentials: &[f64],
) -> Vec<f64> {
    let mut buf = vec![0.0; v2f.len()];
    for (gid, group) in fgr.groups() {
        let results = executor.map_range(group.num_factors(), |fi| {
            let edges = &group.edge_ids[fi];
            let incoming: Vec<&[f64]> = edges.iter().map(|&e| &v2f[fgr.edge_range(e)]).collect();
            let table = fgr
                .table_range(gid, fi)
                .map(|r| &log_potentials[r])
                .unwrap_or(&[][..]);
            kernel::update_f2v(group, fi, &incoming, temperature, table)
        });
        for (fi, per_slot) in results.into_iter().enumerate() {
            let edges = &group.edge_ids[fi];
            for (slot, values) in per_slot.into_iter().enumerate() {
                buf[fgr.edge_range(edges[slot])].copy_from_slice(&values);
            }
        }
    }
    buf
}

/// Σ over factors of the T-smoothed max of each factor's local scores (spec §4.5
/// `D_T(μ)`'s factor term): for factor `f`, `logsumexp_T` over every joint
/// configuration of its scope of `score[c]`, where `score[c]` is the same quantity
/// `update_f2v` reduces over (the factor's table plus the scope's incoming `v2f`).
/// Computed without re-deriving that reduction: for any one slot `s` of the factor,
/// `logsumexp_T(v2f_s + f2v_s)` equals the same total, since `f2v_s[c_s]` is already
/// `logsumexp_T` over every *other* slot's configuration of `score` (spec §4.3).
pub fn factor_log_partition(
    fgr: &Fgr,
    v2f: &[f64],
    executor: Executor,
    temperature: f64,
    log_potentials: &[f64],
) -> f64 {
    let mut total = 0.0;
    for (gid, group) in fgr.groups() {
        let partials = executor.map_range(group.num_factors(), |fi| {
            let edges = &group.edge_ids[fi];
            let incoming: Vec<&[f64]> = edges.iter().map(|&e| &v2f[fgr.edge_range(e)]).collect();
            let table = fgr
                .table_range(gid, fi)
                .map(|r| &log_potentials[r])
                .unwrap_or(&[][..]);
            let f2v = kernel::update_f2v(group, fi, &incoming, temperature, table);
            let combined: Vec<f64> = incoming[0]
                .iter()
                .zip(f2v[0].iter())
                .map(|(&a, &b)| a + b)
                .collect();
            log_sum_exp_temp(&combined, temperature)
        });
        total += partials.into_iter().sum::<f64>();
    }
    total
}

/// Every variable's total log-belief (evidence plus every incident `f2v`), given the
/// `f2v` array and the arena's evidence.
pub fn variable_totals(fgr: &Fgr, f2v: &[f64], arena: &ArenaState) -> Vec<Vec<f64>> {
    (0..fgr.num_vars())
        .map(|v| {
            let var = VarId::from(v);
            let edges = fgr.edges_of_var(var);
            let incoming: Vec<&[f64]> = edges.iter().map(|&e| &f2v[fgr.edge_range(e)]).collect();
            variable_update::total_belief(arena.evidence_of(fgr, var), &incoming)
        })
        .collect()
}

/// Every edge's new `v2f` message: its variable's total belief with that edge's own
/// `f2v` contribution removed (spec §4.3 variable-side leave-one-out).
pub fn variable_pass(fgr: &Fgr, f2v: &[f64], arena: &ArenaState) -> Vec<f64> {
    let totals = variable_totals(fgr, f2v, arena);
    let mut buf = vec![0.0; f2v.len()];
    for v in 0..fgr.num_vars() {
        let var = VarId::from(v);
        let total = &totals[v];
        for &e in fgr.edges_of_var(var) {
            let this = &f2v[fgr.edge_range(e)];
            let out = variable_update::v2f_excluding(total, this);
            buf[fgr.edge_range(e)].copy_from_slice(&out);
        }
    }
    buf
}
