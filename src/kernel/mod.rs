//! KERN (spec §4.3): per-factor-type message kernels, dispatched by [`crate::fgr::FactorKind`].
//! Each submodule owns one kernel; [`update_f2v`] is the single dispatch point both
//! drivers (`bp`, `sdlp`) call through.

pub mod and_factor;
pub mod enumerated;
pub mod gradient;
mod logical;
pub mod or_factor;
pub mod pairwise;
pub mod variable_update;

use crate::fgr::{CompiledFactorGroup, DenseTable, FactorKind};

/// Computes every slot's outgoing `f2v` message for one factor, given its current
/// incoming `v2f` messages (one slice per slot, in scope order).
///
/// `log_potentials` is the factor's (possibly overridden, spec §4.2) flat table —
/// ignored for `Or`/`And` groups, which have no table. For `Or`/`And` groups the last
/// slot is the child; the rest are parents, in scope order.
pub fn update_f2v(
    group: &CompiledFactorGroup,
    factor: usize,
    incoming: &[&[f64]],
    temperature: f64,
    log_potentials: &[f64],
) -> Vec<Vec<f64>> {
    match group.kind {
        FactorKind::Enumerated => {
            let base = group.table(factor);
            let table = DenseTable {
                dims: base.dims.clone(),
                strides: base.strides.clone(),
                log_potentials: log_potentials.to_vec(),
            };
            enumerated::update_f2v(&table, incoming, temperature)
        }
        FactorKind::Pairwise => {
            let base = group.table(factor);
            let table = DenseTable {
                dims: base.dims.clone(),
                strides: base.strides.clone(),
                log_potentials: log_potentials.to_vec(),
            };
            let [out0, out1] = pairwise::update_f2v(&table, [incoming[0], incoming[1]], temperature);
            vec![out0, out1]
        }
        FactorKind::Or | FactorKind::And => {
            let n = incoming.len() - 1;
            let parent_msgs: Vec<[f64; 2]> = incoming[..n].iter().map(|m| [m[0], m[1]]).collect();
            let child_v2f = [incoming[n][0], incoming[n][1]];
            let (parents, child) = if group.kind == FactorKind::Or {
                or_factor::update_f2v(&parent_msgs, child_v2f, temperature)
            } else {
                and_factor::update_f2v(&parent_msgs, child_v2f, temperature)
            };
            let mut out: Vec<Vec<f64>> = parents.into_iter().map(|p| p.to_vec()).collect();
            out.push(child.to_vec());
            out
        }
    }
}
