//! SDLP's dual gradient (spec §4.6), built directly on the BP kernels' factor-side
//! reductions rather than re-deriving them: the smoothed dual's gradient with respect
//! to the message on edge `(f, v)` is the difference between the variable-side
//! pseudo-marginal and the factor-side pseudo-marginal for that edge, `q_v - q_f`,
//! both taken at the same temperature. `q_f` is exactly the softmax of the quantity
//! the enumerated/pairwise/logical `update_f2v` kernels already compute per slot, so
//! this module adds no new reduction — only the subtraction spec §4.6 calls for.

use crate::numerics::softmax_temp;

/// `variable_total` is this variable's full log-belief (evidence + every incident
/// edge's message, spec §4.3 `total_belief`); `factor_marginal` is the same-length
/// per-slot reduction a factor kernel produced for this edge. Both are softmaxed at
/// `temperature` and subtracted elementwise.
pub fn edge_gradient(variable_total: &[f64], factor_marginal: &[f64], temperature: f64) -> Vec<f64> {
    let q_v = softmax_temp(variable_total, temperature);
    let q_f = softmax_temp(factor_marginal, temperature);
    q_v.iter().zip(q_f.iter()).map(|(&a, &b)| a - b).collect()
}
