//! Shared leave-one-out scaffolding for the OR and AND logical factor kernels
//! (spec §4.3): `n` binary parents and one binary child, a hard deterministic gate,
//! reduced in `O(n)` rather than by enumerating `2^(n+1)` configurations.
//!
//! A logical gate is parameterized by its `dominant` state `d in {0, 1}`: the state
//! that, if held by *any* parent, forces the child to `d`; the child is the opposite
//! `recessive` state `r = 1 - d` only when every parent holds `r`. OR is `d = 1`;
//! AND is `d = 0`.

use crate::numerics::log_sum_exp_temp;

/// `T * log(exp(total/T) - exp(subtrahend/T))`, valid whenever `subtrahend <= total`
/// in the underlying linear-domain sense (guaranteed here since `total` is always a
/// reduction over a superset containing the `subtrahend` configuration). Numerically
/// stable since the ratio this computes from is always in `(0, 1]`.
fn log_complement_temp(total: f64, subtrahend: f64, temperature: f64) -> f64 {
    if temperature <= 0.0 {
        unreachable!("log_complement_temp is the T > 0 branch only");
    }
    let ratio = ((subtrahend - total) / temperature).exp();
    if ratio >= 1.0 {
        return f64::NEG_INFINITY;
    }
    total + temperature * (1.0 - ratio).ln()
}

/// Reduction over every parent configuration with *at least one* parent at `dominant`,
/// summing `Σ v2f_i(config_i)` across that subset (spec §4.3 leave-one-out).
fn exclude_all_recessive(msgs: &[[f64; 2]], dominant: usize, temperature: f64) -> f64 {
    let recessive = 1 - dominant;
    let z_all_recessive: f64 = msgs.iter().map(|m| m[recessive]).sum();

    if temperature <= 0.0 {
        let gains: Vec<f64> = msgs.iter().map(|m| m[dominant] - m[recessive]).collect();
        let positive_sum: f64 = gains.iter().filter(|&&g| g > 0.0).sum();
        if gains.iter().any(|&g| g > 0.0) {
            return z_all_recessive + positive_sum;
        }
        let best = gains.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        return z_all_recessive + best;
    }

    let total: f64 = msgs
        .iter()
        .map(|m| log_sum_exp_temp(m, temperature))
        .sum();
    log_complement_temp(total, z_all_recessive, temperature)
}

/// Computes every parent's and the child's outgoing `f2v` message for one logical
/// factor (spec §4.3). `msgs[i]` is parent `i`'s incoming `v2f` (`[state0, state1]`);
/// `child_v2f` is the child's incoming `v2f`.
pub fn gate_f2v(
    msgs: &[[f64; 2]],
    child_v2f: [f64; 2],
    dominant: usize,
    temperature: f64,
) -> (Vec<[f64; 2]>, [f64; 2]) {
    let recessive = 1 - dominant;
    let n = msgs.len();

    let z_all_recessive: f64 = msgs.iter().map(|m| m[recessive]).sum();
    let f2v_child = {
        let mut c = [0.0; 2];
        c[recessive] = z_all_recessive;
        c[dominant] = exclude_all_recessive(msgs, dominant, temperature);
        c
    };

    let lse_per_parent: Vec<f64> = msgs
        .iter()
        .map(|m| log_sum_exp_temp(m, temperature))
        .collect();
    let total_lse: f64 = lse_per_parent.iter().sum();

    let mut f2v_parents = Vec::with_capacity(n);
    for j in 0..n {
        let others: Vec<[f64; 2]> = msgs
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != j)
            .map(|(_, &m)| m)
            .collect();
        let s_other = total_lse - lse_per_parent[j];
        let z_other_all_recessive = z_all_recessive - msgs[j][recessive];

        let mut out = [0.0; 2];
        out[dominant] = child_v2f[dominant] + s_other;

        let at_least_one_other_dominant = if others.is_empty() {
            f64::NEG_INFINITY
        } else if temperature <= 0.0 {
            exclude_all_recessive(&others, dominant, 0.0)
        } else {
            log_complement_temp(s_other, z_other_all_recessive, temperature)
        };
        out[recessive] = log_sum_exp_temp(
            &[
                child_v2f[recessive] + z_other_all_recessive,
                child_v2f[dominant] + at_least_one_other_dominant,
            ],
            temperature,
        );
        f2v_parents.push(out);
    }

    (f2v_parents, f2v_child)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_with_uninformative_messages_is_symmetric() {
        let msgs = vec![[0.0, 0.0], [0.0, 0.0]];
        let child = [0.0, 0.0];
        let (parents, child_out) = gate_f2v(&msgs, child, 1, 1.0);
        assert!((child_out[0] - child_out[1]).abs() > 0.0); // 1 of 4 configs child=0, 3 of 4 child=1
        assert_eq!(parents.len(), 2);
    }

    #[test]
    fn and_child_all_parents_on_is_exact_sum() {
        let msgs = vec![[0.0, 2.0], [0.0, 3.0]];
        let child = [0.0, 0.0];
        let (_, child_out) = gate_f2v(&msgs, child, 0, 1.0);
        // recessive for AND is 0; child=1 only when both parents = 1.
        assert_eq!(child_out[1], 5.0);
    }
}
