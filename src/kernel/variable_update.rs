//! Variable-side kernel (spec §4.3): type-agnostic since every factor kind connects
//! to a variable the same way — a plain additive combination of evidence and incident
//! `f2v` messages. Shared by the BP driver's `v2f` step and by belief/marginal
//! readout.

/// `evidence` and each entry of `incoming` (one slice per incident edge) are all the
/// same length (`num_states` of the variable). Returns the variable's total log-belief
/// per state: `evidence + sum(incoming)`.
pub fn total_belief(evidence: &[f64], incoming: &[&[f64]]) -> Vec<f64> {
    let k = evidence.len();
    let mut total = evidence.to_vec();
    for msg in incoming {
        debug_assert_eq!(msg.len(), k);
        for a in 0..k {
            total[a] += msg[a];
        }
    }
    total
}

/// The outgoing `v2f` message to one specific incident edge: the variable's total
/// belief with that edge's own contribution removed (spec §4.3 leave-one-out for the
/// variable side — exact, since this reduction is a plain sum rather than a
/// log-sum-exp).
pub fn v2f_excluding(total: &[f64], this_edge_f2v: &[f64]) -> Vec<f64> {
    total
        .iter()
        .zip(this_edge_f2v.iter())
        .map(|(&t, &m)| t - m)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_belief_sums_evidence_and_incoming() {
        let evidence = [1.0, 2.0];
        let m1 = [0.5, 0.5];
        let m2 = [1.0, -1.0];
        let total = total_belief(&evidence, &[&m1, &m2]);
        assert_eq!(total, vec![2.5, 1.5]);
    }

    #[test]
    fn v2f_excluding_removes_own_contribution() {
        let total = [2.5, 1.5];
        let own = [0.5, 0.5];
        assert_eq!(v2f_excluding(&total, &own), vec![2.0, 1.0]);
    }
}
