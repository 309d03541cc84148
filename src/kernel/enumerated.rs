//! Enumerated factor kernel (spec §4.3): an arbitrary-arity factor with an explicit
//! dense log-potential table. Computes every slot's outgoing `f2v` message in one pass
//! over the table rather than the `n` independent passes a naive implementation would
//! need, by bucketing each flat configuration's score into every slot/value bucket it
//! touches as the table is scanned once.

use crate::fgr::DenseTable;
use crate::numerics::log_sum_exp_temp;

/// Decodes a flat row-major index back into per-slot digits, given `dims`/`strides`
/// from a [`DenseTable`].
fn decode(dims: &[usize], strides: &[usize], mut idx: usize) -> Vec<usize> {
    let mut config = vec![0usize; dims.len()];
    for i in 0..dims.len() {
        config[i] = idx / strides[i];
        idx -= config[i] * strides[i];
    }
    config
}

/// `incoming[s]` is the current `v2f` message for slot `s`, length `dims[s]`.
///
/// Returns one `f2v` message per slot, each of length `dims[s]`.
pub fn update_f2v(table: &DenseTable, incoming: &[&[f64]], temperature: f64) -> Vec<Vec<f64>> {
    let n = table.dims.len();
    debug_assert_eq!(incoming.len(), n);

    let mut buckets: Vec<Vec<Vec<f64>>> = table
        .dims
        .iter()
        .map(|&d| vec![Vec::new(); d])
        .collect();

    for (idx, &base) in table.log_potentials.iter().enumerate() {
        if base.is_infinite() && base.is_sign_negative() {
            continue;
        }
        let config = decode(&table.dims, &table.strides, idx);
        let other_sum: f64 = (0..n).map(|s| incoming[s][config[s]]).sum();
        let score = base + other_sum;
        for s in 0..n {
            buckets[s][config[s]].push(score - incoming[s][config[s]]);
        }
    }

    buckets
        .into_iter()
        .map(|slot_buckets| {
            slot_buckets
                .into_iter()
                .map(|values| {
                    if values.is_empty() {
                        f64::NEG_INFINITY
                    } else {
                        log_sum_exp_temp(&values, temperature)
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fgr::DenseTable;

    fn table_from(dims: Vec<usize>, values: Vec<f64>) -> DenseTable {
        let mut t = DenseTable {
            dims: dims.clone(),
            strides: vec![0; dims.len()],
            log_potentials: values,
        };
        let mut acc = 1usize;
        for i in (0..dims.len()).rev() {
            t.strides[i] = acc;
            acc *= dims[i];
        }
        t
    }

    #[test]
    fn single_variable_factor_passes_through_table() {
        let table = table_from(vec![3], vec![1.0, 2.0, 3.0]);
        let incoming: Vec<f64> = vec![0.0, 0.0, 0.0];
        let out = update_f2v(&table, &[&incoming], 1.0);
        assert_eq!(out[0], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn pairwise_equivalent_marginalizes_correctly() {
        // A 2x2 table acting like an XOR-reward factor: agree = 1.0, disagree = 0.0.
        let table = table_from(vec![2, 2], vec![1.0, 0.0, 0.0, 1.0]);
        let m0 = [0.0, 0.0];
        let m1 = [0.0, 0.0];
        let out = update_f2v(&table, &[&m0, &m1], 1.0);
        let expected = log_sum_exp_temp(&[1.0, 0.0], 1.0);
        assert!((out[0][0] - expected).abs() < 1e-9);
        assert!((out[0][1] - expected).abs() < 1e-9);
    }
}
