//! Pairwise factor kernel (spec §4.3): the `k1 x k2` matrix specialization of the
//! enumerated kernel, reducing each side with a single `O(k1 * k2)` pass instead of
//! the bucket-scan the generic kernel needs for arbitrary arity.

use crate::fgr::DenseTable;
use crate::numerics::log_sum_exp_temp;

/// `table.dims == [k1, k2]`. `incoming = [v2f for var0 (len k1), v2f for var1 (len k2)]`.
/// Returns `[f2v for var0 (len k1), f2v for var1 (len k2)]`.
pub fn update_f2v(table: &DenseTable, incoming: [&[f64]; 2], temperature: f64) -> [Vec<f64>; 2] {
    let (k1, k2) = (table.dims[0], table.dims[1]);
    let m0 = incoming[0];
    let m1 = incoming[1];

    let mut out0 = Vec::with_capacity(k1);
    for a in 0..k1 {
        let row = &table.log_potentials[a * k2..(a + 1) * k2];
        let scores: Vec<f64> = (0..k2).map(|b| row[b] + m1[b]).collect();
        out0.push(log_sum_exp_temp(&scores, temperature));
    }

    let mut out1 = Vec::with_capacity(k2);
    for b in 0..k2 {
        let scores: Vec<f64> = (0..k1)
            .map(|a| table.log_potentials[a * k2 + b] + m0[a])
            .collect();
        out1.push(log_sum_exp_temp(&scores, temperature));
    }

    [out0, out1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(k1: usize, k2: usize, values: Vec<f64>) -> DenseTable {
        DenseTable {
            dims: vec![k1, k2],
            strides: vec![k2, 1],
            log_potentials: values,
        }
    }

    #[test]
    fn uniform_messages_reduce_to_row_or_col_logsumexp() {
        let t = table(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let m0 = [0.0, 0.0];
        let m1 = [0.0, 0.0, 0.0];
        let [out0, out1] = update_f2v(&t, [&m0, &m1], 1.0);
        assert!((out0[0] - log_sum_exp_temp(&[0.0, 1.0, 2.0], 1.0)).abs() < 1e-9);
        assert!((out0[1] - log_sum_exp_temp(&[3.0, 4.0, 5.0], 1.0)).abs() < 1e-9);
        assert!((out1[0] - log_sum_exp_temp(&[0.0, 3.0], 1.0)).abs() < 1e-9);
        assert!((out1[2] - log_sum_exp_temp(&[2.0, 5.0], 1.0)).abs() < 1e-9);
    }

    #[test]
    fn max_product_picks_best_cell() {
        let t = table(2, 2, vec![0.0, 5.0, 3.0, 1.0]);
        let m0 = [0.0, 0.0];
        let m1 = [0.0, 0.0];
        let [out0, _] = update_f2v(&t, [&m0, &m1], 0.0);
        assert_eq!(out0, vec![5.0, 3.0]);
    }
}
