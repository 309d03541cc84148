//! Numerically-stable reductions shared by every kernel and by the SDLP driver's
//! objective computation (spec §4.3, §9 "Numerics"). Grounded in the teacher's
//! `logsumexp`/`log_normalize_in_place` helpers (`radiate-pgm/src/factor/discrete.rs`),
//! generalized to take a temperature so the same call sites serve both BP (sum-product
//! at `T>0`, max-product at `T=0`) and SDLP (smoothed dual at `T>0`, subgradient at
//! `T=0`).

/// Product of a shape's dimensions, saturating rather than overflowing.
#[inline]
pub fn prod_usize(dims: &[usize]) -> usize {
    dims.iter().fold(1usize, |acc, &d| acc.saturating_mul(d))
}

/// Max-shifted log-sum-exp: `log(sum(exp(x_i)))`, stable for large magnitudes and
/// well-defined when every entry is `-inf` (returns `-inf`).
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let m = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if m.is_infinite() && m.is_sign_negative() {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = values.iter().map(|&x| (x - m).exp()).sum();
    m + sum.ln()
}

/// Temperature-interpolated reduction: `T * log(sum(exp(x_i / T)))`.
///
/// `T = 0` degenerates to `max(x_i)` (max-product / subgradient mode); `T -> inf`
/// approaches the arithmetic mean. Negative temperatures are a caller error
/// (`FactorFlowError::BadTemperature`) and are rejected upstream in the drivers, not
/// here — this function is also called from SDLP's `logsumexp_temp = 0` path, which is
/// a valid, documented degeneration rather than an error (spec §9 open question).
pub fn log_sum_exp_temp(values: &[f64], temperature: f64) -> f64 {
    if temperature <= 0.0 {
        return values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    }
    let scaled: Vec<f64> = values.iter().map(|&x| x / temperature).collect();
    temperature * log_sum_exp(&scaled)
}

/// `T * log(1 + exp(x / T))`, the temperature-smoothed softplus used by the OR/AND
/// kernels' "at least one on"/"all on" contribution (spec §4.3). At `T = 0` this is
/// `max(0, x)`.
pub fn softplus_temp(x: f64, temperature: f64) -> f64 {
    if temperature <= 0.0 {
        return x.max(0.0);
    }
    log_sum_exp_temp(&[0.0, x], temperature)
}

/// Argmax with deterministic tie-break to the lowest index (spec §4.7, §8
/// determinism property). Panics on an empty slice or all-NaN input — both are
/// caller bugs, not recoverable runtime conditions.
pub fn argmax_ties_lowest(values: &[f64]) -> usize {
    assert!(!values.is_empty(), "argmax_ties_lowest: empty slice");
    let mut best_idx = 0;
    let mut best_val = f64::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best_idx = i;
        }
    }
    best_idx
}

/// Softmax at the given temperature, returned as a probability simplex. Used by
/// `get_marginals` (spec §4.7) and by the variable-side SDLP gradient (spec §4.3).
pub fn softmax_temp(values: &[f64], temperature: f64) -> Vec<f64> {
    let t = if temperature <= 0.0 { 1.0 } else { temperature };
    let m = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|&x| ((x - m) / t).exp()).collect();
    let z: f64 = exps.iter().sum();
    if z == 0.0 {
        let u = 1.0 / values.len() as f64;
        return vec![u; values.len()];
    }
    exps.into_iter().map(|e| e / z).collect()
}
