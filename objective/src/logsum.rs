//! Numerically stable sums in log space.

/// Computes `ln(Σ exp(v))` without overflowing.
///
/// # Arguments
/// * `values` - The log-domain values.
///
/// # Returns
/// The log of the sum, `-inf` for an empty slice.
pub fn log_sum(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == f64::NEG_INFINITY || max.is_nan() {
        return max;
    }
    if max == f64::INFINITY {
        return f64::INFINITY;
    }

    let sum: f64 = values.iter().map(|v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Replaces every log-domain value by its normalized probability.
///
/// # Arguments
/// * `values` - The log-domain values, overwritten with `exp(v - log_sum(values))`.
///
/// # Returns
/// The log of the sum before normalization.
pub fn log_sum_normalise(values: &mut [f64]) -> f64 {
    let norm = log_sum(values);

    for v in values.iter_mut() {
        *v = (*v - norm).exp();
    }

    norm
}
