use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{BalanceError, Result};

/// Quantile `q` of `values` with linear interpolation between order statistics.
///
/// The virtual index is `q * (n - 1)`; fractional indices interpolate between
/// the two neighbouring order statistics. `values` is reordered in place.
pub fn quantile(values: &mut [f64], q: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(BalanceError::EmptyImage);
    }
    check_quantile(q)?;

    let n = values.len();
    let index = q * (n - 1) as f64;
    let k = (index.floor() as usize).min(n - 1);
    let t = index - k as f64;

    let (lo, hi) = order_statistic_pair(values, k);
    Ok(lerp(lo, hi, t))
}

/// Compute two quantiles over the same data.
///
/// Large buffers are split across two Rayon tasks, each selecting on its own
/// copy. Both quantiles are complete when this returns.
pub fn quantile_pair(values: &mut [f64], q_low: f64, q_high: f64) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(BalanceError::EmptyImage);
    }
    check_quantile(q_low)?;
    check_quantile(q_high)?;

    if values.len() >= PARALLEL_PIXEL_THRESHOLD {
        let mut copy = values.to_vec();
        let (low, high) = rayon::join(
            || quantile(values, q_low),
            || quantile(&mut copy, q_high),
        );
        Ok((low?, high?))
    } else {
        let low = quantile(values, q_low)?;
        let high = quantile(values, q_high)?;
        Ok((low, high))
    }
}

fn check_quantile(q: f64) -> Result<()> {
    if (0.0..=1.0).contains(&q) {
        Ok(())
    } else {
        Err(BalanceError::InvalidQuantile(q))
    }
}

/// The `k`-th and `(k+1)`-th smallest values (the latter clamped to the last element).
///
/// Uses `select_nth_unstable` for O(n) selection without a full sort.
fn order_statistic_pair(values: &mut [f64], k: usize) -> (f64, f64) {
    let (_, kth, upper) = values.select_nth_unstable_by(k, |a, b| a.total_cmp(b));
    let kth = *kth;
    let next = upper
        .iter()
        .copied()
        .min_by(|a, b| a.total_cmp(b))
        .unwrap_or(kth);
    (kth, next)
}

/// Two-sided lerp: exact at both endpoints and monotone in `t`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}
