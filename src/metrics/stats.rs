//! Numeric statistics helpers
//!
//! Shared by the analytics aggregator and the performance monitor. Every
//! ratio and average special-cases the empty denominator and returns 0.0,
//! so callers never see NaN or a panic.

/// Arithmetic mean; 0.0 on an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Arithmetic mean of integer samples; 0.0 on an empty slice
pub fn mean_u64(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<u64>() as f64 / values.len() as f64
}

/// Nearest-rank percentile over an unsorted slice: copies, sorts, indexes
/// at `floor(fraction * n)` clamped to the last element. 0.0 when empty.
pub fn percentile(values: &[u64], fraction: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let index = ((sorted.len() as f64 * fraction) as usize).min(sorted.len() - 1);
    sorted[index] as f64
}

/// Percentile rank of `value` within `values`: `count(x <= value) / N *
/// 100`. 0.0 when empty.
pub fn percentile_rank(value: f64, values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let at_or_below = values.iter().filter(|&&v| v <= value).count();
    at_or_below as f64 / values.len() as f64 * 100.0
}

/// End-to-end growth over an ordered series: `(last - first) / first *
/// 100`. 0.0 with fewer than two points or a zero first point.
pub fn growth_rate(series: &[u64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let first = series[0];
    let last = series[series.len() - 1];
    if first == 0 {
        return 0.0;
    }
    (last as f64 - first as f64) / first as f64 * 100.0
}

/// Mean per-step fractional growth over an ordered series. Steps from a
/// zero value contribute nothing; 0.0 with fewer than two points.
pub fn average_step_growth(series: &[u64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for window in series.windows(2) {
        let (prev, curr) = (window[0], window[1]);
        if prev > 0 {
            total += (curr as f64 - prev as f64) / prev as f64;
        }
    }
    total / (series.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_return_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean_u64(&[]), 0.0);
        assert_eq!(percentile(&[], 0.95), 0.0);
        assert_eq!(percentile_rank(5.0, &[]), 0.0);
        assert_eq!(growth_rate(&[]), 0.0);
        assert_eq!(average_step_growth(&[]), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean_u64(&[10, 20]), 15.0);
    }

    #[test]
    fn test_percentile_nearest_rank() {
        let values: Vec<u64> = (1..=100).collect();
        // floor(100 * 0.9) = index 90 → value 91
        assert_eq!(percentile(&values, 0.9), 91.0);
        assert_eq!(percentile(&values, 0.95), 96.0);
        // Clamped to the last element
        assert_eq!(percentile(&values, 1.0), 100.0);
        assert_eq!(percentile(&[42], 0.9), 42.0);
    }

    #[test]
    fn test_percentile_rank() {
        let values = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_rank(25.0, &values), 50.0);
        assert_eq!(percentile_rank(40.0, &values), 100.0);
        assert_eq!(percentile_rank(5.0, &values), 0.0);
    }

    #[test]
    fn test_growth_rate() {
        assert_eq!(growth_rate(&[100, 150]), 50.0);
        assert_eq!(growth_rate(&[0, 500]), 0.0);
        assert_eq!(growth_rate(&[100]), 0.0);
        assert_eq!(growth_rate(&[200, 100]), -50.0);
    }

    #[test]
    fn test_average_step_growth() {
        // +100% then -50%: mean of (1.0, -0.5) = 0.25
        assert_eq!(average_step_growth(&[100, 200, 100]), 0.25);
        // Zero step is skipped but still divides
        assert_eq!(average_step_growth(&[0, 100, 200]), 0.5);
    }
}
