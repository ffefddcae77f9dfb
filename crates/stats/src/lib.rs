//! Summary statistics over sensor readings that may contain gaps.
//!
//! Readings arrive as `Option<f64>`; `None` and non-finite values are
//! treated as missing and skipped.

/// Finite values of a possibly-gappy slice.
pub fn valid_values(data: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    data.iter().filter_map(|v| v.filter(|x| x.is_finite()))
}

/// Number of finite values.
pub fn count_valid(data: &[Option<f64>]) -> usize {
    valid_values(data).count()
}

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / (n as f64 - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Sample standard deviation of the finite values in `data`.
///
/// Returns `None` when fewer than two finite values are present, so callers
/// can tell "too little data" apart from "no spread".
pub fn sd_valid(data: &[Option<f64>]) -> Option<f64> {
    let values: Vec<f64> = valid_values(data).collect();
    if values.len() < 2 {
        return None;
    }
    Some(sd(&values))
}

/// Largest finite value, or `None` if there is none.
pub fn max_valid(data: &[Option<f64>]) -> Option<f64> {
    valid_values(data).reduce(f64::max)
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Median of unsorted data, or `None` if empty. NaNs sort last.
pub fn median_unsorted(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(median(&sorted))
}
