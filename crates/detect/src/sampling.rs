//! Native sampling interval of a series.

use chrono::{NaiveDateTime, TimeDelta};
use metqc_interval::delta_from_seconds;

use crate::error::DetectError;

/// Median spacing between consecutive timestamps.
///
/// Returns `None` for fewer than two timestamps. The median keeps the
/// estimate stable across logger gaps.
pub fn sampling_interval(times: &[NaiveDateTime]) -> Option<TimeDelta> {
    let diffs: Vec<f64> = times
        .windows(2)
        .map(|w| metqc_interval::delta_seconds(w[1] - w[0]))
        .collect();
    metqc_stats::median_unsorted(&diffs).map(delta_from_seconds)
}

/// Checks that timestamps are strictly increasing.
pub(crate) fn check_sorted(times: &[NaiveDateTime]) -> Result<(), DetectError> {
    match times.windows(2).position(|w| w[1] <= w[0]) {
        Some(i) => Err(DetectError::UnsortedTimes { index: i + 1 }),
        None => Ok(()),
    }
}

/// Checks that a value column matches the time axis.
pub(crate) fn check_len(
    times: &[NaiveDateTime],
    values: &[Option<f64>],
    field: &str,
) -> Result<(), DetectError> {
    if values.len() != times.len() {
        return Err(DetectError::LengthMismatch {
            expected: times.len(),
            got: values.len(),
            field: field.to_string(),
        });
    }
    Ok(())
}
