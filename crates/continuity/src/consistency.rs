//! Day-to-day schedule agreement.

use chrono::TimeDelta;
use metqc_interval::{Interval, time_of_day};

use crate::shift::wrap_half_day;

/// Returns `true` if two days' purge schedules agree.
///
/// Schedules are compared by the distinct start times of day of their
/// intervals. They agree when both have the same number of starts and each
/// pair, in time-of-day order, is within `tolerance`.
pub fn check_consistency(
    previous: &[Interval],
    current: &[Interval],
    tolerance: TimeDelta,
) -> bool {
    let a = schedule(previous);
    let b = schedule(current);
    a.len() == b.len()
        && a.iter()
            .zip(&b)
            .all(|(&x, &y)| wrap_half_day(y - x).abs() <= tolerance)
}

fn schedule(intervals: &[Interval]) -> Vec<TimeDelta> {
    let mut starts: Vec<TimeDelta> = intervals.iter().map(|iv| time_of_day(iv.start())).collect();
    starts.sort();
    starts.dedup();
    starts
}
