//! Time-of-day shift between two days' purge schedules.

use chrono::TimeDelta;
use metqc_interval::{Interval, time_of_day};

use crate::error::ContinuityError;

/// Time-of-day offset from the earliest interval of `a` to the earliest
/// interval of `b`.
///
/// The dates are discarded and the difference is wrapped into
/// `(-12 h, +12 h]`, so `compute_shift(a, b) == -compute_shift(b, a)` except
/// for offsets of exactly twelve hours. Resolution is one microsecond.
///
/// # Errors
///
/// Returns [`ContinuityError::NoIntervals`] if either set is empty.
pub fn compute_shift(a: &[Interval], b: &[Interval]) -> Result<TimeDelta, ContinuityError> {
    let first_a = earliest(a).ok_or(ContinuityError::NoIntervals { set: "first" })?;
    let first_b = earliest(b).ok_or(ContinuityError::NoIntervals { set: "second" })?;
    Ok(wrap_half_day(
        time_of_day(first_b.start()) - time_of_day(first_a.start()),
    ))
}

fn earliest(set: &[Interval]) -> Option<&Interval> {
    set.iter().min_by_key(|iv| iv.start())
}

/// Wraps a difference of two times of day into `(-12 h, +12 h]`.
pub(crate) fn wrap_half_day(d: TimeDelta) -> TimeDelta {
    let half = TimeDelta::hours(12);
    let full = TimeDelta::hours(24);
    if d > half {
        d - full
    } else if d <= -half {
        d + full
    } else {
        d
    }
}
