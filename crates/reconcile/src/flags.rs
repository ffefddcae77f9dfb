//! Flag column helpers.

use chrono::{NaiveDateTime, TimeDelta};
use metqc_interval::{FlagState, Interval, Source, Variable};

use crate::columns::mask;
use crate::error::ReconcileError;

/// Starting flags for a fresh file: `Good` for valid readings, otherwise
/// `Uninitialized`.
pub fn initial_flags(values: &[Option<f64>]) -> Vec<FlagState> {
    mask(values)
        .into_iter()
        .map(|ok| {
            if ok {
                FlagState::Good
            } else {
                FlagState::Uninitialized
            }
        })
        .collect()
}

/// Resets earlier purge and recovery flags to `Good`.
pub fn clear_existing(flags: &[FlagState]) -> Vec<FlagState> {
    flags
        .iter()
        .map(|&f| if f.is_purge_related() { FlagState::Good } else { f })
        .collect()
}

/// Recovers intervals from runs of consecutive samples flagged `state`.
///
/// A run `t_first..=t_last` becomes `[t_first, t_last + dt)` tagged with
/// `variable` and [`Source::Detected`].
///
/// # Errors
///
/// Returns [`ReconcileError::LengthMismatch`] if `flags` does not match
/// `times`, or [`ReconcileError::Interval`] if `dt` is not positive.
pub fn flag_runs(
    times: &[NaiveDateTime],
    flags: &[FlagState],
    state: FlagState,
    variable: Variable,
    dt: TimeDelta,
) -> Result<Vec<Interval>, ReconcileError> {
    if flags.len() != times.len() {
        return Err(ReconcileError::LengthMismatch {
            expected: times.len(),
            got: flags.len(),
            field: format!("{variable} flags"),
        });
    }

    let mut out = Vec::new();
    let mut k = 0;
    while k < flags.len() {
        if flags[k] != state {
            k += 1;
            continue;
        }
        let first = k;
        while k < flags.len() && flags[k] == state {
            k += 1;
        }
        out.push(Interval::new(
            times[first],
            times[k - 1] + dt,
            variable,
            Source::Detected,
        )?);
    }
    Ok(out)
}

/// Purge intervals recovered from stored flags.
///
/// As [`flag_runs`] for `Purge`, except that runs separated only by `Bad`
/// or `Uninitialized` samples form a single interval. A correction or a
/// data gap inside a purge does not split it.
///
/// # Errors
///
/// As [`flag_runs`].
pub fn purge_runs(
    times: &[NaiveDateTime],
    flags: &[FlagState],
    variable: Variable,
    dt: TimeDelta,
) -> Result<Vec<Interval>, ReconcileError> {
    let runs = flag_runs(times, flags, FlagState::Purge, variable, dt)?;
    let mut out: Vec<Interval> = Vec::with_capacity(runs.len());
    for run in runs {
        if let Some(last) = out.last_mut()
            && bridged(times, flags, last.end() - dt, run.start())
        {
            *last = Interval::new(last.start(), run.end(), variable, Source::Detected)?;
            continue;
        }
        out.push(run);
    }
    Ok(out)
}

/// True if every sample after `last` and before `next` is bad or unset.
fn bridged(
    times: &[NaiveDateTime],
    flags: &[FlagState],
    last: NaiveDateTime,
    next: NaiveDateTime,
) -> bool {
    let lo = times.partition_point(|t| *t <= last);
    let hi = times.partition_point(|t| *t < next);
    flags[lo..hi.max(lo)]
        .iter()
        .all(|f| matches!(f, FlagState::Bad | FlagState::Uninitialized))
}
