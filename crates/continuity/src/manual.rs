//! Explicit operator-supplied purge intervals.

use chrono::NaiveDateTime;
use metqc_interval::{Interval, Source, Variable};
use tracing::debug;

use crate::error::ContinuityError;

/// Inserts explicit `(start, end)` pairs as manual purges on both variables.
///
/// Any detected or copied interval overlapping a manual one is dropped, so
/// the operator's range replaces whatever was found there.
///
/// # Errors
///
/// Returns [`ContinuityError::Interval`] if a pair has `start >= end`.
pub fn apply_manual(
    confirmed: &[Interval],
    explicit: &[(NaiveDateTime, NaiveDateTime)],
) -> Result<Vec<Interval>, ContinuityError> {
    let manual = explicit
        .iter()
        .map(|&(start, end)| Interval::new(start, end, Variable::Both, Source::Manual))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out: Vec<Interval> = confirmed
        .iter()
        .filter(|iv| !manual.iter().any(|m| m.overlaps(iv)))
        .copied()
        .collect();
    let n_dropped = confirmed.len() - out.len();
    out.extend(manual.iter().copied());
    out.sort_by_key(|iv| (iv.start(), iv.variable(), iv.source()));

    debug!(n_manual = manual.len(), n_dropped, "manual intervals applied");
    Ok(out)
}
