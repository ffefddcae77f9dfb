//! Confirming a day's purge intervals.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use metqc_interval::{Interval, delta_seconds};
use tracing::{debug, info, warn};

use crate::config::ContinuityConfig;
use crate::consistency::check_consistency;
use crate::error::ContinuityError;
use crate::manual::apply_manual;
use crate::previous::apply_previous_day;
use crate::shift::compute_shift;

/// Outcome of resolving one day.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Confirmed purge intervals, sorted by start.
    pub intervals: Vec<Interval>,
    /// Shift applied to the previous day's schedule, if one was used.
    pub shift: Option<TimeDelta>,
    /// Whether the previous day's schedule took part.
    pub continuity_applied: bool,
    /// Whether the two days' schedules agreed, if both were available.
    pub consistent: Option<bool>,
}

/// Turns detection candidates into the day's confirmed purge intervals.
///
/// Steps:
/// 1. carry the previous day's schedule over (skipped with a warning when
///    `previous` is `None` or empty),
/// 2. insert the explicit manual pairs.
///
/// When `shift` is `None` it is computed from the previous day to today's
/// candidates; with no candidates today the shift is zero. An automatic
/// shift larger than `max_auto_shift` is not trusted and also replaced by
/// zero.
///
/// # Errors
///
/// Returns [`ContinuityError::InvalidConfig`] for an invalid `config` and
/// [`ContinuityError::Interval`] for a malformed manual pair.
pub fn resolve(
    day: NaiveDate,
    candidates: &[Interval],
    previous: Option<&[Interval]>,
    shift: Option<TimeDelta>,
    manual: &[(NaiveDateTime, NaiveDateTime)],
    config: &ContinuityConfig,
) -> Result<Resolution, ContinuityError> {
    config.validate()?;

    let (confirmed, applied_shift, consistent) = match require_previous(previous) {
        Ok(previous) => {
            let consistent =
                check_consistency(previous, candidates, config.consistency_tolerance());
            if !consistent {
                warn!(
                    %day,
                    n_previous = previous.len(),
                    n_candidates = candidates.len(),
                    "purge schedule differs from previous day"
                );
            }
            let shift = match shift {
                Some(explicit) => explicit,
                None => automatic_shift(previous, candidates, config),
            };
            let merged = apply_previous_day(day, candidates, previous, shift, config);
            (merged, Some(shift), Some(consistent))
        }
        Err(e) => {
            warn!(%day, "{e}; using detection only");
            (candidates.to_vec(), None, None)
        }
    };

    let intervals = apply_manual(&confirmed, manual)?;
    info!(
        %day,
        n_candidates = candidates.len(),
        n_confirmed = intervals.len(),
        "purge intervals resolved"
    );
    Ok(Resolution {
        intervals,
        shift: applied_shift,
        continuity_applied: consistent.is_some(),
        consistent,
    })
}

fn require_previous(previous: Option<&[Interval]>) -> Result<&[Interval], ContinuityError> {
    match previous {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(ContinuityError::MissingPreviousDay),
    }
}

fn automatic_shift(
    previous: &[Interval],
    candidates: &[Interval],
    config: &ContinuityConfig,
) -> TimeDelta {
    match compute_shift(previous, candidates) {
        Ok(shift) if shift.abs() <= config.max_auto_shift() => {
            debug!(shift_seconds = delta_seconds(shift), "automatic shift");
            shift
        }
        Ok(shift) => {
            warn!(
                shift_seconds = shift.num_seconds(),
                "automatic shift too large, using zero"
            );
            TimeDelta::zero()
        }
        Err(e) => {
            debug!("{e}; using zero shift");
            TimeDelta::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metqc_interval::{Source, Variable};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 3, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    fn iv(start: NaiveDateTime, variable: Variable) -> Interval {
        Interval::new(start, start + TimeDelta::minutes(8), variable, Source::Detected).unwrap()
    }

    #[test]
    fn without_previous_day_keeps_candidates() {
        let candidates = [iv(at(2, 12, 0), Variable::Temperature)];
        let res = resolve(
            day(2),
            &candidates,
            None,
            None,
            &[],
            &ContinuityConfig::default(),
        )
        .unwrap();
        assert_eq!(res.intervals, candidates.to_vec());
        assert!(!res.continuity_applied);
        assert_eq!(res.shift, None);
        assert_eq!(res.consistent, None);
    }

    #[test]
    fn empty_previous_day_counts_as_missing() {
        let res = resolve(day(2), &[], Some(&[]), None, &[], &ContinuityConfig::default())
            .unwrap();
        assert!(res.intervals.is_empty());
        assert!(!res.continuity_applied);
    }

    #[test]
    fn no_candidates_copies_previous_at_zero_shift() {
        let previous = [iv(at(1, 12, 0), Variable::Both)];
        let res = resolve(
            day(2),
            &[],
            Some(&previous),
            None,
            &[],
            &ContinuityConfig::default(),
        )
        .unwrap();
        assert_eq!(res.shift, Some(TimeDelta::zero()));
        assert_eq!(res.intervals.len(), 2);
        assert!(res.intervals.iter().all(|i| i.source() == Source::Copied));
        assert_eq!(res.consistent, Some(false));
    }

    #[test]
    fn automatic_shift_aligns_copies() {
        let previous = [
            iv(at(1, 6, 0), Variable::Both),
            iv(at(1, 18, 0), Variable::Both),
        ];
        // Only the morning purge is seen today, two minutes late.
        let candidates = [
            iv(at(2, 6, 2), Variable::Temperature),
            iv(at(2, 6, 2), Variable::Humidity),
        ];
        let res = resolve(
            day(2),
            &candidates,
            Some(&previous),
            None,
            &[],
            &ContinuityConfig::default(),
        )
        .unwrap();
        assert_eq!(res.shift, Some(TimeDelta::minutes(2)));
        assert_eq!(res.intervals.len(), 4);
        let copied: Vec<_> = res
            .intervals
            .iter()
            .filter(|i| i.source() == Source::Copied)
            .collect();
        assert_eq!(copied.len(), 2);
        assert!(copied.iter().all(|i| i.start() == at(2, 18, 2)));
    }

    #[test]
    fn implausible_automatic_shift_is_ignored() {
        let previous = [iv(at(1, 6, 0), Variable::Humidity)];
        let candidates = [iv(at(2, 14, 0), Variable::Humidity)];
        let res = resolve(
            day(2),
            &candidates,
            Some(&previous),
            None,
            &[],
            &ContinuityConfig::default(),
        )
        .unwrap();
        assert_eq!(res.shift, Some(TimeDelta::zero()));
        assert_eq!(res.intervals[0].start(), at(2, 6, 0));
    }

    #[test]
    fn explicit_shift_is_used_as_given() {
        let previous = [iv(at(1, 6, 0), Variable::Humidity)];
        let res = resolve(
            day(2),
            &[],
            Some(&previous),
            Some(TimeDelta::hours(3)),
            &[],
            &ContinuityConfig::default(),
        )
        .unwrap();
        assert_eq!(res.intervals[0].start(), at(2, 9, 0));
    }

    #[test]
    fn manual_pairs_apply_after_continuity() {
        let previous = [iv(at(1, 12, 0), Variable::Both)];
        let res = resolve(
            day(2),
            &[],
            Some(&previous),
            None,
            &[(at(2, 11, 55), at(2, 12, 10))],
            &ContinuityConfig::default(),
        )
        .unwrap();
        assert_eq!(res.intervals.len(), 1);
        assert_eq!(res.intervals[0].source(), Source::Manual);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = ContinuityConfig::new().with_overlap_fraction(0.0);
        assert!(matches!(
            resolve(day(2), &[], None, None, &[], &cfg),
            Err(ContinuityError::InvalidConfig { .. })
        ));
    }
}
