//! Folding confirmed intervals into per-sample flags.

use std::ops::Range;

use chrono::{NaiveDateTime, TimeDelta};
use metqc_interval::{FlagState, Interval, Variable};
use tracing::debug;

use crate::columns::{FlagColumns, Validity};
use crate::error::ReconcileError;

/// Everything that changes flags for one day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagPlan {
    /// Confirmed purge intervals.
    pub purge: Vec<Interval>,
    /// Humidity dips flagged as recovery.
    pub dips: Vec<Interval>,
    /// Bad-data corrections.
    pub corrections: Vec<Interval>,
}

/// Computes new flag columns from `base` and `plan`.
///
/// For each physical variable, in order:
///
/// 1. a missing reading becomes `Uninitialized`; a valid reading whose base
///    flag is `Uninitialized` becomes `Good`; other flags are kept,
/// 2. valid samples inside a purge interval become `Purge`,
/// 3. humidity only: valid samples in `[end, end + recovery)` after each
///    purge become `Recovery`, unless they lie inside another purge that
///    starts later; dip samples not flagged `Purge` become `Recovery`,
/// 4. samples inside a correction become `Bad`, valid or not.
///
/// The inputs are not modified. Applying the same plan to the output again
/// gives the same output.
///
/// # Errors
///
/// Returns [`ReconcileError::LengthMismatch`] if a column does not match
/// `times`.
pub fn reconcile(
    times: &[NaiveDateTime],
    base: &FlagColumns,
    validity: &Validity,
    plan: &FlagPlan,
    recovery: TimeDelta,
) -> Result<FlagColumns, ReconcileError> {
    base.check_len(times.len())?;
    validity.check_len(times.len())?;

    let out = FlagColumns {
        temperature: reconcile_variable(
            times,
            base,
            validity,
            plan,
            recovery,
            Variable::Temperature,
        ),
        humidity: reconcile_variable(
            times,
            base,
            validity,
            plan,
            recovery,
            Variable::Humidity,
        ),
    };
    debug!(
        n_samples = times.len(),
        n_purge = plan.purge.len(),
        n_dips = plan.dips.len(),
        n_corrections = plan.corrections.len(),
        "flags reconciled"
    );
    Ok(out)
}

fn reconcile_variable(
    times: &[NaiveDateTime],
    base: &FlagColumns,
    validity: &Validity,
    plan: &FlagPlan,
    recovery: TimeDelta,
    variable: Variable,
) -> Vec<FlagState> {
    let valid = validity.get(variable);

    // 1. initialize
    let mut flags: Vec<FlagState> = base
        .get(variable)
        .iter()
        .zip(valid)
        .map(|(&flag, &ok)| match (ok, flag) {
            (false, _) => FlagState::Uninitialized,
            (true, FlagState::Uninitialized) => FlagState::Good,
            (true, kept) => kept,
        })
        .collect();

    let purges: Vec<&Interval> = applying_to(&plan.purge, variable).collect();

    // 2. purge
    for iv in &purges {
        set_valid(&mut flags, valid, samples_in(times, iv.start(), iv.end()), FlagState::Purge);
    }

    // 3. recovery
    if variable == Variable::Humidity {
        if recovery > TimeDelta::zero() {
            for iv in &purges {
                for k in samples_in(times, iv.end(), iv.end() + recovery) {
                    let in_later_purge = purges
                        .iter()
                        .any(|other| other.start() > iv.start() && other.contains(times[k]));
                    if valid[k] && !in_later_purge {
                        flags[k] = FlagState::Recovery;
                    }
                }
            }
        }
        for dip in applying_to(&plan.dips, variable) {
            for k in samples_in(times, dip.start(), dip.end()) {
                if valid[k] && flags[k] != FlagState::Purge {
                    flags[k] = FlagState::Recovery;
                }
            }
        }
    }

    // 4. corrections
    for iv in applying_to(&plan.corrections, variable) {
        for k in samples_in(times, iv.start(), iv.end()) {
            flags[k] = FlagState::Bad;
        }
    }

    flags
}

fn applying_to(intervals: &[Interval], variable: Variable) -> impl Iterator<Item = &Interval> {
    intervals
        .iter()
        .filter(move |iv| iv.variable().covers(variable))
}

/// Indices of the samples in `[start, end)`.
fn samples_in(times: &[NaiveDateTime], start: NaiveDateTime, end: NaiveDateTime) -> Range<usize> {
    let lo = times.partition_point(|t| *t < start);
    let hi = times.partition_point(|t| *t < end);
    lo..hi.max(lo)
}

fn set_valid(flags: &mut [FlagState], valid: &[bool], range: Range<usize>, state: FlagState) {
    for k in range {
        if valid[k] {
            flags[k] = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use metqc_interval::Source;

    fn t(i: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 3, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            + TimeDelta::minutes(i)
    }

    fn times(n: i64) -> Vec<NaiveDateTime> {
        (0..n).map(t).collect()
    }

    fn iv(a: i64, b: i64, variable: Variable, source: Source) -> Interval {
        Interval::new(t(a), t(b), variable, source).unwrap()
    }

    fn all_valid(n: usize) -> Validity {
        Validity {
            temperature: vec![true; n],
            humidity: vec![true; n],
        }
    }

    #[test]
    fn empty_plan_initializes_only() {
        let times = times(3);
        let validity = Validity {
            temperature: vec![true, false, true],
            humidity: vec![true; 3],
        };
        let base = FlagColumns::new(
            vec![FlagState::Uninitialized, FlagState::Good, FlagState::Bad],
            vec![FlagState::Uninitialized; 3],
        );
        let out = reconcile(&times, &base, &validity, &FlagPlan::default(), TimeDelta::minutes(6))
            .unwrap();
        assert_eq!(
            out.temperature,
            vec![FlagState::Good, FlagState::Uninitialized, FlagState::Bad]
        );
        assert_eq!(out.humidity, vec![FlagState::Good; 3]);
    }

    #[test]
    fn purge_skips_missing_samples() {
        let times = times(5);
        let mut validity = all_valid(5);
        validity.temperature[2] = false;
        let plan = FlagPlan {
            purge: vec![iv(1, 4, Variable::Temperature, Source::Detected)],
            ..FlagPlan::default()
        };
        let out = reconcile(
            &times,
            &FlagColumns::uninitialized(5),
            &validity,
            &plan,
            TimeDelta::minutes(6),
        )
        .unwrap();
        assert_eq!(
            out.temperature,
            vec![
                FlagState::Good,
                FlagState::Purge,
                FlagState::Uninitialized,
                FlagState::Purge,
                FlagState::Good,
            ]
        );
        assert!(out.humidity.iter().all(|&f| f == FlagState::Good));
    }

    #[test]
    fn recovery_stops_at_later_purge() {
        let times = times(20);
        let plan = FlagPlan {
            purge: vec![
                iv(0, 4, Variable::Humidity, Source::Detected),
                iv(6, 10, Variable::Humidity, Source::Copied),
            ],
            ..FlagPlan::default()
        };
        let out = reconcile(
            &times,
            &FlagColumns::uninitialized(20),
            &all_valid(20),
            &plan,
            TimeDelta::minutes(6),
        )
        .unwrap();
        let rh = &out.humidity;
        assert_eq!(rh[3], FlagState::Purge);
        assert_eq!(rh[4], FlagState::Recovery);
        assert_eq!(rh[5], FlagState::Recovery);
        assert!(rh[6..10].iter().all(|&f| f == FlagState::Purge));
        assert!(rh[10..16].iter().all(|&f| f == FlagState::Recovery));
        assert_eq!(rh[16], FlagState::Good);
        // Temperature never gets recovery.
        assert!(out.temperature.iter().all(|&f| f == FlagState::Good));
    }

    #[test]
    fn dips_do_not_override_purge() {
        let times = times(10);
        let plan = FlagPlan {
            purge: vec![iv(2, 4, Variable::Humidity, Source::Detected)],
            dips: vec![iv(1, 3, Variable::Humidity, Source::Detected)],
            ..FlagPlan::default()
        };
        let out = reconcile(
            &times,
            &FlagColumns::uninitialized(10),
            &all_valid(10),
            &plan,
            TimeDelta::zero(),
        )
        .unwrap();
        assert_eq!(out.humidity[1], FlagState::Recovery);
        assert_eq!(out.humidity[2], FlagState::Purge);
        assert_eq!(out.humidity[4], FlagState::Good);
    }

    #[test]
    fn corrections_win_even_on_missing_samples() {
        let times = times(6);
        let mut validity = all_valid(6);
        validity.humidity[3] = false;
        let plan = FlagPlan {
            purge: vec![iv(0, 6, Variable::Both, Source::Manual)],
            corrections: vec![iv(2, 4, Variable::Humidity, Source::Correction)],
            ..FlagPlan::default()
        };
        let out = reconcile(
            &times,
            &FlagColumns::uninitialized(6),
            &validity,
            &plan,
            TimeDelta::minutes(6),
        )
        .unwrap();
        assert_eq!(out.humidity[2], FlagState::Bad);
        assert_eq!(out.humidity[3], FlagState::Bad);
        assert_eq!(out.humidity[4], FlagState::Purge);
        assert!(out.temperature.iter().all(|&f| f == FlagState::Purge));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let times = times(4);
        let err = reconcile(
            &times,
            &FlagColumns::uninitialized(3),
            &all_valid(4),
            &FlagPlan::default(),
            TimeDelta::zero(),
        )
        .unwrap_err();
        assert!(matches!(err, ReconcileError::LengthMismatch { expected: 4, got: 3, .. }));
    }

    #[test]
    fn samples_in_is_half_open() {
        let times = times(5);
        assert_eq!(samples_in(&times, t(1), t(3)), 1..3);
        assert_eq!(samples_in(&times, t(10), t(12)), 5..5);
        assert_eq!(samples_in(&times, t(-5), t(0)), 0..0);
    }
}
