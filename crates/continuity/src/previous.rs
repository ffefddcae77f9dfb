//! Carrying the previous day's purge schedule over to the current day.

use chrono::{NaiveDate, TimeDelta};
use metqc_interval::{Interval, Source, at_time_of_day, delta_seconds, time_of_day};
use tracing::debug;

use crate::config::ContinuityConfig;

/// Merges today's candidates with the previous day's schedule.
///
/// Every previous interval is re-placed on `day` at its time of day plus
/// `shift`, keeping its duration, once per physical variable it covers. A
/// copy is discarded when a candidate for the same variable overlaps at
/// least `overlap_fraction` of it; otherwise it is inserted with
/// [`Source::Copied`]. Candidates are always kept. The result is sorted by
/// start time.
pub fn apply_previous_day(
    day: NaiveDate,
    today: &[Interval],
    previous: &[Interval],
    shift: TimeDelta,
    config: &ContinuityConfig,
) -> Vec<Interval> {
    let mut out = today.to_vec();
    let mut n_superseded = 0usize;

    for prev in previous {
        let start = at_time_of_day(day, time_of_day(prev.start()) + shift);
        let placed = prev.shifted(start - prev.start()).with_source(Source::Copied);
        for &variable in prev.variable().physical() {
            let copy = placed.with_variable(variable);
            if is_superseded(&copy, today, config.overlap_fraction()) {
                n_superseded += 1;
            } else {
                out.push(copy);
            }
        }
    }

    out.sort_by_key(|iv| (iv.start(), iv.variable(), iv.source()));
    debug!(
        n_previous = previous.len(),
        n_superseded,
        n_copied = out.len() - today.len(),
        "previous-day schedule applied"
    );
    out
}

/// A copy yields to any same-variable candidate covering enough of it.
fn is_superseded(copy: &Interval, today: &[Interval], fraction: f64) -> bool {
    let length = delta_seconds(copy.duration());
    today.iter().any(|candidate| {
        candidate.variable().covers(copy.variable())
            && delta_seconds(candidate.overlap_duration(copy)) >= fraction * length
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use metqc_interval::Variable;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 3, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    fn iv(start: NaiveDateTime, minutes: i64, variable: Variable, source: Source) -> Interval {
        Interval::new(start, start + TimeDelta::minutes(minutes), variable, source).unwrap()
    }

    #[test]
    fn copies_missing_purge_per_variable() {
        let previous = [iv(at(1, 12, 0), 8, Variable::Both, Source::Detected)];
        let out = apply_previous_day(
            day(2),
            &[],
            &previous,
            TimeDelta::zero(),
            &ContinuityConfig::default(),
        );
        assert_eq!(out.len(), 2);
        for (copy, variable) in out.iter().zip(Variable::PHYSICAL) {
            assert_eq!(copy.start(), at(2, 12, 0));
            assert_eq!(copy.end(), at(2, 12, 8));
            assert_eq!(copy.variable(), variable);
            assert_eq!(copy.source(), Source::Copied);
        }
    }

    #[test]
    fn detected_candidate_supersedes_copy() {
        let previous = [iv(at(1, 12, 0), 8, Variable::Temperature, Source::Detected)];
        // Overlaps six of the copy's eight minutes.
        let today = [iv(at(2, 12, 2), 8, Variable::Temperature, Source::Detected)];
        let out = apply_previous_day(
            day(2),
            &today,
            &previous,
            TimeDelta::zero(),
            &ContinuityConfig::default(),
        );
        assert_eq!(out, today.to_vec());
    }

    #[test]
    fn small_overlap_keeps_both() {
        let previous = [iv(at(1, 12, 0), 8, Variable::Temperature, Source::Detected)];
        // Overlaps two of eight minutes.
        let today = [iv(at(2, 12, 6), 8, Variable::Temperature, Source::Detected)];
        let out = apply_previous_day(
            day(2),
            &today,
            &previous,
            TimeDelta::zero(),
            &ContinuityConfig::default(),
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].source(), Source::Copied);
        assert_eq!(out[1], today[0]);
    }

    #[test]
    fn candidate_for_other_variable_does_not_supersede() {
        let previous = [iv(at(1, 12, 0), 8, Variable::Humidity, Source::Detected)];
        let today = [iv(at(2, 12, 0), 8, Variable::Temperature, Source::Detected)];
        let out = apply_previous_day(
            day(2),
            &today,
            &previous,
            TimeDelta::zero(),
            &ContinuityConfig::default(),
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn shift_moves_copy() {
        let previous = [iv(at(1, 6, 0), 8, Variable::Humidity, Source::Detected)];
        let out = apply_previous_day(
            day(2),
            &[],
            &previous,
            TimeDelta::seconds(90),
            &ContinuityConfig::default(),
        );
        assert_eq!(out[0].start(), at(2, 6, 1) + TimeDelta::seconds(30));
    }
}
