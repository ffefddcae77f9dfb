//! Corrections derived from implausibly low temperature readings.

use chrono::{NaiveDateTime, TimeDelta};
use metqc_interval::{Interval, Source, Variable};
use tracing::debug;

use crate::error::CorrectionError;

/// Default limit below which a temperature reading (K) is treated as a
/// disconnected or failed probe.
pub const DEFAULT_LOW_TEMPERATURE: f64 = 245.0;

/// Turns runs of temperature readings below `threshold` into temperature
/// correction intervals.
///
/// Each run of consecutive low samples `t_first..=t_last` becomes
/// `[t_first, t_last + dt)`, where `dt` is the sampling interval. Missing
/// readings end a run.
///
/// # Errors
///
/// Returns [`CorrectionError::Interval`] if `dt` is not positive.
pub fn low_temperature_intervals(
    times: &[NaiveDateTime],
    temperature: &[Option<f64>],
    threshold: f64,
    dt: TimeDelta,
) -> Result<Vec<Interval>, CorrectionError> {
    let is_low = |v: &Option<f64>| v.is_some_and(|x| x.is_finite() && x < threshold);

    let mut out = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, value) in temperature.iter().enumerate().take(times.len()) {
        match (is_low(value), run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(first)) => {
                out.push(run_interval(times, first, i - 1, dt)?);
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(first) = run_start {
        let last = temperature.len().min(times.len()) - 1;
        out.push(run_interval(times, first, last, dt)?);
    }

    debug!(threshold, n_intervals = out.len(), "low-temperature scan complete");
    Ok(out)
}

fn run_interval(
    times: &[NaiveDateTime],
    first: usize,
    last: usize,
    dt: TimeDelta,
) -> Result<Interval, CorrectionError> {
    Ok(Interval::new(
        times[first],
        times[last] + dt,
        Variable::Temperature,
        Source::Correction,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(i: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 1, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + TimeDelta::minutes(i)
    }

    #[test]
    fn single_run() {
        let times: Vec<_> = (0..6).map(t).collect();
        let temps = [
            Some(270.0),
            Some(200.0),
            Some(199.0),
            Some(270.0),
            Some(270.0),
            Some(270.0),
        ];
        let out =
            low_temperature_intervals(&times, &temps, DEFAULT_LOW_TEMPERATURE, TimeDelta::minutes(1))
                .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start(), t(1));
        assert_eq!(out[0].end(), t(3));
        assert_eq!(out[0].variable(), Variable::Temperature);
        assert_eq!(out[0].source(), Source::Correction);
    }

    #[test]
    fn run_to_end_of_series() {
        let times: Vec<_> = (0..4).map(t).collect();
        let temps = [Some(270.0), Some(270.0), Some(100.0), Some(100.0)];
        let out = low_temperature_intervals(&times, &temps, 245.0, TimeDelta::minutes(1)).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].end(), t(4));
    }

    #[test]
    fn missing_value_splits_runs() {
        let times: Vec<_> = (0..5).map(t).collect();
        let temps = [Some(100.0), None, Some(100.0), Some(f64::NAN), Some(280.0)];
        let out = low_temperature_intervals(&times, &temps, 245.0, TimeDelta::minutes(1)).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].start(), t(0));
        assert_eq!(out[1].start(), t(2));
    }

    #[test]
    fn nothing_low() {
        let times: Vec<_> = (0..3).map(t).collect();
        let temps = [Some(280.0); 3];
        assert!(
            low_temperature_intervals(&times, &temps, 245.0, TimeDelta::minutes(1))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn zero_dt_single_sample_is_rejected() {
        let times = [t(0)];
        let temps = [Some(100.0)];
        assert!(matches!(
            low_temperature_intervals(&times, &temps, 245.0, TimeDelta::zero()),
            Err(CorrectionError::Interval(_))
        ));
    }
}
