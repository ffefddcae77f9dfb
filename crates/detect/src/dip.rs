//! Humidity dip detection.
//!
//! Some purges leave no flat stretch long enough for the window scan but
//! show up as a sharp humidity drop right after a short flat run, followed
//! by a climb back within a few minutes. Dips are only trusted near the
//! times of day at which purges are expected.

use chrono::NaiveDateTime;
use metqc_interval::{Interval, Source, Variable, time_of_day};
use tracing::debug;

use crate::config::RhDipConfig;
use crate::error::DetectError;
use crate::sampling::{check_len, check_sorted};

/// Detects humidity dips and returns the affected samples as humidity
/// intervals (the dip onset sample itself is excluded).
///
/// `expected` holds purge intervals whose times of day mark where dips are
/// plausible (usually the previous day's purges); a dip is kept if its onset
/// lies within `expected_margin` of one of them. With no expected intervals
/// every dip is kept.
///
/// # Errors
///
/// Returns [`DetectError::InvalidConfig`], [`DetectError::LengthMismatch`]
/// or [`DetectError::UnsortedTimes`] on invalid input.
pub fn detect_rh_dips(
    times: &[NaiveDateTime],
    humidity: &[Option<f64>],
    expected: &[Interval],
    config: &RhDipConfig,
) -> Result<Vec<Interval>, DetectError> {
    config.validate()?;
    check_len(times, humidity, "humidity")?;
    check_sorted(times)?;

    let n = times.len();
    let lookback = config.lookback();
    // Leave room for the recovery search at the end of the day.
    let tail = config.max_recovery_samples() / 2;
    if n <= lookback + tail {
        return Ok(Vec::new());
    }

    let flat = rolling_flat_mask(humidity, config.flat_window(), config.flat_threshold());
    let mut dips = Vec::new();

    let mut i = lookback;
    while i < n - tail {
        if let Some(j) = dip_recovery_index(times, humidity, &flat, i, config)
            && near_expected(times[i], expected, config)
        {
            dips.push(Interval::new(
                times[i + 1],
                times[j],
                Variable::Humidity,
                Source::Detected,
            )?);
            // Resume after the recovery so one dip is reported once.
            i = j;
            continue;
        }
        i += 1;
    }

    debug!(n_dips = dips.len(), "humidity dip scan complete");
    Ok(dips)
}

/// Index of the sample at which a dip starting at `i` has recovered, if `i`
/// is the onset of a dip spanning at least one sample.
fn dip_recovery_index(
    times: &[NaiveDateTime],
    humidity: &[Option<f64>],
    flat: &[bool],
    i: usize,
    config: &RhDipConfig,
) -> Option<usize> {
    let current = humidity[i].filter(|v| v.is_finite())?;
    let from = i.saturating_sub(config.flat_window());
    if !flat[from..i].iter().any(|&f| f) {
        return None;
    }
    let max_before = metqc_stats::max_valid(&humidity[i - config.lookback()..i])?;
    let drop = max_before - current;
    if drop < config.drop_threshold() {
        return None;
    }

    let search_end = (i + config.max_recovery_samples()).min(humidity.len());
    (i + 1..search_end)
        .find(|&j| {
            humidity[j].is_some_and(|v| v.is_finite() && v - current >= drop)
                && times[j] - times[i] <= config.recovery_time()
        })
        .filter(|&j| j > i + 1)
}

/// Centred rolling-std flatness mask; edges and windows with gaps are not flat.
fn rolling_flat_mask(values: &[Option<f64>], window: usize, threshold: f64) -> Vec<bool> {
    let n = values.len();
    let before = window / 2;
    let after = window - before - 1;
    (0..n)
        .map(|k| {
            if k < before || k + after >= n {
                return false;
            }
            let slice = &values[k - before..=k + after];
            if metqc_stats::count_valid(slice) < window {
                return false;
            }
            metqc_stats::sd_valid(slice).is_some_and(|sd| sd < threshold)
        })
        .collect()
}

fn near_expected(onset: NaiveDateTime, expected: &[Interval], config: &RhDipConfig) -> bool {
    if expected.is_empty() {
        return true;
    }
    let tod = time_of_day(onset);
    let margin = config.expected_margin();
    expected.iter().any(|iv| {
        let start = time_of_day(iv.start());
        let end = start + iv.duration();
        start - margin <= tod && tod <= end + margin
    })
}
