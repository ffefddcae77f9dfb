//! Sliding-window flatness scan.

use chrono::NaiveDateTime;
use metqc_interval::{Interval, Source, Variable, coalesce};
use tracing::debug;

use crate::config::DetectionConfig;
use crate::error::DetectError;
use crate::sampling::{check_len, check_sorted, sampling_interval};

/// Proposes purge candidates for one variable from low local variance.
///
/// A window `[t_i, t_i + window)` starts at every sample and is evaluated
/// only when it lies inside the series coverage `[t_0, t_last + dt)`, where
/// `dt` is the native sampling interval. A window is flat when the sample
/// standard deviation of its valid values is below the variable's threshold;
/// windows with fewer than two valid values are inconclusive. For humidity,
/// a window touching `rh_saturation_exclusion` is never flat. Flat windows
/// are merged into their union, and candidates closer than `dt` are joined.
///
/// A series shorter than one window yields no candidates.
///
/// # Errors
///
/// Returns [`DetectError::InvalidConfig`] if `config` is invalid or
/// `variable` is [`Variable::Both`], [`DetectError::LengthMismatch`] if
/// `values` does not match `times`, and [`DetectError::UnsortedTimes`] if
/// `times` is not strictly increasing.
pub fn detect_flat(
    times: &[NaiveDateTime],
    values: &[Option<f64>],
    variable: Variable,
    config: &DetectionConfig,
) -> Result<Vec<Interval>, DetectError> {
    config.validate()?;
    check_len(times, values, &variable.to_string())?;
    check_sorted(times)?;

    let (threshold, saturation) = match variable {
        Variable::Temperature => (config.temp_std_threshold(), None),
        Variable::Humidity => (
            config.rh_std_threshold(),
            Some(config.rh_saturation_exclusion()),
        ),
        Variable::Both => {
            return Err(DetectError::InvalidConfig {
                reason: "flatness detection needs a single physical variable".to_string(),
            });
        }
    };

    let Some(dt) = sampling_interval(times) else {
        return Ok(Vec::new());
    };
    let n = times.len();
    let coverage_end = times[n - 1] + dt;
    let window = config.window();

    let mut flat = Vec::new();
    let mut hi = 0;
    for lo in 0..n {
        let window_end = times[lo] + window;
        if window_end > coverage_end {
            break;
        }
        hi = hi.max(lo);
        while hi < n && times[hi] < window_end {
            hi += 1;
        }
        if is_flat(&values[lo..hi], threshold, saturation) {
            flat.push(Interval::new(
                times[lo],
                window_end,
                variable,
                Source::Detected,
            )?);
        }
    }

    let candidates = coalesce(&flat, dt);
    debug!(
        %variable,
        n_flat_windows = flat.len(),
        n_candidates = candidates.len(),
        "flatness scan complete"
    );
    Ok(candidates)
}

/// Flatness test for one window.
fn is_flat(window: &[Option<f64>], threshold: f64, saturation: Option<f64>) -> bool {
    if let Some(limit) = saturation
        && metqc_stats::max_valid(window).is_some_and(|max| max >= limit)
    {
        return false;
    }
    metqc_stats::sd_valid(window).is_some_and(|sd| sd < threshold)
}

/// Runs the flatness scan on both variables.
///
/// Temperatures below the configured low-temperature limit are treated as
/// missing so that a stuck or disconnected probe is not mistaken for a
/// purge. The result is sorted by start time.
///
/// # Errors
///
/// Propagates any error from [`detect_flat`].
pub fn detect_purges(
    times: &[NaiveDateTime],
    temperature: &[Option<f64>],
    humidity: &[Option<f64>],
    config: &DetectionConfig,
) -> Result<Vec<Interval>, DetectError> {
    let masked = mask_below(temperature, config.low_temperature_threshold());

    let mut candidates = detect_flat(times, &masked, Variable::Temperature, config)?;
    candidates.extend(detect_flat(times, humidity, Variable::Humidity, config)?);
    candidates.sort_by_key(|iv| (iv.start(), iv.variable()));

    debug!(n_candidates = candidates.len(), "purge candidates detected");
    Ok(candidates)
}

/// Replaces values below `threshold` with `None`.
pub fn mask_below(values: &[Option<f64>], threshold: Option<f64>) -> Vec<Option<f64>> {
    match threshold {
        Some(limit) => values
            .iter()
            .map(|v| v.filter(|x| !(x.is_finite() && *x < limit)))
            .collect(),
        None => values.to_vec(),
    }
}
