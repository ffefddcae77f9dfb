//! Per-day flagging pipeline shared by the `flag` and `batch` commands.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tracing::{debug, info, warn};

use metqc_continuity::{Resolution, resolve};
use metqc_correction::{CorrectionSet, low_temperature_intervals, read_correction_file};
use metqc_detect::{detect_purges, detect_rh_dips, sampling_interval};
use metqc_interval::{FlagState, Interval, Variable};
use metqc_io::{DaySeries, read_day, write_flags};
use metqc_reconcile::{
    FlagColumns, FlagPlan, FlagSummary, Validity, clear_existing, initial_flags, purge_runs,
    reconcile,
};

use crate::convert::Settings;

/// Inputs to one day's flagging besides the series itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayInputs<'a> {
    /// The previous day's confirmed purge intervals.
    pub previous: Option<&'a [Interval]>,
    /// Shift to use instead of the computed one.
    pub shift: Option<TimeDelta>,
    /// Explicit purge intervals.
    pub manual: &'a [(NaiveDateTime, NaiveDateTime)],
    /// Intervals read from correction files.
    pub corrections: &'a [Interval],
    /// Reset stored purge and recovery flags first.
    pub clear: bool,
}

/// Result of flagging one day.
#[derive(Debug, Clone)]
pub struct DayOutcome {
    pub day: Option<NaiveDate>,
    pub resolution: Resolution,
    pub flags: FlagColumns,
}

impl DayOutcome {
    /// Per-variable flag counts.
    pub fn summaries(&self) -> (FlagSummary, FlagSummary) {
        (
            FlagSummary::from_flags(&self.flags.temperature),
            FlagSummary::from_flags(&self.flags.humidity),
        )
    }
}

/// Reads the temperature and humidity correction files, if given.
pub fn read_corrections(
    temperature: Option<&Path>,
    humidity: Option<&Path>,
) -> Result<Vec<Interval>> {
    let mut out = Vec::new();
    for (path, variable) in [(temperature, Variable::Temperature), (humidity, Variable::Humidity)] {
        if let Some(path) = path {
            let intervals = read_correction_file(path, variable)
                .with_context(|| format!("failed to read correction file: {}", path.display()))?;
            info!(path = %path.display(), n = intervals.len(), "loaded corrections");
            out.extend(intervals);
        }
    }
    Ok(out)
}

/// Purge intervals of an already flagged day.
///
/// Taken from the stored `Purge` flag runs, joined across bad or missing
/// samples; a day without any falls back to running detection on its
/// readings.
pub fn purge_intervals(series: &DaySeries, settings: &Settings) -> Result<Vec<Interval>> {
    let times = series.times();
    if let Some(dt) = sampling_interval(times) {
        let mut stored = Vec::new();
        for variable in Variable::PHYSICAL {
            if let Some(flags) = series.stored_flags(variable) {
                stored.extend(purge_runs(times, flags, variable, dt)?);
            }
        }
        if !stored.is_empty() {
            stored.sort_by_key(|iv| (iv.start(), iv.variable()));
            debug!(n = stored.len(), "purge intervals from stored flags");
            return Ok(stored);
        }
    }
    let detected = detect_purges(
        times,
        series.temperature(),
        series.humidity(),
        &settings.detection,
    )?;
    debug!(n = detected.len(), "purge intervals from detection");
    Ok(detected)
}

/// Reads a day file and returns its purge intervals.
pub fn read_purge_intervals(path: &Path, settings: &Settings) -> Result<Vec<Interval>> {
    let series = read_day(path, &settings.io)
        .with_context(|| format!("failed to read day file: {}", path.display()))?;
    purge_intervals(&series, settings)
}

/// Computes the new flag columns for one day.
pub fn flag_series(
    series: &DaySeries,
    inputs: &DayInputs<'_>,
    settings: &Settings,
) -> Result<DayOutcome> {
    let times = series.times();
    let Some(day) = series.day() else {
        warn!("day file has no samples, nothing to flag");
        return Ok(DayOutcome {
            day: None,
            resolution: Resolution {
                intervals: Vec::new(),
                shift: None,
                continuity_applied: false,
                consistent: None,
            },
            flags: FlagColumns::uninitialized(0),
        });
    };
    let dt = sampling_interval(times);

    // 1. Detect candidate purges
    let candidates = detect_purges(
        times,
        series.temperature(),
        series.humidity(),
        &settings.detection,
    )?;

    // 2. Confirm against the previous day and manual intervals
    let resolution = resolve(
        day,
        &candidates,
        inputs.previous,
        inputs.shift,
        inputs.manual,
        &settings.continuity,
    )?;

    // 3. Humidity dips near the previous day's schedule
    let dips = match settings.detection.rh_dip() {
        Some(dip_cfg) => detect_rh_dips(
            times,
            series.humidity(),
            inputs.previous.unwrap_or_default(),
            dip_cfg,
        )?,
        None => Vec::new(),
    };

    // 4. Bad-data corrections
    let mut corrections = inputs.corrections.to_vec();
    if let (Some(threshold), Some(dt)) = (settings.detection.low_temperature_threshold(), dt) {
        let low = low_temperature_intervals(times, series.temperature(), threshold, dt)?;
        if !low.is_empty() {
            info!(n = low.len(), threshold, "low temperature runs flagged bad");
        }
        corrections.extend(low);
    }
    let corrections = CorrectionSet::overlay(corrections);

    // 5. Fold into the flag columns
    let base = FlagColumns::new(
        base_flags(series, Variable::Temperature, inputs.clear),
        base_flags(series, Variable::Humidity, inputs.clear),
    );
    let validity = Validity::from_values(series.temperature(), series.humidity());
    let plan = FlagPlan {
        purge: resolution.intervals.clone(),
        dips,
        corrections: corrections.iter().cloned().collect(),
    };
    let flags = reconcile(
        times,
        &base,
        &validity,
        &plan,
        settings.detection.recovery_duration(),
    )?;

    Ok(DayOutcome {
        day: Some(day),
        resolution,
        flags,
    })
}

fn base_flags(series: &DaySeries, variable: Variable, clear: bool) -> Vec<FlagState> {
    match series.stored_flags(variable) {
        Some(stored) if clear => clear_existing(stored),
        Some(stored) => stored.to_vec(),
        None => initial_flags(series.values(variable)),
    }
}

/// Reads, flags and (unless `dry_run`) rewrites one day file.
pub fn flag_file(
    path: &Path,
    inputs: &DayInputs<'_>,
    settings: &Settings,
    dry_run: bool,
) -> Result<DayOutcome> {
    info!(path = %path.display(), "reading day file");
    let series = read_day(path, &settings.io)
        .with_context(|| format!("failed to read day file: {}", path.display()))?;
    debug!(n_samples = series.len(), "day file loaded");

    let outcome = flag_series(&series, inputs, settings)
        .with_context(|| format!("failed to flag {}", path.display()))?;

    let (temperature, humidity) = outcome.summaries();
    info!(
        day = ?outcome.day,
        n_purges = outcome.resolution.intervals.len(),
        shift = ?outcome.resolution.shift,
        %temperature,
        %humidity,
        "day flagged"
    );

    if dry_run {
        info!(path = %path.display(), "dry run, flags not written");
    } else {
        write_flags(
            path,
            &settings.io,
            &outcome.flags.temperature,
            &outcome.flags.humidity,
        )
        .with_context(|| format!("failed to write flags: {}", path.display()))?;
        info!(path = %path.display(), "flags written");
    }
    Ok(outcome)
}
