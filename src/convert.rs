//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};
use chrono::{NaiveDateTime, TimeDelta};

use metqc_continuity::ContinuityConfig;
use metqc_detect::{DetectionConfig, RhDipConfig};
use metqc_interval::delta_from_seconds;
use metqc_io::DayFileConfig;

use crate::config::{DetectionToml, IoToml, MetqcConfig, RhDipToml};

/// Converts a duration in minutes from the config file.
fn minutes(m: f64) -> TimeDelta {
    delta_from_seconds(m * 60.0)
}

/// Builds a [`DayFileConfig`] from the TOML I/O configuration.
pub fn build_day_file_config(io: &IoToml) -> Result<DayFileConfig> {
    let cfg = DayFileConfig::default()
        .with_time_var(&io.time_var)
        .with_temperature_var(&io.temperature_var)
        .with_humidity_var(&io.humidity_var)
        .with_temperature_flag_var(&io.temperature_flag_var)
        .with_humidity_flag_var(&io.humidity_flag_var);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds an [`RhDipConfig`], or `None` when dip detection is disabled.
pub fn build_rh_dip_config(dip: &RhDipToml) -> Result<Option<RhDipConfig>> {
    if !dip.enabled {
        return Ok(None);
    }
    let cfg = RhDipConfig::new()
        .with_drop_threshold(dip.drop_threshold)
        .with_recovery_time(delta_from_seconds(dip.recovery_seconds))
        .with_expected_margin(delta_from_seconds(dip.expected_margin_seconds));
    cfg.validate()?;
    Ok(Some(cfg))
}

/// Builds a [`DetectionConfig`] from the TOML detection and dip sections.
pub fn build_detection_config(det: &DetectionToml, dip: &RhDipToml) -> Result<DetectionConfig> {
    let cfg = DetectionConfig::new()
        .with_window(minutes(det.window_minutes))
        .with_temp_std_threshold(det.temp_std_threshold)
        .with_rh_std_threshold(det.rh_std_threshold)
        .with_rh_saturation_exclusion(det.rh_saturation_exclusion)
        .with_recovery_duration(minutes(det.recovery_minutes))
        .with_low_temperature_threshold(
            det.low_temperature_check.then_some(det.low_temperature_threshold),
        )
        .with_rh_dip(build_rh_dip_config(dip)?);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`ContinuityConfig`] from the TOML detection section.
pub fn build_continuity_config(det: &DetectionToml) -> Result<ContinuityConfig> {
    let cfg = ContinuityConfig::new()
        .with_overlap_fraction(det.overlap_fraction)
        .with_consistency_tolerance(minutes(det.consistency_tolerance_minutes))
        .with_max_auto_shift(minutes(det.max_auto_shift_minutes));
    cfg.validate()?;
    Ok(cfg)
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub io: DayFileConfig,
    pub detection: DetectionConfig,
    pub continuity: ContinuityConfig,
}

/// Converts a whole config file into [`Settings`].
pub fn build_settings(cfg: &MetqcConfig) -> Result<Settings> {
    Ok(Settings {
        io: build_day_file_config(&cfg.io)?,
        detection: build_detection_config(&cfg.detection, &cfg.rh_dip)?,
        continuity: build_continuity_config(&cfg.detection)?,
    })
}

/// Parses a `START,END` manual interval argument.
pub fn parse_interval(s: &str) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let Some((start, end)) = s.split_once(',') else {
        bail!("interval must be START,END, got {s:?}");
    };
    let start = parse_timestamp(start.trim())?;
    let end = parse_timestamp(end.trim())?;
    if start >= end {
        bail!("interval end {end} is not after start {start}");
    }
    Ok((start, end))
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    match s
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
    {
        Ok(t) => Ok(t),
        Err(e) => bail!("invalid timestamp {s:?}: {e}"),
    }
}

/// Converts a `--shift` value in seconds.
pub fn parse_shift_seconds(seconds: f64) -> Result<TimeDelta> {
    if !seconds.is_finite() {
        bail!("shift must be a finite number of seconds, got {seconds}");
    }
    if seconds.abs() >= 86_400.0 {
        bail!("shift must be less than one day, got {seconds} s");
    }
    Ok(delta_from_seconds(seconds))
}
