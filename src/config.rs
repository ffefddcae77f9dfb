use std::path::Path;

use anyhow::{Context, Result};
use metqc_correction::DEFAULT_LOW_TEMPERATURE;
use serde::Deserialize;

/// Top-level metqc configuration. Every section and field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetqcConfig {
    /// Day-file variable names.
    #[serde(default)]
    pub io: IoToml,

    /// Purge detection and continuity settings.
    #[serde(default)]
    pub detection: DetectionToml,

    /// Optional humidity dip detection.
    #[serde(default)]
    pub rh_dip: RhDipToml,
}

impl MetqcConfig {
    /// Loads the file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_time_var")]
    pub time_var: String,
    #[serde(default = "default_temperature_var")]
    pub temperature_var: String,
    #[serde(default = "default_humidity_var")]
    pub humidity_var: String,
    #[serde(default = "default_temperature_flag_var")]
    pub temperature_flag_var: String,
    #[serde(default = "default_humidity_flag_var")]
    pub humidity_flag_var: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            time_var: default_time_var(),
            temperature_var: default_temperature_var(),
            humidity_var: default_humidity_var(),
            temperature_flag_var: default_temperature_flag_var(),
            humidity_flag_var: default_humidity_flag_var(),
        }
    }
}

fn default_time_var() -> String {
    "time".to_string()
}
fn default_temperature_var() -> String {
    "air_temperature".to_string()
}
fn default_humidity_var() -> String {
    "relative_humidity".to_string()
}
fn default_temperature_flag_var() -> String {
    "qc_flag_air_temperature".to_string()
}
fn default_humidity_flag_var() -> String {
    "qc_flag_relative_humidity".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionToml {
    #[serde(default = "default_window_minutes")]
    pub window_minutes: f64,
    #[serde(default = "default_temp_std_threshold")]
    pub temp_std_threshold: f64,
    #[serde(default = "default_rh_std_threshold")]
    pub rh_std_threshold: f64,
    #[serde(default = "default_rh_saturation_exclusion")]
    pub rh_saturation_exclusion: f64,
    #[serde(default = "default_recovery_minutes")]
    pub recovery_minutes: f64,
    /// Flag temperatures below `low_temperature_threshold` as bad.
    #[serde(default = "default_true")]
    pub low_temperature_check: bool,
    /// Readings below this temperature (K) are treated as a failed probe.
    #[serde(default = "default_low_temperature_threshold")]
    pub low_temperature_threshold: f64,
    #[serde(default = "default_overlap_fraction")]
    pub overlap_fraction: f64,
    #[serde(default = "default_consistency_tolerance_minutes")]
    pub consistency_tolerance_minutes: f64,
    #[serde(default = "default_max_auto_shift_minutes")]
    pub max_auto_shift_minutes: f64,
}

impl Default for DetectionToml {
    fn default() -> Self {
        Self {
            window_minutes: default_window_minutes(),
            temp_std_threshold: default_temp_std_threshold(),
            rh_std_threshold: default_rh_std_threshold(),
            rh_saturation_exclusion: default_rh_saturation_exclusion(),
            recovery_minutes: default_recovery_minutes(),
            low_temperature_check: true,
            low_temperature_threshold: default_low_temperature_threshold(),
            overlap_fraction: default_overlap_fraction(),
            consistency_tolerance_minutes: default_consistency_tolerance_minutes(),
            max_auto_shift_minutes: default_max_auto_shift_minutes(),
        }
    }
}

fn default_window_minutes() -> f64 {
    8.0
}
fn default_temp_std_threshold() -> f64 {
    0.07
}
fn default_rh_std_threshold() -> f64 {
    0.03
}
fn default_rh_saturation_exclusion() -> f64 {
    99.8
}
fn default_recovery_minutes() -> f64 {
    6.0
}
fn default_true() -> bool {
    true
}
fn default_low_temperature_threshold() -> f64 {
    DEFAULT_LOW_TEMPERATURE
}
fn default_overlap_fraction() -> f64 {
    0.5
}
fn default_consistency_tolerance_minutes() -> f64 {
    60.0
}
fn default_max_auto_shift_minutes() -> f64 {
    60.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RhDipToml {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_drop_threshold")]
    pub drop_threshold: f64,
    #[serde(default = "default_recovery_seconds")]
    pub recovery_seconds: f64,
    #[serde(default = "default_expected_margin_seconds")]
    pub expected_margin_seconds: f64,
}

impl Default for RhDipToml {
    fn default() -> Self {
        Self {
            enabled: false,
            drop_threshold: default_drop_threshold(),
            recovery_seconds: default_recovery_seconds(),
            expected_margin_seconds: default_expected_margin_seconds(),
        }
    }
}

fn default_drop_threshold() -> f64 {
    3.0
}
fn default_recovery_seconds() -> f64 {
    360.0
}
fn default_expected_margin_seconds() -> f64 {
    900.0
}
