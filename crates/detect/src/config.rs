//! Configuration types for purge detection.

use chrono::TimeDelta;

use crate::error::DetectError;

/// Immutable parameter bundle for one flagging run.
///
/// Defaults match the HMP155 purge schedule at the Chilbolton site: an
/// 8-minute window, 0.07 K / 0.03 %RH flatness thresholds, and a 6-minute
/// humidity recovery period.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    /// Sliding window length.
    window: TimeDelta,
    /// Temperature standard-deviation threshold (K).
    temp_std_threshold: f64,
    /// Relative-humidity standard-deviation threshold (%).
    rh_std_threshold: f64,
    /// Humidity windows reaching this value are never flat (%).
    rh_saturation_exclusion: f64,
    /// Humidity settling time after the end of a purge. The heated sensor
    /// head reads low until it re-equilibrates with ambient air, so this
    /// period is flagged as recovery rather than good data.
    recovery_duration: TimeDelta,
    /// Temperatures below this (K) are physically implausible for the site.
    low_temperature_threshold: Option<f64>,
    /// Optional humidity dip detection.
    rh_dip: Option<RhDipConfig>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            window: TimeDelta::minutes(8),
            temp_std_threshold: 0.07,
            rh_std_threshold: 0.03,
            rh_saturation_exclusion: 99.8,
            recovery_duration: TimeDelta::minutes(6),
            low_temperature_threshold: Some(245.0),
            rh_dip: None,
        }
    }
}

impl DetectionConfig {
    /// Creates a configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sliding window length.
    pub fn with_window(mut self, window: TimeDelta) -> Self {
        self.window = window;
        self
    }

    /// Sets the temperature flatness threshold (K).
    pub fn with_temp_std_threshold(mut self, threshold: f64) -> Self {
        self.temp_std_threshold = threshold;
        self
    }

    /// Sets the humidity flatness threshold (%).
    pub fn with_rh_std_threshold(mut self, threshold: f64) -> Self {
        self.rh_std_threshold = threshold;
        self
    }

    /// Sets the near-saturation exclusion level (%).
    pub fn with_rh_saturation_exclusion(mut self, level: f64) -> Self {
        self.rh_saturation_exclusion = level;
        self
    }

    /// Sets the humidity recovery duration.
    pub fn with_recovery_duration(mut self, duration: TimeDelta) -> Self {
        self.recovery_duration = duration;
        self
    }

    /// Sets (or disables) the low-temperature limit (K).
    pub fn with_low_temperature_threshold(mut self, threshold: Option<f64>) -> Self {
        self.low_temperature_threshold = threshold;
        self
    }

    /// Enables (or disables) humidity dip detection.
    pub fn with_rh_dip(mut self, rh_dip: Option<RhDipConfig>) -> Self {
        self.rh_dip = rh_dip;
        self
    }

    /// Returns the sliding window length.
    pub fn window(&self) -> TimeDelta {
        self.window
    }

    /// Returns the temperature flatness threshold.
    pub fn temp_std_threshold(&self) -> f64 {
        self.temp_std_threshold
    }

    /// Returns the humidity flatness threshold.
    pub fn rh_std_threshold(&self) -> f64 {
        self.rh_std_threshold
    }

    /// Returns the near-saturation exclusion level.
    pub fn rh_saturation_exclusion(&self) -> f64 {
        self.rh_saturation_exclusion
    }

    /// Returns the humidity recovery duration.
    pub fn recovery_duration(&self) -> TimeDelta {
        self.recovery_duration
    }

    /// Returns the low-temperature limit, if enabled.
    pub fn low_temperature_threshold(&self) -> Option<f64> {
        self.low_temperature_threshold
    }

    /// Returns the humidity dip settings, if enabled.
    pub fn rh_dip(&self) -> Option<&RhDipConfig> {
        self.rh_dip.as_ref()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidConfig`] for a non-positive window,
    /// non-finite or non-positive thresholds, a negative recovery duration,
    /// or an invalid [`RhDipConfig`].
    pub fn validate(&self) -> Result<(), DetectError> {
        if self.window <= TimeDelta::zero() {
            return Err(DetectError::InvalidConfig {
                reason: format!("window must be positive, got {}", self.window),
            });
        }
        for (name, v) in [
            ("temp_std_threshold", self.temp_std_threshold),
            ("rh_std_threshold", self.rh_std_threshold),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(DetectError::InvalidConfig {
                    reason: format!("{name} must be finite and > 0, got {v}"),
                });
            }
        }
        if !self.rh_saturation_exclusion.is_finite() {
            return Err(DetectError::InvalidConfig {
                reason: format!(
                    "rh_saturation_exclusion must be finite, got {}",
                    self.rh_saturation_exclusion
                ),
            });
        }
        if self.recovery_duration < TimeDelta::zero() {
            return Err(DetectError::InvalidConfig {
                reason: format!(
                    "recovery_duration must be >= 0, got {}",
                    self.recovery_duration
                ),
            });
        }
        if let Some(t) = self.low_temperature_threshold
            && !t.is_finite()
        {
            return Err(DetectError::InvalidConfig {
                reason: format!("low_temperature_threshold must be finite, got {t}"),
            });
        }
        if let Some(dip) = &self.rh_dip {
            dip.validate()?;
        }
        Ok(())
    }
}

/// Parameters of the humidity dip detector.
///
/// A dip is a sharp humidity drop shortly after a flat stretch that
/// recovers within a few minutes, the signature of a purge the flatness
/// scan missed.
#[derive(Debug, Clone, PartialEq)]
pub struct RhDipConfig {
    /// Minimum drop below the recent maximum (%).
    drop_threshold: f64,
    /// Maximum time for humidity to climb back by the size of the drop.
    recovery_time: TimeDelta,
    /// Rolling window (samples) for the preceding-flatness test.
    flat_window: usize,
    /// Rolling standard-deviation threshold for the preceding-flatness test.
    flat_threshold: f64,
    /// Samples before the dip used for the recent maximum.
    lookback: usize,
    /// Maximum samples searched for the recovery.
    max_recovery_samples: usize,
    /// Tolerance around the expected purge times of day.
    expected_margin: TimeDelta,
}

impl Default for RhDipConfig {
    fn default() -> Self {
        Self {
            drop_threshold: 3.0,
            recovery_time: TimeDelta::seconds(360),
            flat_window: 5,
            flat_threshold: 0.1,
            lookback: 3,
            max_recovery_samples: 20,
            expected_margin: TimeDelta::seconds(900),
        }
    }
}

impl RhDipConfig {
    /// Creates a configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum drop (%).
    pub fn with_drop_threshold(mut self, drop: f64) -> Self {
        self.drop_threshold = drop;
        self
    }

    /// Sets the maximum recovery time.
    pub fn with_recovery_time(mut self, t: TimeDelta) -> Self {
        self.recovery_time = t;
        self
    }

    /// Sets the tolerance around expected purge times.
    pub fn with_expected_margin(mut self, margin: TimeDelta) -> Self {
        self.expected_margin = margin;
        self
    }

    /// Returns the minimum drop.
    pub fn drop_threshold(&self) -> f64 {
        self.drop_threshold
    }

    /// Returns the maximum recovery time.
    pub fn recovery_time(&self) -> TimeDelta {
        self.recovery_time
    }

    /// Returns the flatness window in samples.
    pub fn flat_window(&self) -> usize {
        self.flat_window
    }

    /// Returns the flatness threshold.
    pub fn flat_threshold(&self) -> f64 {
        self.flat_threshold
    }

    /// Returns the look-back length in samples.
    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Returns the recovery search length in samples.
    pub fn max_recovery_samples(&self) -> usize {
        self.max_recovery_samples
    }

    /// Returns the tolerance around expected purge times.
    pub fn expected_margin(&self) -> TimeDelta {
        self.expected_margin
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), DetectError> {
        if !self.drop_threshold.is_finite() || self.drop_threshold <= 0.0 {
            return Err(DetectError::InvalidConfig {
                reason: format!(
                    "rh_dip drop_threshold must be finite and > 0, got {}",
                    self.drop_threshold
                ),
            });
        }
        if !self.flat_threshold.is_finite() || self.flat_threshold <= 0.0 {
            return Err(DetectError::InvalidConfig {
                reason: format!(
                    "rh_dip flat_threshold must be finite and > 0, got {}",
                    self.flat_threshold
                ),
            });
        }
        if self.flat_window < 2 || self.lookback == 0 || self.max_recovery_samples == 0 {
            return Err(DetectError::InvalidConfig {
                reason: "rh_dip sample counts must be positive (flat_window >= 2)".to_string(),
            });
        }
        if self.recovery_time <= TimeDelta::zero() || self.expected_margin < TimeDelta::zero() {
            return Err(DetectError::InvalidConfig {
                reason: "rh_dip recovery_time must be > 0 and expected_margin >= 0".to_string(),
            });
        }
        Ok(())
    }
}
