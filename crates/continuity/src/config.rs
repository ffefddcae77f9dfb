//! Configuration for the continuity resolver.

use chrono::TimeDelta;

use crate::error::ContinuityError;

/// Parameters controlling how the previous day's schedule is carried over.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuityConfig {
    /// Fraction of a copied interval that a detection must overlap to
    /// supersede it.
    overlap_fraction: f64,
    /// Largest time-of-day difference at which two days' purges still count
    /// as the same schedule.
    consistency_tolerance: TimeDelta,
    /// Largest automatically computed shift that is trusted.
    max_auto_shift: TimeDelta,
}

impl Default for ContinuityConfig {
    fn default() -> Self {
        Self {
            overlap_fraction: 0.5,
            consistency_tolerance: TimeDelta::minutes(60),
            max_auto_shift: TimeDelta::minutes(60),
        }
    }
}

impl ContinuityConfig {
    /// Creates a configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overlap fraction.
    pub fn with_overlap_fraction(mut self, fraction: f64) -> Self {
        self.overlap_fraction = fraction;
        self
    }

    /// Sets the schedule consistency tolerance.
    pub fn with_consistency_tolerance(mut self, tolerance: TimeDelta) -> Self {
        self.consistency_tolerance = tolerance;
        self
    }

    /// Sets the largest trusted automatic shift.
    pub fn with_max_auto_shift(mut self, max: TimeDelta) -> Self {
        self.max_auto_shift = max;
        self
    }

    /// Returns the overlap fraction.
    pub fn overlap_fraction(&self) -> f64 {
        self.overlap_fraction
    }

    /// Returns the schedule consistency tolerance.
    pub fn consistency_tolerance(&self) -> TimeDelta {
        self.consistency_tolerance
    }

    /// Returns the largest trusted automatic shift.
    pub fn max_auto_shift(&self) -> TimeDelta {
        self.max_auto_shift
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ContinuityError::InvalidConfig`] if the overlap fraction is
    /// outside `(0, 1]` or a tolerance is negative.
    pub fn validate(&self) -> Result<(), ContinuityError> {
        if !(self.overlap_fraction > 0.0 && self.overlap_fraction <= 1.0) {
            return Err(ContinuityError::InvalidConfig {
                reason: format!(
                    "overlap_fraction must be in (0, 1], got {}",
                    self.overlap_fraction
                ),
            });
        }
        if self.consistency_tolerance < TimeDelta::zero() || self.max_auto_shift < TimeDelta::zero()
        {
            return Err(ContinuityError::InvalidConfig {
                reason: "tolerances must be >= 0".to_string(),
            });
        }
        Ok(())
    }
}
