//! One day of surface temperature and humidity readings.

use chrono::{NaiveDate, NaiveDateTime};
use metqc_interval::{FlagState, Variable};

use crate::error::IoError;
use crate::validate::{ValidationCollector, validate_lengths, validate_times_increasing};

/// Time-aligned readings from one day file, plus any flags already stored
/// in it.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySeries {
    times: Vec<NaiveDateTime>,
    temperature: Vec<Option<f64>>,
    humidity: Vec<Option<f64>>,
    temperature_flags: Option<Vec<FlagState>>,
    humidity_flags: Option<Vec<FlagState>>,
}

impl DaySeries {
    /// Creates a series after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if any column length differs from the
    /// time axis or the timestamps are not strictly increasing.
    pub fn new(
        times: Vec<NaiveDateTime>,
        temperature: Vec<Option<f64>>,
        humidity: Vec<Option<f64>>,
    ) -> Result<Self, IoError> {
        Self::with_flags(times, temperature, humidity, None, None)
    }

    /// Creates a series that carries previously stored flags.
    ///
    /// # Errors
    ///
    /// As [`DaySeries::new`], with flag columns checked too.
    pub fn with_flags(
        times: Vec<NaiveDateTime>,
        temperature: Vec<Option<f64>>,
        humidity: Vec<Option<f64>>,
        temperature_flags: Option<Vec<FlagState>>,
        humidity_flags: Option<Vec<FlagState>>,
    ) -> Result<Self, IoError> {
        let mut c = ValidationCollector::new();
        let mut columns = vec![
            ("temperature", temperature.len()),
            ("humidity", humidity.len()),
        ];
        if let Some(f) = &temperature_flags {
            columns.push(("temperature flags", f.len()));
        }
        if let Some(f) = &humidity_flags {
            columns.push(("humidity flags", f.len()));
        }
        validate_lengths(&mut c, times.len(), &columns);
        validate_times_increasing(&mut c, &times);
        c.finish()?;

        Ok(Self {
            times,
            temperature,
            humidity,
            temperature_flags,
            humidity_flags,
        })
    }

    /// Returns the timestamps.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Returns the air temperature readings (K).
    pub fn temperature(&self) -> &[Option<f64>] {
        &self.temperature
    }

    /// Returns the relative humidity readings (%).
    pub fn humidity(&self) -> &[Option<f64>] {
        &self.humidity
    }

    /// Readings of one physical variable. [`Variable::Both`] yields nothing.
    pub fn values(&self, variable: Variable) -> &[Option<f64>] {
        match variable {
            Variable::Temperature => &self.temperature,
            Variable::Humidity => &self.humidity,
            Variable::Both => &[],
        }
    }

    /// Flags already stored for a physical variable, if any.
    pub fn stored_flags(&self, variable: Variable) -> Option<&[FlagState]> {
        match variable {
            Variable::Temperature => self.temperature_flags.as_deref(),
            Variable::Humidity => self.humidity_flags.as_deref(),
            Variable::Both => None,
        }
    }

    /// Calendar day of the first sample, or `None` for an empty series.
    pub fn day(&self) -> Option<NaiveDate> {
        self.times.first().map(NaiveDateTime::date)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
