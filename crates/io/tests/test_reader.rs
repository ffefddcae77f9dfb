//! Integration tests for reading day files.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, TimeDelta};
use metqc_interval::{FlagState, Variable};
use metqc_io::{DayFileConfig, IoError, read_day};
use tempfile::tempdir;

// ---------------------------------------------------------------------------
// Helper: programmatic NetCDF fixture builder
// ---------------------------------------------------------------------------

/// Minimal day-file fixture.
struct FixtureBuilder {
    time: Vec<f64>,
    units: String,
    temperature: Vec<f64>,
    humidity: Vec<f64>,
    fill_value: Option<f64>,
    humidity_flags: Option<Vec<i8>>,
}

impl FixtureBuilder {
    /// `n` one-minute samples starting at midnight on 2018-05-04.
    fn new(n: usize) -> Self {
        // 2018-05-04T00:00:00Z
        let t0 = 1_525_392_000.0;
        Self {
            time: (0..n).map(|i| t0 + 60.0 * i as f64).collect(),
            units: "seconds since 1970-01-01 00:00:00".to_string(),
            temperature: (0..n).map(|i| 285.0 + 0.1 * (i % 7) as f64).collect(),
            humidity: (0..n).map(|i| 60.0 + 0.5 * (i % 5) as f64).collect(),
            fill_value: None,
            humidity_flags: None,
        }
    }

    fn with_time(mut self, time: Vec<f64>, units: &str) -> Self {
        self.time = time;
        self.units = units.to_string();
        self
    }

    fn with_temperature_at(mut self, i: usize, v: f64) -> Self {
        self.temperature[i] = v;
        self
    }

    fn with_fill_value(mut self, fv: f64) -> Self {
        self.fill_value = Some(fv);
        self
    }

    fn with_humidity_flags(mut self, flags: Vec<i8>) -> Self {
        self.humidity_flags = Some(flags);
        self
    }

    fn write(&self, dir: &Path) -> PathBuf {
        let path = dir.join("day.nc");
        let mut file = netcdf::create(&path).expect("failed to create NetCDF file");
        file.add_dimension("time", self.time.len())
            .expect("add dim time");
        {
            let mut var = file
                .add_variable::<f64>("time", &["time"])
                .expect("add var time");
            var.put_values(&self.time, ..).expect("put time values");
            var.put_attribute("units", self.units.as_str())
                .expect("add time units");
        }
        for (name, data) in [
            ("air_temperature", &self.temperature),
            ("relative_humidity", &self.humidity),
        ] {
            let mut var = file
                .add_variable::<f64>(name, &["time"])
                .expect("add measurement var");
            if let Some(fv) = self.fill_value {
                var.put_attribute("_FillValue", fv).expect("add _FillValue");
            }
            var.put_values(data, ..).expect("put measurement values");
        }
        if let Some(flags) = &self.humidity_flags {
            let mut var = file
                .add_variable::<i8>("qc_flag_relative_humidity", &["time"])
                .expect("add flag var");
            var.put_values(flags, ..).expect("put flag values");
        }
        path
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn reads_times_and_values() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(1440).write(dir.path());

    let day = read_day(&path, &DayFileConfig::default()).unwrap();
    assert_eq!(day.len(), 1440);
    let d = NaiveDate::from_ymd_opt(2018, 5, 4).unwrap();
    assert_eq!(day.day(), Some(d));
    assert_eq!(day.times()[0], d.and_hms_opt(0, 0, 0).unwrap());
    assert_eq!(day.times()[1439], d.and_hms_opt(23, 59, 0).unwrap());
    assert!(day.temperature().iter().all(Option::is_some));
    assert!(day.stored_flags(Variable::Humidity).is_none());
}

#[test]
fn nan_and_fill_values_are_missing() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(10)
        .with_fill_value(-999.0)
        .with_temperature_at(2, f64::NAN)
        .with_temperature_at(5, -999.0)
        .write(dir.path());

    let day = read_day(&path, &DayFileConfig::default()).unwrap();
    assert_eq!(day.temperature()[2], None);
    assert_eq!(day.temperature()[5], None);
    assert!(day.temperature()[3].is_some());
}

#[test]
fn day_based_time_units() {
    let dir = tempdir().unwrap();
    let time: Vec<f64> = (0..4).map(|i| 17_655.0 + f64::from(i) / 1440.0).collect();
    let path = FixtureBuilder::new(4)
        .with_time(time, "days since 1970-01-01")
        .write(dir.path());

    let day = read_day(&path, &DayFileConfig::default()).unwrap();
    let t0 = NaiveDate::from_ymd_opt(2018, 5, 4)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    // Fractional days are rounded to the microsecond.
    let err = (day.times()[1] - (t0 + TimeDelta::minutes(1))).abs();
    assert!(err <= TimeDelta::microseconds(1));
}

#[test]
fn stored_flags_are_loaded() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(3)
        .with_humidity_flags(vec![1, 3, 4])
        .write(dir.path());

    let day = read_day(&path, &DayFileConfig::default()).unwrap();
    assert_eq!(
        day.stored_flags(Variable::Humidity).unwrap(),
        &[FlagState::Good, FlagState::Purge, FlagState::Recovery]
    );
    assert!(day.stored_flags(Variable::Temperature).is_none());
}

#[test]
fn unknown_flag_code_is_rejected() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(3)
        .with_humidity_flags(vec![1, 9, 1])
        .write(dir.path());

    let err = read_day(&path, &DayFileConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::InvalidFlag { index: 1, .. }));
}

#[test]
fn unsorted_time_is_rejected() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(3)
        .with_time(vec![0.0, 120.0, 60.0], "seconds since 2018-05-04")
        .write(dir.path());

    let err = read_day(&path, &DayFileConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::Validation { count: 1, .. }));
}

#[test]
fn missing_variable_is_reported() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(3).write(dir.path());

    let config = DayFileConfig::default().with_humidity_var("rh");
    match read_day(&path, &config).unwrap_err() {
        IoError::MissingVariable { name, .. } => assert_eq!(name, "rh"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_reported() {
    let err = read_day(Path::new("/nonexistent/day.nc"), &DayFileConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}
