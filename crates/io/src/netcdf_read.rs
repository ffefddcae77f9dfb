//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use metqc_interval::{FlagState, delta_from_seconds};
use netcdf::AttributeValue;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

fn variable<'f>(
    file: &'f netcdf::File,
    name: &str,
    path: &Path,
) -> Result<netcdf::Variable<'f>, IoError> {
    file.variable(name).ok_or_else(|| IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 1-D `f64` variable.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    name: &str,
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    Ok(variable(file, name, path)?.get_values::<f64, _>(..)?)
}

/// Read a 1-D measurement variable, mapping NaN and the `_FillValue` (or
/// `missing_value`) to `None`.
pub(crate) fn read_measurement(
    file: &netcdf::File,
    name: &str,
    path: &Path,
) -> Result<Vec<Option<f64>>, IoError> {
    let var = variable(file, name, path)?;
    let fill = ["_FillValue", "missing_value"]
        .iter()
        .find_map(|attr| var.attribute_value(attr).and_then(|r| r.ok()))
        .and_then(attribute_as_f64);
    let raw = var.get_values::<f64, _>(..)?;
    Ok(raw
        .into_iter()
        .map(|v| {
            let is_fill = fill.is_some_and(|f| v == f);
            (v.is_finite() && !is_fill).then_some(v)
        })
        .collect())
}

/// Read a persisted flag variable. Returns `Ok(None)` if the file has no
/// such variable.
pub(crate) fn read_flags(
    file: &netcdf::File,
    name: &str,
) -> Result<Option<Vec<FlagState>>, IoError> {
    let Some(var) = file.variable(name) else {
        return Ok(None);
    };
    let codes = var.get_values::<i8, _>(..)?;
    codes
        .into_iter()
        .enumerate()
        .map(|(index, code)| {
            FlagState::from_code(code).map_err(|e| IoError::InvalidFlag {
                name: name.to_string(),
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn attribute_as_f64(value: AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Schar(v) => Some(f64::from(v)),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().copied().map(f64::from),
        _ => None,
    }
}

/// Unit of a CF `"<unit> since <epoch>"` time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Some(Self::Seconds),
            "min" | "mins" | "minute" | "minutes" => Some(Self::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(Self::Hours),
            "d" | "day" | "days" => Some(Self::Days),
            _ => None,
        }
    }

    fn seconds(self) -> f64 {
        match self {
            Self::Seconds => 1.0,
            Self::Minutes => 60.0,
            Self::Hours => 3600.0,
            Self::Days => 86_400.0,
        }
    }
}

/// Read and parse the `units` attribute of the time variable.
pub(crate) fn read_time_units(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<(TimeUnit, NaiveDateTime), IoError> {
    let var = variable(file, time_var, path)?;

    let units: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    parse_time_units(&units)
}

/// Parses `"<unit> since <date>[ <time>][Z| UTC]"`.
pub(crate) fn parse_time_units(units: &str) -> Result<(TimeUnit, NaiveDateTime), IoError> {
    let invalid = || IoError::InvalidTime {
        reason: format!("unexpected time units format: '{units}'"),
    };
    let mut parts = units.trim().splitn(3, ' ');
    let (Some(unit), Some("since"), Some(epoch)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let unit = TimeUnit::parse(unit).ok_or_else(|| IoError::InvalidTime {
        reason: format!("unsupported time unit '{unit}'"),
    })?;
    let epoch = parse_epoch(epoch).ok_or_else(invalid)?;
    Ok((unit, epoch))
}

fn parse_epoch(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    let s = s
        .strip_suffix(" UTC")
        .or_else(|| s.strip_suffix('Z'))
        .or_else(|| s.strip_suffix("+00:00"))
        .unwrap_or(s)
        .trim();
    const FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Convert time offsets into timestamps at microsecond resolution.
pub(crate) fn offsets_to_datetimes(
    epoch: NaiveDateTime,
    unit: TimeUnit,
    offsets: &[f64],
) -> Result<Vec<NaiveDateTime>, IoError> {
    offsets
        .iter()
        .enumerate()
        .map(|(i, &offset)| {
            if !offset.is_finite() {
                return Err(IoError::InvalidTime {
                    reason: format!("non-finite time value at index {i}"),
                });
            }
            epoch
                .checked_add_signed(delta_from_seconds(offset * unit.seconds()))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("time value {offset} at index {i} is out of range"),
                })
        })
        .collect()
}
