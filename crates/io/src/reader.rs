//! Reading day files.

use std::path::Path;

use metqc_interval::{FlagState, Variable};
use tracing::{debug, info};

use crate::config::DayFileConfig;
use crate::error::IoError;
use crate::netcdf_read;
use crate::series::DaySeries;

/// Read one day file.
///
/// Temperature and humidity are required; NaN and fill values become
/// `None`. Existing flag variables are loaded when present so that a rerun
/// can build on them.
///
/// # Errors
///
/// Returns [`IoError`] if the file or a required variable is missing, the
/// time axis cannot be decoded, a stored flag is not a known code, or the
/// columns fail validation.
pub fn read_day(path: &Path, config: &DayFileConfig) -> Result<DaySeries, IoError> {
    config.validate()?;
    let file = netcdf_read::open_file(path)?;

    // -- Time ---------------------------------------------------------------

    let offsets = netcdf_read::read_1d_f64(&file, config.time_var(), path)?;
    let (unit, epoch) = netcdf_read::read_time_units(&file, config.time_var(), path)?;
    let times = netcdf_read::offsets_to_datetimes(epoch, unit, &offsets)?;

    // -- Measurements and stored flags --------------------------------------

    let (temperature, temperature_flags) =
        read_variable(&file, config, Variable::Temperature, path)?;
    let (humidity, humidity_flags) = read_variable(&file, config, Variable::Humidity, path)?;

    let series = DaySeries::with_flags(
        times,
        temperature,
        humidity,
        temperature_flags,
        humidity_flags,
    )?;
    info!(
        path = %path.display(),
        n_samples = series.len(),
        day = ?series.day(),
        "day file read"
    );
    Ok(series)
}

/// Measurements and stored flags of one physical variable.
fn read_variable(
    file: &netcdf::File,
    config: &DayFileConfig,
    variable: Variable,
    path: &Path,
) -> Result<(Vec<Option<f64>>, Option<Vec<FlagState>>), IoError> {
    let (Some(value_var), Some(flag_var)) = (config.value_var(variable), config.flag_var(variable))
    else {
        return Ok((Vec::new(), None));
    };
    let values = netcdf_read::read_measurement(file, value_var, path)?;
    let flags = netcdf_read::read_flags(file, flag_var)?;
    debug!(%variable, value_var, has_flags = flags.is_some(), "variable read");
    Ok((values, flags))
}
