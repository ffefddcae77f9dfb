//! Writing QC flag variables back into day files.

use std::path::Path;

use metqc_interval::{FlagState, Variable};
use tracing::{debug, info};

use crate::config::DayFileConfig;
use crate::error::IoError;

/// Write both flag columns into the day file at `path`, in place.
///
/// Flag variables are created as `i8` on the time dimension with CF
/// `flag_values`/`flag_meanings` attributes if they do not exist yet, and
/// overwritten otherwise. All other variables are left untouched.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::MissingVariable`] if the
/// time variable is absent, [`IoError::DimensionMismatch`] if a column does
/// not match the time dimension, or [`IoError::Netcdf`] on write failure.
pub fn write_flags(
    path: &Path,
    config: &DayFileConfig,
    temperature: &[FlagState],
    humidity: &[FlagState],
) -> Result<(), IoError> {
    config.validate()?;
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut file = netcdf::append(path)?;

    let (time_dim, n_time) = {
        let time = file
            .variable(config.time_var())
            .ok_or_else(|| IoError::MissingVariable {
                name: config.time_var().to_string(),
                path: path.to_path_buf(),
            })?;
        let dims = time.dimensions();
        let Some(dim) = dims.first() else {
            return Err(IoError::DimensionMismatch {
                name: format!("{} dimensions", config.time_var()),
                expected: 1,
                got: 0,
            });
        };
        (dim.name(), dim.len())
    };

    for (variable, flags) in [
        (Variable::Temperature, temperature),
        (Variable::Humidity, humidity),
    ] {
        let Some(name) = config.flag_var(variable) else {
            continue;
        };
        if flags.len() != n_time {
            return Err(IoError::DimensionMismatch {
                name: name.to_string(),
                expected: n_time,
                got: flags.len(),
            });
        }
        let codes: Vec<i8> = flags.iter().map(|f| f.code()).collect();

        if let Some(mut var) = file.variable_mut(name) {
            var.put_values(&codes, ..)?;
            debug!(name, "flag variable overwritten");
            continue;
        }

        let mut var = file.add_variable::<i8>(name, &[time_dim.as_str()])?;
        let states = flag_states(variable);
        var.put_attribute("units", "1")?;
        var.put_attribute("long_name", long_name(variable))?;
        var.put_attribute("standard_name", "quality_flag")?;
        var.put_attribute(
            "flag_values",
            states.iter().map(|s| s.code()).collect::<Vec<i8>>(),
        )?;
        var.put_attribute(
            "flag_meanings",
            states
                .iter()
                .map(|s| s.meaning())
                .collect::<Vec<_>>()
                .join(" "),
        )?;
        var.put_values(&codes, ..)?;
        debug!(name, "flag variable created");
    }

    info!(path = %path.display(), n_samples = n_time, "flags written");
    Ok(())
}

/// States a variable's flags can take. Temperature has no recovery period.
pub(crate) fn flag_states(variable: Variable) -> &'static [FlagState] {
    match variable {
        Variable::Humidity => &FlagState::ALL,
        _ => &FlagState::ALL[..4],
    }
}

fn long_name(variable: Variable) -> &'static str {
    match variable {
        Variable::Humidity => "Data Quality flag: Relative Humidity",
        _ => "Data Quality flag: Air Temperature",
    }
}
