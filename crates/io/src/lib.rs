//! # metqc-io
//!
//! Reads surface met day files (NetCDF, one day of air temperature and
//! relative humidity on a `time` axis) into [`DaySeries`] and writes the
//! resulting `qc_flag_*` variables back in place.

mod config;
mod error;
mod netcdf_read;
mod reader;
mod series;
mod validate;
mod writer;

pub use config::DayFileConfig;
pub use error::IoError;
pub use reader::read_day;
pub use series::DaySeries;
pub use writer::write_flags;
