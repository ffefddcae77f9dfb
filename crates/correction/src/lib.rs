//! # metqc-correction
//!
//! Bad-data intervals supplied from outside the purge detector: hand-edited
//! correction files per variable, and runs of implausibly low temperature.
//! Corrections always win over purge flags.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `file` | Correction file parsing (ISO and station archive formats) |
//! | `overlay` | [`CorrectionSet`] grouping corrections per variable |
//! | `low_temperature` | Low-reading runs as temperature corrections |
//! | `error` | Error types |

mod error;
mod file;
mod low_temperature;
mod overlay;

pub use error::CorrectionError;
pub use file::{parse_corrections, read_correction_file};
pub use low_temperature::{DEFAULT_LOW_TEMPERATURE, low_temperature_intervals};
pub use overlay::CorrectionSet;
