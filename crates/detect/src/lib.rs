//! Purge-cycle detection for surface temperature and humidity series.
//!
//! During a purge the HMP155 probe is flushed with dry air and its readings
//! freeze, so purges show up as stretches of abnormally low local variance.
//!
//! # Pipeline
//!
//! ```text
//! detect_purges()
//!   ├─ mask_below()        low-temperature readings → missing
//!   ├─ detect_flat()       temperature (flat.rs)
//!   └─ detect_flat()       humidity, saturation excluded (flat.rs)
//!
//! detect_rh_dips()         optional dip scan (dip.rs)
//! ```
//!
//! # Quick start
//!
//! ```
//! use chrono::{NaiveDate, TimeDelta};
//! use metqc_detect::{DetectionConfig, detect_purges};
//!
//! let t0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let times: Vec<_> = (0..30).map(|i| t0 + TimeDelta::minutes(i)).collect();
//! let temperature = vec![Some(280.0); 30];
//! let humidity: Vec<_> = (0..30).map(|i| Some(60.0 + (i % 2) as f64)).collect();
//!
//! let candidates =
//!     detect_purges(&times, &temperature, &humidity, &DetectionConfig::default()).unwrap();
//! assert_eq!(candidates.len(), 1);
//! ```

mod config;
mod dip;
mod error;
mod flat;
mod sampling;

pub use config::{DetectionConfig, RhDipConfig};
pub use dip::detect_rh_dips;
pub use error::DetectError;
pub use flat::{detect_flat, detect_purges, mask_below};
pub use sampling::sampling_interval;
