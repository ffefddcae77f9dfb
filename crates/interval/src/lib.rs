//! # metqc-interval
//!
//! Value types shared by every stage of the QC flag engine: half-open time
//! intervals tagged with the variable they apply to and where they came
//! from, the per-sample flag states, and time-of-day arithmetic.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Interval::new(start, end, variable, source)?"] --> B["Interval"]
//!     B -->|".merge(&other)"| C["Option of Interval"]
//!     B -->|".contains(t) / .overlaps(&other)"| D["bool"]
//!     E["Vec of Interval"] -->|"coalesce(&v, gap)"| F["merged, sorted"]
//!     G["NaiveDateTime"] -->|"time_of_day()"| H["TimeDelta since midnight"]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `interval` | `Interval` and set-level coalescing |
//! | `tag` | `Variable` and `Source` tags |
//! | `flag` | `FlagState` codes as persisted in QC flag variables |
//! | `time` | Time-of-day helpers |
//! | `error` | Error types |

mod error;
mod flag;
mod interval;
mod tag;
mod time;

pub use error::IntervalError;
pub use flag::FlagState;
pub use interval::{Interval, coalesce};
pub use tag::{Source, Variable};
pub use time::{at_time_of_day, delta_from_seconds, delta_seconds, time_of_day};
