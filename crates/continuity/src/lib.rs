//! # metqc-continuity
//!
//! Confirms a day's purge intervals from three sources: the detector's
//! candidates, the previous day's schedule and explicit operator input.
//!
//! Purges run on a fixed daily schedule, so a purge the detector misses
//! today is usually recoverable from yesterday. The schedule drifts slowly
//! with the logger clock; [`compute_shift`] estimates that drift from the
//! leading purge of each day.
//!
//! ```mermaid
//! graph LR
//!     C["candidates"] --> R["resolve()"]
//!     P["previous-day intervals"] --> S["compute_shift()"] --> R
//!     P --> R
//!     M["manual pairs"] --> R
//!     R --> O["Resolution"]
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | `resolve` | Orchestration and [`Resolution`] |
//! | `previous` | Re-placing the previous day's schedule |
//! | `manual` | Operator-supplied intervals |
//! | `shift` | Time-of-day shift between two schedules |
//! | `consistency` | Day-to-day schedule agreement |
//! | `config` | [`ContinuityConfig`] |
//! | `error` | Error types |

mod config;
mod consistency;
mod error;
mod manual;
mod previous;
mod resolve;
mod shift;

pub use config::ContinuityConfig;
pub use consistency::check_consistency;
pub use error::ContinuityError;
pub use manual::apply_manual;
pub use previous::apply_previous_day;
pub use resolve::{Resolution, resolve};
pub use shift::compute_shift;
