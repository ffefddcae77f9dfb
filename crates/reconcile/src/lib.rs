//! Per-sample QC flag reconciliation.
//!
//! Turns the day's confirmed intervals into `qc_flag_*` columns as a pure
//! fold: the base columns are read, new columns are returned.
//!
//! # Precedence
//!
//! 1. **Initialize**: missing readings are unset, valid unset readings are good
//! 2. **Purge**: confirmed purge intervals
//! 3. **Recovery**: humidity settling after each purge, then optional dips
//! 4. **Corrections**: bad data, overriding everything

mod columns;
mod error;
mod flags;
mod reconcile;
mod summary;

pub use columns::{FlagColumns, Validity};
pub use error::ReconcileError;
pub use flags::{clear_existing, flag_runs, initial_flags, purge_runs};
pub use reconcile::{FlagPlan, reconcile};
pub use summary::FlagSummary;
