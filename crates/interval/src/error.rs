//! Error types for the metqc-interval crate.

use chrono::NaiveDateTime;

/// Error type for all fallible operations in the metqc-interval crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntervalError {
    /// Returned when an interval does not end strictly after it starts.
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        /// Requested start instant.
        start: NaiveDateTime,
        /// Requested end instant.
        end: NaiveDateTime,
    },

    /// Returned when an integer flag code has no matching [`FlagState`](crate::FlagState).
    #[error("unknown QC flag code: {code} (must be 0..=4)")]
    UnknownFlag {
        /// The unrecognised code.
        code: i8,
    },
}
