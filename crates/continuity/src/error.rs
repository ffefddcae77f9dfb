//! Error types for the metqc-continuity crate.

use metqc_interval::IntervalError;

/// Error type for all fallible operations in the metqc-continuity crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContinuityError {
    /// Returned when no previous-day intervals are available. Recoverable:
    /// the resolver logs it and keeps the detection-only result.
    #[error("no previous-day purge intervals supplied")]
    MissingPreviousDay,

    /// Returned when a shift is requested against an empty interval set.
    #[error("cannot compute shift: {set} interval set is empty")]
    NoIntervals {
        /// Which of the two sets was empty.
        set: &'static str,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Wrapped error from interval construction.
    #[error(transparent)]
    Interval(#[from] IntervalError),
}
