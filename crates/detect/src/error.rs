//! Error types for the metqc-detect crate.

use metqc_interval::IntervalError;

/// Error type for all fallible operations in the metqc-detect crate.
///
/// An empty detection result is never an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectError {
    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a value column does not match the time axis.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length (number of timestamps).
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched field.
        field: String,
    },

    /// Returned when timestamps are not strictly increasing.
    #[error("timestamps not strictly increasing at index {index}")]
    UnsortedTimes {
        /// Index of the first out-of-order timestamp.
        index: usize,
    },

    /// Wrapped error from interval construction.
    #[error(transparent)]
    Interval(#[from] IntervalError),
}
