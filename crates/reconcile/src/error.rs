//! Error types for metqc-reconcile.

use metqc_interval::IntervalError;

/// Error type for all fallible operations in the metqc-reconcile crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReconcileError {
    /// Returned when a flag or validity column does not match the time axis.
    #[error("{field} has {got} samples, time axis has {expected}")]
    LengthMismatch {
        /// Length of the time axis.
        expected: usize,
        /// Length of the offending column.
        got: usize,
        /// Which column.
        field: String,
    },

    /// Wrapped error from interval construction or flag decoding.
    #[error(transparent)]
    Interval(#[from] IntervalError),
}
