//! Error types for metqc-correction.

use std::path::PathBuf;

use metqc_interval::IntervalError;

/// Error type for all fallible operations in the metqc-correction crate.
#[derive(Debug, thiserror::Error)]
pub enum CorrectionError {
    /// Returned when a correction file cannot be read.
    #[error("cannot read correction file {}: {source}", path.display())]
    Read {
        /// Path of the correction file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a line of a correction file is not a valid interval.
    #[error("{}:{line}: {reason}", path.display())]
    MalformedCorrectionFile {
        /// Path of the correction file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },

    /// Wrapped error from interval construction.
    #[error(transparent)]
    Interval(#[from] IntervalError),
}
