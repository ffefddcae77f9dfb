//! Accumulated validation utilities.
//!
//! [`ValidationCollector`] gathers every problem found in a day file into a
//! single [`IoError::Validation`], so one run reports all of them.

use chrono::NaiveDateTime;

use crate::error::IoError;

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Check that every named column has as many samples as the time axis.
pub(crate) fn validate_lengths(
    c: &mut ValidationCollector,
    time_len: usize,
    columns: &[(&str, usize)],
) {
    for &(name, len) in columns {
        if len != time_len {
            c.push(format!("{name} length {len} != time length {time_len}"));
        }
    }
}

/// Check that timestamps are strictly increasing. Only the first few
/// violations are listed.
pub(crate) fn validate_times_increasing(c: &mut ValidationCollector, times: &[NaiveDateTime]) {
    const MAX_REPORTED: usize = 5;
    let bad: Vec<usize> = times
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[1] <= w[0])
        .map(|(i, _)| i + 1)
        .collect();
    for &i in bad.iter().take(MAX_REPORTED) {
        c.push(format!("time not increasing at index {i}"));
    }
    if bad.len() > MAX_REPORTED {
        c.push(format!(
            "{} more non-increasing timestamps",
            bad.len() - MAX_REPORTED
        ));
    }
}
