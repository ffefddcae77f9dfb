//! Flag counts for reporting.

use std::fmt;

use metqc_interval::FlagState;

/// Number of samples in each flag state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagSummary {
    counts: [usize; 5],
}

impl FlagSummary {
    /// Counts the states in a flag column.
    pub fn from_flags(flags: &[FlagState]) -> Self {
        let mut counts = [0; 5];
        for &f in flags {
            counts[f.code() as usize] += 1;
        }
        Self { counts }
    }

    /// Number of samples in `state`.
    pub fn count(&self, state: FlagState) -> usize {
        self.counts[state.code() as usize]
    }

    /// Number of samples counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl fmt::Display for FlagSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "good={} bad={} purge={} recovery={} unset={}",
            self.count(FlagState::Good),
            self.count(FlagState::Bad),
            self.count(FlagState::Purge),
            self.count(FlagState::Recovery),
            self.count(FlagState::Uninitialized),
        )
    }
}
