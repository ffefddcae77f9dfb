//! Per-variable correction sets.

use chrono::TimeDelta;
use metqc_interval::{Interval, Variable, coalesce};

/// Correction intervals grouped by physical variable.
///
/// Within each variable, touching or overlapping intervals are merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrectionSet {
    temperature: Vec<Interval>,
    humidity: Vec<Interval>,
}

impl CorrectionSet {
    /// Builds a set from any number of correction intervals. An interval
    /// tagged [`Variable::Both`] is added to both variables.
    pub fn overlay<I>(corrections: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut temperature = Vec::new();
        let mut humidity = Vec::new();
        for iv in corrections {
            if iv.variable().covers(Variable::Temperature) {
                temperature.push(iv.with_variable(Variable::Temperature));
            }
            if iv.variable().covers(Variable::Humidity) {
                humidity.push(iv.with_variable(Variable::Humidity));
            }
        }
        Self {
            temperature: coalesce(&temperature, TimeDelta::zero()),
            humidity: coalesce(&humidity, TimeDelta::zero()),
        }
    }

    /// Intervals for one physical variable, sorted by start.
    ///
    /// [`Variable::Both`] yields nothing; ask for each variable instead.
    pub fn for_variable(&self, variable: Variable) -> &[Interval] {
        match variable {
            Variable::Temperature => &self.temperature,
            Variable::Humidity => &self.humidity,
            Variable::Both => &[],
        }
    }

    /// Every interval in the set.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.temperature.iter().chain(self.humidity.iter())
    }

    /// Total number of merged intervals.
    pub fn len(&self) -> usize {
        self.temperature.len() + self.humidity.len()
    }

    /// Returns `true` if no corrections apply.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
