//! Half-open time intervals.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::IntervalError;
use crate::tag::{Source, Variable};

/// A half-open time range `[start, end)` tagged with the variable it
/// applies to and its provenance.
///
/// The constructor guarantees `start < end`; every method preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
    variable: Variable,
    source: Source,
}

impl Interval {
    /// Creates a new interval.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::InvalidInterval`] if `start >= end`.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        variable: Variable,
        source: Source,
    ) -> Result<Self, IntervalError> {
        if start >= end {
            return Err(IntervalError::InvalidInterval { start, end });
        }
        Ok(Self {
            start,
            end,
            variable,
            source,
        })
    }

    /// Returns the (inclusive) start instant.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the (exclusive) end instant.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the variable tag.
    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// Returns the provenance tag.
    pub fn source(&self) -> Source {
        self.source
    }

    /// Length of the interval. Always positive.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns `true` if `t` lies in `[start, end)`.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t < self.end
    }

    /// Returns `true` if the two ranges share at least one instant.
    ///
    /// Tags are ignored; intervals that merely touch do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the shared part of two ranges (zero if disjoint).
    pub fn overlap_duration(&self, other: &Interval) -> TimeDelta {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            end - start
        } else {
            TimeDelta::zero()
        }
    }

    /// Merges two intervals with the same variable and source that touch or
    /// overlap. Returns `None` otherwise.
    pub fn merge(&self, other: &Interval) -> Option<Interval> {
        if self.variable != other.variable || self.source != other.source {
            return None;
        }
        if self.start > other.end || other.start > self.end {
            return None;
        }
        Some(Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            variable: self.variable,
            source: self.source,
        })
    }

    /// Same range, different provenance.
    pub fn with_source(self, source: Source) -> Self {
        Self { source, ..self }
    }

    /// Same range, different variable tag.
    pub fn with_variable(self, variable: Variable) -> Self {
        Self { variable, ..self }
    }

    /// Moves both ends by `delta`.
    pub fn shifted(self, delta: TimeDelta) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
            ..self
        }
    }
}

/// Merges intervals sharing variable and source whose gap is smaller than
/// `max_gap` (touching and overlapping intervals always merge).
///
/// The result is sorted by start, then variable, then source.
pub fn coalesce(intervals: &[Interval], max_gap: TimeDelta) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|iv| (iv.variable, iv.source, iv.start, iv.end));

    let mut out: Vec<Interval> = Vec::with_capacity(sorted.len());
    for iv in sorted {
        if let Some(last) = out.last_mut()
            && last.variable == iv.variable
            && last.source == iv.source
        {
            let gap = iv.start - last.end;
            if gap <= TimeDelta::zero() || gap < max_gap {
                last.end = last.end.max(iv.end);
                continue;
            }
        }
        out.push(iv);
    }

    out.sort_by_key(|iv| (iv.start, iv.variable, iv.source));
    out
}
