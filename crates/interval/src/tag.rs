//! Variable and provenance tags carried by every interval.

use std::fmt;

/// Physical variable (or pair of variables) an interval applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    /// Air temperature.
    Temperature,
    /// Relative humidity.
    Humidity,
    /// Both temperature and humidity.
    Both,
}

impl Variable {
    /// The two physical variables, in flag-array order.
    pub const PHYSICAL: [Variable; 2] = [Variable::Temperature, Variable::Humidity];

    /// Returns `true` if an interval tagged `self` applies to `physical`.
    ///
    /// `Both` covers temperature and humidity; a physical tag covers only
    /// itself.
    pub fn covers(self, physical: Variable) -> bool {
        self == Variable::Both || self == physical
    }

    /// Expands the tag into the physical variables it covers.
    pub fn physical(self) -> &'static [Variable] {
        match self {
            Variable::Temperature => &[Variable::Temperature],
            Variable::Humidity => &[Variable::Humidity],
            Variable::Both => &Self::PHYSICAL,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Temperature => write!(f, "temperature"),
            Variable::Humidity => write!(f, "humidity"),
            Variable::Both => write!(f, "both"),
        }
    }
}

/// Where an interval came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    /// Found by the flatness detector on the current day.
    Detected,
    /// Given explicitly by the operator.
    Manual,
    /// Carried over from the previous day's purge schedule.
    Copied,
    /// Declared bad by a correction file or a physical-limit check.
    Correction,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Detected => write!(f, "detected"),
            Source::Manual => write!(f, "manual"),
            Source::Copied => write!(f, "copied"),
            Source::Correction => write!(f, "correction"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_covers_each_physical_variable() {
        assert!(Variable::Both.covers(Variable::Temperature));
        assert!(Variable::Both.covers(Variable::Humidity));
    }

    #[test]
    fn physical_tag_covers_only_itself() {
        assert!(Variable::Temperature.covers(Variable::Temperature));
        assert!(!Variable::Temperature.covers(Variable::Humidity));
        assert!(!Variable::Humidity.covers(Variable::Temperature));
    }

    #[test]
    fn physical_expansion() {
        assert_eq!(Variable::Humidity.physical(), &[Variable::Humidity]);
        assert_eq!(
            Variable::Both.physical(),
            &[Variable::Temperature, Variable::Humidity]
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(Variable::Humidity.to_string(), "humidity");
        assert_eq!(Source::Copied.to_string(), "copied");
    }
}
