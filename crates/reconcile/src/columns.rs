//! Flag and validity columns for the two physical variables.

use metqc_interval::{FlagState, Variable};

use crate::error::ReconcileError;

/// One flag column per physical variable, aligned with the time axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagColumns {
    /// Air temperature flags.
    pub temperature: Vec<FlagState>,
    /// Relative humidity flags.
    pub humidity: Vec<FlagState>,
}

impl FlagColumns {
    /// Creates columns from existing flags.
    pub fn new(temperature: Vec<FlagState>, humidity: Vec<FlagState>) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    /// Columns of `n` uninitialized flags.
    pub fn uninitialized(n: usize) -> Self {
        Self::new(vec![FlagState::Uninitialized; n], vec![FlagState::Uninitialized; n])
    }

    /// Flags of one physical variable. [`Variable::Both`] yields nothing.
    pub fn get(&self, variable: Variable) -> &[FlagState] {
        match variable {
            Variable::Temperature => &self.temperature,
            Variable::Humidity => &self.humidity,
            Variable::Both => &[],
        }
    }

    pub(crate) fn check_len(&self, n: usize) -> Result<(), ReconcileError> {
        check(n, self.temperature.len(), "temperature flags")?;
        check(n, self.humidity.len(), "humidity flags")
    }
}

/// Which samples hold a usable reading, per physical variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validity {
    /// Air temperature validity.
    pub temperature: Vec<bool>,
    /// Relative humidity validity.
    pub humidity: Vec<bool>,
}

impl Validity {
    /// A reading is valid when present and finite.
    pub fn from_values(temperature: &[Option<f64>], humidity: &[Option<f64>]) -> Self {
        Self {
            temperature: mask(temperature),
            humidity: mask(humidity),
        }
    }

    /// Validity of one physical variable. [`Variable::Both`] yields nothing.
    pub fn get(&self, variable: Variable) -> &[bool] {
        match variable {
            Variable::Temperature => &self.temperature,
            Variable::Humidity => &self.humidity,
            Variable::Both => &[],
        }
    }

    pub(crate) fn check_len(&self, n: usize) -> Result<(), ReconcileError> {
        check(n, self.temperature.len(), "temperature validity")?;
        check(n, self.humidity.len(), "humidity validity")
    }
}

pub(crate) fn mask(values: &[Option<f64>]) -> Vec<bool> {
    values.iter().map(|v| v.is_some_and(f64::is_finite)).collect()
}

fn check(expected: usize, got: usize, field: &str) -> Result<(), ReconcileError> {
    if expected != got {
        return Err(ReconcileError::LengthMismatch {
            expected,
            got,
            field: field.to_string(),
        });
    }
    Ok(())
}
