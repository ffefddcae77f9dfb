//! Variable naming for day files.

use metqc_interval::Variable;

use crate::error::IoError;
use crate::validate::ValidationCollector;

/// Names of the variables read from and written to a day file.
///
/// The [`Default`] implementation matches the NCAS surface met conventions
/// (`air_temperature`, `relative_humidity`, `qc_flag_*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFileConfig {
    /// Time coordinate variable.
    time_var: String,
    /// Air temperature variable (K).
    temperature_var: String,
    /// Relative humidity variable (%).
    humidity_var: String,
    /// Air temperature flag variable.
    temperature_flag_var: String,
    /// Relative humidity flag variable.
    humidity_flag_var: String,
}

impl Default for DayFileConfig {
    fn default() -> Self {
        Self {
            time_var: "time".into(),
            temperature_var: "air_temperature".into(),
            humidity_var: "relative_humidity".into(),
            temperature_flag_var: "qc_flag_air_temperature".into(),
            humidity_flag_var: "qc_flag_relative_humidity".into(),
        }
    }
}

impl DayFileConfig {
    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Set the air temperature variable name.
    pub fn with_temperature_var(mut self, name: impl Into<String>) -> Self {
        self.temperature_var = name.into();
        self
    }

    /// Set the relative humidity variable name.
    pub fn with_humidity_var(mut self, name: impl Into<String>) -> Self {
        self.humidity_var = name.into();
        self
    }

    /// Set the air temperature flag variable name.
    pub fn with_temperature_flag_var(mut self, name: impl Into<String>) -> Self {
        self.temperature_flag_var = name.into();
        self
    }

    /// Set the relative humidity flag variable name.
    pub fn with_humidity_flag_var(mut self, name: impl Into<String>) -> Self {
        self.humidity_flag_var = name.into();
        self
    }

    /// Returns the time variable name.
    pub fn time_var(&self) -> &str {
        &self.time_var
    }

    /// Returns the measurement variable name for a physical variable.
    pub fn value_var(&self, variable: Variable) -> Option<&str> {
        match variable {
            Variable::Temperature => Some(self.temperature_var.as_str()),
            Variable::Humidity => Some(self.humidity_var.as_str()),
            Variable::Both => None,
        }
    }

    /// Returns the flag variable name for a physical variable.
    pub fn flag_var(&self, variable: Variable) -> Option<&str> {
        match variable {
            Variable::Temperature => Some(self.temperature_flag_var.as_str()),
            Variable::Humidity => Some(self.humidity_flag_var.as_str()),
            Variable::Both => None,
        }
    }

    /// Validate that every name is set and the names are distinct.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<(), IoError> {
        let names = [
            ("time_var", &self.time_var),
            ("temperature_var", &self.temperature_var),
            ("humidity_var", &self.humidity_var),
            ("temperature_flag_var", &self.temperature_flag_var),
            ("humidity_flag_var", &self.humidity_flag_var),
        ];
        let mut c = ValidationCollector::new();
        for (i, (field, name)) in names.iter().enumerate() {
            if name.trim().is_empty() {
                c.push(format!("{field} must not be empty"));
            } else if names[..i].iter().any(|(_, other)| other == name) {
                c.push(format!("{field} '{name}' is used twice"));
            }
        }
        c.finish()
    }
}
