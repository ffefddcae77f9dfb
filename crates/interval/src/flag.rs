//! Per-sample QC flag states.

use crate::error::IntervalError;

/// QC state of one sample of one variable.
///
/// The discriminants are the integer codes written to the persisted
/// `qc_flag_*` variables. The numeric order carries no severity; overwrite
/// precedence is decided by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum FlagState {
    /// No valid reading to judge.
    #[default]
    Uninitialized = 0,
    /// Reading passed all checks.
    Good = 1,
    /// Reading declared bad by an external correction.
    Bad = 2,
    /// Reading taken during an instrument purge cycle.
    Purge = 3,
    /// Humidity reading still settling after a purge.
    Recovery = 4,
}

impl FlagState {
    /// All states in code order.
    pub const ALL: [FlagState; 5] = [
        FlagState::Uninitialized,
        FlagState::Good,
        FlagState::Bad,
        FlagState::Purge,
        FlagState::Recovery,
    ];

    /// Returns the persisted integer code.
    pub fn code(self) -> i8 {
        self as i8
    }

    /// Parses a persisted integer code.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::UnknownFlag`] for codes outside `0..=4`.
    pub fn from_code(code: i8) -> Result<Self, IntervalError> {
        match code {
            0 => Ok(FlagState::Uninitialized),
            1 => Ok(FlagState::Good),
            2 => Ok(FlagState::Bad),
            3 => Ok(FlagState::Purge),
            4 => Ok(FlagState::Recovery),
            _ => Err(IntervalError::UnknownFlag { code }),
        }
    }

    /// CF `flag_meanings` token for this state.
    pub fn meaning(self) -> &'static str {
        match self {
            FlagState::Uninitialized => "not_used",
            FlagState::Good => "good_data",
            FlagState::Bad => "bad_data_measurement_suspect",
            FlagState::Purge => "bad_data_purge_cycle_value_fixed_as_start_of_purge",
            FlagState::Recovery => "recovery_in_rh_after_purge",
        }
    }

    /// Returns `true` for the two states owned by purge flagging.
    pub fn is_purge_related(self) -> bool {
        matches!(self, FlagState::Purge | FlagState::Recovery)
    }
}

impl TryFrom<i8> for FlagState {
    type Error = IntervalError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<FlagState> for i8 {
    fn from(state: FlagState) -> Self {
        state.code()
    }
}
