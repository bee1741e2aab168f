//! Persisted dispenser facts
//!
//! The three values that survive a power cycle and drive the start-state
//! decision. Each is stored under its own key.

use super::events::Event;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Last known mechanism state
///
/// Written by the mechanism driver immediately before and after every
/// physical turn. Reading `Turning` at boot means the turn never finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MechanismState {
    #[default]
    Idle,
    Turning,
}

/// Snapshot of the persisted facts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedFacts {
    /// Slices dispensed so far in the current prescription run
    pub slices_ran: u16,
    /// Last known mechanism state
    pub mechanism: MechanismState,
    /// Whether the wheel alignment is known to be correct
    pub calibrated: bool,
}

impl PersistedFacts {
    /// Substituted when the slice count cannot be loaded
    pub const DEFAULT_SLICES_RAN: u16 = 0;
    /// Substituted when the mechanism state cannot be loaded
    ///
    /// Unknown position is treated as mid-turn so it cannot be mistaken
    /// for a clean stop.
    pub const DEFAULT_MECHANISM: MechanismState = MechanismState::Turning;
    /// Substituted when the calibration flag cannot be loaded
    pub const DEFAULT_CALIBRATED: bool = false;

    /// Facts of a device that has never persisted anything
    pub const fn fail_safe() -> Self {
        Self {
            slices_ran: Self::DEFAULT_SLICES_RAN,
            mechanism: Self::DEFAULT_MECHANISM,
            calibrated: Self::DEFAULT_CALIBRATED,
        }
    }

    /// Decide where the start state goes
    ///
    /// Calibration is checked first, then the mid-turn marker, then
    /// prescription progress.
    pub fn decide(&self) -> Event {
        if !self.calibrated {
            Event::NeedsCalibration
        } else if self.mechanism == MechanismState::Turning {
            Event::PowerLossDetected
        } else if self.slices_ran == 0 {
            Event::AwaitDispense
        } else {
            Event::ResumeDispense
        }
    }
}

impl Default for PersistedFacts {
    fn default() -> Self {
        Self::fail_safe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(slices_ran: u16, mechanism: MechanismState, calibrated: bool) -> PersistedFacts {
        PersistedFacts {
            slices_ran,
            mechanism,
            calibrated,
        }
    }

    #[test]
    fn test_fresh_device_needs_calibration() {
        assert_eq!(PersistedFacts::fail_safe().decide(), Event::NeedsCalibration);
    }

    #[test]
    fn test_calibration_checked_before_turning() {
        let f = facts(3, MechanismState::Turning, false);
        assert_eq!(f.decide(), Event::NeedsCalibration);
    }

    #[test]
    fn test_turning_checked_before_progress() {
        assert_eq!(
            facts(0, MechanismState::Turning, true).decide(),
            Event::PowerLossDetected
        );
        assert_eq!(
            facts(5, MechanismState::Turning, true).decide(),
            Event::PowerLossDetected
        );
    }

    #[test]
    fn test_progress_decides_wait_or_resume() {
        assert_eq!(facts(0, MechanismState::Idle, true).decide(), Event::AwaitDispense);
        assert_eq!(facts(3, MechanismState::Idle, true).decide(), Event::ResumeDispense);
    }
}
