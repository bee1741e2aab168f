//! State machine definition
//!
//! LED, button, and mechanism behavior is a function of the current state.
//! The machine has no terminal state: every completed dispense loops back
//! to [`State::Start`].

use super::events::Event;

/// Dispenser states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Recovery and decision hub, entered at boot and after every dispense
    Start,
    /// Recovering from a power loss during a turn
    Error,
    /// Blinking, waiting for a button press to calibrate
    CalibWait,
    /// Aligning the wheel
    Calib,
    /// LED steady, waiting for a button press to dispense
    DispenseWait,
    /// Running the dispensing cycle
    Dispense,
}

impl State {
    /// All states, in declaration order
    pub const ALL: [State; 6] = [
        State::Start,
        State::Error,
        State::CalibWait,
        State::Calib,
        State::DispenseWait,
        State::Dispense,
    ];

    /// Check if this state consumes button events
    pub fn accepts_buttons(&self) -> bool {
        matches!(self, State::CalibWait | State::DispenseWait)
    }

    /// Check if this state moves the wheel
    pub fn moves_mechanism(&self) -> bool {
        matches!(self, State::Error | State::Calib | State::Dispense)
    }

    /// Check if the wheel alignment may be trusted in this state
    ///
    /// False for `Start`, which has not decided yet, and for the two
    /// calibration states, which are entered with `calibrated == false`.
    pub fn assumes_alignment(&self) -> bool {
        !matches!(self, State::Start | State::CalibWait | State::Calib)
    }

    /// Process an event and return the next state
    ///
    /// Events that do not belong to the current state leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Start decisions, in priority order
            (Start, NeedsCalibration) => CalibWait,
            (Start, PowerLossDetected) => Error,
            (Start, AwaitDispense) => DispenseWait,
            (Start, ResumeDispense) => Dispense,

            (Error, RecoveryComplete) => Dispense,

            (CalibWait, ButtonPressed) => Calib,
            (Calib, CalibrationComplete) => DispenseWait,

            (DispenseWait, ButtonPressed) => Dispense,
            (Dispense, DispenseComplete) => Start,

            // Default: stay in current state
            _ => self,
        }
    }

    /// Check whether `next` is reachable from this state in one transition
    pub fn can_reach(self, next: State) -> bool {
        Event::ALL
            .iter()
            .any(|&event| self.transition(event) == next && next != self)
    }
}
