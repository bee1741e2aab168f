//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Start decisions
    /// Wheel alignment is not known to be correct
    NeedsCalibration,
    /// Calibrated, but the last turn never reached idle
    PowerLossDetected,
    /// Calibrated and idle with no slices dispensed yet
    AwaitDispense,
    /// Calibrated and idle part-way through a prescription
    ResumeDispense,

    // Mechanism events
    /// Error recalibration finished
    RecoveryComplete,
    /// Wheel aligned
    CalibrationComplete,
    /// Dispensing cycle finished
    DispenseComplete,

    // User events
    /// Front panel button produced an event
    ButtonPressed,
}

impl Event {
    /// All events, in declaration order
    pub const ALL: [Event; 8] = [
        Event::NeedsCalibration,
        Event::PowerLossDetected,
        Event::AwaitDispense,
        Event::ResumeDispense,
        Event::RecoveryComplete,
        Event::CalibrationComplete,
        Event::DispenseComplete,
        Event::ButtonPressed,
    ];

    /// Check if this event is a decision of the start state
    pub fn is_start_decision(&self) -> bool {
        matches!(
            self,
            Event::NeedsCalibration
                | Event::PowerLossDetected
                | Event::AwaitDispense
                | Event::ResumeDispense
        )
    }

    /// Check if this event is user-initiated
    pub fn is_user_event(&self) -> bool {
        matches!(self, Event::ButtonPressed)
    }

    /// Check if this event reports a finished mechanism routine
    pub fn is_mechanism_event(&self) -> bool {
        matches!(
            self,
            Event::RecoveryComplete | Event::CalibrationComplete | Event::DispenseComplete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_categories_are_disjoint() {
        for event in Event::ALL {
            let categories = [
                event.is_start_decision(),
                event.is_user_event(),
                event.is_mechanism_event(),
            ];
            assert_eq!(categories.iter().filter(|&&c| c).count(), 1, "{:?}", event);
        }
    }

    #[test]
    fn test_user_events() {
        assert!(Event::ButtonPressed.is_user_event());
        assert!(!Event::DispenseComplete.is_user_event());
    }
}
