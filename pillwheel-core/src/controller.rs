//! Tick-driven dispenser controller
//!
//! The controller is the only component with sequencing logic. Each call to
//! [`Controller::tick`] performs the current state's work, feeds the
//! resulting event through [`State::transition`], and arms or disarms the
//! button input on entry to and exit from the waiting states.
//!
//! ```ignore
//! let mut controller = Controller::new(&config);
//! let mut devices = Devices::new(store, buttons, led, wheel, telemetry);
//!
//! // In the periodic scheduler task:
//! controller.tick(&mut devices);
//! ```

use crate::config::DispenserConfig;
use crate::state::{Event, PersistedFacts, State};
use crate::traits::{Buttons, DispenserStore, Mechanism, MessageKind, StatusLed, Telemetry};

/// Text sent with [`MessageKind::PowerLossDuringTurn`]
pub const POWER_LOSS_TEXT: &str = "Powered off during turn";

/// The collaborators a controller drives
///
/// Owned by the scheduler task and lent to the controller on every tick.
pub struct Devices<S, B, L, M, T> {
    pub store: S,
    pub buttons: B,
    pub led: L,
    pub mechanism: M,
    pub telemetry: T,
}

impl<S, B, L, M, T> Devices<S, B, L, M, T> {
    pub fn new(store: S, buttons: B, led: L, mechanism: M, telemetry: T) -> Self {
        Self {
            store,
            buttons,
            led,
            mechanism,
            telemetry,
        }
    }
}

/// Controller context
///
/// Lives for the whole power cycle. Everything that must survive a power
/// loss is in the store; `facts` only caches what the start state loaded.
#[derive(Debug, Clone)]
pub struct Controller {
    /// Current machine state
    state: State,
    /// Persisted facts as last loaded or written by this controller
    facts: PersistedFacts,
    /// Compartments passed to the alignment routine
    calibration_slots: u8,
    /// Scheduler period between ticks
    tick_interval_ms: u32,
}

impl Controller {
    /// Create a controller in the start state
    pub fn new(config: &DispenserConfig) -> Self {
        Self {
            state: State::Start,
            facts: PersistedFacts::fail_safe(),
            calibration_slots: config.calibration_slots,
            tick_interval_ms: config.tick_interval_ms,
        }
    }

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Period at which the scheduler should call [`Controller::tick`]
    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    /// Get the cached persisted facts
    pub fn facts(&self) -> PersistedFacts {
        self.facts
    }

    /// Run one scheduler tick
    ///
    /// Returns the event that fired, or `None` when a waiting state saw no
    /// button event.
    pub fn tick<S, B, L, M, T>(&mut self, devices: &mut Devices<S, B, L, M, T>) -> Option<Event>
    where
        S: DispenserStore,
        B: Buttons,
        L: StatusLed,
        M: Mechanism,
        T: Telemetry,
    {
        let event = match self.state {
            State::Start => {
                self.start(&mut devices.store, &mut devices.mechanism, &mut devices.telemetry)
            }
            State::Error => {
                devices.mechanism.error_recalibration(&mut devices.store);
                Event::RecoveryComplete
            }
            State::CalibWait => {
                devices.led.toggle_led();
                devices.buttons.get_button_event()?;
                Event::ButtonPressed
            }
            State::Calib => {
                devices
                    .mechanism
                    .align_dispenser(&mut devices.store, self.calibration_slots);
                devices.store.save_calibrated(true);
                self.facts.calibrated = true;
                Event::CalibrationComplete
            }
            State::DispenseWait => {
                devices.led.set_led(true);
                devices.buttons.get_button_event()?;
                Event::ButtonPressed
            }
            State::Dispense => {
                devices.mechanism.dispense_all_pills(&mut devices.store);
                // Dispensing disturbs the wheel; the next cycle recalibrates
                devices.store.save_calibrated(false);
                self.facts.calibrated = false;
                Event::DispenseComplete
            }
        };

        let previous = self.state;
        self.state = previous.transition(event);
        info!("dispenser: {} -> {} on {}", previous, self.state, event);

        if self.state.accepts_buttons() {
            devices.buttons.enable_buttons();
        } else if previous.accepts_buttons() {
            devices.buttons.disable_buttons();
        }

        Some(event)
    }

    /// Load the persisted facts and decide where to go
    ///
    /// Missing values are replaced by their fail-safe default, which is
    /// written back before the decision is made.
    fn start<S, M, T>(&mut self, store: &mut S, mechanism: &mut M, telemetry: &mut T) -> Event
    where
        S: DispenserStore,
        M: Mechanism,
        T: Telemetry,
    {
        let slices_ran = store.load_slices_ran().unwrap_or_else(|| {
            warn!("dispenser: no stored slices_ran, persisting default");
            store.save_slices_ran(PersistedFacts::DEFAULT_SLICES_RAN);
            PersistedFacts::DEFAULT_SLICES_RAN
        });
        mechanism.restore_slices_ran(slices_ran);

        let mechanism_state = store.load_mechanism_state().unwrap_or_else(|| {
            warn!("dispenser: no stored mechanism_state, persisting default");
            store.save_mechanism_state(PersistedFacts::DEFAULT_MECHANISM);
            PersistedFacts::DEFAULT_MECHANISM
        });

        let calibrated = store.load_calibrated().unwrap_or_else(|| {
            warn!("dispenser: no stored calibrated flag, persisting default");
            store.save_calibrated(PersistedFacts::DEFAULT_CALIBRATED);
            PersistedFacts::DEFAULT_CALIBRATED
        });

        self.facts = PersistedFacts {
            slices_ran,
            mechanism: mechanism_state,
            calibrated,
        };

        let decision = self.facts.decide();
        if decision == Event::PowerLossDetected {
            warn!(
                "dispenser: wheel was turning at power loss ({=u16} slices ran)",
                slices_ran
            );
            telemetry.send_message(MessageKind::PowerLossDuringTurn, POWER_LOSS_TEXT);
        }
        decision
    }
}
