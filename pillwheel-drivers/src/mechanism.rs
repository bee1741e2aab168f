//! Compartment wheel mechanism
//!
//! A rotary wheel with one compartment per slice, turned by a position
//! stepper with a homing sensor. After alignment the last calibration
//! compartment sits over the chute; each slice advances the wheel by one
//! compartment so the next filled compartment empties into the chute.
//!
//! Every motion is bracketed by the persisted `Turning`/`Idle` markers.
//! Within a dispense turn the new slice count is persisted after the wheel
//! stops and *before* the `Idle` marker, so a power loss can never leave an
//! idle wheel with a stale count.
//!
//! ```ignore
//! let mut wheel = WheelMechanism::new(stepper, delay, &config);
//! wheel.align_dispenser(&mut store, config.calibration_slots);
//! wheel.dispense_all_pills(&mut store);
//! ```

use embedded_hal::delay::DelayNs;
use pillwheel_core::config::{DispenserConfig, PrescriptionConfig, WheelConfig};
use pillwheel_core::state::MechanismState;
use pillwheel_core::traits::{DispenserStore, Mechanism, PositionStepperDriver, StepperError};

/// Interval between motion-complete polls
const POLL_INTERVAL_MS: u32 = 1;

/// Longest a single motion (homing included) may take
const MAX_MOTION_MS: u32 = 30_000;

/// Stepper-driven compartment wheel
pub struct WheelMechanism<S, D> {
    stepper: S,
    delay: D,
    wheel: WheelConfig,
    prescription: PrescriptionConfig,
    /// Calibration compartments used by the last alignment
    calibration_slots: u8,
    /// Slices dispensed in the current run
    slices_ran: u16,
    /// Set when a motion failed; cleared by a successful alignment
    halted: bool,
}

impl<S: PositionStepperDriver, D: DelayNs> WheelMechanism<S, D> {
    pub fn new(stepper: S, delay: D, config: &DispenserConfig) -> Self {
        Self {
            stepper,
            delay,
            wheel: config.wheel,
            prescription: config.prescription,
            calibration_slots: config.calibration_slots,
            slices_ran: 0,
            halted: false,
        }
    }

    /// Slices dispensed in the current run
    pub fn slices_ran(&self) -> u16 {
        self.slices_ran
    }

    /// Check if a failed motion has stopped the wheel
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Compartment over the chute once `slices_ran` slices are out
    fn compartment_for(&self, slices_ran: u16) -> u16 {
        (self.calibration_slots as u16)
            .saturating_sub(1)
            .saturating_add(slices_ran)
    }

    /// Wait for the current motion to finish
    fn wait_until_stopped(&mut self) -> Result<(), StepperError> {
        let mut waited_ms = 0;
        while self.stepper.is_moving() {
            if self.stepper.is_stalled() {
                return Err(StepperError::StallDetected);
            }
            if waited_ms >= MAX_MOTION_MS {
                return Err(StepperError::Timeout);
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
            waited_ms += POLL_INTERVAL_MS;
        }
        if self.stepper.is_stalled() {
            return Err(StepperError::StallDetected);
        }
        Ok(())
    }

    /// Home against the reference sensor
    fn home(&mut self) -> Result<(), StepperError> {
        self.stepper.home()?;
        self.wait_until_stopped()?;
        if !self.stepper.is_homed() {
            return Err(StepperError::HomingFailed);
        }
        Ok(())
    }

    /// Home, then seat `compartment` over the chute
    fn home_to_compartment(&mut self, compartment: u16) -> Result<(), StepperError> {
        self.home()?;
        self.stepper
            .move_to(self.wheel.compartment_position(compartment))?;
        self.wait_until_stopped()
    }

    /// Advance by one compartment from wherever the wheel is
    fn advance_one(&mut self) -> Result<(), StepperError> {
        let target = self.stepper.get_position() + self.wheel.steps_per_compartment();
        self.stepper.move_to(target)?;
        self.wait_until_stopped()
    }

    /// Run `motion` between the `Turning` and `Idle` markers
    ///
    /// On failure the motor is released and `Turning` stays persisted:
    /// the wheel position is unknown until the next alignment.
    fn bracketed<St, F>(&mut self, store: &mut St, motion: F) -> bool
    where
        St: DispenserStore,
        F: FnOnce(&mut Self, &mut St) -> Result<(), StepperError>,
    {
        store.save_mechanism_state(MechanismState::Turning);
        self.stepper.clear_stall();
        self.stepper.set_rpm(self.wheel.rpm);
        self.stepper.enable(true);

        match motion(self, store) {
            Ok(()) => {
                store.save_mechanism_state(MechanismState::Idle);
                true
            }
            Err(e) => {
                error!("Wheel motion failed: {}, halting", e);
                self.stepper.set_rpm(0);
                self.stepper.enable(false);
                self.halted = true;
                false
            }
        }
    }
}

impl<S: PositionStepperDriver, D: DelayNs> Mechanism for WheelMechanism<S, D> {
    fn restore_slices_ran(&mut self, slices_ran: u16) {
        let total = self.prescription.slices;
        if slices_ran > total {
            warn!("Stored slice count {} exceeds prescription {}", slices_ran, total);
        }
        self.slices_ran = slices_ran.min(total);
    }

    fn align_dispenser<St: DispenserStore>(&mut self, store: &mut St, slots: u8) {
        self.calibration_slots = slots;
        let compartment = self.compartment_for(0);
        if self.bracketed(store, |wheel, _| wheel.home_to_compartment(compartment)) {
            info!("Wheel aligned on compartment {}", compartment);
            self.halted = false;
        }
    }

    fn dispense_all_pills<St: DispenserStore>(&mut self, store: &mut St) {
        if self.halted {
            warn!("Wheel halted, skipping dispense");
            return;
        }

        let total = self.prescription.slices;
        let fresh_run = self.slices_ran == 0;

        while self.slices_ran < total {
            // A resumed run cannot know how long it was off, so it waits a full interval
            if !(fresh_run && self.slices_ran == 0) {
                self.delay.delay_ms(self.prescription.slice_interval_ms);
            }

            let next = self.slices_ran + 1;
            let turned = self.bracketed(store, |wheel, store| {
                wheel.advance_one()?;
                store.save_slices_ran(next);
                Ok(())
            });
            if !turned {
                return;
            }

            self.slices_ran = next;
            info!("Dispensed slice {}/{}", next, total);
        }

        info!("Prescription complete");
        self.slices_ran = 0;
        store.save_slices_ran(0);
    }

    fn error_recalibration<St: DispenserStore>(&mut self, store: &mut St) {
        let compartment = self.compartment_for(self.slices_ran);
        if self.bracketed(store, |wheel, _| wheel.home_to_compartment(compartment)) {
            info!("Wheel recovered on compartment {}", compartment);
            self.halted = false;
        }
    }
}
