//! Test doubles for the HAL and core traits

use core::cell::Cell;

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use pillwheel_core::state::MechanismState;
use pillwheel_core::traits::{DispenserStore, PositionStepperDriver, StepperDriver, StepperError};
use pillwheel_hal::{FlashError, FlashStorage, InputPin, OutputPin, StorageKey};

const KEYS: usize = 4;
const RECORD: usize = 64;

/// In-memory key-value flash
pub struct MemFlash {
    records: [Option<Vec<u8, RECORD>>; KEYS],
    writes: [u32; KEYS],
    fail_writes: bool,
    /// Writes left before power is cut; later writes are lost
    power_budget: Option<u32>,
}

impl MemFlash {
    pub fn new() -> Self {
        Self {
            records: [None, None, None, None],
            writes: [0; KEYS],
            fail_writes: false,
            power_budget: None,
        }
    }

    pub fn put(&mut self, key: StorageKey, data: &[u8]) {
        self.records[key.as_u8() as usize] = Vec::from_slice(data).ok();
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Lose every write after the next `writes` writes
    pub fn cut_power_after(&mut self, writes: u32) {
        self.power_budget = Some(writes);
    }

    pub fn restore_power(&mut self) {
        self.power_budget = None;
    }

    pub fn writes(&self, key: StorageKey) -> u32 {
        self.writes[key.as_u8() as usize]
    }
}

impl FlashStorage for MemFlash {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let record = self.records[key.as_u8() as usize]
            .as_ref()
            .ok_or(FlashError::NotFound)?;
        if buffer.len() < record.len() {
            return Err(FlashError::BufferTooSmall);
        }
        buffer[..record.len()].copy_from_slice(record);
        Ok(record.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if self.fail_writes {
            return Err(FlashError::Flash);
        }
        match self.power_budget {
            Some(0) => return Ok(()),
            Some(left) => self.power_budget = Some(left - 1),
            None => {}
        }
        self.writes[key.as_u8() as usize] += 1;
        self.put(key, data);
        Ok(())
    }
}

/// Store write as seen by [`JournalStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    SlicesRan(u16),
    Mechanism(MechanismState),
    Calibrated(bool),
}

/// Store that journals every write in order
pub struct JournalStore {
    pub slices_ran: Option<u16>,
    pub mechanism: Option<MechanismState>,
    pub calibrated: Option<bool>,
    pub writes: Vec<Write, 64>,
}

impl JournalStore {
    pub fn new() -> Self {
        Self {
            slices_ran: None,
            mechanism: None,
            calibrated: None,
            writes: Vec::new(),
        }
    }
}

impl DispenserStore for JournalStore {
    fn load_slices_ran(&mut self) -> Option<u16> {
        self.slices_ran
    }

    fn save_slices_ran(&mut self, slices_ran: u16) {
        let _ = self.writes.push(Write::SlicesRan(slices_ran));
        self.slices_ran = Some(slices_ran);
    }

    fn load_mechanism_state(&mut self) -> Option<MechanismState> {
        self.mechanism
    }

    fn save_mechanism_state(&mut self, state: MechanismState) {
        let _ = self.writes.push(Write::Mechanism(state));
        self.mechanism = Some(state);
    }

    fn load_calibrated(&mut self) -> Option<bool> {
        self.calibrated
    }

    fn save_calibrated(&mut self, calibrated: bool) {
        let _ = self.writes.push(Write::Calibrated(calibrated));
        self.calibrated = Some(calibrated);
    }
}

/// Position stepper that completes each motion after a fixed number of polls
pub struct FakeStepper {
    pub position: i32,
    pub homed: bool,
    pub enabled: bool,
    pub rpm: u16,
    pub stalled: bool,
    /// Polls of `is_moving` that report motion before a move completes
    pub move_polls: u32,
    /// Stall the move with this index (0-based, homing included)
    pub stall_on_move: Option<u32>,
    /// Never report motion as finished
    pub jammed: bool,
    pub moves: Vec<i32, 32>,
    remaining: Cell<u32>,
    started: u32,
}

impl FakeStepper {
    pub fn new() -> Self {
        Self {
            position: 0,
            homed: false,
            enabled: false,
            rpm: 0,
            stalled: false,
            move_polls: 2,
            stall_on_move: None,
            jammed: false,
            moves: Vec::new(),
            remaining: Cell::new(0),
            started: 0,
        }
    }

    fn start_motion(&mut self) {
        if self.stall_on_move == Some(self.started) {
            self.stalled = true;
        }
        self.started += 1;
        self.remaining.set(self.move_polls);
    }
}

impl StepperDriver for FakeStepper {
    fn set_rpm(&mut self, rpm: u16) {
        self.rpm = rpm;
    }

    fn get_rpm(&self) -> u16 {
        self.rpm
    }

    fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_stalled(&self) -> bool {
        self.stalled
    }

    fn clear_stall(&mut self) {
        self.stalled = false;
    }
}

impl PositionStepperDriver for FakeStepper {
    fn move_to(&mut self, position: i32) -> Result<(), StepperError> {
        self.start_motion();
        self.position = position;
        let _ = self.moves.push(position);
        Ok(())
    }

    fn get_position(&self) -> i32 {
        self.position
    }

    fn home(&mut self) -> Result<(), StepperError> {
        self.start_motion();
        self.position = 0;
        self.homed = true;
        Ok(())
    }

    fn is_homed(&self) -> bool {
        self.homed
    }

    fn is_moving(&self) -> bool {
        if self.jammed {
            return true;
        }
        let remaining = self.remaining.get();
        if remaining == 0 {
            false
        } else {
            self.remaining.set(remaining - 1);
            true
        }
    }
}

/// Delay that only accumulates the requested time
#[derive(Default)]
pub struct FakeDelay {
    pub total_ms: u64,
    pub sleeps: Vec<u32, 32>,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += (ns / 1_000_000) as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms as u64;
        if ms > 1 {
            let _ = self.sleeps.push(ms);
        }
    }
}

/// Input pin whose level is driven from the test through a shared cell
pub struct SharedPin<'a>(pub &'a Cell<bool>);

impl InputPin for SharedPin<'_> {
    fn is_high(&self) -> bool {
        self.0.get()
    }
}

/// GPIO double usable as input and output
pub struct FakePin {
    pub high: bool,
    pub transitions: u32,
}

impl FakePin {
    pub fn new(high: bool) -> Self {
        Self {
            high,
            transitions: 0,
        }
    }
}

impl InputPin for FakePin {
    fn is_high(&self) -> bool {
        self.high
    }
}

impl OutputPin for FakePin {
    fn set_high(&mut self) {
        if !self.high {
            self.transitions += 1;
        }
        self.high = true;
    }

    fn set_low(&mut self) {
        if self.high {
            self.transitions += 1;
        }
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
