//! Configuration type definitions
//!
//! These types describe the wheel geometry and the prescription. The whole
//! [`DispenserConfig`] is stored in flash as postcard-serialized binary data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Wheel has no compartments
    NoCompartments,
    /// Fewer microsteps per revolution than compartments
    TooFewSteps,
    /// Calibration slots leave no room for pills
    CalibrationSlotsTooLarge,
    /// Prescription has no slices
    EmptyPrescription,
    /// Prescription needs more compartments than the wheel has
    PrescriptionTooLong,
    /// Motor speed is zero
    InvalidSpeed,
}

/// Wheel geometry and motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WheelConfig {
    /// Microsteps per full wheel revolution (after gearing)
    pub steps_per_revolution: u32,
    /// Number of compartments on the wheel, calibration compartments included
    pub compartments: u8,
    /// Microsteps from the homing reference to the first compartment
    pub home_offset_steps: i32,
    /// Turning speed
    pub rpm: u16,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            // 200 full steps × 16 microsteps × 4:1 reduction
            steps_per_revolution: 200 * 16 * 4,
            compartments: 8,
            home_offset_steps: 0,
            rpm: 6,
        }
    }
}

impl WheelConfig {
    /// Microsteps between two adjacent compartments
    pub fn steps_per_compartment(&self) -> i32 {
        match self.compartments {
            0 => 0,
            n => (self.steps_per_revolution / n as u32) as i32,
        }
    }

    /// Absolute position of a compartment relative to the homing reference
    pub fn compartment_position(&self, compartment: u16) -> i32 {
        self.home_offset_steps + compartment as i32 * self.steps_per_compartment()
    }
}

/// Prescription run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrescriptionConfig {
    /// Slices (filled compartments) in one run
    pub slices: u16,
    /// Time between two consecutive slices
    pub slice_interval_ms: u32,
}

impl Default for PrescriptionConfig {
    fn default() -> Self {
        Self {
            slices: 7,
            slice_interval_ms: 24 * 60 * 60 * 1000,
        }
    }
}

/// Complete dispenser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DispenserConfig {
    /// Compartments passed to the alignment routine during calibration
    pub calibration_slots: u8,
    /// Period the external scheduler calls the controller at
    ///
    /// The controller never sleeps; a waiting state blinks the LED once per
    /// tick, so this also sets the blink rate.
    pub tick_interval_ms: u32,
    pub wheel: WheelConfig,
    pub prescription: PrescriptionConfig,
}

impl Default for DispenserConfig {
    fn default() -> Self {
        Self {
            calibration_slots: 1,
            tick_interval_ms: 250,
            wheel: WheelConfig::default(),
            prescription: PrescriptionConfig::default(),
        }
    }
}

impl DispenserConfig {
    /// Check the configuration for values the mechanism cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let wheel = &self.wheel;
        if wheel.compartments == 0 {
            return Err(ConfigError::NoCompartments);
        }
        if wheel.steps_per_revolution < wheel.compartments as u32 {
            return Err(ConfigError::TooFewSteps);
        }
        if wheel.rpm == 0 {
            return Err(ConfigError::InvalidSpeed);
        }
        if self.calibration_slots >= wheel.compartments {
            return Err(ConfigError::CalibrationSlotsTooLarge);
        }
        if self.prescription.slices == 0 {
            return Err(ConfigError::EmptyPrescription);
        }
        let available = (wheel.compartments - self.calibration_slots) as u16;
        if self.prescription.slices > available {
            return Err(ConfigError::PrescriptionTooLong);
        }
        Ok(())
    }
}
