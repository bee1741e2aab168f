//! Stepper motor driver traits
//!
//! These traits abstract over the stepper driver that turns the wheel.

/// Errors that can occur with stepper operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperError {
    /// Driver did not accept the command
    CommunicationError,
    /// Motor stall detected
    StallDetected,
    /// Homing sensor never triggered
    HomingFailed,
    /// Motion did not finish in time
    Timeout,
}

/// Speed and power control of the wheel stepper
pub trait StepperDriver {
    /// Set the turning speed; 0 stops the motor
    fn set_rpm(&mut self, rpm: u16);

    /// Speed last requested with `set_rpm`
    fn get_rpm(&self) -> u16;

    /// Enable or disable the motor driver
    ///
    /// When disabled, the motor is free to rotate and does not hold position.
    fn enable(&mut self, enabled: bool);

    /// Check if the coils are energised
    fn is_enabled(&self) -> bool;

    /// Check if the wheel was blocked during the last motion
    fn is_stalled(&self) -> bool;

    /// Reset the stall flag before a new motion
    fn clear_stall(&mut self);
}

/// Extended trait for position-controlled steppers
///
/// Positions are in microsteps relative to the homing reference. Before the
/// first homing the position counts from wherever the motor was at power-up,
/// and moves are still accepted.
pub trait PositionStepperDriver: StepperDriver {
    /// Start a move to an absolute position
    fn move_to(&mut self, position: i32) -> Result<(), StepperError>;

    /// Current position in microsteps
    fn get_position(&self) -> i32;

    /// Start turning towards the homing sensor
    fn home(&mut self) -> Result<(), StepperError>;

    /// Check if the homing sensor was found since power-up
    fn is_homed(&self) -> bool;

    /// Check if a move or homing sequence is in progress
    fn is_moving(&self) -> bool;
}
