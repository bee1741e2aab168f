//! Collaborator traits
//!
//! These traits define the interface between the dispenser controller and
//! the hardware around it. All calls are synchronous and run to completion.

pub mod buttons;
pub mod led;
pub mod mechanism;
pub mod stepper;
pub mod storage;
pub mod telemetry;

pub use buttons::{ButtonEvent, Buttons};
pub use led::StatusLed;
pub use mechanism::Mechanism;
pub use stepper::{PositionStepperDriver, StepperDriver, StepperError};
pub use storage::DispenserStore;
pub use telemetry::{MessageKind, Telemetry};
