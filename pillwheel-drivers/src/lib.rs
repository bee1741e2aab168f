//! Collaborator implementations
//!
//! This crate provides concrete implementations of the traits defined in
//! pillwheel-core, written against the pillwheel-hal abstractions:
//!
//! - Flash-backed store for the persisted dispenser facts and config
//! - Stepper-driven compartment wheel
//! - Latched front panel button
//! - Status LED on a GPIO pin
//! - Bounded telemetry outbox for the radio task

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod button;
pub mod led;
pub mod mechanism;
pub mod storage;
pub mod telemetry;

#[cfg(test)]
mod mock;

pub use button::LatchedButton;
pub use led::PinLed;
pub use mechanism::WheelMechanism;
pub use storage::{FlashStore, StoreError};
pub use telemetry::{TelemetryMessage, TelemetryOutbox};
