//! Board-agnostic core logic for the pill dispenser firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (storage, buttons, LED, mechanism, telemetry)
//! - State machine and transition table
//! - Tick-driven dispenser controller
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod state;
pub mod traits;

pub use controller::{Controller, Devices};
