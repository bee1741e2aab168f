//! State machine for the dispensing cycle
//!
//! The state machine is explicit, finite, and deterministic. Transitions
//! are a pure function of the current state and an event; the side effects
//! that produce those events live in [`crate::controller`].

pub mod events;
pub mod facts;
pub mod machine;

pub use events::Event;
pub use facts::{MechanismState, PersistedFacts};
pub use machine::State;
