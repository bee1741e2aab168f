//! Dispenser mechanism
//!
//! # Persistence bracket
//!
//! Every physical motion performed by a [`Mechanism`] must be bracketed by
//! `store.save_mechanism_state(MechanismState::Turning)` immediately before
//! the motion starts and `store.save_mechanism_state(MechanismState::Idle)`
//! immediately after it completes. The controller never writes these
//! markers itself: they must be on flash even if the routine is cut short
//! by a power loss, which is how the next boot detects an interrupted turn.
//!
//! The store is passed in by the controller for the duration of each call.
//!
//! [`MechanismState`]: crate::state::MechanismState

use super::storage::DispenserStore;

/// Rotary dispensing mechanism
///
/// All routines are synchronous and have no failure path visible to the
/// controller. An implementation that cannot complete a motion must leave
/// `Turning` persisted so the position is treated as unknown.
pub trait Mechanism {
    /// Tell the mechanism how far the current prescription has progressed
    ///
    /// Called from the start state every time the slice count is loaded.
    fn restore_slices_ran(&mut self, slices_ran: u16);

    /// Home the wheel and seat the last of `slots` calibration compartments
    /// over the chute
    fn align_dispenser<S: DispenserStore>(&mut self, store: &mut S, slots: u8);

    /// Dispense every remaining slice of the current prescription
    fn dispense_all_pills<S: DispenserStore>(&mut self, store: &mut S);

    /// Re-establish alignment after an interrupted turn
    fn error_recalibration<S: DispenserStore>(&mut self, store: &mut S);
}
