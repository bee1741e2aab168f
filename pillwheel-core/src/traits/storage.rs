//! Durable storage of the dispenser facts

use crate::state::MechanismState;

/// Durable key-value storage for the three persisted facts
///
/// Every value written must survive a power loss. A load returning `None`
/// means there is no usable prior value (never written, unreadable, or
/// corrupted); the controller then substitutes and re-persists a default.
///
/// Saves have no failure path at this seam: an implementation that cannot
/// write handles it by its own contract.
pub trait DispenserStore {
    fn load_slices_ran(&mut self) -> Option<u16>;
    fn save_slices_ran(&mut self, slices_ran: u16);

    fn load_mechanism_state(&mut self) -> Option<MechanismState>;
    fn save_mechanism_state(&mut self, state: MechanismState);

    fn load_calibrated(&mut self) -> Option<bool>;
    fn save_calibrated(&mut self, calibrated: bool);
}
