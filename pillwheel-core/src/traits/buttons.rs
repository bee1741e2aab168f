//! Front panel button input

/// Edge reported by the front panel button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Pressed,
    Released,
}

/// Button input with explicit arming
///
/// Events are only produced while armed. The controller arms the input when
/// it starts waiting for the user and disarms it as soon as an event has
/// been consumed, so a press is never acted on twice.
pub trait Buttons {
    /// Arm input sensing
    fn enable_buttons(&mut self);

    /// Disarm input sensing
    fn disable_buttons(&mut self);

    /// Take the oldest pending event, if any
    ///
    /// Never blocks. Returns at most one event per call.
    fn get_button_event(&mut self) -> Option<ButtonEvent>;
}
