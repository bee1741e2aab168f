//! Status indicator

/// Single status LED
///
/// Blinking means the wheel needs calibration, steady on means the
/// dispenser is ready for a button press.
pub trait StatusLed {
    /// Turn the LED on or off
    fn set_led(&mut self, on: bool);

    /// Invert the LED
    fn toggle_led(&mut self);
}
