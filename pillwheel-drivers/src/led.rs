//! Status LED on a GPIO pin

use pillwheel_core::traits::StatusLed;
use pillwheel_hal::{ActiveLevel, OutputPin};

pub struct PinLed<P> {
    pin: P,
    active: ActiveLevel,
    on: bool,
}

impl<P: OutputPin> PinLed<P> {
    /// Take the pin and switch the LED off
    pub fn new(mut pin: P, active: ActiveLevel) -> Self {
        pin.set_state(active.to_level(false));
        Self {
            pin,
            active,
            on: false,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> StatusLed for PinLed<P> {
    fn set_led(&mut self, on: bool) {
        self.on = on;
        self.pin.set_state(self.active.to_level(on));
    }

    fn toggle_led(&mut self) {
        self.set_led(!self.on);
    }
}
