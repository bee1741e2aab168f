//! GPIO pin abstractions
//!
//! Digital pins used by the dispenser front panel: the push button input
//! and the status LED output.

/// Electrical level at which a pin is considered asserted
///
/// Buttons wired to ground with a pull-up and LEDs sunk by the MCU are
/// active-low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    #[default]
    High,
    Low,
}

impl ActiveLevel {
    /// Map a logical "asserted" value to the electrical level to drive
    pub fn to_level(self, asserted: bool) -> bool {
        match self {
            ActiveLevel::High => asserted,
            ActiveLevel::Low => !asserted,
        }
    }

    /// Map an electrical level read from a pin to "asserted"
    pub fn is_asserted(self, high: bool) -> bool {
        self.to_level(high)
    }
}

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
