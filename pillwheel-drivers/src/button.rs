//! Latched front panel button
//!
//! `sample()` is called from a periodic poll (or the pin interrupt) with an
//! already debounced pin. Edges seen while armed are queued until the
//! controller takes them. A release is only reported for a press that was
//! itself reported, so a button still held down when the input is re-armed
//! cannot trigger the next state on release.

use heapless::Deque;
use pillwheel_core::traits::{ButtonEvent, Buttons};
use pillwheel_hal::{ActiveLevel, InputPin};

/// Pending events kept per button
pub const EVENT_QUEUE_SIZE: usize = 4;

pub struct LatchedButton<P> {
    pin: P,
    active: ActiveLevel,
    armed: bool,
    /// Pin state at the last sample
    pressed: bool,
    /// The current press was queued while armed
    press_reported: bool,
    queue: Deque<ButtonEvent, EVENT_QUEUE_SIZE>,
}

impl<P: InputPin> LatchedButton<P> {
    pub fn new(pin: P, active: ActiveLevel) -> Self {
        let pressed = active.is_asserted(pin.is_high());
        Self {
            pin,
            active,
            armed: false,
            pressed,
            press_reported: false,
            queue: Deque::new(),
        }
    }

    /// Check if the button is currently held down
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Sample the pin and queue any edge
    pub fn sample(&mut self) {
        let pressed = self.active.is_asserted(self.pin.is_high());
        if pressed == self.pressed {
            return;
        }
        self.pressed = pressed;

        if !self.armed {
            return;
        }

        let event = if pressed {
            self.press_reported = true;
            ButtonEvent::Pressed
        } else if self.press_reported {
            self.press_reported = false;
            ButtonEvent::Released
        } else {
            return;
        };

        if self.queue.push_back(event).is_err() {
            debug!("Button queue full, dropping {}", event);
        }
    }
}

impl<P: InputPin> Buttons for LatchedButton<P> {
    fn enable_buttons(&mut self) {
        self.queue.clear();
        self.pressed = self.active.is_asserted(self.pin.is_high());
        self.press_reported = false;
        self.armed = true;
    }

    fn disable_buttons(&mut self) {
        self.armed = false;
        self.queue.clear();
    }

    fn get_button_event(&mut self) -> Option<ButtonEvent> {
        self.queue.pop_front()
    }
}
