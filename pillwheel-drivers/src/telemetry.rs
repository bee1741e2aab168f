//! Telemetry outbox
//!
//! The controller must never wait on the radio, so messages are queued here
//! and drained by the radio task. When the queue is full the new message is
//! dropped and counted.

use heapless::{Deque, String};
use pillwheel_core::traits::{MessageKind, Telemetry};

/// Longest message text kept; longer text is truncated
pub const MAX_TEXT_LEN: usize = 48;

/// Message waiting for the radio
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryMessage {
    pub kind: MessageKind,
    pub text: String<MAX_TEXT_LEN>,
}

impl TelemetryMessage {
    /// Build a message, truncating `text` at a character boundary
    pub fn new(kind: MessageKind, text: &str) -> Self {
        let mut truncated = String::new();
        for c in text.chars() {
            if truncated.push(c).is_err() {
                break;
            }
        }
        Self {
            kind,
            text: truncated,
        }
    }
}

pub struct TelemetryOutbox<const N: usize> {
    queue: Deque<TelemetryMessage, N>,
    dropped: u32,
}

impl<const N: usize> TelemetryOutbox<N> {
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            dropped: 0,
        }
    }

    /// Take the oldest queued message
    pub fn pop(&mut self) -> Option<TelemetryMessage> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Messages lost to a full queue since startup
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> Default for TelemetryOutbox<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Telemetry for TelemetryOutbox<N> {
    fn send_message(&mut self, kind: MessageKind, text: &str) {
        let message = TelemetryMessage::new(kind, text);
        if self.queue.push_back(message).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            warn!("Telemetry outbox full, dropped {} messages", self.dropped);
        }
    }
}
