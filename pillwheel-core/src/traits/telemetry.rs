//! Telemetry notifications

/// Classification of a telemetry message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageKind {
    /// Power was lost while the wheel was turning
    PowerLossDuringTurn,
}

impl MessageKind {
    /// Stable numeric code sent over the radio
    pub fn code(self) -> u8 {
        match self {
            MessageKind::PowerLossDuringTurn => 0x01,
        }
    }

    /// Parse a numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(MessageKind::PowerLossDuringTurn),
            _ => None,
        }
    }
}

/// Best-effort notification channel
///
/// Sending never blocks the state machine and has no failure path visible
/// to the caller.
pub trait Telemetry {
    fn send_message(&mut self, kind: MessageKind, text: &str);
}
