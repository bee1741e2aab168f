//! Flash storage abstractions
//!
//! Provides a blocking key-value storage trait that chip-specific HALs
//! implement on top of their flash memory. Reads and writes complete before
//! returning so a value reported as written survives a power loss.

/// Storage keys for persisted dispenser data
///
/// Each key holds one independently written record. The storage
/// implementation handles wear leveling and data integrity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Number of slices dispensed in the current prescription run
    SlicesRan = 0,
    /// Last known mechanism state (idle or mid-turn)
    MechanismState = 1,
    /// Whether the wheel alignment is known to be correct
    Calibrated = 2,
    /// Dispenser configuration (binary postcard format)
    DispenserConfig = 3,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
}

/// Flash storage trait
///
/// Provides wear-leveled key-value storage for dispenser data.
/// Implementations should handle:
/// - Wear leveling across flash sectors
/// - Data integrity (CRC or similar)
/// - Atomic writes where possible
pub trait FlashStorage {
    /// Read a value by key into the provided buffer
    ///
    /// # Returns
    /// The number of bytes read, or [`FlashError::NotFound`] if the key has
    /// never been written.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError>;

    /// Write a value by key
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError>;
}
