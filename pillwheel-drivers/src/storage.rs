//! Flash-backed dispenser store
//!
//! Persists each dispenser fact as its own postcard-encoded record so a
//! write of one fact never rewrites another. Read failures of any kind are
//! reported upward as "no prior value"; the controller then persists a
//! fail-safe default.

use pillwheel_core::config::{ConfigError, DispenserConfig};
use pillwheel_core::state::MechanismState;
use pillwheel_core::traits::DispenserStore;
use pillwheel_hal::{FlashError, FlashStorage, StorageKey};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Maximum serialized record size
const MAX_RECORD_SIZE: usize = 64;

/// Store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Flash operation failed
    Flash(FlashError),
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Config rejected by validation
    InvalidConfig(ConfigError),
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

impl From<ConfigError> for StoreError {
    fn from(e: ConfigError) -> Self {
        StoreError::InvalidConfig(e)
    }
}

/// Dispenser store on top of a key-value flash
pub struct FlashStore<F> {
    flash: F,
}

impl<F: FlashStorage> FlashStore<F> {
    pub fn new(flash: F) -> Self {
        Self { flash }
    }

    /// Get the underlying flash for low-level access
    pub fn flash(&mut self) -> &mut F {
        &mut self.flash
    }

    pub fn into_inner(self) -> F {
        self.flash
    }

    /// Load the dispenser configuration
    ///
    /// Returns the stored configuration, or the default one if nothing is
    /// stored or the stored data is invalid.
    pub fn load_config(&mut self) -> DispenserConfig {
        match self.load_config_inner() {
            Ok(config) => {
                info!("Loaded dispenser config from flash");
                config
            }
            Err(StoreError::Flash(FlashError::NotFound)) => {
                debug!("No dispenser config in flash, using defaults");
                DispenserConfig::default()
            }
            Err(e) => {
                warn!("Failed to load dispenser config: {}, using defaults", e);
                DispenserConfig::default()
            }
        }
    }

    fn load_config_inner(&mut self) -> Result<DispenserConfig, StoreError> {
        let config: DispenserConfig = self.read_record(StorageKey::DispenserConfig)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate and save the dispenser configuration
    pub fn save_config(&mut self, config: &DispenserConfig) -> Result<(), StoreError> {
        config.validate()?;
        self.write_record(StorageKey::DispenserConfig, config)
    }

    fn read_record<T: DeserializeOwned>(&mut self, key: StorageKey) -> Result<T, StoreError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = self.flash.read(key, &mut buffer)?;
        postcard::from_bytes(&buffer[..len]).map_err(|_| StoreError::Deserialize)
    }

    fn write_record<T: Serialize>(&mut self, key: StorageKey, value: &T) -> Result<(), StoreError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let bytes = postcard::to_slice(value, &mut buffer).map_err(|_| StoreError::Serialize)?;
        self.flash.write(key, bytes)?;
        Ok(())
    }

    fn load<T: DeserializeOwned>(&mut self, key: StorageKey) -> Option<T> {
        match self.read_record(key) {
            Ok(value) => Some(value),
            Err(StoreError::Flash(FlashError::NotFound)) => {
                debug!("No {} record in flash", key);
                None
            }
            Err(e) => {
                warn!("Unreadable {} record: {}", key, e);
                None
            }
        }
    }

    fn save<T: Serialize>(&mut self, key: StorageKey, value: &T) {
        if let Err(e) = self.write_record(key, value) {
            error!("Failed to save {} record: {}", key, e);
        }
    }
}

impl<F: FlashStorage> DispenserStore for FlashStore<F> {
    fn load_slices_ran(&mut self) -> Option<u16> {
        self.load(StorageKey::SlicesRan)
    }

    fn save_slices_ran(&mut self, slices_ran: u16) {
        self.save(StorageKey::SlicesRan, &slices_ran);
    }

    fn load_mechanism_state(&mut self) -> Option<MechanismState> {
        self.load(StorageKey::MechanismState)
    }

    fn save_mechanism_state(&mut self, state: MechanismState) {
        self.save(StorageKey::MechanismState, &state);
    }

    fn load_calibrated(&mut self) -> Option<bool> {
        self.load(StorageKey::Calibrated)
    }

    fn save_calibrated(&mut self, calibrated: bool) {
        self.save(StorageKey::Calibrated, &calibrated);
    }
}
