#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Beacon Core
//!
//! CW beacon identifier logic for embedded systems: sends a fixed
//! identification string in Morse code, then holds a long identification
//! tone, forever. Timing derives from a single base unit.

pub mod types;
pub mod timing;
pub mod morse;
pub mod sequencer;
pub mod beacon;
pub mod hal;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


pub use types::*;
pub use timing::*;
pub use sequencer::*;
pub use beacon::*;
pub use hal::{BeaconHal, EmbeddedHalKeyOutput, HalError, OutputKey};

/// Beacon library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reference configuration: "VVV DE VE3WCC/B FN15XI" at 70ms per unit
pub const fn default_config() -> BeaconConfig {
    BeaconConfig::new(BeaconConfig::DEFAULT_MESSAGE, BeaconConfig::DEFAULT_UNIT_MS)
}
