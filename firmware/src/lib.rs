#![no_std]

//! Firmware library: CH32V003 board support and time base for the beacon

pub use beacon_core::*;

pub mod ch32v003_hardware;

pub use crate::ch32v003_hardware::*;

// Time driver and critical section for embassy on the target only
#[cfg(target_arch = "riscv32")]
mod time_driver;

/// Identification string and speed keyed by this board
pub const BEACON_CONFIG: BeaconConfig = BeaconConfig::new("VVV DE VE3WCC/B FN15XI", 70);

// Same checks as Beacon::start: non-empty message, 0 < U <= TimingProfile::MAX_UNIT_MS
const _: () = assert!(BEACON_CONFIG.validate().is_ok());
