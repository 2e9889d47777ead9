//! Timing profile derived from a single base unit

use crate::types::{ConfigError, Mark};

/// All beacon intervals in milliseconds, derived from the base unit `U`.
///
/// Every field except `tone_hold` is an exact integer multiple of `U`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingProfile {
    /// Dit key-down time (U)
    pub dit: u32,
    /// Dah key-down time (3U)
    pub dah: u32,
    /// Key-up after every mark, including the last of a character (U)
    pub inter_mark_gap: u32,
    /// Extra key-up after a character's marks (2U, total 3U with the mark gap)
    pub inter_char_gap: u32,
    /// Key-up for a space symbol (3U)
    pub inter_word_gap: u32,
    /// Identification tone hold, independent of U
    pub tone_hold: u32,
}

impl TimingProfile {
    /// Fixed identification tone hold
    pub const TONE_HOLD_MS: u32 = 5000;

    /// Largest unit whose dah (3U) still fits in a `u32`
    pub const MAX_UNIT_MS: u32 = u32::MAX / 3;

    /// Derive the profile from `unit_ms`. A zero unit, or one whose 3U
    /// intervals overflow, is rejected.
    pub const fn new(unit_ms: u32) -> Result<Self, ConfigError> {
        if unit_ms == 0 {
            return Err(ConfigError::ZeroUnit);
        }
        let three_units = match unit_ms.checked_mul(3) {
            Some(ms) => ms,
            None => return Err(ConfigError::UnitTooLarge),
        };
        Ok(Self {
            dit: unit_ms,
            dah: three_units,
            inter_mark_gap: unit_ms,
            inter_char_gap: unit_ms * 2,
            inter_word_gap: three_units,
            tone_hold: Self::TONE_HOLD_MS,
        })
    }

    /// Base unit in milliseconds
    pub const fn unit(&self) -> u32 {
        self.dit
    }

    /// Equivalent speed in words per minute (PARIS: 1200 / U), for logging
    pub const fn wpm(&self) -> u32 {
        let wpm = 1200 / self.dit;
        if wpm == 0 { 1 } else { wpm }
    }

    /// Key-down time of a mark
    pub const fn duration_of(&self, mark: Mark) -> u32 {
        match mark {
            Mark::Dit => self.dit,
            Mark::Dah => self.dah,
        }
    }
}
