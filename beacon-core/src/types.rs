//! Core data types for the beacon identifier

use crate::timing::TimingProfile;

/// Morse code marks
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mark {
    /// Dit (short mark)
    Dit,
    /// Dah (long mark)
    Dah,
}

impl Mark {
    /// Returns the keyed duration of this mark in units
    pub const fn duration_units(&self) -> u32 {
        match self {
            Mark::Dit => 1,
            Mark::Dah => 3,
        }
    }

    /// Character used when rendering a pattern as text
    pub const fn as_char(&self) -> char {
        match self {
            Mark::Dit => '.',
            Mark::Dah => '-',
        }
    }
}

/// One character of the identification string, classified.
///
/// Letters and digits carry their zero-based offset into the Morse table
/// (`'A'` is `Letter(0)`, `'0'` is `Digit(0)`).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Uppercase A-Z
    Letter(u8),
    /// 0-9
    Digit(u8),
    /// Forward slash
    Slash,
    /// Word separator, sent as a gap only
    Space,
    /// Anything else; skipped without output or delay
    Unsupported,
}

impl Symbol {
    /// Classify a character. Total: every `char` maps to exactly one class.
    pub const fn classify(ch: char) -> Symbol {
        match ch {
            'A'..='Z' => Symbol::Letter(ch as u8 - b'A'),
            '0'..='9' => Symbol::Digit(ch as u8 - b'0'),
            '/' => Symbol::Slash,
            ' ' => Symbol::Space,
            _ => Symbol::Unsupported,
        }
    }

    /// Returns true if this symbol keys the transmitter
    pub const fn is_keyed(&self) -> bool {
        matches!(self, Symbol::Letter(_) | Symbol::Digit(_) | Symbol::Slash)
    }
}

/// One step of the timed output sequence
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEvent {
    /// Drive the key output (true = key down)
    Key(bool),
    /// Block for the given number of milliseconds
    Wait(u32),
}

impl KeyEvent {
    /// Milliseconds spent by this event
    pub const fn wait_ms(&self) -> u32 {
        match self {
            KeyEvent::Wait(ms) => *ms,
            KeyEvent::Key(_) => 0,
        }
    }
}

/// Configuration errors, rejected at initialization
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Base unit of 0ms collapses every interval
    ZeroUnit,
    /// Base unit too large for its 3U intervals
    UnitTooLarge,
    /// Nothing to identify with
    EmptyMessage,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroUnit => write!(f, "Base unit must be greater than 0ms"),
            ConfigError::UnitTooLarge => write!(f, "Base unit too large for a 3-unit interval"),
            ConfigError::EmptyMessage => write!(f, "Identification message is empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Beacon configuration, fixed at compile time
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BeaconConfig {
    /// Identification string (A-Z, 0-9, '/' and spaces)
    pub message: &'static str,
    /// Basic timing unit (Dit duration) in milliseconds
    pub unit_ms: u32,
    /// Key-down hold of the identification tone
    pub tone_hold_ms: u32,
    /// Pause between the message and the tone
    pub pre_tone_guard_ms: u32,
    /// Pause between the tone and the next message
    pub post_tone_guard_ms: u32,
    /// Settling pause after hardware initialization
    pub startup_settle_ms: u32,
}

impl BeaconConfig {
    pub const DEFAULT_MESSAGE: &'static str = "VVV DE VE3WCC/B FN15XI";
    pub const DEFAULT_UNIT_MS: u32 = 70;
    pub const TONE_HOLD_MS: u32 = 5000;
    pub const TONE_GUARD_MS: u32 = 400;
    pub const STARTUP_SETTLE_MS: u32 = 250;

    /// Configuration with the given message and unit and the fixed tone timing
    pub const fn new(message: &'static str, unit_ms: u32) -> Self {
        Self {
            message,
            unit_ms,
            tone_hold_ms: Self::TONE_HOLD_MS,
            pre_tone_guard_ms: Self::TONE_GUARD_MS,
            post_tone_guard_ms: Self::TONE_GUARD_MS,
            startup_settle_ms: Self::STARTUP_SETTLE_MS,
        }
    }

    /// Check the configuration and derive the timing profile
    pub const fn validate(&self) -> Result<TimingProfile, ConfigError> {
        if self.message.is_empty() {
            return Err(ConfigError::EmptyMessage);
        }
        TimingProfile::new(self.unit_ms)
    }

    /// Number of message characters that will be skipped when sending
    pub fn unsupported_count(&self) -> usize {
        self.message
            .chars()
            .filter(|&ch| Symbol::classify(ch) == Symbol::Unsupported)
            .count()
    }
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MESSAGE, Self::DEFAULT_UNIT_MS)
    }
}
