//! Hardware Abstraction Layer for the beacon
//!
//! The beacon consumes three capabilities: a key output ([`OutputKey`]),
//! a blocking millisecond delay (`embedded_hal::delay::DelayNs`) and a
//! one-time hardware initialization ([`BeaconHal`]).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// `initialize` called on hardware that is already set up
    AlreadyInitialized,
}

impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::AlreadyInitialized => write!(f, "Hardware already initialized"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for key output control
pub trait OutputKey {
    type Error: From<HalError>;

    /// Set key output state (true = key down, false = key up)
    fn set_state(&mut self, state: bool) -> Result<(), Self::Error>;

    /// Get current key output state
    fn get_state(&self) -> Result<bool, Self::Error>;
}

/// Board support for the beacon: the key output, the delay and their
/// one-time setup.
pub trait BeaconHal {
    type KeyOutput: OutputKey;
    type Delay: DelayNs;
    type Error: From<HalError>;

    /// Configure the key pin and disable unused peripherals.
    /// Called exactly once, before the first cycle; a repeated call fails
    /// with `HalError::AlreadyInitialized`.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Hand the initialized output and delay over to the beacon
    fn into_parts(self) -> (Self::KeyOutput, Self::Delay);
}

/// Key output over any embedded-hal output pin
pub struct EmbeddedHalKeyOutput<P> {
    pin: P,
    inverted: bool,
    state: bool,
}

impl<P> EmbeddedHalKeyOutput<P>
where
    P: OutputPin,
{
    /// Wrap `pin`; with `inverted`, key down drives the pin low
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted, state: false }
    }

    /// Release the underlying pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> OutputKey for EmbeddedHalKeyOutput<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn set_state(&mut self, state: bool) -> Result<(), Self::Error> {
        let output_state = if self.inverted { !state } else { state };
        if output_state {
            self.pin.set_high().map_err(|_| HalError::GpioError)?;
        } else {
            self.pin.set_low().map_err(|_| HalError::GpioError)?;
        }
        self.state = state;
        Ok(())
    }

    fn get_state(&self) -> Result<bool, Self::Error> {
        Ok(self.state)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use core::cell::Cell;

    /// Key output that only remembers its state, optionally failing
    #[derive(Default)]
    pub struct MockKeyOutput {
        state: Cell<bool>,
        transitions: Cell<usize>,
        fail_after: Option<usize>,
    }

    impl MockKeyOutput {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail with `GpioError` once `count` transitions succeeded
        pub fn failing_after(count: usize) -> Self {
            Self { fail_after: Some(count), ..Self::default() }
        }

        pub fn is_active(&self) -> bool {
            self.state.get()
        }

        pub fn transitions(&self) -> usize {
            self.transitions.get()
        }
    }

    impl OutputKey for MockKeyOutput {
        type Error = HalError;

        fn set_state(&mut self, state: bool) -> Result<(), Self::Error> {
            if self.fail_after.is_some_and(|limit| self.transitions.get() >= limit) {
                return Err(HalError::GpioError);
            }
            self.state.set(state);
            self.transitions.set(self.transitions.get() + 1);
            Ok(())
        }

        fn get_state(&self) -> Result<bool, Self::Error> {
            Ok(self.state.get())
        }
    }

    /// Delay that returns immediately, adding up what was requested.
    /// Sub-millisecond requests count as a whole millisecond.
    #[derive(Default)]
    pub struct MockDelay {
        total_ms: u64,
        calls: usize,
    }

    impl MockDelay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn total_ms(&self) -> u64 {
            self.total_ms
        }

        pub fn calls(&self) -> usize {
            self.calls
        }
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.delay_ms(ns.div_ceil(1_000_000));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += u64::from(ms);
            self.calls += 1;
        }
    }
}
