//! Identification cycle driver
//!
//! Alternates forever between sending the identification message and
//! holding a long identification tone.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

use crate::hal::{BeaconHal, OutputKey};
use crate::sequencer::{play, play_async, MessageEncoder};
use crate::timing::TimingProfile;
use crate::types::{BeaconConfig, ConfigError, KeyEvent};

/// Cycle driver states
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CyclePhase {
    /// Sending the identification message
    Identify,
    /// Guard, key-down hold, guard
    Tone,
}

impl CyclePhase {
    /// Phase that follows this one; the cycle has no terminal state
    pub const fn next(&self) -> CyclePhase {
        match self {
            CyclePhase::Identify => CyclePhase::Tone,
            CyclePhase::Tone => CyclePhase::Identify,
        }
    }
}

/// The fixed Tone phase sequence for `config`
pub fn tone_events(config: &BeaconConfig) -> [KeyEvent; 5] {
    [
        KeyEvent::Wait(config.pre_tone_guard_ms),
        KeyEvent::Key(true),
        KeyEvent::Wait(config.tone_hold_ms),
        KeyEvent::Key(false),
        KeyEvent::Wait(config.post_tone_guard_ms),
    ]
}

/// Error from bringing the beacon up
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartError<E> {
    /// Configuration rejected before touching hardware
    Config(ConfigError),
    /// Hardware initialization failed
    Hal(E),
}

impl<E> From<ConfigError> for StartError<E> {
    fn from(err: ConfigError) -> Self {
        StartError::Config(err)
    }
}

/// Beacon owning the key output and the delay for its whole lifetime
pub struct Beacon<K, D> {
    config: BeaconConfig,
    profile: TimingProfile,
    phase: CyclePhase,
    key: K,
    delay: D,
}

impl<K, D> Beacon<K, D>
where
    K: OutputKey,
{
    /// Create a beacon over already initialized ports.
    ///
    /// The configuration is validated here, before any output happens.
    pub fn new(config: BeaconConfig, key: K, delay: D) -> Result<Self, ConfigError> {
        let profile = config.validate()?;
        Ok(Self::with_profile(config, profile, key, delay))
    }

    fn with_profile(config: BeaconConfig, profile: TimingProfile, key: K, delay: D) -> Self {
        Self {
            config,
            profile,
            phase: CyclePhase::Identify,
            key,
            delay,
        }
    }

    /// Get current cycle phase
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Get current configuration
    pub fn config(&self) -> &BeaconConfig {
        &self.config
    }

    /// Timing derived from the configured unit
    pub fn profile(&self) -> &TimingProfile {
        &self.profile
    }

    /// Access the key output
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Access the delay
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give the ports back
    pub fn release(self) -> (K, D) {
        (self.key, self.delay)
    }
}

impl<K, D> Beacon<K, D>
where
    K: OutputKey,
    D: DelayNs,
{
    /// Validate `config`, initialize the hardware once and let it settle
    pub fn start<H>(mut hal: H, config: BeaconConfig) -> Result<Self, StartError<H::Error>>
    where
        H: BeaconHal<KeyOutput = K, Delay = D>,
    {
        let profile = config.validate()?;
        hal.initialize().map_err(StartError::Hal)?;

        #[cfg(feature = "defmt")]
        defmt::info!("hardware initialized, settling {}ms", config.startup_settle_ms);

        let (key, mut delay) = hal.into_parts();
        delay.delay_ms(config.startup_settle_ms);
        Ok(Self::with_profile(config, profile, key, delay))
    }

    /// Run the current phase to completion and advance to the next one
    pub fn step(&mut self) -> Result<CyclePhase, K::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("phase: {:?}", self.phase);

        match self.phase {
            CyclePhase::Identify => play(
                MessageEncoder::new(self.config.message, self.profile),
                &mut self.key,
                &mut self.delay,
            )?,
            CyclePhase::Tone => play(tone_events(&self.config), &mut self.key, &mut self.delay)?,
        }
        self.phase = self.phase.next();
        Ok(self.phase)
    }

    /// One full Identify + Tone cycle, starting from Identify
    pub fn run_cycle(&mut self) -> Result<(), K::Error> {
        self.phase = CyclePhase::Identify;
        self.step()?;
        self.step()?;
        Ok(())
    }

    /// Cycle forever. Returns only if the key output fails.
    pub fn run(&mut self) -> Result<Infallible, K::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("beacon running: \"{}\" at {} WPM", self.config.message, self.profile.wpm());

        loop {
            self.step()?;
        }
    }
}

impl<K, D> Beacon<K, D>
where
    K: OutputKey,
    D: AsyncDelayNs,
{
    /// Async variant of [`Beacon::step`]
    pub async fn step_async(&mut self) -> Result<CyclePhase, K::Error> {
        match self.phase {
            CyclePhase::Identify => {
                play_async(
                    MessageEncoder::new(self.config.message, self.profile),
                    &mut self.key,
                    &mut self.delay,
                )
                .await?
            }
            CyclePhase::Tone => {
                play_async(tone_events(&self.config), &mut self.key, &mut self.delay).await?
            }
        }
        self.phase = self.phase.next();
        Ok(self.phase)
    }

    /// Async variant of [`Beacon::run_cycle`]
    pub async fn run_cycle_async(&mut self) -> Result<(), K::Error> {
        self.phase = CyclePhase::Identify;
        self.step_async().await?;
        self.step_async().await?;
        Ok(())
    }

    /// Async variant of [`Beacon::run`]
    pub async fn run_async(&mut self) -> Result<Infallible, K::Error> {
        loop {
            self.step_async().await?;
        }
    }
}
