//! CH32V003 Hardware Implementation
//!
//! 16KB Flash / 2KB RAM. Key output on PC4 (push-pull, key down = high).
//! Everything else is left unclocked or parked as pulled-up inputs.

use core::convert::Infallible;
use core::ptr::{read_volatile, write_volatile};

use beacon_core::{BeaconHal, EmbeddedHalKeyOutput, HalError};
use embassy_time::Delay;
use embedded_hal::digital::{ErrorType, OutputPin};

/// CH32V003 Memory Map and Register Base Addresses
const RCC_BASE: u32 = 0x4002_1000;
const GPIOA_BASE: u32 = 0x4001_0800;
const GPIOC_BASE: u32 = 0x4001_1000;
const GPIOD_BASE: u32 = 0x4001_1400;
pub(crate) const SYSTICK_BASE: u32 = 0xE000_F000;

/// RCC Register offsets
const RCC_AHBPCENR: u32 = 0x14;  // AHB peripheral clock enable register
const RCC_APB2PCENR: u32 = 0x18; // APB2 peripheral clock enable register
const RCC_APB1PCENR: u32 = 0x1C; // APB1 peripheral clock enable register

/// APB2 clock enable bits
const IOPAEN: u32 = 1 << 2;
const IOPCEN: u32 = 1 << 4;
const IOPDEN: u32 = 1 << 5;

/// AHB clock enable bits (SRAM must stay clocked)
const SRAMEN: u32 = 1 << 2;

/// GPIO Register offsets
const GPIO_CFGLR: u32 = 0x00; // Configuration Register Low
const GPIO_OUTDR: u32 = 0x0C; // Output Data Register
const GPIO_BSHR: u32 = 0x10;  // Bit Set/Reset Register

/// Pin configuration nibbles
const CFG_OUTPUT_PUSH_PULL_10MHZ: u32 = 0x1;
const CFG_INPUT_PULL: u32 = 0x8;

/// SysTick Register offsets
pub(crate) const SYSTICK_CTLR: u32 = 0x00; // Control Register
pub(crate) const SYSTICK_CNT: u32 = 0x08;  // Counter (low word)

/// SysTick control bits: enable, count on HCLK
const STK_STE: u32 = 1 << 0;
const STK_STCLK: u32 = 1 << 2;

/// Reset clock tree: 24 MHz HSI divided by 3
pub const HCLK_HZ: u32 = 8_000_000;

/// Key output pin
pub const KEY_PIN: u8 = 4;

/// GPIO output pin driven through the BSHR register
pub struct Ch32v003OutputPin {
    /// GPIO port base address
    port: u32,
    /// Pin number (0-7)
    pin: u8,
}

impl Ch32v003OutputPin {
    const fn new(port: u32, pin: u8) -> Self {
        Self { port, pin }
    }
}

impl ErrorType for Ch32v003OutputPin {
    type Error = Infallible;
}

impl OutputPin for Ch32v003OutputPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        // BSHR bits 0-7 set
        unsafe { write_volatile((self.port + GPIO_BSHR) as *mut u32, 1 << self.pin) };
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        // BSHR bits 16-23 reset
        unsafe { write_volatile((self.port + GPIO_BSHR) as *mut u32, 1 << (self.pin + 16)) };
        Ok(())
    }
}

/// Key output as seen by the beacon
pub type Ch32v003KeyOutput = EmbeddedHalKeyOutput<Ch32v003OutputPin>;

/// CH32V003 board support for the beacon
pub struct Ch32v003BeaconHal {
    initialized: bool,
}

impl Ch32v003BeaconHal {
    pub const fn new() -> Self {
        Self { initialized: false }
    }
}

impl Default for Ch32v003BeaconHal {
    fn default() -> Self {
        Self::new()
    }
}

impl BeaconHal for Ch32v003BeaconHal {
    type KeyOutput = Ch32v003KeyOutput;
    type Delay = Delay;
    type Error = HalError;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        if self.initialized {
            return Err(HalError::AlreadyInitialized);
        }

        configure_clocks();
        park_port(GPIOA_BASE, 0b0000_0110);
        park_port(GPIOD_BASE, 0b1111_1101);
        configure_key_pin();
        start_systick();

        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!("CH32V003 initialized, key on PC{}", KEY_PIN);

        Ok(())
    }

    fn into_parts(self) -> (Self::KeyOutput, Self::Delay) {
        let pin = Ch32v003OutputPin::new(GPIOC_BASE, KEY_PIN);
        (EmbeddedHalKeyOutput::new(pin, false), Delay)
    }
}

/// Clock only SRAM and the GPIO ports; ADC, timers, USART, SPI, I2C, DMA
/// and the watchdog window stay gated.
fn configure_clocks() {
    unsafe {
        write_volatile((RCC_BASE + RCC_AHBPCENR) as *mut u32, SRAMEN);
        write_volatile((RCC_BASE + RCC_APB2PCENR) as *mut u32, IOPAEN | IOPCEN | IOPDEN);
        write_volatile((RCC_BASE + RCC_APB1PCENR) as *mut u32, 0);
    }
}

/// Configure the pins in `mask` as pulled-up inputs
fn park_port(port: u32, mask: u8) {
    unsafe {
        let cfglr = (port + GPIO_CFGLR) as *mut u32;
        let mut cfg = read_volatile(cfglr);
        for pin in (0..8u32).filter(|pin| mask & (1u8 << *pin) != 0) {
            cfg &= !(0xF << (pin * 4));
            cfg |= CFG_INPUT_PULL << (pin * 4);
        }
        write_volatile(cfglr, cfg);

        let outdr = (port + GPIO_OUTDR) as *mut u32;
        write_volatile(outdr, read_volatile(outdr) | u32::from(mask));
    }
}

/// Key pin low first, then enable the output driver; the rest of port C
/// is parked
fn configure_key_pin() {
    unsafe {
        write_volatile((GPIOC_BASE + GPIO_BSHR) as *mut u32, 1 << (KEY_PIN + 16));
    }
    park_port(GPIOC_BASE, !(1u8 << KEY_PIN));
    unsafe {
        let cfglr = (GPIOC_BASE + GPIO_CFGLR) as *mut u32;
        let mut cfg = read_volatile(cfglr);
        cfg &= !(0xF << (KEY_PIN as u32 * 4));
        cfg |= CFG_OUTPUT_PUSH_PULL_10MHZ << (KEY_PIN as u32 * 4);
        write_volatile(cfglr, cfg);
    }
}

/// Free-running SysTick at HCLK, no interrupt; read by the time driver
fn start_systick() {
    unsafe {
        write_volatile((SYSTICK_BASE + SYSTICK_CNT) as *mut u32, 0);
        write_volatile((SYSTICK_BASE + SYSTICK_CTLR) as *mut u32, STK_STE | STK_STCLK);
    }
}
