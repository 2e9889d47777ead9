#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// Panic handler
use panic_halt as _;

use beacon_firmware::*;
use riscv_rt::entry;

/// Main firmware entry point
#[entry]
fn main() -> ! {
    #[cfg(feature = "defmt")]
    defmt::info!("CW beacon starting, beacon-core {}", VERSION);

    let mut beacon = match Beacon::start(Ch32v003BeaconHal::new(), BEACON_CONFIG) {
        Ok(beacon) => beacon,
        Err(_err) => {
            #[cfg(feature = "defmt")]
            defmt::error!("beacon start failed");
            halt();
        }
    };

    #[cfg(feature = "defmt")]
    if BEACON_CONFIG.unsupported_count() > 0 {
        defmt::warn!("{} message characters will be skipped", BEACON_CONFIG.unsupported_count());
    }

    match beacon.run() {
        Ok(never) => match never {},
        Err(_err) => {
            #[cfg(feature = "defmt")]
            defmt::error!("key output failed: {}", _err);
            halt();
        }
    }
}

fn halt() -> ! {
    loop {
        unsafe { riscv::asm::wfi() };
    }
}
