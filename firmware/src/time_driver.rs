//! Embassy time driver over the free-running CH32V003 SysTick counter
//!
//! Only `now()` is provided: the beacon busy-waits through
//! `embassy_time::Delay`, which never arms an alarm.

use core::ptr::read_volatile;

use embassy_time_driver::{AlarmHandle, Driver};
use portable_atomic::{AtomicU32, Ordering};

use crate::ch32v003_hardware::{HCLK_HZ, SYSTICK_BASE, SYSTICK_CNT};

/// SysTick cycles per embassy tick
const CYCLES_PER_TICK: u64 = (HCLK_HZ as u64) / embassy_time_driver::TICK_HZ;

/// 32-bit SysTick counter extended to 64 bits
pub struct SysTickDriver {
    high: AtomicU32,
    last_low: AtomicU32,
}

impl SysTickDriver {
    const fn new() -> Self {
        Self {
            high: AtomicU32::new(0),
            last_low: AtomicU32::new(0),
        }
    }

    fn read_counter() -> u32 {
        unsafe { read_volatile((SYSTICK_BASE + SYSTICK_CNT) as *const u32) }
    }
}

impl Driver for SysTickDriver {
    fn now(&self) -> u64 {
        // Must be polled at least once per counter wrap (~536s at 8 MHz)
        critical_section::with(|_| {
            let low = Self::read_counter();
            let mut high = self.high.load(Ordering::Relaxed);
            if low < self.last_low.load(Ordering::Relaxed) {
                high = high.wrapping_add(1);
                self.high.store(high, Ordering::Relaxed);
            }
            self.last_low.store(low, Ordering::Relaxed);
            ((u64::from(high) << 32) | u64::from(low)) / CYCLES_PER_TICK
        })
    }

    unsafe fn allocate_alarm(&self) -> Option<AlarmHandle> {
        None
    }

    fn set_alarm_callback(&self, _alarm: AlarmHandle, _callback: fn(*mut ()), _ctx: *mut ()) {}

    fn set_alarm(&self, _alarm: AlarmHandle, _timestamp: u64) -> bool {
        false
    }
}

// Export the driver
embassy_time_driver::time_driver_impl!(static DRIVER: SysTickDriver = SysTickDriver::new());

// Critical section implementation for single-core RISC-V
critical_section::set_impl!(RiscvCriticalSection);

struct RiscvCriticalSection;

unsafe impl critical_section::Impl for RiscvCriticalSection {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        let mstatus = riscv::register::mstatus::read();
        riscv::register::mstatus::clear_mie();
        mstatus.mie() as u8
    }

    unsafe fn release(was_enabled: critical_section::RawRestoreState) {
        if was_enabled != 0 {
            riscv::register::mstatus::set_mie();
        }
    }
}
