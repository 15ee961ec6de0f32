//! ESP-IDF platform adapter.
//!
//! Only built for `target_os = "espidf"`.

use esp_idf_svc::sys::{self, EspError};

use super::setclear::{RegisterWrite, SetClearBank, SetClearRegs};

/// ESP32-S3 GPIO output set/clear registers (GPIO_OUT_W1TS/W1TC and the
/// OUT1 pair for GPIO 32..48).
const GPIO_BASE: usize = 0x6000_4000;
pub const GPIO_OUT_REGS: SetClearRegs = SetClearRegs {
    set: [GPIO_BASE + 0x0008, GPIO_BASE + 0x0014],
    clear: [GPIO_BASE + 0x000C, GPIO_BASE + 0x0018],
};

/// Volatile stores to the memory-mapped GPIO block.
pub struct Mmio {
    _private: (),
}

impl RegisterWrite for Mmio {
    #[inline]
    fn write(&mut self, addr: usize, value: u32) {
        // SAFETY: only constructed by `configure` with GPIO_OUT_REGS, whose
        // addresses are the write-only set/clear registers of this chip.
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}

/// Output lines driven through the GPIO set/clear registers.
///
/// A set or clear is one register store per 32-line half, so every line of
/// a mask below GPIO 32 changes in the same bus access. One owner only: the
/// parallel DAC.
pub type EspGpioBank = SetClearBank<Mmio>;

/// Reset `pins` and configure them as push-pull outputs driven low.
///
/// Setup failures are not fatal: the bank is returned either way with the
/// first error, and lines that failed simply stay undriven.
pub fn configure(pins: &[u8]) -> (EspGpioBank, Option<EspError>) {
    let mut first_error = None;
    for &pin in pins {
        let num = pin as sys::gpio_num_t;
        // SAFETY: plain driver calls on a pin number owned by this bank.
        let result = unsafe {
            sys::esp!(sys::gpio_reset_pin(num))
                .and_then(|_| sys::esp!(sys::gpio_set_direction(num, sys::gpio_mode_t_GPIO_MODE_OUTPUT)))
                .and_then(|_| sys::esp!(sys::gpio_set_level(num, 0)))
        };
        if let Err(e) = result {
            first_error.get_or_insert(e);
        }
    }
    (SetClearBank::new(GPIO_OUT_REGS, Mmio { _private: () }), first_error)
}

/// Monotonic loop time in ticks (ns resolution, µs granularity).
#[inline]
pub fn now_ticks() -> u64 {
    // SAFETY: esp_timer_get_time has no preconditions once the scheduler runs.
    let us = unsafe { sys::esp_timer_get_time() };
    (us.max(0) as u64) * 1000
}
