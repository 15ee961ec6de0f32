//! GPIO bank on write-1-to-set / write-1-to-clear registers
//!
//! Output blocks of this kind expose one set register and one clear register
//! per 32 lines. Writing a mask to either changes exactly those lines in one
//! bus access, leaving the others alone.

use super::GpioBank;

/// Register file access, one 32-bit store per call.
pub trait RegisterWrite {
    /// Store `value` at register `addr`.
    fn write(&mut self, addr: usize, value: u32);
}

/// Addresses of a two-word set/clear output block.
///
/// Index 0 covers GPIO 0..32, index 1 covers GPIO 32..64.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetClearRegs {
    pub set: [usize; 2],
    pub clear: [usize; 2],
}

/// [`GpioBank`] over a [`SetClearRegs`] block.
///
/// A set or clear touches at most one register per non-empty 32-line half,
/// so a mask confined to GPIO 0..32 is a single store.
pub struct SetClearBank<W: RegisterWrite> {
    regs: SetClearRegs,
    writer: W,
}

impl<W: RegisterWrite> SetClearBank<W> {
    pub const fn new(regs: SetClearRegs, writer: W) -> Self {
        Self { regs, writer }
    }

    /// Access the register writer (tests, diagnostics).
    pub fn writer(&self) -> &W {
        &self.writer
    }

    #[inline]
    fn store(&mut self, addrs: [usize; 2], mask: u64) {
        let low = mask as u32;
        let high = (mask >> 32) as u32;
        if low != 0 {
            self.writer.write(addrs[0], low);
        }
        if high != 0 {
            self.writer.write(addrs[1], high);
        }
    }
}

impl<W: RegisterWrite> GpioBank for SetClearBank<W> {
    #[inline]
    fn set_bits(&mut self, mask: u64) {
        self.store(self.regs.set, mask);
    }

    #[inline]
    fn clear_bits(&mut self, mask: u64) {
        self.store(self.regs.clear, mask);
    }
}
