use crate::interrupts::{Interrupt, InterruptFlags};

/// Memory and I/O as seen by the CPU.
///
/// Only `read8`/`write8` are required. The interrupt helpers default to the
/// IE ($FFFF) and IF ($FF0F) registers so a flat 64 KiB test bus behaves
/// like hardware; the system bus overrides them to talk to its interrupt
/// controller directly.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Interrupts that are both requested and enabled.
    fn pending_interrupts(&mut self) -> InterruptFlags {
        let ie = self.read8(0xFFFF);
        let iflags = self.read8(0xFF0F);
        InterruptFlags::from_bits_truncate(ie & iflags)
    }

    /// Clear the request bit of an interrupt that is being dispatched.
    fn acknowledge_interrupt(&mut self, interrupt: Interrupt) {
        let iflags = self.read8(0xFF0F);
        self.write8(0xFF0F, iflags & !interrupt.flag().bits());
    }

    /// Whether a STOP should end. Hardware leaves STOP when one of the P1
    /// input lines goes low.
    fn stop_wake_requested(&mut self) -> bool {
        (self.read8(0xFF00) & 0x0F) != 0x0F
    }
}
