use crate::cpu::Bus;
use crate::interrupts::{Interrupt, InterruptFlags};

use super::GameBoyBus;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }

    fn pending_interrupts(&mut self) -> InterruptFlags {
        self.interrupts.pending_and_enabled()
    }

    fn acknowledge_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupts.acknowledge(interrupt);
    }

    fn stop_wake_requested(&mut self) -> bool {
        self.joypad.any_held()
    }
}
