use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// HALT. With IME clear and an interrupt already pending the core does
    /// not halt; instead the following opcode byte is fetched twice.
    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if !self.ime && !bus.pending_interrupts().is_empty() {
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
        4
    }

    /// STOP is two bytes long; the padding byte is fetched and discarded.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let _padding = self.fetch8(bus);
        self.stopped = true;
        self.halted = false;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        4
    }

    /// IME turns on after the instruction that follows EI.
    pub(super) fn exec_ei(&mut self) -> u32 {
        self.ime_enable_pending = true;
        4
    }
}
