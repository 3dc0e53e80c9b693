use super::{Bus, Cpu};

impl Cpu {
    /// Dispatch the highest-priority pending interrupt if IME allows it.
    ///
    /// Also handles HALT wake-up: a pending interrupt always ends HALT, but
    /// with IME clear execution simply resumes after the HALT opcode.
    /// Returns the cycle cost of the dispatch, or `None` when the step
    /// should fetch an opcode instead.
    pub(super) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if bus.pending_interrupts().is_empty() {
            return None;
        }
        self.halted = false;
        if !self.ime {
            return None;
        }

        self.ime = false;
        let pc = self.regs.pc;
        let [lo, hi] = pc.to_le_bytes();

        // The line is chosen after the high byte is pushed. When SP points
        // at IE that push can disable the interrupt that triggered the
        // dispatch, in which case execution continues at 0x0000.
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        let selected = bus.pending_interrupts().highest();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);

        match selected {
            Some(interrupt) => {
                bus.acknowledge_interrupt(interrupt);
                self.regs.pc = interrupt.vector();
                log::debug!(
                    "GB CPU interrupt: {interrupt:?} vector=0x{vector:04X} pc=0x{pc:04X} sp=0x{sp:04X}",
                    vector = self.regs.pc,
                    sp = self.regs.sp,
                );
            }
            None => self.regs.pc = 0x0000,
        }

        Some(20)
    }

    /// Advance the EI delay by one instruction boundary.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
