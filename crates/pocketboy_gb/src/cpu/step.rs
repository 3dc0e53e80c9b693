use super::table::OPCODES;
use super::{Bus, Cpu};
use crate::error::EmulationError;

impl Cpu {
    /// Execute one instruction, or dispatch one interrupt, and return the
    /// number of T-cycles it took.
    ///
    /// HALT and STOP report 4 cycles per call so the caller keeps advancing
    /// time. After an undefined opcode every call returns the same
    /// [`EmulationError::InvalidInstruction`] until [`Cpu::reset`].
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, EmulationError> {
        if let Some((opcode, pc)) = self.fault {
            return Err(EmulationError::InvalidInstruction { opcode, pc });
        }

        if self.stopped {
            if bus.stop_wake_requested() {
                self.stopped = false;
            }
            return Ok(4);
        }

        if let Some(cycles) = self.handle_interrupts(bus) {
            return Ok(cycles);
        }

        if self.halted {
            return Ok(4);
        }

        let pc = self.regs.pc;
        let opcode = self.fetch8(bus);
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "{pc:04X}: {opcode:02X} {:<14} AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X}",
                OPCODES[opcode as usize].mnemonic,
                self.regs.af(),
                self.regs.bc(),
                self.regs.de(),
                self.regs.hl(),
                self.regs.sp,
            );
        }
        let cycles = self.exec_opcode(bus, opcode)?;
        self.apply_ime_delay();
        Ok(cycles)
    }
}
