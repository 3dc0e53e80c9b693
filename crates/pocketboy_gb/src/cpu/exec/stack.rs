use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// PUSH rr, where the pair field selects BC, DE, HL or AF.
    pub(super) fn exec_push_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = match (opcode >> 4) & 0x03 {
            3 => self.regs.af(),
            rp => self.regs.rp(rp),
        };
        self.push_u16(bus, value);
        16
    }

    /// POP rr. POP AF drops the low nibble of F.
    pub(super) fn exec_pop_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = self.pop_u16(bus);
        match (opcode >> 4) & 0x03 {
            3 => self.regs.set_af(value),
            rp => self.regs.set_rp(rp, value),
        }
        12
    }
}
