use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = self.fetch16(bus);
        self.regs.set_rp(opcode >> 4, value);
        12
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let reg = (opcode >> 3) & 0x07;
        let value = self.fetch8(bus);
        self.write_reg8(bus, reg, value);
        if reg == 6 {
            12
        } else {
            8
        }
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        let [lo, hi] = self.regs.sp.to_le_bytes();
        bus.write8(addr, lo);
        bus.write8(addr.wrapping_add(1), hi);
        20
    }

    /// LDH (a8),A and LDH A,(a8): bit 4 of the opcode selects the load
    /// direction.
    pub(super) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = 0xFF00 | u16::from(self.fetch8(bus));
        self.transfer_a(bus, addr, opcode & 0x10 != 0);
        12
    }

    pub(super) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = 0xFF00 | u16::from(self.regs.c);
        self.transfer_a(bus, addr, opcode & 0x10 != 0);
        8
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = self.fetch16(bus);
        self.transfer_a(bus, addr, opcode & 0x10 != 0);
        16
    }

    /// LD (BC),A / LD (DE),A / LD (HL+),A / LD (HL-),A
    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = self.indirect_address(opcode);
        bus.write8(addr, self.regs.a);
        8
    }

    /// LD A,(BC) / LD A,(DE) / LD A,(HL+) / LD A,(HL-)
    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let addr = self.indirect_address(opcode);
        self.regs.a = bus.read8(addr);
        8
    }

    /// 0x40-0x7F. 0x76 (the `LD (HL),(HL)` slot) is HALT.
    pub(super) fn exec_ld_r_r_or_halt<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        if opcode == 0x76 {
            return self.exec_halt(bus);
        }

        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.write_reg8(bus, dst, value);
        if dst == 6 || src == 6 {
            8
        } else {
            4
        }
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }

    fn transfer_a<B: Bus>(&mut self, bus: &mut B, addr: u16, load: bool) {
        if load {
            self.regs.a = bus.read8(addr);
        } else {
            bus.write8(addr, self.regs.a);
        }
    }

    /// Address for the `(rr)` column of opcodes 0x02/0x0A..0x32/0x3A,
    /// applying the HL post-increment or post-decrement.
    fn indirect_address(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }
}
