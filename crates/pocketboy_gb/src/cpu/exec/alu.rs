use crate::cpu::alu::AluOp;
use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// 0x80-0xBF: `op A,r` with the operation in bits 5-3 and the source in
    /// bits 2-0.
    pub(super) fn exec_alu_r<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.alu8(AluOp::from_bits(opcode >> 3), value);
        if src == 6 {
            8
        } else {
            4
        }
    }

    pub(super) fn exec_alu_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = self.fetch8(bus);
        self.alu8(AluOp::from_bits(opcode >> 3), value);
        8
    }

    /// RLCA, RRCA, RLA, RRA. Same as the CB forms on A except Z is always
    /// cleared.
    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        let result = self.rotate_shift(opcode >> 3, self.regs.a);
        self.regs.a = result;
        self.set_flag(Flag::Z, false);
        4
    }

    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) -> u32 {
        let value = self.regs.rp(opcode >> 4);
        self.alu_add16_hl(value);
        8
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        16
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
        12
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        let zero = self.get_flag(Flag::Z);
        self.set_znhc(zero, false, false, true);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let zero = self.get_flag(Flag::Z);
        let carry = self.get_flag(Flag::C);
        self.set_znhc(zero, false, false, !carry);
        4
    }
}
