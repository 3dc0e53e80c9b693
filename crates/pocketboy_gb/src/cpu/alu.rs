use super::{Cpu, Flag};

/// The eight accumulator operations encoded in bits 5-3 of opcodes
/// 0x80-0xBF and the `op A,d8` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    #[inline]
    pub(super) fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

impl Cpu {
    /// Apply an accumulator operation with `value` as the right operand.
    pub(super) fn alu8(&mut self, op: AluOp, value: u8) {
        let a = self.regs.a;
        let carry = u8::from(self.get_flag(Flag::C));
        match op {
            AluOp::Add => self.regs.a = self.add8(a, value, 0),
            AluOp::Adc => self.regs.a = self.add8(a, value, carry),
            AluOp::Sub => self.regs.a = self.sub8(a, value, 0),
            AluOp::Sbc => self.regs.a = self.sub8(a, value, carry),
            AluOp::And => {
                self.regs.a = a & value;
                self.set_znhc(self.regs.a == 0, false, true, false);
            }
            AluOp::Xor => {
                self.regs.a = a ^ value;
                self.set_znhc(self.regs.a == 0, false, false, false);
            }
            AluOp::Or => {
                self.regs.a = a | value;
                self.set_znhc(self.regs.a == 0, false, false, false);
            }
            // CP is SUB with the result discarded.
            AluOp::Cp => {
                self.sub8(a, value, 0);
            }
        }
    }

    fn add8(&mut self, a: u8, b: u8, carry_in: u8) -> u8 {
        let wide = a as u16 + b as u16 + carry_in as u16;
        let result = wide as u8;
        let half = (a & 0x0F) + (b & 0x0F) + carry_in > 0x0F;
        self.set_znhc(result == 0, false, half, wide > 0xFF);
        result
    }

    fn sub8(&mut self, a: u8, b: u8, carry_in: u8) -> u8 {
        let wide = a as i16 - b as i16 - carry_in as i16;
        let result = wide as u8;
        let half = ((a & 0x0F) as i16 - (b & 0x0F) as i16 - carry_in as i16) < 0;
        self.set_znhc(result == 0, true, half, wide < 0);
        result
    }

    /// DAA: correct A to packed BCD after an addition or subtraction.
    /// N is preserved, H is cleared.
    pub(super) fn alu_daa(&mut self) {
        let subtract = self.get_flag(Flag::N);
        let mut carry = self.get_flag(Flag::C);
        let mut correction = 0u8;

        if self.get_flag(Flag::H) || (!subtract && (self.regs.a & 0x0F) > 0x09) {
            correction |= 0x06;
        }
        if carry || (!subtract && self.regs.a > 0x99) {
            correction |= 0x60;
            carry = true;
        }

        self.regs.a = if subtract {
            self.regs.a.wrapping_sub(correction)
        } else {
            self.regs.a.wrapping_add(correction)
        };
        self.set_znhc(self.regs.a == 0, subtract, false, carry);
    }

    /// INC r / INC (HL). C is left alone.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        let carry = self.get_flag(Flag::C);
        self.set_znhc(result == 0, false, (value & 0x0F) == 0x0F, carry);
        result
    }

    /// DEC r / DEC (HL). C is left alone.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        let carry = self.get_flag(Flag::C);
        self.set_znhc(result == 0, true, (value & 0x0F) == 0, carry);
        result
    }

    /// ADD HL,rr. Z is left alone; H and C come from bits 11 and 15.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let zero = self.get_flag(Flag::Z);
        let half = (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF;
        let (result, carry) = hl.overflowing_add(value);
        self.set_znhc(zero, false, half, carry);
        self.regs.set_hl(result);
    }

    /// SP plus a signed immediate, shared by ADD SP,r8 and LD HL,SP+r8.
    /// H and C are computed on the low byte as an unsigned add.
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        let half = (base & 0x000F) + (offset & 0x000F) > 0x000F;
        let carry = (base & 0x00FF) + (offset & 0x00FF) > 0x00FF;
        self.set_znhc(false, false, half, carry);
        base.wrapping_add(offset)
    }

    /// Shared body of the rotate/shift group. `op` is bits 5-3 of a CB
    /// opcode: RLC RRC RL RR SLA SRA SWAP SRL. Z is set from the result.
    pub(super) fn rotate_shift(&mut self, op: u8, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry_out) = match op & 0x07 {
            0 => (value.rotate_left(1), value & 0x80 != 0),
            1 => (value.rotate_right(1), value & 0x01 != 0),
            2 => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            3 => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            4 => (value << 1, value & 0x80 != 0),
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            6 => (value.rotate_left(4), false),
            _ => (value >> 1, value & 0x01 != 0),
        };
        self.set_znhc(result == 0, false, false, carry_out);
        result
    }
}
