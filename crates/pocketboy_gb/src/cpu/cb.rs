use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Execute the opcode following a 0xCB prefix. The returned count
    /// includes the prefix fetch.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.fetch8(bus);
        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let value = self.read_reg8(bus, z);

        match x {
            // RLC RRC RL RR SLA SRA SWAP SRL
            0 => {
                let result = self.rotate_shift(y, value);
                self.write_reg8(bus, z, result);
            }
            // BIT y,r: Z from the tested bit, H set, C kept.
            1 => {
                let carry = self.get_flag(Flag::C);
                self.set_znhc(value & (1 << y) == 0, false, true, carry);
                return if z == 6 { 12 } else { 8 };
            }
            // RES y,r
            2 => self.write_reg8(bus, z, value & !(1 << y)),
            // SET y,r
            _ => self.write_reg8(bus, z, value | (1 << y)),
        }

        if z == 6 {
            16
        } else {
            8
        }
    }
}
