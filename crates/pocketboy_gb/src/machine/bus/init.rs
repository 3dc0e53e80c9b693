use super::GameBoyBus;

impl GameBoyBus {
    /// I/O state the DMG boot ROM leaves at PC=0x0100.
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        self.fill_internal_ram();

        self.timer.init_dmg();
        self.ppu.init_dmg();
        self.apu.init_dmg();

        // IF reads 0xE1: the boot ROM's last VBlank request is still pending.
        self.interrupts.write_if(0x01);
        self.interrupts.write_ie(0x00);
        self.dma_source = 0xFF;
    }

    /// WRAM and HRAM hold garbage at power-on. A fixed-seed xorshift keeps
    /// runs reproducible without handing software an all-zero pattern.
    fn fill_internal_ram(&mut self) {
        let mut x: u32 = 0xC0DE_1234;
        let mut next_byte = || {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        };
        for byte in self.wram.iter_mut() {
            *byte = next_byte();
        }
        for byte in self.hram.iter_mut() {
            *byte = next_byte();
        }
    }
}
