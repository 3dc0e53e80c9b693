use super::super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn write8_mmio_impl(&mut self, addr: u16, value: u8) {
        match addr {
            // Mapper commands.
            0x0000..=0x7FFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.rom_write(addr, value);
                }
            }

            0x8000..=0x9FFF => self.ppu.write_vram(addr, value),

            0xA000..=0xBFFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.ram_write(addr, value);
                }
            }

            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = value,

            0xFE00..=0xFE9F => self.ppu.write_oam(addr, value),

            0xFF00 => self.joypad.write_p1(value),
            0xFF01 => self.serial.write_sb(value),
            0xFF02 => self.serial.write_sc(value, &mut self.interrupts),

            0xFF04 => self.timer.div_write(),
            0xFF05 => self.timer.tima_write(value),
            0xFF06 => self.timer.tma_write(value),
            0xFF07 => self.timer.tac_write(value),

            0xFF0F => self.interrupts.write_if(value),

            0xFF10..=0xFF3F => self.apu.write_register(addr, value),

            0xFF46 => self.start_oam_dma(value),
            0xFF40..=0xFF4B => self.ppu.write_register(addr, value, &mut self.interrupts),

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.interrupts.write_ie(value),

            // Unusable area and unmapped I/O ignore writes.
            _ => {}
        }
    }
}
