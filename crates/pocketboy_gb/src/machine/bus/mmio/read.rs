use super::super::GameBoyBus;

impl GameBoyBus {
    pub(super) fn read8_mmio_impl(&self, addr: u16) -> u8 {
        match addr {
            // Cartridge ROM; open bus without a cartridge.
            0x0000..=0x7FFF => self
                .cartridge
                .as_ref()
                .map_or(0xFF, |cart| cart.rom_read(addr)),

            0x8000..=0x9FFF => self.ppu.read_vram(addr),

            0xA000..=0xBFFF => self
                .cartridge
                .as_ref()
                .map_or(0xFF, |cart| cart.ram_read(addr)),

            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],

            // Echo RAM mirrors 0xC000..=0xDDFF.
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],

            0xFE00..=0xFE9F => self.ppu.read_oam(addr),

            // Unusable area.
            0xFEA0..=0xFEFF => 0xFF,

            0xFF00 => self.joypad.read_p1(),
            0xFF01 => self.serial.read_sb(),
            0xFF02 => self.serial.read_sc(),

            0xFF04 => self.timer.div_read(),
            0xFF05 => self.timer.tima_read(),
            0xFF06 => self.timer.tma_read(),
            0xFF07 => self.timer.tac_read(),

            0xFF0F => self.interrupts.read_if(),

            0xFF10..=0xFF3F => self.apu.read_register(addr),

            0xFF46 => self.dma_source,
            0xFF40..=0xFF4B => self.ppu.read_register(addr),

            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.interrupts.read_ie(),

            // Unmapped I/O.
            _ => 0xFF,
        }
    }
}
