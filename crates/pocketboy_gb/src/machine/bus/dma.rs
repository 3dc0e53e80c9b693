use super::GameBoyBus;

impl GameBoyBus {
    /// FF46 write: copy 160 bytes from `value << 8` into OAM.
    ///
    /// The transfer completes immediately; the 160 M-cycle duration and the
    /// CPU bus conflict during it are not modelled. Sources above 0xDF read
    /// the WRAM echo, as on hardware.
    pub(super) fn start_oam_dma(&mut self, value: u8) {
        self.dma_source = value;
        let page = if value > 0xDF { value - 0x20 } else { value };
        let base = (page as u16) << 8;
        for i in 0..0xA0u16 {
            let src = base + i;
            let byte = match src {
                0x8000..=0x9FFF => self.ppu.dma_read_vram(src),
                _ => self.read8_mmio(src),
            };
            self.ppu.dma_write_oam(i as usize, byte);
        }
    }
}
