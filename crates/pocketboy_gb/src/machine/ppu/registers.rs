use super::{Mode, Ppu, OAM_SIZE, VRAM_SIZE};
use crate::interrupts::InterruptController;

impl Ppu {
    /// VRAM is locked to the CPU during pixel transfer.
    #[inline]
    fn vram_accessible(&self) -> bool {
        !self.lcd_enabled() || self.mode != Mode::Transfer
    }

    /// OAM is locked during OAM scan and pixel transfer.
    #[inline]
    fn oam_accessible(&self) -> bool {
        !self.lcd_enabled() || matches!(self.mode, Mode::HBlank | Mode::VBlank)
    }

    pub(in super::super) fn read_vram(&self, addr: u16) -> u8 {
        if !self.vram_accessible() {
            return 0xFF;
        }
        self.vram[addr as usize & (VRAM_SIZE - 1)]
    }

    pub(in super::super) fn write_vram(&mut self, addr: u16, value: u8) {
        if self.vram_accessible() {
            self.vram[addr as usize & (VRAM_SIZE - 1)] = value;
        }
    }

    pub(in super::super) fn read_oam(&self, addr: u16) -> u8 {
        if !self.oam_accessible() {
            return 0xFF;
        }
        self.oam
            .get(addr as usize - 0xFE00)
            .copied()
            .unwrap_or(0xFF)
    }

    pub(in super::super) fn write_oam(&mut self, addr: u16, value: u8) {
        if !self.oam_accessible() {
            return;
        }
        if let Some(slot) = self.oam.get_mut(addr as usize - 0xFE00) {
            *slot = value;
        }
    }

    #[inline]
    pub(in super::super) fn dma_read_vram(&self, addr: u16) -> u8 {
        self.vram[addr as usize & (VRAM_SIZE - 1)]
    }

    /// OAM DMA destination write; DMA ignores the mode lock.
    #[inline]
    pub(in super::super) fn dma_write_oam(&mut self, index: usize, value: u8) {
        if index < OAM_SIZE {
            self.oam[index] = value;
        }
    }

    /// FF40-FF4B except FF46 (DMA), which the bus owns.
    pub(in super::super) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc,
            0xFF41 => {
                let mode = if self.lcd_enabled() { self.mode as u8 } else { 0 };
                let coincidence = if self.ly == self.lyc { 0x04 } else { 0 };
                0x80 | self.stat_select | coincidence | mode
            }
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    pub(in super::super) fn write_register(
        &mut self,
        addr: u16,
        value: u8,
        ints: &mut InterruptController,
    ) {
        match addr {
            0xFF40 => {
                let was_on = self.lcd_enabled();
                self.lcdc = value;
                match (was_on, self.lcd_enabled()) {
                    (true, false) => self.lcd_switched_off(),
                    (false, true) => self.lcd_switched_on(ints),
                    _ => {}
                }
            }
            0xFF41 => {
                self.stat_select = value & 0x78;
                self.update_stat_line(ints);
            }
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => {
                self.lyc = value;
                self.update_stat_line(ints);
            }
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
    }
}
