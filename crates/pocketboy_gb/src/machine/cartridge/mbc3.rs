use super::{banked_ram_index, banked_rom_read};

/// MBC3 without the real-time clock: 7-bit ROM bank, four RAM banks.
/// Selecting an RTC register (0x08-0x0C) maps nothing; reads return 0xFF.
pub(super) struct Mbc3Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    ram_enable: bool,
    rom_bank: u8,
    ram_select: u8,
}

impl Mbc3Cartridge {
    pub(super) fn new(rom: Vec<u8>, ram: Vec<u8>) -> Self {
        Self {
            rom,
            ram,
            ram_enable: false,
            rom_bank: 1,
            ram_select: 0,
        }
    }

    pub(super) fn reset(&mut self) {
        self.ram_enable = false;
        self.rom_bank = 1;
        self.ram_select = 0;
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 {
            0
        } else {
            self.rom_bank as usize
        };
        banked_rom_read(&self.rom, bank, addr)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = (value & 0x0F) == 0x0A,
            0x2000..=0x3FFF => self.rom_bank = (value & 0x7F).max(1),
            0x4000..=0x5FFF => self.ram_select = value,
            // Clock latch; there is no clock to latch.
            _ => {}
        }
    }

    fn ram_slot(&self, addr: u16) -> Option<usize> {
        if !self.ram_enable || self.ram_select > 0x03 {
            return None;
        }
        banked_ram_index(&self.ram, self.ram_select as usize, addr)
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        self.ram_slot(addr).map_or(0xFF, |i| self.ram[i])
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if let Some(i) = self.ram_slot(addr) {
            self.ram[i] = value;
        }
    }
}
