use super::{banked_ram_index, banked_rom_read};

/// MBC5: 9-bit ROM bank (bank 0 is selectable in the switchable window)
/// and a 4-bit RAM bank. The rumble motor bit is ignored.
pub(super) struct Mbc5Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    ram_enable: bool,
    rom_bank: u16,
    ram_bank: u8,
}

impl Mbc5Cartridge {
    pub(super) fn new(rom: Vec<u8>, ram: Vec<u8>) -> Self {
        Self {
            rom,
            ram,
            ram_enable: false,
            rom_bank: 1,
            ram_bank: 0,
        }
    }

    pub(super) fn reset(&mut self) {
        self.ram_enable = false;
        self.rom_bank = 1;
        self.ram_bank = 0;
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
            // MBC5 wants exactly 0x0A, not just the low nibble.
            0x0000..=0x1FFF => self.ram_enable = value == 0x0A,
            0x2000..=0x2FFF => self.rom_bank = (self.rom_bank & 0x100) | value as u16,
            0x3000..=0x3FFF => {
                self.rom_bank = (self.rom_bank & 0x0FF) | (((value & 0x01) as u16) << 8)
            }
            0x4000..=0x5FFF => self.ram_bank = value & 0x0F,
            _ => {}
        }
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if !self.ram_enable {
            return 0xFF;
        }
        banked_ram_index(&self.ram, self.ram_bank as usize, addr).map_or(0xFF, |i| self.ram[i])
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if !self.ram_enable {
            return;
        }
        if let Some(i) = banked_ram_index(&self.ram, self.ram_bank as usize, addr) {
            self.ram[i] = value;
        }
    }
}
