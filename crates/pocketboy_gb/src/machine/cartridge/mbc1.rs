use super::{banked_ram_index, banked_rom_read};

/// MBC1: 5-bit ROM bank register, a 2-bit secondary register used as the
/// upper ROM bank bits or the RAM bank, and a banking mode select.
pub(super) struct Mbc1Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    regs: Mbc1Registers,
}

#[derive(Default)]
struct Mbc1Registers {
    ram_enable: bool,
    /// 0x2000-0x3FFF, 5 bits. Zero selects bank 1.
    bank1: u8,
    /// 0x4000-0x5FFF, 2 bits.
    bank2: u8,
    /// 0x6000-0x7FFF. In mode 1, `bank2` also applies to 0x0000-0x3FFF
    /// and to external RAM.
    mode: bool,
}

impl Mbc1Cartridge {
    pub(super) fn new(rom: Vec<u8>, ram: Vec<u8>) -> Self {
        Self {
            rom,
            ram,
            regs: Mbc1Registers::default(),
        }
    }

    pub(super) fn reset(&mut self) {
        self.regs = Mbc1Registers::default();
    }

    fn low_bank1(&self) -> usize {
        match self.regs.bank1 & 0x1F {
            0 => 1,
            bank => bank as usize,
        }
    }

    fn ram_bank(&self) -> usize {
        if self.regs.mode {
            self.regs.bank2 as usize
        } else {
            0
        }
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let high = (self.regs.bank2 as usize) << 5;
        let bank = if addr < 0x4000 {
            if self.regs.mode {
                high
            } else {
                0
            }
        } else {
            high | self.low_bank1()
        };
        banked_rom_read(&self.rom, bank, addr)
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.regs.ram_enable = (value & 0x0F) == 0x0A,
            0x2000..=0x3FFF => self.regs.bank1 = value & 0x1F,
            0x4000..=0x5FFF => self.regs.bank2 = value & 0x03,
            _ => self.regs.mode = value & 0x01 != 0,
        }
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        if !self.regs.ram_enable {
            return 0xFF;
        }
        banked_ram_index(&self.ram, self.ram_bank(), addr).map_or(0xFF, |i| self.ram[i])
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if !self.regs.ram_enable {
            return;
        }
        if let Some(i) = banked_ram_index(&self.ram, self.ram_bank(), addr) {
            self.ram[i] = value;
        }
    }
}
