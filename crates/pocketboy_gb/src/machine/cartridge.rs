mod header;
mod mbc1;
mod mbc3;
mod mbc5;
mod rom_only;

pub use header::{CartridgeHeader, MapperKind};

use self::mbc1::Mbc1Cartridge;
use self::mbc3::Mbc3Cartridge;
use self::mbc5::Mbc5Cartridge;
use self::rom_only::RomOnlyCartridge;
use crate::error::LoadError;

pub(crate) const ROM_BANK_SIZE: usize = 0x4000;
pub(crate) const RAM_BANK_SIZE: usize = 0x2000;
/// Largest image accepted by `load`: 512 banks, the MBC5 limit.
pub const MAX_ROM_SIZE: usize = 512 * ROM_BANK_SIZE;

/// Supported mappers, each owning its ROM image and external RAM.
enum Mapper {
    RomOnly(RomOnlyCartridge),
    Mbc1(Mbc1Cartridge),
    Mbc3(Mbc3Cartridge),
    Mbc5(Mbc5Cartridge),
}

/// A loaded cartridge: parsed header plus mapper state.
pub(crate) struct Cartridge {
    header: CartridgeHeader,
    mapper: Mapper,
}

impl Cartridge {
    /// Validate `rom` and build the mapper its header asks for.
    pub(crate) fn load(rom: &[u8]) -> Result<Self, LoadError> {
        if rom.is_empty() {
            return Err(LoadError::Empty);
        }
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::TooLarge {
                len: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }

        let header = CartridgeHeader::parse(rom)?;
        if rom.len() < header.rom_size {
            return Err(LoadError::Truncated {
                len: rom.len(),
                declared: header.rom_size,
            });
        }
        if !header.checksum_ok() {
            log::warn!(
                "GB cartridge '{}': header checksum mismatch (stored 0x{:02X})",
                header.title,
                header.header_checksum
            );
        }

        let ram = vec![0xFF; header.ram_size];
        let rom = rom.to_vec();
        let mapper = match header.mapper {
            MapperKind::RomOnly => Mapper::RomOnly(RomOnlyCartridge::new(rom, ram)),
            MapperKind::Mbc1 => Mapper::Mbc1(Mbc1Cartridge::new(rom, ram)),
            MapperKind::Mbc3 => Mapper::Mbc3(Mbc3Cartridge::new(rom, ram)),
            MapperKind::Mbc5 => Mapper::Mbc5(Mbc5Cartridge::new(rom, ram)),
        };

        log::info!(
            "GB cartridge loaded: title='{}' type=0x{:02X} ({:?}) rom={} KiB ram={} KiB",
            header.title,
            header.cartridge_type,
            header.mapper,
            header.rom_size / 1024,
            header.ram_size / 1024,
        );

        Ok(Self { header, mapper })
    }

    pub(crate) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    /// Return the mapper registers to their power-on values. ROM and RAM
    /// contents are kept.
    pub(crate) fn reset(&mut self) {
        match &mut self.mapper {
            Mapper::RomOnly(_) => {}
            Mapper::Mbc1(m) => m.reset(),
            Mapper::Mbc3(m) => m.reset(),
            Mapper::Mbc5(m) => m.reset(),
        }
    }

    pub(crate) fn rom_read(&self, addr: u16) -> u8 {
        match &self.mapper {
            Mapper::RomOnly(m) => m.rom_read(addr),
            Mapper::Mbc1(m) => m.rom_read(addr),
            Mapper::Mbc3(m) => m.rom_read(addr),
            Mapper::Mbc5(m) => m.rom_read(addr),
        }
    }

    /// Writes to 0x0000-0x7FFF are mapper commands, never ROM writes.
    pub(crate) fn rom_write(&mut self, addr: u16, value: u8) {
        match &mut self.mapper {
            Mapper::RomOnly(_) => {}
            Mapper::Mbc1(m) => m.rom_write(addr, value),
            Mapper::Mbc3(m) => m.rom_write(addr, value),
            Mapper::Mbc5(m) => m.rom_write(addr, value),
        }
    }

    pub(crate) fn ram_read(&self, addr: u16) -> u8 {
        match &self.mapper {
            Mapper::RomOnly(m) => m.ram_read(addr),
            Mapper::Mbc1(m) => m.ram_read(addr),
            Mapper::Mbc3(m) => m.ram_read(addr),
            Mapper::Mbc5(m) => m.ram_read(addr),
        }
    }

    pub(crate) fn ram_write(&mut self, addr: u16, value: u8) {
        match &mut self.mapper {
            Mapper::RomOnly(m) => m.ram_write(addr, value),
            Mapper::Mbc1(m) => m.ram_write(addr, value),
            Mapper::Mbc3(m) => m.ram_write(addr, value),
            Mapper::Mbc5(m) => m.ram_write(addr, value),
        }
    }
}

/// Byte at `addr` within ROM bank `bank`, wrapping the bank number to the
/// image size the way the unused high bank lines do on hardware.
#[inline]
fn banked_rom_read(rom: &[u8], bank: usize, addr: u16) -> u8 {
    let banks = (rom.len() / ROM_BANK_SIZE).max(1);
    let index = (bank % banks) * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1));
    rom.get(index).copied().unwrap_or(0xFF)
}

/// Index into external RAM for `addr` in bank `bank`, or `None` when the
/// cartridge has no RAM. Small RAMs mirror across the window.
#[inline]
fn banked_ram_index(ram: &[u8], bank: usize, addr: u16) -> Option<usize> {
    if ram.is_empty() {
        return None;
    }
    let offset = addr as usize & (RAM_BANK_SIZE - 1);
    Some((bank * RAM_BANK_SIZE + offset) % ram.len())
}
