use super::{RAM_BANK_SIZE, ROM_BANK_SIZE};
use crate::error::LoadError;

/// Bank controller family named by the cartridge type byte (0x0147).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapperKind {
    RomOnly,
    Mbc1,
    Mbc3,
    Mbc5,
}

/// Fields of the cartridge header at 0x0100-0x014F that the core uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    pub mapper: MapperKind,
    /// ROM size in bytes declared by 0x0148.
    pub rom_size: usize,
    /// External RAM size in bytes declared by 0x0149.
    pub ram_size: usize,
    pub header_checksum: u8,
    computed_checksum: u8,
}

impl CartridgeHeader {
    /// First byte after the header; smaller images cannot be cartridges.
    pub const END: usize = 0x0150;

    pub fn parse(rom: &[u8]) -> Result<Self, LoadError> {
        if rom.len() < Self::END {
            return Err(LoadError::MissingHeader { len: rom.len() });
        }

        let title = rom[0x0134..=0x0143]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect::<String>()
            .trim_end()
            .to_string();

        let cartridge_type = rom[0x0147];
        let mapper = match cartridge_type {
            0x00 | 0x08 | 0x09 => MapperKind::RomOnly,
            0x01..=0x03 => MapperKind::Mbc1,
            0x0F..=0x13 => MapperKind::Mbc3,
            0x19..=0x1E => MapperKind::Mbc5,
            other => return Err(LoadError::UnsupportedCartridge(other)),
        };

        let rom_size = match rom[0x0148] {
            code @ 0x00..=0x08 => (2 * ROM_BANK_SIZE) << code,
            code => return Err(LoadError::UnsupportedRomSize(code)),
        };

        // A RAM size code on a cartridge without RAM is ignored.
        let ram_size = match (cartridge_type, rom[0x0149]) {
            (0x00 | 0x01 | 0x0F | 0x11 | 0x19 | 0x1C, _) => 0,
            (_, 0x01) => 0x800,
            (_, 0x02) => RAM_BANK_SIZE,
            (_, 0x03) => 4 * RAM_BANK_SIZE,
            (_, 0x04) => 16 * RAM_BANK_SIZE,
            (_, 0x05) => 8 * RAM_BANK_SIZE,
            _ => 0,
        };

        let computed_checksum = rom[0x0134..=0x014C]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1));

        Ok(Self {
            title,
            cartridge_type,
            mapper,
            rom_size,
            ram_size,
            header_checksum: rom[0x014D],
            computed_checksum,
        })
    }

    /// Whether 0x014D matches the sum the boot ROM verifies.
    pub fn checksum_ok(&self) -> bool {
        self.header_checksum == self.computed_checksum
    }

    pub fn has_battery(&self) -> bool {
        matches!(
            self.cartridge_type,
            0x03 | 0x09 | 0x0F | 0x10 | 0x13 | 0x1B | 0x1E
        )
    }
}
