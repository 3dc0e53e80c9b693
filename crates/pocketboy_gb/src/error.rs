use thiserror::Error;

/// Reasons a cartridge image can be refused by [`GameBoy::load_rom`].
///
/// A failed load leaves the session exactly as it was before the call.
///
/// [`GameBoy::load_rom`]: crate::GameBoy::load_rom
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("ROM image is empty")]
    Empty,
    #[error("ROM image is {len} bytes, too short to hold a cartridge header")]
    MissingHeader { len: usize },
    #[error("ROM image is {len} bytes, larger than the supported maximum of {max} bytes")]
    TooLarge { len: usize, max: usize },
    #[error("ROM header declares {declared} bytes but the image only holds {len}")]
    Truncated { len: usize, declared: usize },
    #[error("unsupported ROM size code 0x{0:02X}")]
    UnsupportedRomSize(u8),
    #[error("unsupported cartridge type 0x{0:02X}")]
    UnsupportedCartridge(u8),
}

/// Fatal conditions raised while running a loaded cartridge.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EmulationError {
    /// The CPU fetched one of the unassigned opcodes. The core stays locked
    /// until [`GameBoy::reset`](crate::GameBoy::reset).
    #[error("invalid opcode 0x{opcode:02X} at 0x{pc:04X}")]
    InvalidInstruction { opcode: u8, pc: u16 },
}
