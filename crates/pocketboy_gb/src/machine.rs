mod apu;
mod bus;
mod cartridge;
mod gameboy;
mod joypad;
mod ppu;
mod serial;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use cartridge::{CartridgeHeader, MapperKind, MAX_ROM_SIZE};
pub use gameboy::GameBoy;
pub use joypad::Buttons;
