pub mod config;
pub mod cpu;
pub mod error;
pub mod interrupts;
pub mod machine;

pub use config::{Color, GameBoyConfig};
pub use error::{EmulationError, LoadError};
pub use machine::{Buttons, GameBoy};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Size in bytes of one RGBA frame.
pub const FRAME_BUFFER_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT * 4;

/// DMG master clock in T-cycles per second.
pub const CPU_CLOCK_HZ: u32 = 4_194_304;
/// T-cycles in one video frame (154 lines of 456 dots).
pub const CYCLES_PER_FRAME: u32 = 70_224;
