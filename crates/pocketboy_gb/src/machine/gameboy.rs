use crate::config::GameBoyConfig;
use crate::cpu::{Bus, Cpu};
use crate::error::{EmulationError, LoadError};
use crate::CYCLES_PER_FRAME;

use super::cartridge::{Cartridge, CartridgeHeader};
use super::{Buttons, GameBoyBus};

/// `LD B,B`, used by test ROMs as a software breakpoint.
const SOFTWARE_BREAKPOINT: u8 = 0x40;

/// A DMG session: CPU, bus and everything the bus owns.
///
/// The session is the only owner of emulator state, so several sessions
/// can run side by side.
///
/// ```
/// use pocketboy_gb::GameBoy;
///
/// let mut gb = GameBoy::new();
/// assert!(!gb.is_rom_loaded());
/// gb.run_frame().unwrap();
/// assert!(gb.take_audio_buffer().is_empty());
/// ```
pub struct GameBoy {
    cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    config: GameBoyConfig,
    rom_loaded: bool,
    /// T-cycles into the current frame. After `run_frame` this holds the
    /// overshoot of the last instruction, which the next frame absorbs.
    frame_cycles: u32,
    frames_run: u64,
    total_cycles: u64,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self::with_config(GameBoyConfig::default())
    }

    pub fn with_config(config: GameBoyConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            bus: GameBoyBus::new(&config),
            config,
            rom_loaded: false,
            frame_cycles: 0,
            frames_run: 0,
            total_cycles: 0,
        }
    }

    pub fn config(&self) -> &GameBoyConfig {
        &self.config
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Validate and insert a cartridge image, then power-cycle the machine.
    ///
    /// On error nothing changes: a previously loaded cartridge keeps running.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        let cartridge = match Cartridge::load(rom) {
            Ok(cartridge) => cartridge,
            Err(err) => {
                log::warn!("GB: ROM rejected: {err}");
                return Err(err);
            }
        };
        self.power_on(Some(cartridge));
        self.rom_loaded = true;
        Ok(())
    }

    pub fn is_rom_loaded(&self) -> bool {
        self.rom_loaded
    }

    /// Header of the loaded cartridge.
    pub fn cartridge_header(&self) -> Option<&CartridgeHeader> {
        self.bus.cartridge_header()
    }

    /// Power-cycle to the post-boot state. The cartridge image and its RAM
    /// stay inserted; its mapper registers return to power-on values.
    pub fn reset(&mut self) {
        let cartridge = self.bus.take_cartridge().map(|mut cart| {
            cart.reset();
            cart
        });
        self.power_on(cartridge);
    }

    fn power_on(&mut self, cartridge: Option<Cartridge>) {
        self.cpu.reset();
        self.bus = GameBoyBus::new(&self.config);
        if let Some(cartridge) = cartridge {
            self.bus.insert_cartridge(cartridge);
        }
        self.frame_cycles = 0;
        self.frames_run = 0;
        self.total_cycles = 0;
    }

    /// Execute one CPU step and tick the rest of the machine by the cycles
    /// it took. Returns those cycles.
    pub fn step_instruction(&mut self) -> Result<u32, EmulationError> {
        let cycles = self.cpu.step(&mut self.bus)?;
        debug_assert!(
            cycles > 0 && cycles % 4 == 0,
            "CPU step reported {cycles} T-cycles"
        );
        self.bus.tick(cycles, self.cpu.is_stopped());

        self.total_cycles += cycles as u64;
        self.frame_cycles += cycles;
        if self.frame_cycles >= CYCLES_PER_FRAME {
            self.frame_cycles -= CYCLES_PER_FRAME;
            self.frames_run += 1;
        }
        debug_assert_eq!(
            self.total_cycles,
            self.frames_run * CYCLES_PER_FRAME as u64 + self.frame_cycles as u64,
            "timing invariant violated: subsystems drifted from the CPU clock"
        );
        Ok(cycles)
    }

    /// Run until the current frame's 70224 T-cycles are used up.
    ///
    /// Instructions are never split, so a frame may run a few cycles long;
    /// the overshoot is taken from the next frame and N frames always total
    /// N * 70224 cycles. Without a cartridge this logs a warning and does
    /// nothing.
    pub fn run_frame(&mut self) -> Result<(), EmulationError> {
        if !self.rom_loaded {
            log::warn!("GB: run_frame called with no ROM loaded");
            return Ok(());
        }
        let frame = self.frames_run;
        while self.frames_run == frame {
            self.step_instruction()?;
        }
        Ok(())
    }

    /// Run until the `LD B,B` software breakpoint executes, or until
    /// `max_cycles` T-cycles have elapsed. Returns whether it was hit.
    pub fn run_until_software_breakpoint(&mut self, max_cycles: u64) -> Result<bool, EmulationError> {
        if !self.rom_loaded {
            log::warn!("GB: run_until_software_breakpoint called with no ROM loaded");
            return Ok(false);
        }
        let mut elapsed = 0u64;
        while elapsed < max_cycles {
            let at_breakpoint = !self.cpu.halted
                && !self.cpu.is_stopped()
                && self.bus.read8(self.cpu.regs.pc) == SOFTWARE_BREAKPOINT;
            elapsed += self.step_instruction()? as u64;
            if at_breakpoint {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Last completed frame as 160x144 RGBA8, row-major.
    pub fn frame_buffer(&self) -> &[u8] {
        self.bus.frame_buffer()
    }

    /// Number of frames the PPU has published since power-on.
    pub fn frames_rendered(&self) -> u64 {
        self.bus.frames_rendered()
    }

    /// Interleaved left/right samples produced since the previous call.
    pub fn take_audio_buffer(&mut self) -> Vec<i16> {
        self.bus.take_audio()
    }

    /// Replace the set of held buttons.
    pub fn set_button_state(&mut self, buttons: Buttons) {
        self.bus.set_buttons(buttons);
    }

    /// Bytes sent over the serial port and not yet taken.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial_output()
    }

    /// Move the captured serial bytes out, leaving the capture empty.
    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.bus.take_serial_output()
    }

    /// Frames completed by `run_frame` since power-on.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// T-cycles executed since power-on.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }
}
