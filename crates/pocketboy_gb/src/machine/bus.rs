use super::apu::Apu;
use super::cartridge::{Cartridge, CartridgeHeader};
use super::joypad::{Buttons, Joypad};
use super::ppu::Ppu;
use super::serial::Serial;
use super::timer::Timer;
use crate::config::GameBoyConfig;
use crate::interrupts::InterruptController;

mod dma;
mod init;
mod mmio;
mod traits;

const WRAM_SIZE: usize = 0x2000;
const HRAM_SIZE: usize = 0x7F;

/// DMG system bus.
///
/// Owns every memory-mapped component and routes CPU accesses to them.
/// Time only moves through [`GameBoyBus::tick`]; register reads and
/// writes never advance any clock.
pub(crate) struct GameBoyBus {
    cartridge: Option<Cartridge>,
    wram: [u8; WRAM_SIZE],
    hram: [u8; HRAM_SIZE],
    ppu: Ppu,
    apu: Apu,
    timer: Timer,
    serial: Serial,
    joypad: Joypad,
    interrupts: InterruptController,
    /// Last value written to FF46.
    dma_source: u8,
}

impl GameBoyBus {
    pub(crate) fn new(config: &GameBoyConfig) -> Self {
        let mut bus = Self {
            cartridge: None,
            wram: [0; WRAM_SIZE],
            hram: [0; HRAM_SIZE],
            ppu: Ppu::new(config.palette),
            apu: Apu::new(config.sample_rate, config.max_audio_samples),
            timer: Timer::new(),
            serial: Serial::new(),
            joypad: Joypad::new(),
            interrupts: InterruptController::new(),
            dma_source: 0xFF,
        };
        bus.apply_dmg_initial_io_state();
        bus
    }

    pub(super) fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub(super) fn take_cartridge(&mut self) -> Option<Cartridge> {
        self.cartridge.take()
    }

    pub(super) fn cartridge_header(&self) -> Option<&CartridgeHeader> {
        self.cartridge.as_ref().map(Cartridge::header)
    }

    /// Advance Timer, PPU and APU by the `cycles` the CPU just spent.
    /// The divider is frozen while the CPU is in STOP.
    pub(super) fn tick(&mut self, cycles: u32, cpu_stopped: bool) {
        if !cpu_stopped {
            self.timer.tick(cycles, &mut self.interrupts);
        }
        for _ in 0..self.timer.take_frame_sequencer_clocks() {
            self.apu.clock_frame_sequencer();
        }
        self.ppu.tick(cycles, &mut self.interrupts);
        self.apu.tick(cycles);
    }

    pub(super) fn frame_buffer(&self) -> &[u8] {
        self.ppu.frame_buffer()
    }

    pub(super) fn frames_rendered(&self) -> u64 {
        self.ppu.frames()
    }

    pub(super) fn take_audio(&mut self) -> Vec<i16> {
        self.apu.take_samples()
    }

    pub(super) fn set_buttons(&mut self, buttons: Buttons) {
        self.joypad.set_state(buttons, &mut self.interrupts);
    }

    pub(super) fn serial_output(&self) -> &[u8] {
        self.serial.output()
    }

    pub(super) fn take_serial_output(&mut self) -> Vec<u8> {
        self.serial.take_output()
    }
}

#[cfg(test)]
impl GameBoyBus {
    pub(super) fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub(super) fn buffered_audio(&self) -> usize {
        self.apu.buffered_samples()
    }

    pub(super) fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    pub(super) fn interrupts_mut(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }
}
