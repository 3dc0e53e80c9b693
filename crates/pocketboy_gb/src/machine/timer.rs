/// Timer / divider unit.
///
/// The hidden system counter advances once per M-cycle; DIV exposes bits
/// 13:6 of it and TIMA counts falling edges of the bit selected by TAC.
/// Register accessors in `io` apply the observable write side effects
/// (DIV reset edge, TAC switch edge, reload cancellation) without
/// advancing time. Only `tick` moves the clock.
mod io;

use crate::interrupts::{Interrupt, InterruptController};

/// Counter bit whose falling edge clocks the APU frame sequencer (DIV bit 4).
const FRAME_SEQUENCER_BIT: u16 = 1 << 10;

pub(super) struct Timer {
    /// Hidden system counter in M-cycles; DIV is its upper byte-ish slice.
    internal_counter: u16,
    tima: u8,
    tma: u8,
    /// TAC raw value, low 3 bits.
    tac: u8,
    /// TIMA overflowed on the previous M-cycle; the next one reloads it
    /// from TMA and raises the timer interrupt.
    overflow: bool,
    /// Leftover T-cycles that do not yet make a whole M-cycle.
    subcycles: u32,
    /// Frame sequencer clocks produced since the bus last drained them.
    frame_sequencer_clocks: u32,
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            internal_counter: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            overflow: false,
            subcycles: 0,
            frame_sequencer_clocks: 0,
        }
    }

    /// DMG state at PC=0x0100: DIV reads 0xAB, everything else cleared.
    pub(super) fn init_dmg(&mut self) {
        *self = Self::new();
        self.internal_counter = 0x2AC0;
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    /// Counter bit selected by TAC[1:0]:
    /// 00 → bit 7, 01 → bit 1, 10 → bit 3, 11 → bit 5.
    #[inline]
    fn selected_bit(&self) -> u16 {
        match self.tac & 0x03 {
            0x00 => 1 << 7,
            0x01 => 1 << 1,
            0x02 => 1 << 3,
            _ => 1 << 5,
        }
    }

    /// Input to the TIMA edge detector: enable AND selected counter bit.
    #[inline]
    fn timer_input(&self) -> bool {
        self.enabled() && (self.internal_counter & self.selected_bit()) != 0
    }

    #[inline]
    fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        self.tima = next;
        if overflow {
            // TIMA reads 0x00 for one M-cycle before the reload.
            self.overflow = true;
        }
    }

    /// Move the system counter to `value`, applying falling-edge effects on
    /// TIMA and the frame sequencer.
    fn set_counter(&mut self, value: u16) {
        let old_input = self.timer_input();
        let old_fs = self.internal_counter & FRAME_SEQUENCER_BIT != 0;
        self.internal_counter = value;
        if old_input && !self.timer_input() {
            self.increment_tima();
        }
        if old_fs && self.internal_counter & FRAME_SEQUENCER_BIT == 0 {
            self.frame_sequencer_clocks += 1;
        }
    }

    fn tick_mcycle(&mut self, ints: &mut InterruptController) {
        if self.overflow {
            self.overflow = false;
            self.tima = self.tma;
            ints.request(Interrupt::Timer);
        }
        self.set_counter(self.internal_counter.wrapping_add(1));
    }

    /// Advance by `cycles` T-cycles.
    pub(super) fn tick(&mut self, cycles: u32, ints: &mut InterruptController) {
        self.subcycles += cycles;
        while self.subcycles >= 4 {
            self.subcycles -= 4;
            self.tick_mcycle(ints);
        }
    }

    /// Take the frame sequencer clocks accumulated since the last call.
    #[inline]
    pub(super) fn take_frame_sequencer_clocks(&mut self) -> u32 {
        std::mem::take(&mut self.frame_sequencer_clocks)
    }
}
