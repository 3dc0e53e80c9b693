use bitflags::bitflags;

use crate::interrupts::{Interrupt, InterruptController};

bitflags! {
    /// Host-side button state. A set bit means the button is held.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const RIGHT = 0x01;
        const LEFT = 0x02;
        const UP = 0x04;
        const DOWN = 0x08;
        const A = 0x10;
        const B = 0x20;
        const SELECT = 0x40;
        const START = 0x80;
    }
}

impl Buttons {
    /// D-pad nibble in P1 bit order (Right, Left, Up, Down).
    #[inline]
    fn dpad(self) -> u8 {
        self.bits() & 0x0F
    }

    /// Action nibble in P1 bit order (A, B, Select, Start).
    #[inline]
    fn actions(self) -> u8 {
        self.bits() >> 4
    }
}

/// P1/JOYP (FF00).
pub(super) struct Joypad {
    /// Bits 5 (actions) and 4 (d-pad); 0 selects the group.
    select: u8,
    held: Buttons,
}

impl Joypad {
    pub(super) fn new() -> Self {
        // Both groups selected: P1 reads 0xCF after boot.
        Self {
            select: 0x00,
            held: Buttons::empty(),
        }
    }

    pub(super) fn read_p1(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= !self.held.dpad();
        }
        if self.select & 0x20 == 0 {
            low &= !self.held.actions();
        }
        0xC0 | self.select | (low & 0x0F)
    }

    /// Only the two select bits are writable.
    pub(super) fn write_p1(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    /// Replace the held set. Any button going from released to pressed
    /// requests the Joypad interrupt.
    pub(super) fn set_state(&mut self, buttons: Buttons, ints: &mut InterruptController) {
        let newly_pressed = buttons & !self.held;
        self.held = buttons;
        if !newly_pressed.is_empty() {
            log::debug!("GB joypad: pressed {newly_pressed:?}");
            ints.request(Interrupt::Joypad);
        }
    }

    #[inline]
    pub(super) fn any_held(&self) -> bool {
        !self.held.is_empty()
    }
}
