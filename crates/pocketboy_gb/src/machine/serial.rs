use crate::interrupts::{Interrupt, InterruptController};

/// Serial port (SB/SC) with nothing on the other end of the link cable.
///
/// An internal-clock transfer completes as soon as it is started: the
/// outgoing byte is captured, SB shifts in 0xFF from the idle line and the
/// Serial interrupt is requested. External-clock transfers never finish.
pub(super) struct Serial {
    sb: u8,
    sc: u8,
    output: Vec<u8>,
}

impl Serial {
    pub(super) fn new() -> Self {
        Self {
            sb: 0x00,
            sc: 0x7E,
            output: Vec::new(),
        }
    }

    #[inline]
    pub(super) fn read_sb(&self) -> u8 {
        self.sb
    }

    pub(super) fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    /// Unused SC bits read back as 1.
    #[inline]
    pub(super) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }

    pub(super) fn write_sc(&mut self, value: u8, ints: &mut InterruptController) {
        self.sc = value;
        if self.sc & 0x81 == 0x81 {
            self.output.push(self.sb);
            self.sb = 0xFF;
            self.sc &= !0x80;
            ints.request(Interrupt::Serial);
        }
    }

    /// Bytes sent since the last drain.
    pub(super) fn output(&self) -> &[u8] {
        &self.output
    }

    pub(super) fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}
