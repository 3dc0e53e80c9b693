use super::envelope::{Envelope, LengthCounter};

/// Channel 4: pseudo-random noise from a 15-bit (or 7-bit) LFSR.
pub(super) struct NoiseChannel {
    pub(super) enabled: bool,
    pub(super) dac_enabled: bool,
    pub(super) length: LengthCounter,
    pub(super) envelope: Envelope,
    clock_shift: u8,
    width7: bool,
    divisor: u8,
    lfsr: u16,
    timer: u32,
}

impl NoiseChannel {
    pub(super) fn new() -> Self {
        Self {
            enabled: false,
            dac_enabled: false,
            length: LengthCounter::default(),
            envelope: Envelope::default(),
            clock_shift: 0,
            width7: false,
            divisor: 0,
            lfsr: 0,
            timer: 0,
        }
    }

    #[inline]
    fn period(&self) -> u32 {
        let base = match self.divisor {
            0 => 8,
            d => d as u32 * 16,
        };
        base << self.clock_shift
    }

    pub(super) fn write_length(&mut self, value: u8) {
        self.length.load(64, (value & 0x3F) as u16);
    }

    pub(super) fn write_envelope(&mut self, value: u8) {
        self.envelope.write(value);
        self.dac_enabled = value & 0xF8 != 0;
        if !self.dac_enabled {
            self.enabled = false;
        }
    }

    /// NR43: clock shift, LFSR width, divisor code.
    pub(super) fn write_polynomial(&mut self, value: u8) {
        self.clock_shift = value >> 4;
        self.width7 = value & 0x08 != 0;
        self.divisor = value & 0x07;
    }

    pub(super) fn write_control(&mut self, value: u8) {
        self.length.enabled = value & 0x40 != 0;
    }

    pub(super) fn trigger(&mut self) {
        self.enabled = self.dac_enabled;
        self.length.trigger(64);
        self.envelope.trigger();
        self.lfsr = 0;
        self.timer = self.period();
    }

    pub(super) fn step(&mut self, cycles: u32) {
        // Shifts 14 and 15 stop the LFSR.
        if !self.enabled || self.clock_shift >= 14 {
            return;
        }
        let mut cycles = cycles;
        while cycles >= self.timer {
            cycles -= self.timer;
            self.timer = self.period();
            // XNOR feedback of bits 0 and 1 into bit 14 (and bit 6 in 7-bit mode).
            let bit = !((self.lfsr ^ (self.lfsr >> 1)) & 1) & 1;
            self.lfsr = (self.lfsr >> 1) | (bit << 14);
            if self.width7 {
                self.lfsr = (self.lfsr & !0x40) | (bit << 6);
            }
        }
        self.timer -= cycles;
    }

    pub(super) fn clock_length(&mut self) {
        if self.length.clock() {
            self.enabled = false;
        }
    }

    pub(super) fn clock_envelope(&mut self) {
        if self.enabled {
            self.envelope.clock();
        }
    }

    pub(super) fn output(&self) -> u8 {
        if !self.enabled || self.lfsr & 1 != 0 {
            return 0;
        }
        self.envelope.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Output level after each of `shifts` LFSR clocks, divisor code 0.
    fn outputs(nr43: u8, shifts: usize) -> Vec<u8> {
        let mut noise = NoiseChannel::new();
        noise.write_envelope(0xF0);
        noise.write_polynomial(nr43);
        noise.trigger();
        (0..shifts)
            .map(|_| {
                noise.step(8);
                noise.output()
            })
            .collect()
    }

    #[test]
    fn short_mode_repeats_every_127_clocks() {
        let levels = outputs(0x08, 254);

        assert!(levels.contains(&0) && levels.contains(&15));
        assert_eq!(levels[..127], levels[127..]);
    }

    #[test]
    fn long_mode_does_not_repeat_within_127_clocks() {
        let levels = outputs(0x00, 254);

        assert!(levels.contains(&0) && levels.contains(&15));
        assert_ne!(levels[..127], levels[127..]);
    }

    #[test]
    fn output_is_silent_while_bit_0_is_set() {
        let mut noise = NoiseChannel::new();
        noise.write_envelope(0xA0);
        noise.trigger();

        // XNOR of two zero bits feeds ones in from the top; bit 0 stays
        // clear for the first 14 clocks.
        for _ in 0..14 {
            noise.step(8);
            assert_eq!(noise.output(), 10);
        }
        noise.step(8);
        assert_eq!(noise.output(), 0);
    }
}
