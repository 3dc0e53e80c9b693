use super::envelope::{Envelope, LengthCounter};

/// 8-step duty waveforms selected by NRx1 bits 7-6.
const DUTY_TABLE: [[u8; 8]; 4] = [
    [0, 0, 0, 0, 0, 0, 0, 1], // 12.5%
    [1, 0, 0, 0, 0, 0, 0, 1], // 25%
    [1, 0, 0, 0, 0, 1, 1, 1], // 50%
    [0, 1, 1, 1, 1, 1, 1, 0], // 75%
];

/// Channel 1 frequency sweep (NR10).
#[derive(Default)]
pub(super) struct Sweep {
    period: u8,
    negate: bool,
    shift: u8,
    timer: u8,
    shadow: u16,
    enabled: bool,
    /// A subtracting calculation ran since the last trigger.
    negate_used: bool,
}

impl Sweep {
    fn calculate(&mut self) -> u16 {
        let delta = self.shadow >> self.shift;
        if self.negate {
            self.negate_used = true;
            self.shadow.wrapping_sub(delta)
        } else {
            self.shadow + delta
        }
    }

    #[inline]
    fn reload_value(&self) -> u8 {
        if self.period == 0 {
            8
        } else {
            self.period
        }
    }
}

pub(super) struct SquareChannel {
    pub(super) enabled: bool,
    pub(super) dac_enabled: bool,
    pub(super) length: LengthCounter,
    pub(super) envelope: Envelope,
    sweep: Option<Sweep>,
    duty: u8,
    duty_pos: u8,
    frequency: u16,
    timer: u32,
}

impl SquareChannel {
    pub(super) fn new(with_sweep: bool) -> Self {
        Self {
            enabled: false,
            dac_enabled: false,
            length: LengthCounter::default(),
            envelope: Envelope::default(),
            sweep: with_sweep.then(Sweep::default),
            duty: 0,
            duty_pos: 0,
            frequency: 0,
            timer: 0,
        }
    }

    #[inline]
    fn period(&self) -> u32 {
        (2048 - self.frequency as u32) * 4
    }

    /// NR10. Clearing negate after a subtracting step disables the channel.
    pub(super) fn write_sweep(&mut self, value: u8) {
        if let Some(sweep) = self.sweep.as_mut() {
            let was_negate = sweep.negate;
            sweep.period = (value >> 4) & 0x07;
            sweep.negate = value & 0x08 != 0;
            sweep.shift = value & 0x07;
            if was_negate && !sweep.negate && sweep.negate_used {
                self.enabled = false;
            }
        }
    }

    /// NRx1: duty and length load.
    pub(super) fn write_duty_length(&mut self, value: u8) {
        self.duty = value >> 6;
        self.length.load(64, (value & 0x3F) as u16);
    }

    /// NRx2. The DAC is powered when any of the upper five bits is set.
    pub(super) fn write_envelope(&mut self, value: u8) {
        self.envelope.write(value);
        self.dac_enabled = value & 0xF8 != 0;
        if !self.dac_enabled {
            self.enabled = false;
        }
    }

    pub(super) fn write_frequency_low(&mut self, value: u8) {
        self.frequency = (self.frequency & 0x700) | value as u16;
    }

    /// NRx4 without the trigger bit, which the caller handles.
    pub(super) fn write_frequency_high(&mut self, value: u8) {
        self.frequency = (self.frequency & 0x0FF) | (((value & 0x07) as u16) << 8);
        self.length.enabled = value & 0x40 != 0;
    }

    pub(super) fn trigger(&mut self) {
        self.enabled = self.dac_enabled;
        self.length.trigger(64);
        self.timer = self.period();
        self.envelope.trigger();

        let frequency = self.frequency;
        let mut overflow = false;
        if let Some(sweep) = self.sweep.as_mut() {
            sweep.shadow = frequency;
            sweep.timer = sweep.reload_value();
            sweep.enabled = sweep.period != 0 || sweep.shift != 0;
            sweep.negate_used = false;
            if sweep.shift != 0 {
                overflow = sweep.calculate() > 2047;
            }
        }
        if overflow {
            self.enabled = false;
        }
    }

    pub(super) fn step(&mut self, cycles: u32) {
        if !self.enabled {
            return;
        }
        let mut cycles = cycles;
        while cycles >= self.timer {
            cycles -= self.timer;
            self.timer = self.period();
            self.duty_pos = (self.duty_pos + 1) & 7;
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

    /// Frame sequencer steps 2 and 6. Results above 2047 switch the
    /// channel off; otherwise the new frequency is written back and checked
    /// once more.
    pub(super) fn clock_sweep(&mut self) {
        let Some(sweep) = self.sweep.as_mut() else {
            return;
        };
        if sweep.timer > 0 {
            sweep.timer -= 1;
        }
        if sweep.timer != 0 {
            return;
        }
        sweep.timer = sweep.reload_value();
        if !sweep.enabled || sweep.period == 0 {
            return;
        }

        let next = sweep.calculate();
        if next > 2047 {
            self.enabled = false;
            return;
        }
        if sweep.shift != 0 {
            sweep.shadow = next;
            self.frequency = next;
            if sweep.calculate() > 2047 {
                self.enabled = false;
            }
        }
    }

    /// Digital output, 0..=15.
    pub(super) fn output(&self) -> u8 {
        if !self.enabled {
            return 0;
        }
        DUTY_TABLE[self.duty as usize][self.duty_pos as usize] * self.envelope.volume
    }
}
