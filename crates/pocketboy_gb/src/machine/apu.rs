//! Audio processing unit: two square channels (the first with a frequency
//! sweep), a wave channel and a noise channel, mixed to interleaved stereo
//! `i16` samples at the configured output rate.
mod envelope;
mod noise;
mod registers;
mod square;
mod wave;

use std::collections::VecDeque;

use self::noise::NoiseChannel;
use self::square::SquareChannel;
use self::wave::WaveChannel;
use crate::CPU_CLOCK_HZ;

/// Scale from the mixed DAC sum to `i16`. Four channels at full swing
/// with master volume 8 stay inside the range.
const VOLUME_FACTOR: i32 = 64;

pub(super) struct Apu {
    ch1: SquareChannel,
    ch2: SquareChannel,
    ch3: WaveChannel,
    ch4: NoiseChannel,
    wave_ram: [u8; 16],
    /// Raw register file FF10-FF26, for readback through the read masks.
    regs: [u8; 0x17],
    nr50: u8,
    nr51: u8,
    powered: bool,
    /// Next frame sequencer step, 0..8.
    frame_step: u8,

    sample_rate: u32,
    /// Bresenham accumulator: output samples are due each time this
    /// crosses `CPU_CLOCK_HZ`.
    sample_phase: u64,
    samples: VecDeque<i16>,
    max_samples: usize,

    hp_coef: f32,
    hp_prev_in: [f32; 2],
    hp_prev_out: [f32; 2],
}

impl Apu {
    pub(super) fn new(sample_rate: u32, max_samples: usize) -> Self {
        // At most one output sample per T-cycle.
        let sample_rate = sample_rate.clamp(1, CPU_CLOCK_HZ);
        Self {
            ch1: SquareChannel::new(true),
            ch2: SquareChannel::new(false),
            ch3: WaveChannel::new(),
            ch4: NoiseChannel::new(),
            wave_ram: [0; 16],
            regs: [0; 0x17],
            nr50: 0,
            nr51: 0,
            powered: false,
            frame_step: 0,
            sample_rate,
            sample_phase: 0,
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
            hp_coef: 0.999_958_f32.powf(CPU_CLOCK_HZ as f32 / sample_rate as f32),
            hp_prev_in: [0.0; 2],
            hp_prev_out: [0.0; 2],
        }
    }

    /// Register values left by the DMG boot ROM. Channel 1 is still
    /// flagged on after the boot chime, its envelope already at zero.
    pub(super) fn init_dmg(&mut self) {
        const BOOT_REGS: [(u16, u8); 20] = [
            (0xFF26, 0x80),
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0x3F),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0x3F),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0x3F),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF23, 0x3F),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
        ];
        for (addr, value) in BOOT_REGS {
            self.write_register(addr, value);
        }
        self.ch1.enabled = true;
        self.ch1.envelope.volume = 0;
    }

    /// NR52 power off: every register except wave RAM is cleared and the
    /// channels stop.
    fn power_off(&mut self) {
        self.ch1 = SquareChannel::new(true);
        self.ch2 = SquareChannel::new(false);
        self.ch3 = WaveChannel::new();
        self.ch4 = NoiseChannel::new();
        self.regs = [0; 0x17];
        self.nr50 = 0;
        self.nr51 = 0;
        self.powered = false;
    }

    /// One 512 Hz frame sequencer clock, driven by the timer's divider.
    pub(super) fn clock_frame_sequencer(&mut self) {
        if !self.powered {
            return;
        }
        let step = self.frame_step;
        self.frame_step = (self.frame_step + 1) & 7;

        if step % 2 == 0 {
            self.ch1.clock_length();
            self.ch2.clock_length();
            self.ch3.clock_length();
            self.ch4.clock_length();
        }
        if step == 2 || step == 6 {
            self.ch1.clock_sweep();
        }
        if step == 7 {
            self.ch1.clock_envelope();
            self.ch2.clock_envelope();
            self.ch4.clock_envelope();
        }
    }

    /// Advance channel timers by `cycles` T-cycles, emitting a stereo
    /// sample at every output-rate boundary crossed.
    pub(super) fn tick(&mut self, cycles: u32) {
        let clock = CPU_CLOCK_HZ as u64;
        let rate = self.sample_rate as u64;
        let mut remaining = cycles as u64;
        while remaining > 0 {
            let until_sample = (clock - self.sample_phase).div_ceil(rate);
            let run = remaining.min(until_sample);
            self.step_channels(run as u32);
            self.sample_phase += run * rate;
            remaining -= run;
            if self.sample_phase >= clock {
                self.sample_phase -= clock;
                let (left, right) = self.mix();
                self.push_sample(left, right);
            }
        }
    }

    fn step_channels(&mut self, cycles: u32) {
        if !self.powered {
            return;
        }
        self.ch1.step(cycles);
        self.ch2.step(cycles);
        self.ch3.step(cycles, &self.wave_ram);
        self.ch4.step(cycles);
    }

    /// Mix the four DAC outputs through NR51 panning and NR50 master
    /// volume, then strip the DC offset with a one-pole high-pass.
    fn mix(&mut self) -> (i16, i16) {
        let dacs = [
            (self.ch1.dac_enabled, self.ch1.output()),
            (self.ch2.dac_enabled, self.ch2.output()),
            (self.ch3.dac_enabled, self.ch3.output()),
            (self.ch4.dac_enabled, self.ch4.output()),
        ];
        if !self.powered || dacs.iter().all(|&(on, _)| !on) {
            self.hp_prev_in = [0.0; 2];
            self.hp_prev_out = [0.0; 2];
            return (0, 0);
        }

        let mut left = 0i32;
        let mut right = 0i32;
        for (channel, &(on, digital)) in dacs.iter().enumerate() {
            if !on {
                continue;
            }
            let analog = digital as i32 * 2 - 15;
            if self.nr51 & (0x10 << channel) != 0 {
                left += analog;
            }
            if self.nr51 & (0x01 << channel) != 0 {
                right += analog;
            }
        }
        let left_vol = ((self.nr50 >> 4) & 0x07) as i32 + 1;
        let right_vol = (self.nr50 & 0x07) as i32 + 1;

        (
            self.high_pass(0, left * left_vol * VOLUME_FACTOR),
            self.high_pass(1, right * right_vol * VOLUME_FACTOR),
        )
    }

    fn high_pass(&mut self, side: usize, input: i32) -> i16 {
        let input = input as f32;
        let output = input - self.hp_prev_in[side] + self.hp_coef * self.hp_prev_out[side];
        self.hp_prev_in[side] = input;
        self.hp_prev_out[side] = output;
        output.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
    }

    /// Append one stereo pair, dropping the oldest pair once the cap is hit.
    fn push_sample(&mut self, left: i16, right: i16) {
        if self.max_samples < 2 {
            return;
        }
        while self.samples.len() + 2 > self.max_samples {
            self.samples.pop_front();
            self.samples.pop_front();
        }
        self.samples.push_back(left);
        self.samples.push_back(right);
    }

    /// Move all buffered samples out, interleaved left/right.
    pub(super) fn take_samples(&mut self) -> Vec<i16> {
        self.samples.drain(..).collect()
    }

    #[cfg(test)]
    pub(super) fn buffered_samples(&self) -> usize {
        self.samples.len()
    }
}
