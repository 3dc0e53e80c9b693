use super::envelope::LengthCounter;

/// Channel 3: plays 32 4-bit samples from wave RAM.
pub(super) struct WaveChannel {
    pub(super) enabled: bool,
    pub(super) dac_enabled: bool,
    pub(super) length: LengthCounter,
    /// NR32 output level code: 0 mute, 1 100%, 2 50%, 3 25%.
    volume_code: u8,
    frequency: u16,
    timer: u32,
    position: u8,
    sample: u8,
}

impl WaveChannel {
    pub(super) fn new() -> Self {
        Self {
            enabled: false,
            dac_enabled: false,
            length: LengthCounter::default(),
            volume_code: 0,
            frequency: 0,
            timer: 0,
            position: 0,
            sample: 0,
        }
    }

    #[inline]
    fn period(&self) -> u32 {
        (2048 - self.frequency as u32) * 2
    }

    pub(super) fn write_dac(&mut self, value: u8) {
        self.dac_enabled = value & 0x80 != 0;
        if !self.dac_enabled {
            self.enabled = false;
        }
    }

    pub(super) fn write_length(&mut self, value: u8) {
        self.length.load(256, value as u16);
    }

    pub(super) fn write_volume(&mut self, value: u8) {
        self.volume_code = (value >> 5) & 0x03;
    }

    pub(super) fn write_frequency_low(&mut self, value: u8) {
        self.frequency = (self.frequency & 0x700) | value as u16;
    }

    pub(super) fn write_frequency_high(&mut self, value: u8) {
        self.frequency = (self.frequency & 0x0FF) | (((value & 0x07) as u16) << 8);
        self.length.enabled = value & 0x40 != 0;
    }

    pub(super) fn trigger(&mut self) {
        self.enabled = self.dac_enabled;
        self.length.trigger(256);
        self.timer = self.period();
        self.position = 0;
    }

    pub(super) fn step(&mut self, cycles: u32, wave_ram: &[u8; 16]) {
        if !self.enabled {
            return;
        }
        let mut cycles = cycles;
        while cycles >= self.timer {
            cycles -= self.timer;
            self.timer = self.period();
            self.position = (self.position + 1) & 0x1F;
            let byte = wave_ram[(self.position / 2) as usize];
            self.sample = if self.position & 1 == 0 {
                byte >> 4
            } else {
                byte & 0x0F
            };
        }
        self.timer -= cycles;
    }

    pub(super) fn clock_length(&mut self) {
        if self.length.clock() {
            self.enabled = false;
        }
    }

    pub(super) fn output(&self) -> u8 {
        if !self.enabled || self.volume_code == 0 {
            return 0;
        }
        self.sample >> (self.volume_code - 1)
    }
}
