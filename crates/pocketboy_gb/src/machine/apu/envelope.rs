/// NRx2 volume envelope shared by the square and noise channels.
#[derive(Default, Clone, Copy)]
pub(super) struct Envelope {
    initial: u8,
    period: u8,
    add: bool,
    pub(super) volume: u8,
    timer: u8,
}

impl Envelope {
    /// Latch NRx2 parameters. The running volume only changes on trigger.
    pub(super) fn write(&mut self, value: u8) {
        self.initial = value >> 4;
        self.add = value & 0x08 != 0;
        self.period = value & 0x07;
    }

    pub(super) fn trigger(&mut self) {
        self.volume = self.initial;
        self.timer = self.reload_value();
    }

    #[inline]
    fn reload_value(&self) -> u8 {
        if self.period == 0 {
            8
        } else {
            self.period
        }
    }

    /// Frame sequencer step 7. A period of 0 freezes the volume.
    pub(super) fn clock(&mut self) {
        if self.period == 0 {
            return;
        }
        if self.timer > 0 {
            self.timer -= 1;
        }
        if self.timer == 0 {
            self.timer = self.reload_value();
            if self.add && self.volume < 15 {
                self.volume += 1;
            } else if !self.add && self.volume > 0 {
                self.volume -= 1;
            }
        }
    }
}

/// Length counter. Counts down at 256 Hz while enabled; reaching zero
/// switches the channel off.
#[derive(Default, Clone, Copy)]
pub(super) struct LengthCounter {
    pub(super) counter: u16,
    pub(super) enabled: bool,
}

impl LengthCounter {
    pub(super) fn load(&mut self, max: u16, value: u16) {
        self.counter = max - value;
    }

    /// On trigger an expired counter restarts at full length.
    pub(super) fn trigger(&mut self, max: u16) {
        if self.counter == 0 {
            self.counter = max;
        }
    }

    /// Returns true when this clock expired the counter.
    pub(super) fn clock(&mut self) -> bool {
        if self.enabled && self.counter > 0 {
            self.counter -= 1;
            return self.counter == 0;
        }
        false
    }
}
