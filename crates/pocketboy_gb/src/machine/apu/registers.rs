use super::Apu;

/// Bits that read back as 1 regardless of what was written.
fn read_mask(addr: u16) -> u8 {
    match addr {
        0xFF10 => 0x80,
        0xFF11 | 0xFF16 => 0x3F,
        0xFF12 | 0xFF17 | 0xFF21 | 0xFF22 | 0xFF24 | 0xFF25 => 0x00,
        0xFF14 | 0xFF19 | 0xFF1E | 0xFF23 => 0xBF,
        0xFF1A => 0x7F,
        0xFF1C => 0x9F,
        _ => 0xFF,
    }
}

impl Apu {
    /// FF10-FF3F.
    pub(in super::super) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF26 => {
                let mut status = 0x70;
                if self.powered {
                    status |= 0x80;
                }
                let channels = [
                    self.ch1.enabled,
                    self.ch2.enabled,
                    self.ch3.enabled,
                    self.ch4.enabled,
                ];
                for (bit, on) in channels.into_iter().enumerate() {
                    if on {
                        status |= 1 << bit;
                    }
                }
                status
            }
            0xFF10..=0xFF25 => self.regs[(addr - 0xFF10) as usize] | read_mask(addr),
            // Wave RAM is owned by the channel while it plays.
            0xFF30..=0xFF3F if self.ch3.enabled => 0xFF,
            0xFF30..=0xFF3F => self.wave_ram[(addr - 0xFF30) as usize],
            _ => 0xFF,
        }
    }

    /// While NR52 bit 7 is clear only NR52 and wave RAM accept writes.
    pub(in super::super) fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF26 => {
                let on = value & 0x80 != 0;
                if self.powered && !on {
                    self.power_off();
                } else if !self.powered && on {
                    self.powered = true;
                    self.frame_step = 0;
                }
                return;
            }
            0xFF30..=0xFF3F => {
                self.wave_ram[(addr - 0xFF30) as usize] = value;
                return;
            }
            0xFF10..=0xFF25 if self.powered => {
                self.regs[(addr - 0xFF10) as usize] = value;
            }
            _ => return,
        }

        match addr {
            0xFF10 => self.ch1.write_sweep(value),
            0xFF11 => self.ch1.write_duty_length(value),
            0xFF12 => self.ch1.write_envelope(value),
            0xFF13 => self.ch1.write_frequency_low(value),
            0xFF14 => {
                self.ch1.write_frequency_high(value);
                if value & 0x80 != 0 {
                    self.ch1.trigger();
                }
            }
            0xFF16 => self.ch2.write_duty_length(value),
            0xFF17 => self.ch2.write_envelope(value),
            0xFF18 => self.ch2.write_frequency_low(value),
            0xFF19 => {
                self.ch2.write_frequency_high(value);
                if value & 0x80 != 0 {
                    self.ch2.trigger();
                }
            }
            0xFF1A => self.ch3.write_dac(value),
            0xFF1B => self.ch3.write_length(value),
            0xFF1C => self.ch3.write_volume(value),
            0xFF1D => self.ch3.write_frequency_low(value),
            0xFF1E => {
                self.ch3.write_frequency_high(value);
                if value & 0x80 != 0 {
                    self.ch3.trigger();
                }
            }
            0xFF20 => self.ch4.write_length(value),
            0xFF21 => self.ch4.write_envelope(value),
            0xFF22 => self.ch4.write_polynomial(value),
            0xFF23 => {
                self.ch4.write_control(value);
                if value & 0x80 != 0 {
                    self.ch4.trigger();
                }
            }
            0xFF24 => self.nr50 = value,
            0xFF25 => self.nr51 = value,
            _ => {}
        }
    }
}
