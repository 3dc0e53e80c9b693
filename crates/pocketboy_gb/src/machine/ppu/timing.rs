use super::{Mode, Ppu};
use crate::interrupts::{Interrupt, InterruptController};
use crate::{CYCLES_PER_FRAME, SCREEN_WIDTH};

const DOTS_PER_LINE: u32 = 456;
const OAM_SCAN_DOTS: u32 = 80;
const TRANSFER_DOTS: u32 = 172;
const LINES_PER_FRAME: u8 = 154;
const FIRST_VBLANK_LINE: u8 = 144;
/// Dot at which pixel 0 is produced; the fetcher needs 12 dots to warm up.
const FIRST_PIXEL_DOT: u32 = OAM_SCAN_DOTS + 12;

impl Ppu {
    /// Advance by `cycles` dots.
    pub(in super::super) fn tick(&mut self, cycles: u32, ints: &mut InterruptController) {
        if !self.lcd_enabled() {
            self.lcd_off_dots += cycles;
            if self.lcd_off_dots >= CYCLES_PER_FRAME {
                self.lcd_off_dots -= CYCLES_PER_FRAME;
                self.publish_blank();
            }
            return;
        }
        for _ in 0..cycles {
            self.step_dot(ints);
        }
    }

    fn step_dot(&mut self, ints: &mut InterruptController) {
        if self.mode == Mode::Transfer
            && (FIRST_PIXEL_DOT..FIRST_PIXEL_DOT + SCREEN_WIDTH as u32).contains(&self.dot)
        {
            self.render_pixel((self.dot - FIRST_PIXEL_DOT) as usize);
        }

        self.dot += 1;
        if self.dot == DOTS_PER_LINE {
            self.dot = 0;
            self.next_line(ints);
        } else if self.ly < FIRST_VBLANK_LINE {
            if self.dot == OAM_SCAN_DOTS {
                self.select_line_sprites();
                self.mode = Mode::Transfer;
            } else if self.dot == OAM_SCAN_DOTS + TRANSFER_DOTS {
                self.mode = Mode::HBlank;
            }
        }
        self.update_stat_line(ints);
    }

    fn next_line(&mut self, ints: &mut InterruptController) {
        if self.window_drawn {
            self.window_line = self.window_line.wrapping_add(1);
            self.window_drawn = false;
        }

        self.ly += 1;
        if self.ly == LINES_PER_FRAME {
            self.ly = 0;
            self.window_line = 0;
            self.window_y_hit = false;
        }

        if self.ly == FIRST_VBLANK_LINE {
            self.mode = Mode::VBlank;
            ints.request(Interrupt::VBlank);
            self.publish_frame();
            log::debug!("GB PPU: VBlank, frame {}", self.frames);
        } else if self.ly < FIRST_VBLANK_LINE {
            self.begin_visible_line();
        }
    }

    pub(super) fn begin_visible_line(&mut self) {
        self.mode = Mode::OamScan;
        if self.ly == self.wy {
            self.window_y_hit = true;
        }
    }

    /// Recompute the STAT interrupt line and request INT $48 on a rising edge.
    pub(super) fn update_stat_line(&mut self, ints: &mut InterruptController) {
        if !self.lcd_enabled() {
            self.stat_line = false;
            return;
        }
        let select = self.stat_select;
        let mut line = (select & 0x40 != 0 && self.ly == self.lyc)
            || (select & 0x20 != 0 && self.mode == Mode::OamScan)
            || (select & 0x10 != 0 && self.mode == Mode::VBlank)
            || (select & 0x08 != 0 && self.mode == Mode::HBlank);
        // DMG: the mode 2 select also fires on entry to line 144.
        if select & 0x20 != 0 && self.ly == FIRST_VBLANK_LINE && self.dot == 0 {
            line = true;
        }

        if line && !self.stat_line {
            ints.request(Interrupt::Stat);
        }
        self.stat_line = line;
    }

    /// LCDC.7 went 0 -> 1: restart from the top of the frame.
    pub(super) fn lcd_switched_on(&mut self, ints: &mut InterruptController) {
        self.ly = 0;
        self.dot = 0;
        self.window_line = 0;
        self.window_drawn = false;
        self.window_y_hit = false;
        self.stat_line = false;
        self.begin_visible_line();
        self.update_stat_line(ints);
    }

    /// LCDC.7 went 1 -> 0: LY holds at 0 in mode 0 and the dot clock stops.
    pub(super) fn lcd_switched_off(&mut self) {
        self.ly = 0;
        self.dot = 0;
        self.mode = Mode::HBlank;
        self.stat_line = false;
        self.lcd_off_dots = 0;
    }
}
