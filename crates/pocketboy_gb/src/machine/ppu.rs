//! Pixel processing unit.
//!
//! The PPU advances one dot per T-cycle. Each visible line spends 80 dots
//! in OAM scan, 172 in pixel transfer and 204 in HBlank; lines 144-153
//! are VBlank. Pixel `x` of a line is resolved at dot `92 + x`, so
//! register writes made during mode 3 affect the remaining pixels of that
//! line. Completed frames are published at the start of VBlank; the host
//! always sees the last complete frame.
mod registers;
mod render;
mod timing;

use crate::config::Color;
use crate::FRAME_BUFFER_SIZE;

pub(super) const VRAM_SIZE: usize = 0x2000;
pub(super) const OAM_SIZE: usize = 0xA0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

/// One OAM entry picked for the current line.
#[derive(Copy, Clone, Debug)]
struct LineSprite {
    y: u8,
    x: u8,
    tile: u8,
    attrs: u8,
    /// Object height latched at OAM scan; LCDC.2 may change mid-line.
    height: u8,
}

pub(super) struct Ppu {
    vram: Box<[u8; VRAM_SIZE]>,
    oam: [u8; OAM_SIZE],

    lcdc: u8,
    /// STAT interrupt selects (bits 3-6). Mode and LYC=LY bits are live.
    stat_select: u8,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,

    mode: Mode,
    /// Dot within the current line, 0..456.
    dot: u32,
    /// OR of the enabled STAT sources after the last update.
    stat_line: bool,
    /// WY matched LY at some line start this frame.
    window_y_hit: bool,
    /// Internal window row; only advances on lines that drew the window.
    window_line: u8,
    window_drawn: bool,
    line_sprites: Vec<LineSprite>,
    /// Dots elapsed with the LCD off since the last blank publish.
    lcd_off_dots: u32,

    palette: [Color; 4],
    back: Vec<u8>,
    front: Vec<u8>,
    frames: u64,
}

impl Ppu {
    pub(super) fn new(palette: [Color; 4]) -> Self {
        Self {
            vram: Box::new([0; VRAM_SIZE]),
            oam: [0; OAM_SIZE],
            lcdc: 0,
            stat_select: 0,
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            mode: Mode::HBlank,
            dot: 0,
            stat_line: false,
            window_y_hit: false,
            window_line: 0,
            window_drawn: false,
            line_sprites: Vec::with_capacity(10),
            lcd_off_dots: 0,
            palette,
            back: vec![0; FRAME_BUFFER_SIZE],
            front: vec![0; FRAME_BUFFER_SIZE],
            frames: 0,
        }
    }

    /// Register state the DMG boot ROM leaves behind: LCD and background
    /// on, BGP=0xFC, top of frame.
    pub(super) fn init_dmg(&mut self) {
        self.lcdc = 0x91;
        self.bgp = 0xFC;
        self.begin_visible_line();
    }

    #[inline]
    pub(super) fn lcd_enabled(&self) -> bool {
        self.lcdc & 0x80 != 0
    }

    #[cfg(test)]
    pub(super) fn mode(&self) -> Mode {
        self.mode
    }

    #[cfg(test)]
    pub(super) fn ly(&self) -> u8 {
        self.ly
    }

    /// Last complete frame, RGBA8.
    #[inline]
    pub(super) fn frame_buffer(&self) -> &[u8] {
        &self.front
    }

    /// Frames published since power-on.
    #[inline]
    pub(super) fn frames(&self) -> u64 {
        self.frames
    }

    fn publish_frame(&mut self) {
        std::mem::swap(&mut self.back, &mut self.front);
        self.frames += 1;
    }

    /// Fill the visible frame with colour 0, as the panel shows with the LCD off.
    fn publish_blank(&mut self) {
        let blank = self.palette[0].rgba();
        for pixel in self.front.chunks_exact_mut(4) {
            pixel.copy_from_slice(&blank);
        }
        self.frames += 1;
    }
}
