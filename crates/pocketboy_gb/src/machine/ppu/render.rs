use super::{LineSprite, Ppu};
use crate::SCREEN_WIDTH;

const MAX_SPRITES_PER_LINE: usize = 10;

impl Ppu {
    #[inline]
    fn sprite_height(&self) -> u8 {
        if self.lcdc & 0x04 != 0 {
            16
        } else {
            8
        }
    }

    /// OAM scan: the first ten entries overlapping LY, in OAM order, then
    /// stably sorted by X so the leftmost (then lowest index) wins.
    pub(super) fn select_line_sprites(&mut self) {
        let height = self.sprite_height();
        let line = self.ly.wrapping_add(16);
        self.line_sprites.clear();
        for entry in self.oam.chunks_exact(4) {
            let y = entry[0];
            if line >= y && (line - y) < height {
                self.line_sprites.push(LineSprite {
                    y,
                    x: entry[1],
                    tile: entry[2],
                    attrs: entry[3],
                    height,
                });
                if self.line_sprites.len() == MAX_SPRITES_PER_LINE {
                    break;
                }
            }
        }
        self.line_sprites.sort_by_key(|sprite| sprite.x);
    }

    /// 2-bit colour index of pixel (`col`, `row`) in the tile at VRAM offset `tile_addr`.
    #[inline]
    fn tile_pixel(&self, tile_addr: usize, row: usize, col: usize) -> u8 {
        let lo = self.vram[(tile_addr + row * 2) & 0x1FFF];
        let hi = self.vram[(tile_addr + row * 2 + 1) & 0x1FFF];
        let bit = 7 - col;
        (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
    }

    /// VRAM offset of a background/window tile, honouring LCDC.4 addressing.
    #[inline]
    fn bg_tile_addr(&self, tile_index: u8) -> usize {
        if self.lcdc & 0x10 != 0 {
            tile_index as usize * 16
        } else {
            (0x1000 + (tile_index as i8 as i32) * 16) as usize
        }
    }

    fn bg_window_index(&mut self, x: usize) -> u8 {
        if self.lcdc & 0x01 == 0 {
            return 0;
        }

        let window_enabled = self.lcdc & 0x20 != 0 && self.window_y_hit && self.wx <= 166;
        let (map_base, map_x, map_y) = if window_enabled && x + 7 >= self.wx as usize {
            self.window_drawn = true;
            let base = if self.lcdc & 0x40 != 0 { 0x1C00 } else { 0x1800 };
            (base, (x + 7 - self.wx as usize) as u8, self.window_line)
        } else {
            let base = if self.lcdc & 0x08 != 0 { 0x1C00 } else { 0x1800 };
            (
                base,
                (x as u8).wrapping_add(self.scx),
                self.ly.wrapping_add(self.scy),
            )
        };

        let map_addr = map_base + (map_y as usize / 8) * 32 + map_x as usize / 8;
        let tile_addr = self.bg_tile_addr(self.vram[map_addr]);
        self.tile_pixel(tile_addr, map_y as usize % 8, map_x as usize % 8)
    }

    /// First opaque sprite pixel covering `x`, as (colour index, attrs).
    fn sprite_pixel(&self, x: usize) -> Option<(u8, u8)> {
        if self.lcdc & 0x02 == 0 {
            return None;
        }
        let screen_x = x + 8;
        for sprite in &self.line_sprites {
            let height = sprite.height as usize;
            let left = sprite.x as usize;
            if screen_x < left || screen_x >= left + 8 {
                continue;
            }
            let mut row = self.ly as usize + 16 - sprite.y as usize;
            if sprite.attrs & 0x40 != 0 {
                row = height - 1 - row;
            }
            let mut col = screen_x - left;
            if sprite.attrs & 0x20 != 0 {
                col = 7 - col;
            }
            let tile = if height == 16 {
                sprite.tile & 0xFE
            } else {
                sprite.tile
            };
            let index = self.tile_pixel(tile as usize * 16, row, col);
            if index != 0 {
                return Some((index, sprite.attrs));
            }
        }
        None
    }

    /// Resolve pixel `x` of the current line into the back buffer.
    pub(super) fn render_pixel(&mut self, x: usize) {
        let bg_index = self.bg_window_index(x);

        let mut shade = (self.bgp >> (bg_index * 2)) & 0x03;
        if let Some((index, attrs)) = self.sprite_pixel(x) {
            let behind_bg = attrs & 0x80 != 0 && bg_index != 0;
            if !behind_bg {
                let palette = if attrs & 0x10 != 0 { self.obp1 } else { self.obp0 };
                shade = (palette >> (index * 2)) & 0x03;
            }
        }

        let offset = (self.ly as usize * SCREEN_WIDTH + x) * 4;
        let rgba = self.palette[shade as usize].rgba();
        self.back[offset..offset + 4].copy_from_slice(&rgba);
    }
}
