//! # Images, Fonts and the Text Window
//!
//! Images are drawn on background plane B; text and the dialogue window live
//! on plane A. Every image shown gets its tiles loaded right after the
//! previous image's, so a foreground sprite never overwrites the background
//! it is drawn over. Showing a new background starts over from the first
//! image tile.
//!
//! | Palette | Used by       |
//! |---------|---------------|
//! | 0       | font / window |
//! | 1       | backgrounds   |
//! | 2       | foreground    |

use bit_field::BitField;
use log::debug;

use crate::config::Window;
use crate::platform::Video;

pub const FONT_PALETTE: u8 = 0;
pub const BACKGROUND_PALETTE: u8 = 1;
pub const FOREGROUND_PALETTE: u8 = 2;

/// Tile the dialogue window is blanked with.
pub const WINDOW_FILL_TILE: u16 = 0x05A0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Plane {
    /// Foreground plane, carries text.
    A,
    /// Background plane, carries images.
    B,
}

bitflags::bitflags! {
    /// A plane cell: flags in the top bits, palette in bits 13-14, tile
    /// index in bits 0-10.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct TileAttr: u16 {
        const PRIORITY = 0x8000;
        const VFLIP    = 0x1000;
        const HFLIP    = 0x0800;

        const _ = !0;
    }
}

impl TileAttr {
    pub fn full(palette: u8, priority: bool, vflip: bool, hflip: bool, index: u16) -> Self {
        let mut bits = 0u16;
        bits.set_bits(13..15, (palette & 0b11) as u16);
        bits.set_bits(0..11, index & 0x07FF);

        let mut attr = TileAttr::from_bits_retain(bits);
        attr.set(TileAttr::PRIORITY, priority);
        attr.set(TileAttr::VFLIP, vflip);
        attr.set(TileAttr::HFLIP, hflip);
        attr
    }

    #[inline]
    pub fn palette(&self) -> u8 {
        self.bits().get_bits(13..15) as u8
    }

    #[inline]
    pub fn index(&self) -> u16 {
        self.bits().get_bits(0..11)
    }
}

/// Packed 4bpp tiles, 8 words per tile.
#[derive(Debug, Copy, Clone)]
pub struct TileSet<'a> {
    pub num_tiles: u16,
    pub tiles: &'a [u32],
}

/// Tile indices relative to the tileset, row-major, `w * h` entries.
#[derive(Debug, Copy, Clone)]
pub struct TileMap<'a> {
    pub w: u16,
    pub h: u16,
    pub tiles: &'a [u16],
}

/// 16 colors in 0BGR 9-bit format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Palette(pub [u16; 16]);

#[derive(Debug, Copy, Clone)]
pub struct Image<'a> {
    pub tileset: TileSet<'a>,
    pub tilemap: TileMap<'a>,
    pub palette: Palette,
}

/// Where the next image goes, both on screen and in tile memory.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageCursor {
    pub x: u16,
    pub y: u16,
    first_tile: u16,
    pub next_tile: u16,
}

impl ImageCursor {
    pub const fn new(first_tile: u16) -> Self {
        Self {
            x: 0,
            y: 0,
            first_tile,
            next_tile: first_tile,
        }
    }

    pub fn rewind(&mut self) {
        self.next_tile = self.first_tile;
    }
}

/// Loads `image` at the cursor's next free tile and maps it at `(x, y)`.
pub fn show_image<V: Video + ?Sized>(video: &mut V, cursor: &mut ImageCursor, image: &Image, palette: u8, x: u16, y: u16) {
    let slot = cursor.next_tile;
    debug!("image: {} tiles at slot {}, {}x{} cells at ({}, {}), palette {}",
        image.tileset.num_tiles, slot, image.tilemap.w, image.tilemap.h, x, y, palette);

    video.load_tiles(&image.tileset, slot);
    video.set_tile_map(Plane::B, TileAttr::full(palette, false, false, false, slot), &image.tilemap, x, y);
    video.set_palette(palette, &image.palette);

    cursor.next_tile = cursor.next_tile.wrapping_add(image.tileset.num_tiles);
}

pub fn load_font<V: Video + ?Sized>(video: &mut V, font: &Image) {
    video.load_font(&font.tileset);
    video.set_palette(FONT_PALETTE, &font.palette);
}

pub fn clear_window<V: Video + ?Sized>(video: &mut V, window: &Window) {
    let fill = TileAttr::full(FONT_PALETTE, false, false, false, WINDOW_FILL_TILE);
    video.clear_rect(Plane::A, fill, window.x, window.y, window.w, window.h);
}
