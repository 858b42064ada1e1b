//! # Host Capabilities
//!
//! The engine never touches hardware. A host implements these three traits
//! (the tile video chip, the sound driver, and the frame pump that doubles
//! as the joypad event pump) and hands the result to
//! [`Engine::init`](crate::Engine::init).
//!
//! Anything implementing all three is a [`Platform`].

use crate::audio::{Looping, PcmChannel};
use crate::input::InputLatch;
use crate::video::{Palette, Plane, TileAttr, TileMap, TileSet};

/// The single suspension point of the engine.
pub trait FramePump {
    /// Blocks until the next frame boundary and runs whatever background work
    /// is due (queued DMA, sound streaming). Joypad changes that happened
    /// since the previous call are delivered to `latch` through
    /// [`InputLatch::on_joy_event`] before returning.
    fn advance_frame(&mut self, latch: &mut InputLatch);
}

pub trait Video {
    /// Uploads a tileset into tile memory starting at `slot`.
    fn load_tiles(&mut self, tileset: &TileSet, slot: u16);

    /// Writes `tilemap` to `plane` at cell `(x, y)`. Each map entry is added
    /// to the base `attr`.
    fn set_tile_map(&mut self, plane: Plane, attr: TileAttr, tilemap: &TileMap, x: u16, y: u16);

    fn set_palette(&mut self, index: u8, palette: &Palette);

    /// Replaces the font tiles used by [`Video::draw_text`].
    fn load_font(&mut self, tileset: &TileSet);

    /// Draws one row of text on the text plane.
    fn draw_text(&mut self, text: &str, x: u16, y: u16);

    /// Fills a rectangle of `plane` with `attr`.
    fn clear_rect(&mut self, plane: Plane, attr: TileAttr, x: u16, y: u16, w: u16, h: u16);
}

pub trait Sound {
    fn start_music(&mut self, track: &[u8], looping: Looping);

    fn stop_pcm(&mut self, channel: PcmChannel);

    /// Registers `samples` under sample `id` and starts it on `channel`.
    fn play_pcm(&mut self, channel: PcmChannel, id: u8, samples: &[u8], priority: u8);

    /// Makes the sound driver yield the bus to pending DMA transfers.
    fn set_force_delay_dma(&mut self, enabled: bool) {
        let _ = enabled;
    }
}

pub trait Platform: FramePump + Video + Sound {}

impl<T: FramePump + Video + Sound> Platform for T {}
