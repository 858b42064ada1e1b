use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use crate::audio::{Looping, PcmChannel};
use crate::input::{Buttons, InputLatch, JoyPort};
use crate::platform::{FramePump, Sound, Video};
use crate::video::{Image, Palette, Plane, TileAttr, TileMap, TileSet};

/// Frames a script may run past its end before a test is considered hung.
const IDLE_FRAME_LIMIT: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LoadTiles { slot: u16, num_tiles: u16 },
    TileMap { plane: Plane, attr: TileAttr, x: u16, y: u16, w: u16, h: u16 },
    Palette(u8),
    Font { num_tiles: u16 },
    Text { text: String, x: u16, y: u16 },
    ClearRect { plane: Plane, attr: TileAttr, x: u16, y: u16, w: u16, h: u16 },
    Music { len: usize, looping: Looping },
    StopPcm(PcmChannel),
    PlayPcm { channel: PcmChannel, id: u8, len: usize, priority: u8 },
    ForceDelayDma(bool),
}

/// Records every call and plays back one joypad state per frame. Once the
/// script runs out the pad stays idle.
#[derive(Debug, Default)]
pub struct MockPlatform {
    pub calls: Vec<Call>,
    pub frames: usize,
    script: VecDeque<Buttons>,
    held: Buttons,
}

pub type ScriptedPump = MockPlatform;

impl MockPlatform {
    pub fn new(script: impl IntoIterator<Item = Buttons>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Default::default()
        }
    }

    /// `(text, x, y)` of every text draw, in order.
    pub fn texts(&self) -> Vec<(&str, u16, u16)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Text { text, x, y } => Some((text.as_str(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn clears(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::ClearRect { .. })).count()
    }

    pub fn script_done(&self) -> bool {
        self.script.is_empty()
    }
}

impl FramePump for MockPlatform {
    fn advance_frame(&mut self, latch: &mut InputLatch) {
        self.frames += 1;

        let next = match self.script.pop_front() {
            Some(state) => state,
            None => {
                assert!(self.frames < IDLE_FRAME_LIMIT, "input script exhausted while the engine is still waiting");
                Buttons::empty()
            }
        };

        if next != self.held {
            latch.on_joy_event(JoyPort::Joy1, next ^ self.held, next);
            self.held = next;
        }
    }
}

impl Video for MockPlatform {
    fn load_tiles(&mut self, tileset: &TileSet, slot: u16) {
        self.calls.push(Call::LoadTiles { slot, num_tiles: tileset.num_tiles });
    }

    fn set_tile_map(&mut self, plane: Plane, attr: TileAttr, tilemap: &TileMap, x: u16, y: u16) {
        self.calls.push(Call::TileMap { plane, attr, x, y, w: tilemap.w, h: tilemap.h });
    }

    fn set_palette(&mut self, index: u8, _palette: &Palette) {
        self.calls.push(Call::Palette(index));
    }

    fn load_font(&mut self, tileset: &TileSet) {
        self.calls.push(Call::Font { num_tiles: tileset.num_tiles });
    }

    fn draw_text(&mut self, text: &str, x: u16, y: u16) {
        self.calls.push(Call::Text { text: text.into(), x, y });
    }

    fn clear_rect(&mut self, plane: Plane, attr: TileAttr, x: u16, y: u16, w: u16, h: u16) {
        self.calls.push(Call::ClearRect { plane, attr, x, y, w, h });
    }
}

impl Sound for MockPlatform {
    fn start_music(&mut self, track: &[u8], looping: Looping) {
        self.calls.push(Call::Music { len: track.len(), looping });
    }

    fn stop_pcm(&mut self, channel: PcmChannel) {
        self.calls.push(Call::StopPcm(channel));
    }

    fn play_pcm(&mut self, channel: PcmChannel, id: u8, samples: &[u8], priority: u8) {
        self.calls.push(Call::PlayPcm { channel, id, len: samples.len(), priority });
    }

    fn set_force_delay_dma(&mut self, enabled: bool) {
        self.calls.push(Call::ForceDelayDma(enabled));
    }
}

pub fn image<'a>(tiles: &'a [u32], num_tiles: u16, map: &'a [u16], w: u16, h: u16) -> Image<'a> {
    Image {
        tileset: TileSet { num_tiles, tiles },
        tilemap: TileMap { w, h, tiles: map },
        palette: Palette::default(),
    }
}

/// Builds an input script from a press pattern: one idle frame to get past
/// the engine's initial release wait, then each entry held for one frame and
/// followed by one idle frame.
pub fn taps(presses: &[Buttons]) -> Vec<Buttons> {
    core::iter::once(Buttons::empty())
        .chain(presses.iter().flat_map(|&b| [b, Buttons::empty()]))
        .collect()
}
