//! # Engine Configuration
//!
//! Defaults reproduce the classic 40×28 text layout of a 320×224 screen:
//!
//! | Setting             | Default        |
//! |---------------------|----------------|
//! | text window         | `(1, 20) 38×6` |
//! | text capacity       | 8192 bytes     |
//! | choices per prompt  | 8              |
//! | frames per wait unit| 60             |
//! | joypad              | port 1         |
//! | first image tile    | 256            |
//! | music               | loops forever  |
//! | sound effects       | sample 64, PCM channel 2, priority 1 |

use crate::audio::{Looping, SoundSlot};
use crate::input::JoyPort;

/// The dialogue window, in text cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Window {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Window {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Row of the `line`th line drawn in the window.
    #[inline]
    pub fn row(&self, line: usize) -> u16 {
        self.y.saturating_add(line as u16)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(1, 20, 38, 6)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub window: Window,
    /// Capacity of the text buffer, measured in packed bytes.
    pub text_capacity: usize,
    /// Most choice records a single prompt may carry.
    pub max_choices: usize,
    /// Frames advanced per unit passed to [`Engine::wait`](crate::Engine::wait).
    pub ticks_per_unit: u16,
    /// Joypad whose events feed the latch. Every other port is ignored.
    pub primary_port: JoyPort,
    /// Tile slot the background is loaded at; images follow it in VRAM.
    pub first_image_tile: u16,
    /// Longest line that fits the window; longer lines are drawn but logged.
    pub max_line_len: usize,
    pub cursor: &'static str,
    pub cursor_blank: &'static str,
    /// Line drawn once by [`Engine::init`](crate::Engine::init), with its cell position.
    pub banner: Option<(&'static str, u16, u16)>,
    pub music_looping: Looping,
    pub sound: SoundSlot,
}

impl Config {
    pub const TEXT_CAPACITY: usize = 8192;
    pub const MAX_CHOICES: usize = 8;
    pub const TICKS_PER_UNIT: u16 = 60;
    pub const FIRST_IMAGE_TILE: u16 = 256;
    pub const MAX_LINE_LEN: usize = 40;
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: Window::default(),
            text_capacity: Self::TEXT_CAPACITY,
            max_choices: Self::MAX_CHOICES,
            ticks_per_unit: Self::TICKS_PER_UNIT,
            primary_port: JoyPort::Joy1,
            first_image_tile: Self::FIRST_IMAGE_TILE,
            max_line_len: Self::MAX_LINE_LEN,
            cursor: ">",
            cursor_blank: " ",
            banner: Some((concat!("vn-engine v", env!("CARGO_PKG_VERSION")), 18, 27)),
            music_looping: Looping::Forever,
            sound: SoundSlot::default(),
        }
    }
}
