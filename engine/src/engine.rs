use log::{debug, info, warn};

use crate::audio;
use crate::config::Config;
use crate::error::Result;
use crate::input::{Buttons, InputLatch, JoyPort};
use crate::platform::Platform;
use crate::text::TextBuffer;
use crate::video::{self, BACKGROUND_PALETTE, FOREGROUND_PALETTE, Image, ImageCursor};

/// What the engine is blocked on, if anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Drawing buffered dialogue.
    Flushing,
    /// Dialogue is on screen, waiting for confirm.
    WaitingAdvance,
    /// Counting down a [`Engine::wait`].
    Pausing,
    /// Laying out a choice prompt.
    Decoding,
    /// Moving the cursor over a choice prompt.
    Navigating,
}

/// The presentation context. Owns all state that a C engine would keep in
/// globals, and the host platform it draws through.
pub struct Engine<P: Platform> {
    pub(crate) platform: P,
    pub(crate) latch: InputLatch,
    pub(crate) text: TextBuffer,
    pub(crate) images: ImageCursor,
    pub(crate) config: Config,
    pub(crate) phase: Phase,
}

impl<P: Platform> Engine<P> {
    pub fn init(mut platform: P, config: Config) -> Self {
        info!("vn-engine init: window {:?}, {} byte text buffer, {} choices max",
            config.window, config.text_capacity, config.max_choices);

        platform.set_force_delay_dma(true);
        if let Some((banner, x, y)) = config.banner {
            platform.draw_text(banner, x, y);
        }

        Self {
            platform,
            latch: InputLatch::new(config.primary_port),
            text: TextBuffer::new(config.text_capacity),
            images: ImageCursor::new(config.first_image_tile),
            config,
            phase: Phase::Idle,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn latch(&self) -> &InputLatch {
        &self.latch
    }

    pub fn text(&self) -> &TextBuffer {
        &self.text
    }

    pub fn image_cursor(&self) -> &ImageCursor {
        &self.images
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn into_platform(self) -> P {
        self.platform
    }

    /// Feeds a joypad event to the latch. Hosts normally deliver events from
    /// [`FramePump::advance_frame`](crate::FramePump::advance_frame) instead.
    pub fn on_joy_event(&mut self, port: JoyPort, changed: Buttons, state: Buttons) {
        self.latch.on_joy_event(port, changed, state);
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Draws one buffered line at `x` on the `line`th row of the window.
    pub(crate) fn draw_line(&mut self, text: &str, x: u16, line: usize) {
        let window = self.config.window;
        if line >= window.h as usize {
            warn!("line {} is below the {} row text window", line, window.h);
        }
        let len = text.chars().count();
        if len > self.config.max_line_len {
            warn!("line of {} cells is wider than {}: {:?}", len, self.config.max_line_len, text);
        }
        self.platform.draw_text(text, x, window.row(line));
    }

    // images, fonts, sound

    /// Shows a full screen background. Tile memory used by earlier images is
    /// reused.
    pub fn show_background(&mut self, image: &Image) {
        self.images.rewind();
        video::show_image(&mut self.platform, &mut self.images, image, BACKGROUND_PALETTE, 0, 0);
    }

    /// Shows an image at the position set by [`Engine::set_image_position`].
    pub fn show_foreground_image(&mut self, image: &Image) {
        let (x, y) = (self.images.x, self.images.y);
        video::show_image(&mut self.platform, &mut self.images, image, FOREGROUND_PALETTE, x, y);
    }

    pub fn set_image_position(&mut self, x: u16, y: u16) {
        self.images.x = x;
        self.images.y = y;
    }

    pub fn load_font(&mut self, font: &Image) {
        video::load_font(&mut self.platform, font);
    }

    pub fn play_music(&mut self, track: &[u8]) {
        audio::play_music(&mut self.platform, track, self.config.music_looping);
    }

    pub fn play_sound(&mut self, samples: &[u8]) {
        audio::play_sound(&mut self.platform, &self.config.sound, samples);
    }

    // text accumulation

    pub fn append_text(&mut self, line: &str) -> Result<()> {
        self.text.push_line(line)
    }

    /// Queues a selectable line; `value` is what [`Engine::resolve_choice`]
    /// returns when it is picked.
    pub fn append_choice(&mut self, value: u8, line: &str) -> Result<()> {
        self.text.push_choice(line, value)
    }

    /// Queues text already in [packed](crate::packed) form.
    pub fn append_packed(&mut self, bytes: &[u8]) -> Result<()> {
        self.text.push_packed(bytes)
    }

    /// Drops queued text without showing it.
    pub fn clear_text(&mut self) {
        self.text.clear();
    }
}
