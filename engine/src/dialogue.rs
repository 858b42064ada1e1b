//! # Dialogue
//!
//! `Idle → Flushing → WaitingAdvance → Idle`
//!
//! [`Engine::flush_text`] swallows whatever button triggered it, redraws the
//! window with the buffered lines and then blocks for one clean confirm
//! press. [`Engine::wait`] is the same flush followed by a fixed delay.

use log::debug;

use crate::engine::{Engine, Phase};
use crate::input::{wait_for_confirm, wait_for_release};
use crate::platform::Platform;
use crate::video::clear_window;

impl<P: Platform> Engine<P> {
    /// Shows the buffered text and blocks until the player advances. Does
    /// nothing, and does not block, when no text is buffered.
    pub fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }

        self.set_phase(Phase::Flushing);
        wait_for_release(&mut self.platform, &mut self.latch);

        clear_window(&mut self.platform, &self.config.window);
        let segments = self.text.take();
        debug!("flushing {} lines", segments.len());

        let x = self.config.window.x;
        for (line, segment) in segments.iter().enumerate() {
            self.draw_line(segment.text(), x, line);
        }

        self.set_phase(Phase::WaitingAdvance);
        wait_for_confirm(&mut self.platform, &mut self.latch);
        self.set_phase(Phase::Idle);
    }

    /// Flushes pending text, then idles for `duration` units of
    /// [`Config::ticks_per_unit`](crate::Config::ticks_per_unit) frames.
    pub fn wait(&mut self, duration: u16) {
        self.flush_text();

        let frames = duration as u32 * self.config.ticks_per_unit as u32;
        debug!("waiting {} frames", frames);
        self.set_phase(Phase::Pausing);
        for _ in 0..frames {
            self.platform.advance_frame(&mut self.latch);
        }
        self.set_phase(Phase::Idle);
    }
}
