//! # Choice Prompts
//!
//! `Idle → Decoding → Navigating → Idle`
//!
//! [`Engine::resolve_choice`] lays the buffered segments out in the window,
//! one column to the right of normal dialogue so the cursor fits in front of
//! them, and remembers the row and value of every choice. The player then
//! moves a `>` cursor with up/down (wrapping at both ends) and confirms.
//!
//! If up and down are both latched on the same frame, up is applied first
//! and down second, so the cursor ends where it was; it is still erased and
//! redrawn, and the release is still waited for.

use alloc::vec::Vec;

use log::debug;

use crate::config::Window;
use crate::engine::{Engine, Phase};
use crate::error::{Error, Result};
use crate::input::{wait_for_confirm, wait_for_release};
use crate::platform::Platform;
use crate::text::Segment;
use crate::video::clear_window;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChoiceEntry {
    pub row: u16,
    pub value: u8,
}

/// The choices of one prompt and the cursor over them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceSet {
    entries: Vec<ChoiceEntry>,
    selected: usize,
}

impl ChoiceSet {
    /// Rows and values of the choice segments, as laid out in `window`.
    /// Fails without building anything if there are more than `max`.
    pub fn decode(segments: &[Segment], window: &Window, max: usize) -> Result<Self> {
        let found = segments.iter().filter(|s| s.choice().is_some()).count();
        if found > max {
            return Err(Error::TooManyChoices { found, max });
        }

        let entries = segments
            .iter()
            .enumerate()
            .filter_map(|(line, segment)| {
                segment.choice().map(|value| ChoiceEntry { row: window.row(line), value })
            })
            .collect();

        Ok(Self { entries, selected: 0 })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ChoiceEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Row of the selected choice.
    pub fn row(&self) -> Option<u16> {
        self.entries.get(self.selected).map(|e| e.row)
    }

    pub fn value(&self) -> Option<u8> {
        self.entries.get(self.selected).map(|e| e.value)
    }

    pub fn move_up(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = match self.selected {
            0 => self.entries.len() - 1,
            n => n - 1,
        };
    }

    pub fn move_down(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected += 1;
        if self.selected >= self.entries.len() {
            self.selected = 0;
        }
    }

    /// One frame of navigation: up, then down.
    pub fn step(&mut self, up: bool, down: bool) {
        if up {
            self.move_up();
        }
        if down {
            self.move_down();
        }
    }
}

impl<P: Platform> Engine<P> {
    /// Shows the buffered text as a prompt and blocks until a choice is
    /// confirmed, returning its value.
    ///
    /// Returns `Ok(None)` right away when nothing is buffered. Buffered text
    /// without any choice in it is shown like dialogue, and `Ok(None)` is
    /// returned once the player advances.
    ///
    /// With more than [`Config::max_choices`](crate::Config::max_choices)
    /// choices buffered this fails before drawing anything, and the buffer
    /// is kept.
    pub fn resolve_choice(&mut self) -> Result<Option<u8>> {
        if self.text.is_empty() {
            return Ok(None);
        }

        let window = self.config.window;
        let mut choices = ChoiceSet::decode(self.text.segments(), &window, self.config.max_choices)?;

        self.set_phase(Phase::Decoding);
        clear_window(&mut self.platform, &window);
        let segments = self.text.take();
        for (line, segment) in segments.iter().enumerate() {
            self.draw_line(segment.text(), window.x + 1, line);
        }
        debug!("prompt: {} lines, {} choices", segments.len(), choices.len());

        let Some(mut row) = choices.row() else {
            wait_for_release(&mut self.platform, &mut self.latch);
            self.set_phase(Phase::WaitingAdvance);
            wait_for_confirm(&mut self.platform, &mut self.latch);
            self.set_phase(Phase::Idle);
            return Ok(None);
        };

        self.set_phase(Phase::Navigating);
        wait_for_release(&mut self.platform, &mut self.latch);
        self.platform.draw_text(self.config.cursor, window.x, row);

        loop {
            self.platform.advance_frame(&mut self.latch);
            if self.latch.confirm {
                break;
            }

            let (up, down) = (self.latch.up, self.latch.down);
            if up || down {
                self.platform.draw_text(self.config.cursor_blank, window.x, row);
                choices.step(up, down);
                row = choices.row().unwrap_or(row);
                debug!("cursor -> {}", choices.selected());
                self.platform.draw_text(self.config.cursor, window.x, row);
                wait_for_release(&mut self.platform, &mut self.latch);
            }
        }

        wait_for_release(&mut self.platform, &mut self.latch);
        self.set_phase(Phase::Idle);
        Ok(choices.value())
    }
}
