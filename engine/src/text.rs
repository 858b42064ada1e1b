//! # Text Buffer
//!
//! Dialogue lines and choice options accumulate here until a flush or a
//! choice prompt drains the whole buffer at once.
//!
//! The buffer holds tagged [`Segment`]s, but its capacity is counted in the
//! bytes the same content takes in [packed](crate::packed) form, so a buffer
//! that fits here also fits a fixed `char[]` of the same size.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::packed::{self, CHOICE_MARKER};

/// One displayed row of the text window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Line(String),
    /// A selectable row. `value` is handed back when it is picked.
    Choice { text: String, value: u8 },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Line(text) => text,
            Segment::Choice { text, .. } => text,
        }
    }

    pub fn choice(&self) -> Option<u8> {
        match self {
            Segment::Line(_) => None,
            Segment::Choice { value, .. } => Some(*value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextBuffer {
    segments: Vec<Segment>,
    packed_len: usize,
    capacity: usize,
}

impl TextBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            segments: Vec::new(),
            packed_len: 0,
            capacity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Used capacity, in packed bytes.
    pub fn len(&self) -> usize {
        self.packed_len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.packed_len
    }

    pub fn choice_count(&self) -> usize {
        self.segments.iter().filter(|s| s.choice().is_some()).count()
    }

    /// Appends `text` as one line per `\n`-separated part.
    pub fn push_line(&mut self, text: &str) -> Result<()> {
        check_text(text)?;
        // an empty first line leaves the buffer empty
        if text.is_empty() && self.is_empty() {
            return Ok(());
        }

        self.reserve(self.separator_len() + text.len())?;
        self.segments.extend(text.split('\n').map(|part| Segment::Line(part.into())));
        Ok(())
    }

    /// Appends `text` as a choice bound to `value`. If `text` spans several
    /// lines only the last one is selectable.
    pub fn push_choice(&mut self, text: &str, value: u8) -> Result<()> {
        check_text(text)?;
        self.reserve(self.separator_len() + text.len() + 2)?;

        let mut parts = text.split('\n').peekable();
        while let Some(part) = parts.next() {
            let segment = if parts.peek().is_some() {
                Segment::Line(part.into())
            } else {
                Segment::Choice { text: part.into(), value }
            };
            self.segments.push(segment);
        }
        Ok(())
    }

    /// Appends already packed text, checking it as a whole before any of it
    /// is added.
    pub fn push_packed(&mut self, bytes: &[u8]) -> Result<()> {
        let segments = packed::unpack(bytes)?;
        if segments.is_empty() {
            return Ok(());
        }

        self.reserve(self.separator_len() + bytes.len())?;
        self.segments.extend(segments);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.packed_len = 0;
    }

    /// Drains every segment, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<Segment> {
        self.packed_len = 0;
        core::mem::take(&mut self.segments)
    }

    fn separator_len(&self) -> usize {
        if self.is_empty() { 0 } else { 1 }
    }

    fn reserve(&mut self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(Error::BufferOverflow { needed, remaining });
        }
        self.packed_len += needed;
        Ok(())
    }
}

fn check_text(text: &str) -> Result<()> {
    match text.bytes().position(|b| b == CHOICE_MARKER) {
        Some(offset) => Err(Error::ReservedByteInText { offset }),
        None => Ok(()),
    }
}
