//! # Packed Text
//!
//! The byte-stream form of the text buffer, as a C engine would keep it in a
//! single `char[]`:
//!
//! ```text
//! Hello there.\nWhere to?\nGo north\x01\x01\nGo south\x01\x02
//! ^ line       ^ line     ^ choice, value 1   ^ choice, value 2
//! ```
//!
//! Segments are separated by `\n`. A choice segment ends with the marker byte
//! [`CHOICE_MARKER`] followed by one raw value byte, with no newline between
//! the text and the record. The buffer capacity is counted in these bytes.

use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use crate::text::Segment;

/// Marks the end of a choice segment's text. Never valid inside text.
pub const CHOICE_MARKER: u8 = 0x01;
pub const SEPARATOR: u8 = b'\n';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackedError {
    #[error("choice marker at offset {offset} has no value byte")]
    TruncatedChoice { offset: usize },
    #[error("choice record ending at offset {offset} is not followed by a separator")]
    UnterminatedChoice { offset: usize },
    #[error("segment at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },
}

/// Packed size of one segment, without separators.
#[inline]
pub fn segment_len(segment: &Segment) -> usize {
    match segment {
        Segment::Line(text) => text.len(),
        Segment::Choice { text, .. } => text.len() + 2,
    }
}

pub fn encoded_len(segments: &[Segment]) -> usize {
    let separators = segments.len().saturating_sub(1);
    segments.iter().map(segment_len).sum::<usize>() + separators
}

pub fn pack(segments: &[Segment]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(segments));
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.extend_from_slice(segment.text().as_bytes());
        if let Segment::Choice { value, .. } = segment {
            out.push(CHOICE_MARKER);
            out.push(*value);
        }
    }
    out
}

pub fn unpack(bytes: &[u8]) -> Result<Vec<Segment>, PackedError> {
    let mut segments = Vec::new();
    if bytes.is_empty() {
        return Ok(segments);
    }

    let mut pos = 0;
    loop {
        let start = pos;
        while pos < bytes.len() && bytes[pos] != SEPARATOR && bytes[pos] != CHOICE_MARKER {
            pos += 1;
        }
        let text = String::from(
            core::str::from_utf8(&bytes[start..pos]).map_err(|_| PackedError::InvalidUtf8 { offset: start })?,
        );

        if pos < bytes.len() && bytes[pos] == CHOICE_MARKER {
            let value = *bytes.get(pos + 1).ok_or(PackedError::TruncatedChoice { offset: pos })?;
            pos += 2;
            if pos < bytes.len() && bytes[pos] != SEPARATOR {
                return Err(PackedError::UnterminatedChoice { offset: pos });
            }
            segments.push(Segment::Choice { text, value });
        } else {
            segments.push(Segment::Line(text));
        }

        if pos >= bytes.len() {
            break;
        }
        // skip the separator; a trailing one still opens an empty segment
        pos += 1;
    }

    Ok(segments)
}
