use thiserror::Error;

use crate::packed::PackedError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Appending would grow the packed text past the buffer capacity.
    /// The buffer is left as it was.
    #[error("text buffer overflow: {needed} bytes needed, {remaining} remaining")]
    BufferOverflow { needed: usize, remaining: usize },

    /// More choice records are queued than a single prompt can show.
    #[error("too many choices: {found} queued, at most {max} supported")]
    TooManyChoices { found: usize, max: usize },

    /// Caller text contained the byte that marks a choice record.
    #[error("reserved choice marker byte in text at offset {offset}")]
    ReservedByteInText { offset: usize },

    #[error("malformed packed text: {0}")]
    Packed(#[from] PackedError),
}
