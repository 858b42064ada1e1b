//! # vn-engine
//!
//! Dialogue, choice and image presentation for a visual novel running on a
//! tile-based console with a digital joypad.
//!
//! Everything goes through an [`Engine`], which owns the text buffer, the
//! input latch and the image tile cursor, and drives a host [`Platform`]:
//!
//! ```ignore
//! let mut vn = Engine::init(platform, Config::default());
//!
//! vn.show_background(&FOREST)?;
//! vn.append_text("The path splits in two.")?;
//! vn.flush_text();                      // blocks until the player presses A/B/C
//!
//! vn.append_choice(1, "Go north")?;
//! vn.append_choice(2, "Go south")?;
//! match vn.resolve_choice()? {          // blocks until a choice is confirmed
//!     Some(1) => { /* ... */ }
//!     _ => { /* ... */ }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`input`] - joypad decoding and the up/down/confirm latch
//! - [`text`] - the segment buffer that dialogue and choices accumulate in
//! - [`packed`] - the byte-stream form of that buffer
//! - [`dialogue`] - flushing text and pacing waits
//! - [`choice`] - choice decoding and cursor navigation
//! - [`video`] / [`audio`] - image, font, music and sound entry points
//! - [`platform`] - the capabilities a host has to provide

#![cfg_attr(not(test), no_std)]
#![allow(clippy::single_match)]
extern crate alloc;

pub mod audio;
pub mod choice;
pub mod config;
pub mod dialogue;
pub mod engine;
pub mod error;
pub mod input;
pub mod packed;
pub mod platform;
pub mod text;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, Window};
pub use engine::Engine;
pub use error::{Error, Result};
pub use input::{Buttons, InputLatch, JoyPort};
pub use platform::{FramePump, Platform, Sound, Video};
pub use text::Segment;
pub use video::{Image, Palette, TileMap, TileSet};
