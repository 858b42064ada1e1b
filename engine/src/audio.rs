//! # Music and Sound Effects
//!
//! Music loops forever once started, unless the config asks for a fixed
//! number of plays. Sound effects are PCM samples played through a single
//! [`SoundSlot`]; starting one cuts off the previous one.

use log::debug;

use crate::platform::Sound;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PcmChannel {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Looping {
    Forever,
    Times(u16),
}

/// Where sound effects are registered and played.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SoundSlot {
    pub channel: PcmChannel,
    /// Sample id the effect is registered under.
    pub id: u8,
    pub priority: u8,
}

impl Default for SoundSlot {
    fn default() -> Self {
        Self {
            channel: PcmChannel::Ch2,
            id: 64,
            priority: 1,
        }
    }
}

pub fn play_music<S: Sound + ?Sized>(sound: &mut S, track: &[u8], looping: Looping) {
    debug!("music: {} byte track, {:?}", track.len(), looping);
    sound.start_music(track, looping);
}

pub fn play_sound<S: Sound + ?Sized>(sound: &mut S, slot: &SoundSlot, samples: &[u8]) {
    debug!("sound: {} samples on {:?}", samples.len(), slot.channel);
    sound.stop_pcm(slot.channel);
    sound.play_pcm(slot.channel, slot.id, samples, slot.priority);
}
