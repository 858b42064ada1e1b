//! # Joypad Input
//!
//! The host reports every joypad change as `(port, changed, state)`. Only the
//! configured port is listened to; its state is reduced to three logical
//! signals and stored in an [`InputLatch`], overwriting whatever was there.
//!
//! | Signal    | Buttons          |
//! |-----------|------------------|
//! | `up`      | `UP`             |
//! | `down`    | `DOWN`           |
//! | `confirm` | `A` or `B` or `C`|
//!
//! The blocking helpers at the bottom of this module spin on the
//! [`FramePump`], which is where the host delivers those events.

use log::trace;

use crate::platform::FramePump;

bitflags::bitflags! {
    /// Raw button bits of a 6-button pad.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub struct Buttons: u16 {
        const UP    = 0x0001;
        const DOWN  = 0x0002;
        const LEFT  = 0x0004;
        const RIGHT = 0x0008;
        const A     = 0x0040;
        const B     = 0x0010;
        const C     = 0x0020;
        const START = 0x0080;
        const X     = 0x0400;
        const Y     = 0x0200;
        const Z     = 0x0100;
        const MODE  = 0x0800;

        /// Any of these advances dialogue and confirms choices.
        const CONFIRM = Self::A.bits() | Self::B.bits() | Self::C.bits();
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JoyPort {
    Joy1,
    Joy2,
    Joy3,
    Joy4,
    Joy5,
    Joy6,
    Joy7,
    Joy8,
}

impl JoyPort {
    /// Port from its zero-based hardware index.
    pub const fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            0 => JoyPort::Joy1,
            1 => JoyPort::Joy2,
            2 => JoyPort::Joy3,
            3 => JoyPort::Joy4,
            4 => JoyPort::Joy5,
            5 => JoyPort::Joy6,
            6 => JoyPort::Joy7,
            7 => JoyPort::Joy8,
            _ => return None,
        })
    }
}

/// Current up/down/confirm state of the listened-to joypad.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InputLatch {
    port: JoyPort,
    pub up: bool,
    pub down: bool,
    pub confirm: bool,
}

impl InputLatch {
    pub const fn new(port: JoyPort) -> Self {
        Self {
            port,
            up: false,
            down: false,
            confirm: false,
        }
    }

    pub fn port(&self) -> JoyPort {
        self.port
    }

    /// Joypad event handler. `changed` is accepted for parity with the
    /// host's callback shape; only the full `state` matters.
    pub fn on_joy_event(&mut self, port: JoyPort, _changed: Buttons, state: Buttons) {
        if port != self.port {
            return;
        }

        self.up = state.contains(Buttons::UP);
        self.down = state.contains(Buttons::DOWN);
        self.confirm = state.intersects(Buttons::CONFIRM);
        trace!("latch up={} down={} confirm={}", self.up, self.down, self.confirm);
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.up || self.down || self.confirm
    }
}

/// Advances frames until nothing is held. Always advances at least once.
pub fn wait_for_release<P: FramePump + ?Sized>(pump: &mut P, latch: &mut InputLatch) {
    loop {
        pump.advance_frame(latch);
        if !latch.any() {
            break;
        }
    }
}

/// Advances frames until confirm is pressed, then until it is let go, so the
/// caller sees one clean press.
pub fn wait_for_confirm<P: FramePump + ?Sized>(pump: &mut P, latch: &mut InputLatch) {
    loop {
        pump.advance_frame(latch);
        if latch.confirm {
            break;
        }
    }
    wait_for_release(pump, latch);
}
