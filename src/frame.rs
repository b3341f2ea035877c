//! Per-frame coalescing for scroll-driven updates.
//!
//! Scroll events can fire many times between two rendered frames. Each
//! scroll-driven behaviour owns a [`FrameGate`]; only the first request after a
//! frame runs schedules a new one, and later requests fold into it.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

/// Scroll-driven behaviours that each get their own gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameChannel {
    Nav,
    BackToTop,
    Parallax,
}

impl FrameChannel {
    pub const ALL: [Self; 3] = [Self::Nav, Self::BackToTop, Self::Parallax];
}

/// At most one pending frame request.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Returns `true` when the caller should schedule a frame; `false` when one
    /// is already in flight.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Called from the frame callback before doing the work.
    pub fn release(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGates {
    nav: FrameGate,
    back_to_top: FrameGate,
    parallax: FrameGate,
}

impl FrameGates {
    pub fn gate_mut(&mut self, channel: FrameChannel) -> &mut FrameGate {
        match channel {
            FrameChannel::Nav => &mut self.nav,
            FrameChannel::BackToTop => &mut self.back_to_top,
            FrameChannel::Parallax => &mut self.parallax,
        }
    }

    #[must_use]
    pub fn is_pending(&self, channel: FrameChannel) -> bool {
        match channel {
            FrameChannel::Nav => self.nav.is_pending(),
            FrameChannel::BackToTop => self.back_to_top.is_pending(),
            FrameChannel::Parallax => self.parallax.is_pending(),
        }
    }
}
