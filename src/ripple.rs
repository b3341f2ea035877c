//! Click ripple geometry and the ledger of overlays still on the page.

use std::collections::BTreeMap;

#[cfg(test)]
#[path = "ripple_test.rs"]
mod ripple_test;

/// Client-space bounding box, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Position and size of a ripple, relative to the card it lives in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub left: f64,
    pub top: f64,
    pub size: f64,
}

impl RippleGeometry {
    /// A square wide enough to cover the card, centred on the pointer.
    #[must_use]
    pub fn centered(card: Rect, client_x: f64, client_y: f64) -> Self {
        let size = card.width.max(card.height);
        Self {
            left: client_x - card.left - size / 2.0,
            top: client_y - card.top - size / 2.0,
            size,
        }
    }

    /// Inline `style` text for the overlay element.
    #[must_use]
    pub fn css_text(&self, duration_ms: u32) -> String {
        format!(
            "position: absolute; border-radius: 50%; background: rgba(59, 130, 246, 0.3); \
             transform: scale(0); animation: ripple {secs}s linear; \
             left: {left}px; top: {top}px; width: {size}px; height: {size}px; pointer-events: none;",
            secs = f64::from(duration_ms) / 1000.0,
            left = self.left,
            top = self.top,
            size = self.size,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RippleId(pub u64);

/// Tracks which ripples have been spawned and not yet removed.
#[derive(Debug, Default)]
pub struct RippleLedger {
    next_id: u64,
    live: BTreeMap<RippleId, usize>,
}

impl RippleLedger {
    /// Record a new ripple on `card` and return its id.
    pub fn spawn(&mut self, card: usize) -> RippleId {
        let id = RippleId(self.next_id);
        self.next_id += 1;
        self.live.insert(id, card);
        id
    }

    /// Forget a ripple. Returns the owning card the first time only.
    pub fn expire(&mut self, id: RippleId) -> Option<usize> {
        self.live.remove(&id)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
