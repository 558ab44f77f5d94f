//! View-state containers for the tracker pages.
//!
//! # Design
//! A view never performs I/O. It hands out the requests it needs, receives
//! responses as messages, and bumps its `Revision` on every mutation. The
//! host keeps a `RedrawTracker` per view and redraws only when the revision
//! moved since the last draw.

pub mod form;
pub mod list;
pub mod lookup;
pub mod route;
pub mod table;

/// Monotonic change counter owned by a view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Revision(u64);

impl Revision {
    pub fn bump(&mut self) {
        self.0 += 1;
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Host-side record of the last revision drawn.
#[derive(Debug, Default)]
pub struct RedrawTracker {
    drawn: Option<Revision>,
}

impl RedrawTracker {
    /// Returns true, and records the revision as drawn, when `current`
    /// differs from what was last drawn.
    pub fn needs_redraw(&mut self, current: Revision) -> bool {
        if self.drawn == Some(current) {
            return false;
        }
        self.drawn = Some(current);
        true
    }
}
