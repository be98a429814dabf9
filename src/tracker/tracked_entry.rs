//! A single tracked box and its persistence count.

use crate::tracker::rect::Rect;
use crate::tracker::track_state::TrackState;

/// Last-known box of a tracked object plus the number of consecutive
/// sampling rounds it has been matched.
///
/// Entries never outlive a round in which they go unmatched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedEntry {
    /// Box from the most recent matching detection
    pub rect: Rect,
    /// Consecutive rounds this object has been seen, starting at 1
    pub count: u32,
}

impl TrackedEntry {
    /// Start tracking a detection that matched nothing.
    pub fn new(rect: Rect) -> Self {
        Self { rect, count: 1 }
    }

    /// Carry this entry into the next round with a fresh box.
    pub fn matched(&self, rect: Rect) -> Self {
        Self {
            rect,
            count: self.count.saturating_add(1),
        }
    }

    pub fn state(&self, min_persistence: u32) -> TrackState {
        TrackState::from_count(self.count, min_persistence)
    }

    pub fn is_confirmed(&self, min_persistence: u32) -> bool {
        self.state(min_persistence) == TrackState::Confirmed
    }
}
