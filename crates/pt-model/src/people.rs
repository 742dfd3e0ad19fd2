//! `PeopleGroup` — a crowd travelling together along one itinerary.

use pt_core::{GroupId, ItineraryId, StationId};

/// One entry in a group's visit log.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisitEntry {
    pub station: StationId,
    /// Wall minute the group was delivered here.
    pub at: f64,
}

/// A group of people moving through the network as one unit.
///
/// Identity is immutable but `count` is not: boarding may shrink a group in
/// place and spawn a split child carrying the excess.  Splits deep-copy the
/// visit log and inherit the cursor; groups are never merged back together.
///
/// Invariant: `count > 0` for every group reachable from a station waiting
/// list, a vehicle, or a walk link.
#[derive(Clone, Debug)]
pub struct PeopleGroup {
    pub id:    GroupId,
    pub count: u32,

    /// Wall minute the group was injected.
    pub start_time: f64,

    /// Which itinerary this group executes and how far along it is.
    pub itinerary: ItineraryId,
    pub cursor:    usize,

    /// Stations visited, in order, with delivery times.
    pub log: Vec<VisitEntry>,
}

impl PeopleGroup {
    /// A fresh group at cursor 0 with an empty, freshly allocated log.
    pub fn new(id: GroupId, count: u32, start_time: f64, itinerary: ItineraryId) -> Self {
        debug_assert!(count > 0, "groups must carry at least one person");
        Self {
            id,
            count,
            start_time,
            itinerary,
            cursor: 0,
            log: Vec::new(),
        }
    }

    /// Advance to the next leg.  Cursor is monotonically non-decreasing over
    /// a group's lifetime; nothing ever rewinds it.
    #[inline]
    pub fn advance(&mut self) {
        self.cursor += 1;
    }
}
