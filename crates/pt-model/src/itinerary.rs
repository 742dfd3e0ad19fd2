//! `Itinerary` — a shared leg sequence that many groups execute.
//!
//! # The last-leg contract
//!
//! A group's position in its itinerary is an external cursor (held on the
//! group, since itineraries are shared).  The authoritative definitions:
//!
//! - *travelling*: `cursor < legs.len()` — the group still has the leg at
//!   `cursor` to execute, even when it is the final one;
//! - *arrived*: `cursor == legs.len()` — every leg is complete and the group
//!   rests wherever it was last delivered.
//!
//! A group sitting on its final leg therefore boards and walks exactly like
//! any other; only the advance past the final leg parks it.

use pt_core::{ItineraryId, RouteId, StationId};

/// One leg: ride (or walk) `route`, getting off at `dest`.
///
/// `dest == None` means "ride this route to its natural last stop".
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    pub route: RouteId,
    pub dest:  Option<StationId>,
}

/// An ordered leg sequence.  Registered once in the world's itinerary arena
/// and never mutated during a run.
#[derive(Clone, Debug)]
pub struct Itinerary {
    pub id:   ItineraryId,

    /// The id the planner document declared for this itinerary.  Arena
    /// position is an internal detail; reports key itineraries by this so
    /// they stay correlatable with the input.  Defaults to the arena index
    /// for worlds built without a planner document.
    pub planner_id: u32,

    pub legs: Vec<Leg>,
}

impl Itinerary {
    pub fn new(id: ItineraryId, legs: Vec<Leg>) -> Self {
        debug_assert!(!legs.is_empty(), "an itinerary needs at least one leg");
        Self { id, planner_id: id.0, legs }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// The leg at `cursor`, or `None` once the journey is complete.
    #[inline]
    pub fn leg(&self, cursor: usize) -> Option<&Leg> {
        self.legs.get(cursor)
    }

    /// `true` once every leg has been completed.
    #[inline]
    pub fn is_complete(&self, cursor: usize) -> bool {
        cursor >= self.legs.len()
    }

    /// `true` while the cursor sits on the final leg (still travelling).
    #[inline]
    pub fn on_final_leg(&self, cursor: usize) -> bool {
        cursor + 1 == self.legs.len()
    }
}
