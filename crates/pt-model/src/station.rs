//! `Station` — a stop with bounded docking bays and a waiting crowd.

use pt_core::{GeoPoint, GroupId, StationId};

/// One transit station.
///
/// The waiting list holds group *ids*; counts live in the world's group arena
/// so splits and boardings mutate in exactly one place.  The bay limit is
/// enforced by the engine's bay pool — the station only records the
/// configured capacity.
///
/// Invariant: the waiting list never contains a zero-count group.  Boarding
/// never creates one (a group exactly filling a quota is taken whole), and
/// suburbs never inject empty groups.
#[derive(Debug)]
pub struct Station {
    pub id:   StationId,
    pub name: String,
    pub pos:  GeoPoint,

    /// How many transporters may dock here at once.
    pub bays: u32,

    /// Groups currently waiting, in arrival/split order.  Boarding scans this
    /// front to back; FIFO order is load-bearing for determinism.
    pub waiting: Vec<GroupId>,

    /// `(wall minute, total waiting people)` — one snapshot per delivery
    /// call, not one per group.
    pub people_over_time: Vec<(f64, u32)>,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>, pos: GeoPoint, bays: u32) -> Self {
        Self {
            id,
            name: name.into(),
            pos,
            bays,
            waiting: Vec::new(),
            people_over_time: Vec::new(),
        }
    }

    /// Remove `group` from the waiting list if present.
    ///
    /// Returns `true` if it was found.  Used when a walk embarkation fires.
    pub fn remove_waiting(&mut self, group: GroupId) -> bool {
        match self.waiting.iter().position(|&g| g == group) {
            Some(i) => {
                self.waiting.remove(i);
                true
            }
            None => false,
        }
    }
}
