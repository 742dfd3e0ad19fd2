//! Logical processes and their explicit state machines.
//!
//! The original coroutine view of the system — "each entity yields on a
//! timeout or a bay acquisition" — is flattened here into plain state enums.
//! A process is an entry in the engine's arena; the event queue holds
//! `(time, seq, ProcessId)` wake-ups, and a wake-up resumes the process at
//! whatever state it parked itself in.  A process that has nothing further to
//! do replaces itself with [`Process::Done`].

use pt_core::{GroupId, RouteId, StationId, VehicleId};

/// Index of a process in the engine's process arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ProcessId(pub u32);

impl ProcessId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One logical process.  Spawned during a run, never removed from the arena
/// (a finished slot just holds `Done`).
#[derive(Debug)]
pub enum Process {
    /// Per-route spawn loop: wakes every simulated minute and turns pending
    /// trips whose timetable matches "now" into vehicles.
    VehicleSpawner { route: RouteId },

    /// A spawned bus or train working through its trip.
    Vehicle { vehicle: VehicleId, state: VehicleState },

    /// One group traversing one walking leg.  Each walking group runs its own
    /// independent timer; there is no batching.
    Walk {
        group:  GroupId,
        route:  RouteId,
        origin: StationId,
        dest:   StationId,
        state:  WalkState,
    },

    /// A suburb's demand-injection loop.
    Suburb { index: usize },

    /// Terminal state.
    Done,
}

/// Where a vehicle is within the per-stop service cycle.
///
/// ```text
/// AwaitBay ──acquire──▶ (load) ──▶ Deload ──▶ Depart ──travel──▶ AwaitBay
///                                                  └──terminal──▶ Done
/// ```
///
/// Loading happens synchronously at bay acquisition; its duration is the
/// delay before the `Deload` wake-up.  `Depart` carries the groups selected
/// during deload so they are delivered once the deload time has elapsed.
#[derive(Debug)]
pub enum VehicleState {
    /// Waiting to dock.  Either holds a queue slot in the station's bay pool
    /// or is about to request one.
    AwaitBay,

    /// Docked; loading time has elapsed, deload selection runs now.
    Deload,

    /// Deload time has elapsed; deliver `unload`, free the bay, and either
    /// travel onward or terminate.
    Depart { unload: Vec<GroupId> },
}

/// Where a walking group is within its leg.
#[derive(Debug)]
pub enum WalkState {
    /// Embarkation delay running; the group is still in its origin station's
    /// waiting list until this fires.
    Embark,

    /// Walk duration running; the group is on the link's in-transit list.
    Arrive,
}
