//! `Transporter` — a spawned bus or train working one trip.

use pt_core::{GroupId, RouteId, VehicleId};

use crate::trip::Trip;

/// Which flavour of vehicle a transporter is.  Matches its owning route's
/// kind; kept on the vehicle so service-time lookups don't need the route.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VehicleKind {
    Bus,
    Train,
}

impl VehicleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleKind::Bus   => "bus",
            VehicleKind::Train => "train",
        }
    }
}

/// One vehicle instance, bound to the trip that spawned it.
///
/// Vehicles stay in the world arena after their terminal deload (with
/// `active == false`) so their logs survive into output aggregation.
///
/// Invariant: the sum of onboard group counts never exceeds `capacity`; the
/// boarding quota enforces it at every load.
#[derive(Debug)]
pub struct Transporter {
    pub id:    VehicleId,
    pub kind:  VehicleKind,
    pub route: RouteId,

    /// The consumed trip this vehicle executes.  Owning it (rather than
    /// referencing the route's pool) is what makes "a trip spawns at most
    /// one vehicle" structural.
    pub trip: Trip,

    /// Index into `trip.timetable` of the stop being serviced or headed to.
    pub stop_index: usize,

    pub onboard:  Vec<GroupId>,
    pub capacity: u32,

    /// `false` once the terminal deload has completed.
    pub active: bool,

    /// `(stop name, wall minute)` per serviced stop, in visit order.
    pub arrivals: Vec<(String, f64)>,

    /// `(wall minute, onboard people)` after every load and deload.
    pub occupancy: Vec<(f64, u32)>,
}

impl Transporter {
    pub fn new(
        id:         VehicleId,
        kind:       VehicleKind,
        route:      RouteId,
        trip:       Trip,
        stop_index: usize,
        capacity:   u32,
    ) -> Self {
        Self {
            id,
            kind,
            route,
            trip,
            stop_index,
            onboard: Vec::new(),
            capacity,
            active: true,
            arrivals: Vec::new(),
            occupancy: Vec::new(),
        }
    }

    /// Short display name, e.g. `B3` for bus 3, `T7` for train 7.
    pub fn name(&self) -> String {
        let prefix = match self.kind {
            VehicleKind::Bus   => 'B',
            VehicleKind::Train => 'T',
        };
        format!("{prefix}{}", self.id.0)
    }

    /// `true` when positioned at the trip's final scheduled stop.
    #[inline]
    pub fn at_final_stop(&self) -> bool {
        self.stop_index == self.trip.last_index()
    }

    /// The timetable entry for the current position.
    #[inline]
    pub fn current_entry(&self) -> &crate::trip::TimetableEntry {
        self.trip.entry(self.stop_index)
    }
}
