//! `Route` — an ordered stop sequence with kind-specific behavior data.
//!
//! The kind is a tagged union rather than a trait object: every dispatch on
//! route behavior is an exhaustive `match`, so adding a variant breaks every
//! site that needs to care.

use pt_core::{GeoPoint, GroupId, RouteId, StationId};

use crate::trip::Trip;

/// A route in the network.  Stops are ordered travel direction first-to-last
/// and there are always at least two of them.
#[derive(Debug)]
pub struct Route {
    pub id:   RouteId,
    pub name: String,
    pub stops: Vec<StationId>,
    pub kind: RouteKind,
}

/// Kind-specific route state.
#[derive(Debug)]
pub enum RouteKind {
    /// Scheduled bus service.
    Bus(VehicleService),
    /// Scheduled train service.
    ///
    /// Structurally identical to `Bus` and subject to the same bay-contention
    /// model.  Rail-block signalling (preventing two trains from occupying
    /// one track segment) is future work outside this simulator's guarantees.
    Train(VehicleService),
    /// A walking connection; traversed per-group, not by vehicles.
    Walk(WalkLink),
}

/// Shared state for scheduled vehicle routes (bus and train).
#[derive(Debug)]
pub struct VehicleService {
    /// Trips not yet consumed by a spawn.  The spawn loop scans these every
    /// simulated minute; a consumed trip moves into its vehicle.
    pub pending_trips: Vec<Trip>,

    /// Maximum number of concurrently active vehicles on this route.
    pub spawn_budget: u32,

    /// Seats per vehicle.
    pub capacity: u32,

    /// Static geometry passthrough for the frontend map.
    pub shape: Vec<GeoPoint>,
}

/// State for a walking leg.
#[derive(Debug, Default)]
pub struct WalkLink {
    /// Base congestion factor for this link; scaled further by the number of
    /// people concurrently walking it.
    pub congestion_factor: f64,

    /// Groups currently walking this link.
    pub in_transit: Vec<GroupId>,

    /// Departure/arrival record per group that walked the link.
    pub log: Vec<WalkRecord>,
}

/// One group's traversal of a walk link.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkRecord {
    pub group: GroupId,
    pub count: u32,
    /// Wall minute the group started walking.
    pub departed: f64,
    /// Wall minute the group was delivered; `None` while still walking.
    pub arrived: Option<f64>,
}

impl WalkLink {
    pub fn new(congestion_factor: f64) -> Self {
        Self { congestion_factor, in_transit: Vec::new(), log: Vec::new() }
    }
}

impl Route {
    /// # Panics
    /// Panics in debug mode on fewer than two stops — the loader validates
    /// this before construction.
    pub fn new(id: RouteId, name: impl Into<String>, stops: Vec<StationId>, kind: RouteKind) -> Self {
        debug_assert!(stops.len() >= 2, "a route needs at least two stops");
        Self { id, name: name.into(), stops, kind }
    }

    #[inline]
    pub fn first_stop(&self) -> StationId {
        self.stops[0]
    }

    #[inline]
    pub fn last_stop(&self) -> StationId {
        self.stops[self.stops.len() - 1]
    }

    #[inline]
    pub fn is_walk(&self) -> bool {
        matches!(self.kind, RouteKind::Walk(_))
    }

    /// Scheduled-vehicle state, if this is a bus or train route.
    pub fn vehicle_service(&self) -> Option<&VehicleService> {
        match &self.kind {
            RouteKind::Bus(s) | RouteKind::Train(s) => Some(s),
            RouteKind::Walk(_) => None,
        }
    }

    pub fn vehicle_service_mut(&mut self) -> Option<&mut VehicleService> {
        match &mut self.kind {
            RouteKind::Bus(s) | RouteKind::Train(s) => Some(s),
            RouteKind::Walk(_) => None,
        }
    }

    /// Walk-link state, if this is a walking route.
    pub fn walk_link(&self) -> Option<&WalkLink> {
        match &self.kind {
            RouteKind::Walk(w) => Some(w),
            _ => None,
        }
    }

    pub fn walk_link_mut(&mut self) -> Option<&mut WalkLink> {
        match &mut self.kind {
            RouteKind::Walk(w) => Some(w),
            _ => None,
        }
    }

    /// Human-readable transport method for reports.
    pub fn method(&self) -> &'static str {
        match self.kind {
            RouteKind::Bus(_)   => "bus",
            RouteKind::Train(_) => "train",
            RouteKind::Walk(_)  => "walk",
        }
    }
}
