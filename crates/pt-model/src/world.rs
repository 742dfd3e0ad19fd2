//! `World` — the arenas one simulation run owns.
//!
//! All entity state is held here, indexed by the typed IDs from `pt-core`.
//! The engine mutates the world between event points; because execution is
//! strictly single-threaded and each process step runs to completion, every
//! mutation (a whole `board` call, say) is atomically visible to the rest of
//! the system without locks.

use pt_core::{GroupId, ItineraryId, RouteId, StationId, VehicleId};

use crate::context::ItineraryIndex;
use crate::itinerary::{Itinerary, Leg};
use crate::people::PeopleGroup;
use crate::route::Route;
use crate::station::Station;
use crate::suburb::Suburb;
use crate::transporter::{Transporter, VehicleKind};
use crate::trip::Trip;

/// Run-owned world state.
///
/// Stations, routes, and itineraries are created during scenario resolution
/// and never removed.  Groups and vehicles are appended during the run and
/// also never removed — finished vehicles and arrived groups stay put so
/// output aggregation can traverse their logs.
#[derive(Debug, Default)]
pub struct World {
    pub stations:    Vec<Station>,
    pub routes:      Vec<Route>,
    pub itineraries: Vec<Itinerary>,
    pub suburbs:     Vec<Suburb>,
    pub groups:      Vec<PeopleGroup>,
    pub vehicles:    Vec<Transporter>,

    /// Station → itineraries lookup; rebuilt by [`World::build_index`].
    pub itinerary_index: ItineraryIndex,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ──────────────────────────────────────────────────────

    pub fn add_station(&mut self, station: Station) -> StationId {
        let id = station.id;
        debug_assert_eq!(id.index(), self.stations.len());
        self.stations.push(station);
        id
    }

    pub fn add_route(&mut self, route: Route) -> RouteId {
        let id = route.id;
        debug_assert_eq!(id.index(), self.routes.len());
        self.routes.push(route);
        id
    }

    pub fn add_itinerary(&mut self, legs: Vec<Leg>) -> ItineraryId {
        let id = ItineraryId(self.itineraries.len() as u32);
        self.itineraries.push(Itinerary::new(id, legs));
        id
    }

    /// (Re)build the station → itinerary lookup.  Call once after all
    /// itineraries are registered, before the run starts.
    pub fn build_index(&mut self) {
        self.itinerary_index = ItineraryIndex::build(&self.itineraries, &self.routes);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    #[inline]
    pub fn station_mut(&mut self, id: StationId) -> &mut Station {
        &mut self.stations[id.index()]
    }

    #[inline]
    pub fn route(&self, id: RouteId) -> &Route {
        &self.routes[id.index()]
    }

    #[inline]
    pub fn route_mut(&mut self, id: RouteId) -> &mut Route {
        &mut self.routes[id.index()]
    }

    #[inline]
    pub fn group(&self, id: GroupId) -> &PeopleGroup {
        &self.groups[id.index()]
    }

    #[inline]
    pub fn group_mut(&mut self, id: GroupId) -> &mut PeopleGroup {
        &mut self.groups[id.index()]
    }

    #[inline]
    pub fn vehicle(&self, id: VehicleId) -> &Transporter {
        &self.vehicles[id.index()]
    }

    #[inline]
    pub fn vehicle_mut(&mut self, id: VehicleId) -> &mut Transporter {
        &mut self.vehicles[id.index()]
    }

    // ── Derived queries ───────────────────────────────────────────────────

    /// Total people waiting at `station` right now.
    pub fn station_people(&self, station: StationId) -> u32 {
        self.stations[station.index()]
            .waiting
            .iter()
            .map(|&g| self.groups[g.index()].count)
            .sum()
    }

    /// Congestion level: `ceil(waiting people / 100)`.
    pub fn congestion_level(&self, station: StationId) -> u32 {
        self.station_people(station).div_ceil(100)
    }

    /// The leg a group is currently executing, or `None` once arrived.
    pub fn current_leg(&self, group: GroupId) -> Option<&Leg> {
        let g = &self.groups[group.index()];
        self.itineraries[g.itinerary.index()].leg(g.cursor)
    }

    /// Route of the group's current leg, or `None` once arrived.
    pub fn current_route(&self, group: GroupId) -> Option<RouteId> {
        self.current_leg(group).map(|leg| leg.route)
    }

    /// People aboard a vehicle right now.
    pub fn vehicle_occupancy(&self, vehicle: VehicleId) -> u32 {
        self.vehicles[vehicle.index()]
            .onboard
            .iter()
            .map(|&g| self.groups[g.index()].count)
            .sum()
    }

    /// People currently walking `route` (0 for vehicle routes).
    pub fn walkers_on(&self, route: RouteId) -> u32 {
        match self.routes[route.index()].walk_link() {
            Some(link) => link.in_transit.iter().map(|&g| self.groups[g.index()].count).sum(),
            None => 0,
        }
    }

    /// Sum of counts across all groups ever created (conservation checks).
    pub fn total_people_created(&self) -> u64 {
        // Split children and shrunken parents still sum to the original
        // injection totals: splits move count, they never mint it.
        self.groups.iter().map(|g| g.count as u64).sum()
    }

    // ── Group lifecycle ───────────────────────────────────────────────────

    /// Inject a fresh group at cursor 0.
    pub fn spawn_group(&mut self, count: u32, start_time: f64, itinerary: ItineraryId) -> GroupId {
        let id = GroupId(self.groups.len() as u32);
        self.groups.push(PeopleGroup::new(id, count, start_time, itinerary));
        id
    }

    /// Split `excess` people off `parent` into a new group.
    ///
    /// The child inherits the itinerary cursor and a deep copy of the visit
    /// log; the parent shrinks in place.  Caller guarantees
    /// `0 < excess < parent.count` so neither side ends up empty.
    pub fn split_group(&mut self, parent: GroupId, excess: u32) -> GroupId {
        let id = GroupId(self.groups.len() as u32);
        let p = &mut self.groups[parent.index()];
        debug_assert!(excess > 0 && excess < p.count, "split would create an empty group");
        p.count -= excess;
        let child = PeopleGroup {
            id,
            count:      excess,
            start_time: p.start_time,
            itinerary:  p.itinerary,
            cursor:     p.cursor,
            log:        p.log.clone(),
        };
        self.groups.push(child);
        id
    }

    // ── Boarding ──────────────────────────────────────────────────────────

    /// Collect up to `quota` people from `station` whose current leg rides
    /// `route`.
    ///
    /// Scans the waiting list front to back (FIFO), skipping groups destined
    /// elsewhere.  The group that would overflow the quota is split: the
    /// parent boards with the remaining quota, the child keeps the excess and
    /// rejoins the back of the waiting list with the same cursor and a copy
    /// of the log.  Returns the boarded group ids; the total boarded count is
    /// exactly `min(quota, people waiting for this route)`.
    pub fn board(&mut self, station: StationId, quota: u32, route: RouteId) -> Vec<GroupId> {
        let mut boarded = Vec::new();
        if quota == 0 {
            return boarded;
        }

        let mut total = 0u32;
        let mut i = 0;
        while i < self.stations[station.index()].waiting.len() {
            let gid = self.stations[station.index()].waiting[i];
            if self.current_route(gid) != Some(route) {
                i += 1;
                continue;
            }

            let count = self.groups[gid.index()].count;
            if total + count > quota {
                let excess = total + count - quota;
                let child = self.split_group(gid, excess);
                self.stations[station.index()].waiting.remove(i);
                self.stations[station.index()].waiting.push(child);
                boarded.push(gid);
                break;
            }

            self.stations[station.index()].waiting.remove(i);
            boarded.push(gid);
            total += count;
            if total == quota {
                break;
            }
        }

        boarded
    }

    // ── Vehicle lifecycle ─────────────────────────────────────────────────

    /// Instantiate a vehicle for `route` at `stop_index` of `trip`.
    ///
    /// The trip must already have been removed from the route's pending pool
    /// by the spawn loop; ownership moves into the vehicle.
    pub fn spawn_vehicle(
        &mut self,
        route:      RouteId,
        kind:       VehicleKind,
        trip:       Trip,
        stop_index: usize,
        capacity:   u32,
    ) -> VehicleId {
        let id = VehicleId(self.vehicles.len() as u32);
        self.vehicles.push(Transporter::new(id, kind, route, trip, stop_index, capacity));
        id
    }

    /// Active vehicles currently working `route`.
    pub fn active_vehicles_on(&self, route: RouteId) -> u32 {
        self.vehicles
            .iter()
            .filter(|v| v.route == route && v.active)
            .count() as u32
    }
}
