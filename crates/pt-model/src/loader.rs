//! Scenario loader.
//!
//! Deserializes the resolved-itinerary document handed over by the trip
//! planner and builds the world arenas from it.  The document carries exactly
//! the external inputs the simulator depends on:
//!
//! - stations with static attributes (id, name, lat/lon, suburb),
//! - vehicle routes with their trips (`(station name, minute-of-day)` pairs),
//! - itineraries as ordered `{route_id, start, end}` legs, where
//!   `route_id == "walk"` denotes a walking leg,
//! - suburb activation (population, frequency, rounds, weights),
//! - the simulation window (`env_start`, `time_horizon`).
//!
//! # Resolution rules
//!
//! Routes are materialized only when an itinerary references them.  A
//! referenced vehicle route with no trip overlapping the window is a hard
//! [`ModelError::MissingTrips`] — the run cannot proceed without a schedule.
//! Walking legs materialize one shared walk route per `(start, end)` pair.
//! An `end` of `"-1"` (the planner's "ride to the terminus" marker) or a
//! missing `end` resolves to a destination of `None` on vehicle legs and is
//! rejected on walking legs, which always need a concrete target.

use std::io::Read;

use serde::Deserialize;

use pt_core::{GeoPoint, RouteId, SimConfig, StationId, TripId};
use rustc_hash::FxHashMap;

use crate::error::{ModelError, ModelResult};
use crate::itinerary::Leg;
use crate::route::{Route, RouteKind, VehicleService, WalkLink};
use crate::station::Station;
use crate::suburb::Suburb;
use crate::trip::{TimetableEntry, Trip};
use crate::world::World;

// ── Input document ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScenarioSpec {
    pub window:      WindowSpec,
    pub stations:    Vec<StationSpec>,
    #[serde(default)]
    pub routes:      Vec<RouteSpec>,
    pub itineraries: Vec<ItinerarySpec>,
    #[serde(default)]
    pub suburbs:     Vec<SuburbSpec>,
}

#[derive(Debug, Deserialize)]
pub struct WindowSpec {
    /// Minutes since midnight at which the window opens.
    pub env_start: u32,
    /// Minutes of virtual time to simulate.
    pub time_horizon: f64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub strict_timetables: bool,
}

#[derive(Debug, Deserialize)]
pub struct StationSpec {
    pub id:   String,
    pub name: String,
    pub lat:  f32,
    pub lon:  f32,
    #[serde(default)]
    pub suburb: Option<String>,
    /// Concurrent docking bays; falls back to `SimConfig::default_bays`.
    #[serde(default)]
    pub bays: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RouteSpec {
    pub route_id: String,
    #[serde(default)]
    pub mode: RouteMode,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    /// Max concurrently active vehicles; effectively unbounded by default.
    #[serde(default = "default_spawn_budget")]
    pub spawn_budget: u32,
    #[serde(default)]
    pub shape: Vec<[f32; 2]>,
    pub trips: Vec<TripSpec>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    #[default]
    Bus,
    Train,
}

#[derive(Debug, Deserialize)]
pub struct TripSpec {
    /// `(station name, scheduled minute of day)`, in stop order.
    pub timetable: Vec<(String, u32)>,
}

#[derive(Debug, Deserialize)]
pub struct ItinerarySpec {
    pub itinerary_id: u32,
    pub routes: Vec<LegSpec>,
}

#[derive(Debug, Deserialize)]
pub struct LegSpec {
    pub route_id: String,
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuburbSpec {
    pub name: String,
    pub population: u32,
    pub frequency: u32,
    pub max_distributes: u32,
    #[serde(default = "default_true")]
    pub active: bool,
    /// `(station id, percent of a round's target)`.
    pub distribution: Vec<(String, f64)>,
}

fn default_capacity() -> u32 {
    50
}

fn default_spawn_budget() -> u32 {
    u32::MAX
}

fn default_true() -> bool {
    true
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a scenario document from any `Read` source and resolve it.
pub fn load_scenario<R: Read>(reader: R) -> ModelResult<(World, SimConfig)> {
    let spec: ScenarioSpec =
        serde_json::from_reader(reader).map_err(|e| ModelError::Parse(e.to_string()))?;
    resolve(&spec)
}

/// Like [`load_scenario`] but from an in-memory string.  Useful for tests.
pub fn load_scenario_str(json: &str) -> ModelResult<(World, SimConfig)> {
    let spec: ScenarioSpec =
        serde_json::from_str(json).map_err(|e| ModelError::Parse(e.to_string()))?;
    resolve(&spec)
}

/// Resolve a parsed spec into a ready-to-run world.
pub fn resolve(spec: &ScenarioSpec) -> ModelResult<(World, SimConfig)> {
    let config = SimConfig {
        env_start:         spec.window.env_start,
        horizon:           spec.window.time_horizon,
        seed:              spec.window.seed,
        strict_timetables: spec.window.strict_timetables,
        ..SimConfig::default()
    };

    let mut world = World::new();

    // ── Stations: one per declared id, attributes passed through ──────────
    let mut station_by_id: FxHashMap<&str, StationId> = FxHashMap::default();
    let mut station_by_name: FxHashMap<&str, StationId> = FxHashMap::default();
    for s in &spec.stations {
        let id = StationId(world.stations.len() as u32);
        world.add_station(Station::new(
            id,
            s.name.clone(),
            GeoPoint::new(s.lat, s.lon),
            s.bays.unwrap_or(config.default_bays),
        ));
        station_by_id.insert(s.id.as_str(), id);
        station_by_name.insert(s.name.as_str(), id);
    }

    // ── Routes: materialized on first itinerary reference ─────────────────
    let specs_by_id: FxHashMap<&str, &RouteSpec> =
        spec.routes.iter().map(|r| (r.route_id.as_str(), r)).collect();
    let mut vehicle_routes: FxHashMap<&str, RouteId> = FxHashMap::default();
    let mut walk_routes: FxHashMap<(StationId, StationId), RouteId> = FxHashMap::default();

    let horizon_wall = config.horizon_wall();

    for itin in &spec.itineraries {
        if itin.routes.is_empty() {
            return Err(ModelError::EmptyItinerary(itin.itinerary_id));
        }

        let mut legs = Vec::with_capacity(itin.routes.len());
        for leg in &itin.routes {
            let dest = match leg.end.as_deref() {
                None | Some("-1") => None,
                Some(id) => Some(lookup_station(&station_by_id, id)?),
            };

            let route = if leg.route_id == "walk" {
                let start = lookup_station(&station_by_id, &leg.start)?;
                let end = dest.ok_or_else(|| ModelError::WalkWithoutDestination {
                    start: leg.start.clone(),
                })?;
                *walk_routes.entry((start, end)).or_insert_with(|| {
                    let id = RouteId(world.routes.len() as u32);
                    world.add_route(Route::new(
                        id,
                        format!("walk:{start}->{end}"),
                        vec![start, end],
                        RouteKind::Walk(WalkLink::new(1.0)),
                    ))
                })
            } else {
                match vehicle_routes.get(leg.route_id.as_str()) {
                    Some(&id) => id,
                    None => {
                        let rspec = specs_by_id
                            .get(leg.route_id.as_str())
                            .ok_or_else(|| ModelError::UnknownRoute(leg.route_id.clone()))?;
                        let id = build_vehicle_route(
                            &mut world,
                            rspec,
                            &station_by_name,
                            config.env_start,
                            horizon_wall,
                        )?;
                        vehicle_routes.insert(leg.route_id.as_str(), id);
                        id
                    }
                }
            };

            legs.push(Leg { route, dest });
        }
        let iid = world.add_itinerary(legs);
        world.itineraries[iid.index()].planner_id = itin.itinerary_id;
    }

    // ── Suburbs ───────────────────────────────────────────────────────────
    for s in &spec.suburbs {
        let mut weights = Vec::with_capacity(s.distribution.len());
        for (station, percent) in &s.distribution {
            weights.push((lookup_station(&station_by_id, station)?, *percent));
        }
        world.suburbs.push(Suburb::new(
            s.name.clone(),
            weights,
            s.population,
            s.frequency,
            s.max_distributes,
            s.active,
        ));
    }

    world.build_index();
    Ok((world, config))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn lookup_station(map: &FxHashMap<&str, StationId>, id: &str) -> ModelResult<StationId> {
    map.get(id).copied().ok_or_else(|| ModelError::UnknownStation(id.to_string()))
}

fn build_vehicle_route(
    world:           &mut World,
    rspec:           &RouteSpec,
    station_by_name: &FxHashMap<&str, StationId>,
    env_start:       u32,
    horizon_wall:    f64,
) -> ModelResult<RouteId> {
    // Keep only trips that overlap the simulated window.
    let mut trips = Vec::new();
    for (i, t) in rspec.trips.iter().enumerate() {
        if t.timetable.len() < 2 {
            return Err(ModelError::DegenerateTimetable { route: rspec.route_id.clone() });
        }
        let first = t.timetable[0].1;
        let last = t.timetable[t.timetable.len() - 1].1;
        if (last as f64) < env_start as f64 || (first as f64) > horizon_wall {
            continue;
        }
        let timetable = t
            .timetable
            .iter()
            .map(|(name, minute)| {
                Ok(TimetableEntry {
                    station: lookup_station(station_by_name, name)?,
                    minute:  *minute,
                })
            })
            .collect::<ModelResult<Vec<_>>>()?;
        trips.push(Trip::new(TripId(i as u32), timetable));
    }

    if trips.is_empty() {
        return Err(ModelError::MissingTrips { route: rspec.route_id.clone() });
    }

    // The stop sequence is the longest trip's station order; shorter trips
    // are partial runs over the same stops.
    let stops: Vec<StationId> = trips
        .iter()
        .max_by_key(|t| t.len())
        .map(|t| t.timetable.iter().map(|e| e.station).collect())
        .unwrap_or_default();
    if stops.len() < 2 {
        return Err(ModelError::DegenerateTimetable { route: rspec.route_id.clone() });
    }

    let service = VehicleService {
        pending_trips: trips,
        spawn_budget:  rspec.spawn_budget,
        capacity:      rspec.capacity,
        shape:         rspec.shape.iter().map(|&[lat, lon]| GeoPoint::new(lat, lon)).collect(),
    };
    let kind = match rspec.mode {
        RouteMode::Bus   => RouteKind::Bus(service),
        RouteMode::Train => RouteKind::Train(service),
    };

    let id = RouteId(world.routes.len() as u32);
    Ok(world.add_route(Route::new(id, rspec.route_id.clone(), stops, kind)))
}
