//! The serializable run report consumed by the frontend.
//!
//! Everything here is plain data with `serde::Serialize` derives; the
//! frontend renders routes and shapes on a map and plots the per-station and
//! per-vehicle time series.  An `average_wait` of `None` serializes as
//! `null` — the station never saw a completed wait.

use pt_core::GeoPoint;
use serde::Serialize;

/// Complete output of one simulation run.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub routes:      Vec<RouteReport>,
    pub stations:    Vec<StationReport>,
    pub itineraries: Vec<ItineraryReport>,
    /// Station ids flagged as bottlenecks, in station order.
    pub bottlenecks: Vec<u32>,
}

/// One route's logs and static geometry.
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub id:     u32,
    pub name:   String,
    /// `"bus"`, `"train"`, or `"walk"`.
    pub method: String,
    /// Geometry passthrough for the map; empty for walk routes.
    pub shape: Vec<GeoPoint>,
    /// One entry per vehicle that served this route (vehicle routes only).
    pub vehicles: Vec<VehicleReport>,
    /// One entry per group that walked this leg (walk routes only).
    pub walks: Vec<WalkReportEntry>,
}

/// One vehicle's run.
#[derive(Debug, Serialize)]
pub struct VehicleReport {
    /// Display name, e.g. `B3` or `T7`.
    pub name: String,
    /// `(stop name, wall minute)` in visit order.
    pub arrivals: Vec<(String, f64)>,
    /// `(wall minute, onboard people)` after each load and deload.
    pub occupancy: Vec<(f64, u32)>,
}

/// One group's traversal of a walking leg.
#[derive(Debug, Serialize)]
pub struct WalkReportEntry {
    pub count:    u32,
    pub departed: f64,
    /// `None` if the run ended while the group was still walking.
    pub arrived: Option<f64>,
}

/// One station's series and derived statistics.
#[derive(Debug, Serialize)]
pub struct StationReport {
    pub id:   u32,
    pub name: String,
    pub lat:  f32,
    pub lon:  f32,
    /// `(wall minute, waiting people)` snapshots.
    pub people_over_time: Vec<(f64, u32)>,
    /// Mean observed wait in minutes; `None` when nothing ever waited here.
    pub average_wait: Option<f64>,
    pub bottleneck: bool,
}

/// The station names an itinerary's legs touch, in leg order, deduplicated.
#[derive(Debug, Serialize)]
pub struct ItineraryReport {
    /// The id declared by the planner document, not the internal arena index.
    pub id:       u32,
    pub stations: Vec<String>,
}
