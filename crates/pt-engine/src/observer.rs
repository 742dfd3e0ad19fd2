//! Simulation observer trait for progress reporting and event logging.

use pt_core::{GroupId, RouteId, StationId, VehicleId};

/// Callbacks invoked by [`Engine::run`][crate::Engine::run] at the event
/// points of a run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Empty-event conditions (nobody to
/// board, no free seats) are surfaced here rather than treated as errors;
/// the affected process simply proceeds.
///
/// # Example — departure printer
///
/// ```rust,ignore
/// struct DeloadPrinter;
///
/// impl SimObserver for DeloadPrinter {
///     fn on_deloaded(&mut self, v: VehicleId, s: StationId, people: u32, wall: f64) {
///         println!("{wall:.1}: {v} dropped {people} at {s}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// A pending trip matched the clock and produced a vehicle at `station`.
    fn on_vehicle_spawned(
        &mut self,
        _vehicle: VehicleId,
        _route:   RouteId,
        _station: StationId,
        _wall:    f64,
    ) {
    }

    /// The vehicle completed its terminal deload and despawned.
    fn on_vehicle_terminated(&mut self, _vehicle: VehicleId, _wall: f64) {}

    /// `people` boarded `vehicle` at `station`.
    fn on_loaded(&mut self, _vehicle: VehicleId, _station: StationId, _people: u32, _wall: f64) {}

    /// `people` left `vehicle` at `station` (delivery happens once the
    /// deload time has elapsed).
    fn on_deloaded(&mut self, _vehicle: VehicleId, _station: StationId, _people: u32, _wall: f64) {
    }

    /// The vehicle docked but nobody was waiting for its route.
    fn on_no_passengers(&mut self, _vehicle: VehicleId, _station: StationId, _wall: f64) {}

    /// The vehicle docked with no free seats.
    fn on_no_seats(&mut self, _vehicle: VehicleId, _station: StationId, _wall: f64) {}

    /// Nobody aboard gets off at this stop.
    fn on_no_deload(&mut self, _vehicle: VehicleId, _station: StationId, _wall: f64) {}

    /// A zero/negative timetable delta was clamped to one minute (only ever
    /// fires outside strict mode).
    fn on_delta_clamped(&mut self, _route: RouteId, _from: StationId, _to: StationId) {}

    /// A suburb injected a fresh group of `people` at `station`.
    fn on_groups_injected(&mut self, _suburb: &str, _station: StationId, _people: u32, _wall: f64) {
    }

    /// A group's embarkation delay expired and it started walking.
    fn on_walk_departed(&mut self, _group: GroupId, _route: RouteId, _wall: f64) {}

    /// A walking group reached its destination station.
    fn on_walk_arrived(&mut self, _group: GroupId, _route: RouteId, _wall: f64) {}

    /// The run finished — queue drained or horizon reached.
    fn on_sim_end(&mut self, _wall: f64) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
