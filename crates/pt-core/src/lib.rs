//! `pt-core` — foundational types for the `pt` transit passenger-flow simulator.
//!
//! This crate is a dependency of every other `pt-*` crate.  It intentionally
//! has no `pt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                |
//! |-----------|---------------------------------------------------------|
//! | [`ids`]   | `StationId`, `RouteId`, `TripId`, `VehicleId`, …        |
//! | [`geo`]   | `GeoPoint` (station positions, route shapes)            |
//! | [`time`]  | `SimTime`, `SimClock`, `SimConfig`                      |
//! | [`rng`]   | `SimRng` (single seeded stream for the whole run)       |
//! | [`error`] | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{GroupId, ItineraryId, RouteId, StationId, TripId, VehicleId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, SimTime};
