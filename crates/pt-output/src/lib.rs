//! `pt-output` — post-run aggregation for the pt transit simulator.
//!
//! Once the engine finishes, the world is a pile of per-entity logs: station
//! waiting-count snapshots, vehicle arrival and occupancy series, walk-leg
//! records, and each group's visit trail.  This crate traverses those logs
//! once and produces:
//!
//! - a serializable [`SimulationReport`] (routes, stations, itineraries,
//!   average waits, bottleneck flags) for the frontend,
//! - CSV exports of the station and vehicle time series.
//!
//! | Module      | Contents                                         |
//! |-------------|--------------------------------------------------|
//! | [`report`]  | report data types (`serde::Serialize`)           |
//! | [`stats`]   | wait averages, mean/std, bottleneck z-scores     |
//! | [`collect`] | `build_report` — world → `SimulationReport`      |
//! | [`csv`]     | `CsvExporter` file backend                       |

pub mod collect;
pub mod csv;
pub mod error;
pub mod report;
pub mod stats;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use collect::build_report;
pub use error::{OutputError, OutputResult};
pub use self::csv::CsvExporter;
pub use report::{
    ItineraryReport, RouteReport, SimulationReport, StationReport, VehicleReport, WalkReportEntry,
};
