//! `riverside` — a morning peak over a six-station riverside network.
//!
//! Two scheduled services (the 901 bus along the river, the T1 train to the
//! airport) plus a footbridge walk from Harbor to the Museum.  Two suburbs
//! inject commuters at the inner stations over the first half hour.  The run
//! covers 07:00–10:00 and writes the report JSON and CSV series to
//! `output/riverside/`.
//!
//! Run with:
//!   cargo run -p riverside --release

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use pt_core::{RouteId, StationId, VehicleId};
use pt_engine::{Engine, SimObserver};
use pt_model::load_scenario_str;
use pt_output::{CsvExporter, build_report};

// ── Scenario ──────────────────────────────────────────────────────────────────

/// The resolved-itinerary document a trip planner would hand over.  Kept
/// inline so the demo has no runtime file dependencies.
const SCENARIO: &str = r#"{
  "window": { "env_start": 420, "time_horizon": 180, "seed": 7 },
  "stations": [
    { "id": "S1", "name": "Central",    "lat": -37.8102, "lon": 144.9628, "bays": 2 },
    { "id": "S2", "name": "Riverside",  "lat": -37.8183, "lon": 144.9671 },
    { "id": "S3", "name": "Harbor",     "lat": -37.8259, "lon": 144.9741 },
    { "id": "S4", "name": "Museum",     "lat": -37.8280, "lon": 144.9790 },
    { "id": "S5", "name": "University", "lat": -37.7963, "lon": 144.9614 },
    { "id": "S6", "name": "Airport",    "lat": -37.6690, "lon": 144.8410 }
  ],
  "routes": [
    {
      "route_id": "901",
      "mode": "bus",
      "capacity": 60,
      "trips": [
        { "timetable": [["Central", 425], ["Riverside", 440], ["Harbor", 452]] },
        { "timetable": [["Central", 445], ["Riverside", 460], ["Harbor", 472]] },
        { "timetable": [["Central", 465], ["Riverside", 480], ["Harbor", 492]] },
        { "timetable": [["Central", 485], ["Riverside", 500], ["Harbor", 512]] },
        { "timetable": [["Central", 505], ["Riverside", 520], ["Harbor", 532]] }
      ]
    },
    {
      "route_id": "T1",
      "mode": "train",
      "capacity": 300,
      "trips": [
        { "timetable": [["Central", 430], ["University", 441], ["Airport", 468]] },
        { "timetable": [["Central", 470], ["University", 481], ["Airport", 508]] },
        { "timetable": [["Central", 510], ["University", 521], ["Airport", 548]] }
      ]
    }
  ],
  "itineraries": [
    {
      "itinerary_id": 0,
      "routes": [
        { "route_id": "901",  "start": "S1", "end": "S3" },
        { "route_id": "walk", "start": "S3", "end": "S4" }
      ]
    },
    { "itinerary_id": 1, "routes": [{ "route_id": "T1", "start": "S1", "end": "S6" }] },
    { "itinerary_id": 2, "routes": [{ "route_id": "901", "start": "S2", "end": "-1" }] }
  ],
  "suburbs": [
    {
      "name": "Northbank",
      "population": 600,
      "frequency": 5,
      "max_distributes": 4,
      "distribution": [["S1", 70.0], ["S2", 30.0]]
    },
    {
      "name": "Docklands",
      "population": 250,
      "frequency": 10,
      "max_distributes": 2,
      "distribution": [["S1", 100.0]]
    }
  ]
}"#;

// ── Console observer ──────────────────────────────────────────────────────────

/// Prints the notable events of the run and tallies totals for the summary.
#[derive(Default)]
struct ConsoleObserver {
    spawned:    u32,
    terminated: u32,
    boarded:    u64,
    delivered:  u64,
    injected:   u64,
}

impl SimObserver for ConsoleObserver {
    fn on_vehicle_spawned(&mut self, v: VehicleId, _route: RouteId, _s: StationId, wall: f64) {
        self.spawned += 1;
        println!("  {:7.1}  vehicle {} entered service", wall, v.0);
    }

    fn on_vehicle_terminated(&mut self, v: VehicleId, wall: f64) {
        self.terminated += 1;
        println!("  {:7.1}  vehicle {} reached its terminus", wall, v.0);
    }

    fn on_loaded(&mut self, _v: VehicleId, _s: StationId, people: u32, _wall: f64) {
        self.boarded += people as u64;
    }

    fn on_deloaded(&mut self, _v: VehicleId, _s: StationId, people: u32, _wall: f64) {
        self.delivered += people as u64;
    }

    fn on_groups_injected(&mut self, _suburb: &str, _s: StationId, people: u32, _wall: f64) {
        self.injected += people as u64;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== riverside — morning peak, 6 stations, 2 services + footbridge ===");

    let (world, config) = load_scenario_str(SCENARIO).context("resolving scenario")?;
    println!(
        "Window: {}..{} wall minutes  |  seed {}  |  {} stations, {} routes, {} itineraries",
        config.env_start,
        config.horizon_wall(),
        config.seed,
        world.stations.len(),
        world.routes.len(),
        world.itineraries.len(),
    );
    println!();

    let mut engine = Engine::new(world, config.clone());
    let mut obs = ConsoleObserver::default();
    engine.run(&mut obs).context("running simulation")?;

    let world = engine.into_world();
    println!();
    println!(
        "Run complete: {} injected, {} boardings, {} deliveries, {}/{} vehicles finished",
        obs.injected, obs.boarded, obs.delivered, obs.terminated, obs.spawned,
    );

    // ── Output ────────────────────────────────────────────────────────────

    let report = build_report(&world, config.horizon_wall());

    let out_dir = Path::new("output/riverside");
    std::fs::create_dir_all(out_dir).context("creating output directory")?;

    let json = File::create(out_dir.join("report.json"))?;
    serde_json::to_writer_pretty(json, &report).context("writing report.json")?;

    let mut exporter = CsvExporter::new(out_dir)?;
    exporter.export(&report)?;
    exporter.finish()?;

    println!();
    println!("Station averages:");
    for station in &report.stations {
        match station.average_wait {
            Some(avg) => println!(
                "  {:<12} avg wait {:6.1} min{}",
                station.name,
                avg,
                if station.bottleneck { "   << bottleneck" } else { "" },
            ),
            None => println!("  {:<12} no observed waits", station.name),
        }
    }
    println!();
    println!("Report and CSV series written to {}", out_dir.display());

    Ok(())
}
