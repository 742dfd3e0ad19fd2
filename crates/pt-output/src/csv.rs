//! CSV export backend.
//!
//! Creates two files in the configured output directory:
//! - `station_series.csv` — waiting-count snapshots per station
//! - `vehicle_occupancy.csv` — onboard-count snapshots per vehicle

use std::fs::File;
use std::path::Path;

use ::csv::Writer;

use crate::error::OutputResult;
use crate::report::SimulationReport;

/// Writes the report's time series to two CSV files.
pub struct CsvExporter {
    stations: Writer<File>,
    vehicles: Writer<File>,
    finished: bool,
}

impl CsvExporter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut stations = Writer::from_path(dir.join("station_series.csv"))?;
        stations.write_record(["station_id", "station", "wall_minute", "people"])?;

        let mut vehicles = Writer::from_path(dir.join("vehicle_occupancy.csv"))?;
        vehicles.write_record(["vehicle", "route", "wall_minute", "people"])?;

        Ok(Self { stations, vehicles, finished: false })
    }

    /// Write every series in `report`.
    pub fn export(&mut self, report: &SimulationReport) -> OutputResult<()> {
        for station in &report.stations {
            for &(at, people) in &station.people_over_time {
                self.stations.write_record(&[
                    station.id.to_string(),
                    station.name.clone(),
                    at.to_string(),
                    people.to_string(),
                ])?;
            }
        }
        for route in &report.routes {
            for vehicle in &route.vehicles {
                for &(at, people) in &vehicle.occupancy {
                    self.vehicles.write_record(&[
                        vehicle.name.clone(),
                        route.name.clone(),
                        at.to_string(),
                        people.to_string(),
                    ])?;
                }
            }
        }
        Ok(())
    }

    /// Flush and close both files.
    ///
    /// Idempotent — safe to call more than once.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stations.flush()?;
        self.vehicles.flush()?;
        Ok(())
    }
}
