//! Assembling the run report from a finished world.

use pt_model::{RouteKind, World};

use crate::report::{
    ItineraryReport, RouteReport, SimulationReport, StationReport, VehicleReport, WalkReportEntry,
};
use crate::stats;

/// Traverse the world's accumulated logs and build the full report.
///
/// `horizon_wall` is the wall minute the run ended at; it closes the open
/// final wait of every group still parked somewhere.
pub fn build_report(world: &World, horizon_wall: f64) -> SimulationReport {
    let averages = stats::average_waits(world, horizon_wall);
    let flags = stats::flag_bottlenecks(&averages);

    let stations = world
        .stations
        .iter()
        .map(|s| StationReport {
            id:               s.id.0,
            name:             s.name.clone(),
            lat:              s.pos.lat,
            lon:              s.pos.lon,
            people_over_time: s.people_over_time.clone(),
            average_wait:     averages[s.id.index()],
            bottleneck:       flags[s.id.index()],
        })
        .collect();

    let routes = world.routes.iter().map(|r| route_report(world, r)).collect();

    let itineraries = world
        .itineraries
        .iter()
        .map(|itin| {
            let mut names: Vec<String> = Vec::new();
            for leg in &itin.legs {
                for &stop in &world.route(leg.route).stops {
                    let name = &world.station(stop).name;
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }
            }
            ItineraryReport { id: itin.planner_id, stations: names }
        })
        .collect();

    let bottlenecks = stats::bottleneck_ids(&flags).into_iter().map(|id| id.0).collect();

    SimulationReport { routes, stations, itineraries, bottlenecks }
}

fn route_report(world: &World, route: &pt_model::Route) -> RouteReport {
    let (shape, vehicles, walks) = match &route.kind {
        RouteKind::Bus(service) | RouteKind::Train(service) => {
            let vehicles = world
                .vehicles
                .iter()
                .filter(|v| v.route == route.id)
                .map(|v| VehicleReport {
                    name:      v.name(),
                    arrivals:  v.arrivals.clone(),
                    occupancy: v.occupancy.clone(),
                })
                .collect();
            (service.shape.clone(), vehicles, Vec::new())
        }
        RouteKind::Walk(link) => {
            let walks = link
                .log
                .iter()
                .map(|rec| WalkReportEntry {
                    count:    rec.count,
                    departed: rec.departed,
                    arrived:  rec.arrived,
                })
                .collect();
            (Vec::new(), Vec::new(), walks)
        }
    };

    RouteReport {
        id: route.id.0,
        name: route.name.clone(),
        method: route.method().to_string(),
        shape,
        vehicles,
        walks,
    }
}
