use pt_core::{GeoPoint, RouteId, SimConfig, SimTime, StationId, TripId, VehicleId};
use pt_model::{
    Leg, Route, RouteKind, Station, Suburb, TimetableEntry, Trip, VehicleService, WalkLink, World,
};

use crate::process::ProcessId;
use crate::{BayPool, Engine, EngineError, EventQueue, NoopObserver, SimObserver, service};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn station(world: &mut World, name: &str, bays: u32) -> StationId {
    let id = StationId(world.stations.len() as u32);
    world.add_station(Station::new(id, name, GeoPoint::default(), bays))
}

fn bus_route(world: &mut World, timetables: &[Vec<(StationId, u32)>], capacity: u32) -> RouteId {
    let id = RouteId(world.routes.len() as u32);
    let stops = timetables[0].iter().map(|&(s, _)| s).collect();
    let trips = timetables
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Trip::new(
                TripId(i as u32),
                t.iter()
                    .map(|&(station, minute)| TimetableEntry { station, minute })
                    .collect(),
            )
        })
        .collect();
    world.add_route(Route::new(
        id,
        format!("r{}", id.0),
        stops,
        RouteKind::Bus(VehicleService {
            pending_trips: trips,
            spawn_budget: u32::MAX,
            capacity,
            shape: Vec::new(),
        }),
    ))
}

fn walk_route(world: &mut World, from: StationId, to: StationId) -> RouteId {
    let id = RouteId(world.routes.len() as u32);
    world.add_route(Route::new(
        id,
        "footpath",
        vec![from, to],
        RouteKind::Walk(WalkLink::new(1.0)),
    ))
}

fn config(seed: u64) -> SimConfig {
    SimConfig { horizon: 200.0, seed, ..SimConfig::default() }
}

/// Counts observer callbacks; used to assert which events fired.
#[derive(Default)]
struct Counter {
    spawned:    u32,
    terminated: u32,
    loaded:     u32,
    deloaded:   u32,
    no_deload:  u32,
    clamped:    u32,
    injected:   u32,
}

impl SimObserver for Counter {
    fn on_vehicle_spawned(&mut self, _: VehicleId, _: RouteId, _: StationId, _: f64) {
        self.spawned += 1;
    }
    fn on_vehicle_terminated(&mut self, _: VehicleId, _: f64) {
        self.terminated += 1;
    }
    fn on_loaded(&mut self, _: VehicleId, _: StationId, people: u32, _: f64) {
        self.loaded += people;
    }
    fn on_deloaded(&mut self, _: VehicleId, _: StationId, people: u32, _: f64) {
        self.deloaded += people;
    }
    fn on_no_deload(&mut self, _: VehicleId, _: StationId, _: f64) {
        self.no_deload += 1;
    }
    fn on_delta_clamped(&mut self, _: RouteId, _: StationId, _: StationId) {
        self.clamped += 1;
    }
    fn on_groups_injected(&mut self, _: &str, _: StationId, people: u32, _: f64) {
        self.injected += people;
    }
}

// ── Event queue ───────────────────────────────────────────────────────────────

mod queue {
    use super::*;

    #[test]
    fn pops_earliest_first() {
        let mut q = EventQueue::new();
        q.push(SimTime(5.0), ProcessId(0));
        q.push(SimTime(3.0), ProcessId(1));
        q.push(SimTime(8.0), ProcessId(2));

        assert_eq!(q.pop().unwrap().proc, ProcessId(1));
        assert_eq!(q.pop().unwrap().proc, ProcessId(0));
        assert_eq!(q.pop().unwrap().proc, ProcessId(2));
        assert!(q.pop().is_none());
    }

    #[test]
    fn equal_times_pop_in_insertion_order() {
        let mut q = EventQueue::new();
        for i in 0..50 {
            q.push(SimTime(7.0), ProcessId(i));
        }
        for i in 0..50 {
            assert_eq!(q.pop().unwrap().proc, ProcessId(i));
        }
    }

    #[test]
    fn peek_does_not_consume() {
        let mut q = EventQueue::new();
        q.push(SimTime(2.5), ProcessId(0));
        assert_eq!(q.peek_time(), Some(SimTime(2.5)));
        assert_eq!(q.len(), 1);
    }
}

// ── Bay pool ──────────────────────────────────────────────────────────────────

mod bays {
    use super::*;

    #[test]
    fn grants_up_to_capacity_then_queues() {
        let mut pool = BayPool::new(2);
        assert!(pool.try_acquire(ProcessId(0)));
        assert!(pool.try_acquire(ProcessId(1)));
        assert!(!pool.try_acquire(ProcessId(2)));
        assert_eq!(pool.in_use(), 2);
        assert_eq!(pool.queued(), 1);
    }

    #[test]
    fn release_hands_the_next_waiter_back() {
        let mut pool = BayPool::new(1);
        assert!(pool.try_acquire(ProcessId(0)));
        assert!(!pool.try_acquire(ProcessId(1)));
        assert!(!pool.try_acquire(ProcessId(2)));

        assert_eq!(pool.release(), Some(ProcessId(1)));
        assert_eq!(pool.in_use(), 0);
        assert!(pool.try_acquire(ProcessId(1)));
        assert_eq!(pool.release(), Some(ProcessId(2)));
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut pool = BayPool::new(0);
        assert!(pool.try_acquire(ProcessId(0)));
        assert_eq!(pool.capacity(), 1);
    }
}

// ── Service-time sampling ─────────────────────────────────────────────────────

mod sampling {
    use super::*;
    use pt_core::SimRng;

    #[test]
    fn tiny_std_returns_the_expectation_exactly() {
        let mut rng = SimRng::new(1);
        assert_eq!(service::sample_duration(&mut rng, 12.0, 0.9), 12.0);
        assert_eq!(service::sample_duration(&mut rng, 12.0, 0.0), 12.0);
    }

    #[test]
    fn samples_stay_in_the_rejection_window() {
        let mut rng = SimRng::new(99);
        for _ in 0..500 {
            let x = service::sample_duration(&mut rng, 10.0, 5.0);
            assert!((10.0..=15.0).contains(&x), "sample {x} escaped the window");
        }
    }

    #[test]
    fn uncongested_travel_matches_the_timetable() {
        let mut rng = SimRng::new(4);
        // Congestion 0 gives std 0, so the delta is exact.
        assert_eq!(service::travel_minutes(&mut rng, 30.0, 0), 30.0);
    }

    #[test]
    fn lone_walker_gets_an_exact_base_walk() {
        let mut rng = SimRng::new(4);
        // walkers = 0: multiplier 1, std 0, so the duration is the raw base.
        let d = service::walk_minutes(&mut rng, 1.0, 0);
        assert!((5.0..20.0).contains(&d));
    }
}

// ── Vehicle line scenarios ────────────────────────────────────────────────────

mod line {
    use super::*;

    /// Two-stop line, one trip, everyone fits: the whole crowd ends up at
    /// the far stop and the vehicle despawns.
    #[test]
    fn two_stop_line_delivers_everyone() {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 1);
        let route = bus_route(&mut world, &[vec![(a, 0), (b, 30)]], 120);
        let itin = world.add_itinerary(vec![Leg { route, dest: Some(b) }]);
        world.build_index();

        let mut engine = Engine::new(world, config(42));
        engine.inject(100, a, itin);
        let mut counter = Counter::default();
        engine.run(&mut counter).unwrap();

        let world = &engine.world;
        assert_eq!(world.station_people(a), 0);
        assert_eq!(world.station_people(b), 100);
        assert_eq!(counter.spawned, 1);
        assert_eq!(counter.loaded, 100);
        assert_eq!(counter.deloaded, 100);
        // Nobody gets off at the boarding stop.
        assert_eq!(counter.no_deload, 1);
        assert_eq!(counter.terminated, 1);

        // Loading 100 at 0.1 min each lands in [10, 11] (congestion 1);
        // travel is the exact 30 (platform empty after boarding); terminal
        // deload is the exact 10.  Delivery therefore falls in [50, 51].
        let &(at, count) = world.station(b).people_over_time.last().unwrap();
        assert_eq!(count, 100);
        assert!((50.0..=51.0).contains(&at), "delivered at {at}");

        let v = world.vehicle(VehicleId(0));
        assert!(!v.active);
        assert_eq!(v.arrivals[0], ("A".to_string(), 0.0));
        assert_eq!(v.arrivals[1].0, "B");
        assert!((40.0..=41.0).contains(&v.arrivals[1].1));

        // Journey complete: cursor past the final leg.
        for &gid in &world.station(b).waiting {
            assert!(world.itineraries[world.group(gid).itinerary.index()]
                .is_complete(world.group(gid).cursor));
        }
    }

    /// Vehicle already mid-route when the window opens: the spawner matches
    /// a non-first timetable entry and the vehicle starts there.
    #[test]
    fn window_opening_mid_trip_spawns_mid_route() {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 1);
        let route = bus_route(&mut world, &[vec![(a, 0), (b, 30)]], 50);
        world.add_itinerary(vec![Leg { route, dest: Some(b) }]);
        world.build_index();

        let cfg = SimConfig { env_start: 30, horizon: 60.0, ..SimConfig::default() };
        let mut engine = Engine::new(world, cfg);
        engine.run(&mut NoopObserver).unwrap();

        let v = engine.world.vehicle(VehicleId(0));
        assert_eq!(v.arrivals, vec![("B".to_string(), 30.0)]);
        assert!(!v.active);
    }

    /// One bay, two simultaneous trips: the second vehicle cannot dock until
    /// the first departs, so its arrival log starts at the first's departure.
    #[test]
    fn single_bay_serializes_docking() {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 2);
        let route =
            bus_route(&mut world, &[vec![(a, 0), (b, 30)], vec![(a, 0), (b, 30)]], 60);
        let itin = world.add_itinerary(vec![Leg { route, dest: Some(b) }]);
        world.build_index();

        let mut engine = Engine::new(world, config(3));
        engine.inject(50, a, itin);
        engine.run(&mut NoopObserver).unwrap();

        // First vehicle boards all 50 (5 min exactly: congestion 0 keeps the
        // std below a minute) and departs at t=5; the second docks then.
        let first = engine.world.vehicle(VehicleId(0));
        let second = engine.world.vehicle(VehicleId(1));
        assert_eq!(first.arrivals[0], ("A".to_string(), 0.0));
        assert_eq!(second.arrivals[0], ("A".to_string(), 5.0));
        assert_eq!(engine.world.station_people(b), 50);
    }

    /// Over-capacity crowd: boarding splits the group, the residue waits
    /// with the same cursor, and no occupancy point ever exceeds capacity.
    #[test]
    fn capacity_bounds_every_occupancy_point() {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 1);
        let route =
            bus_route(&mut world, &[vec![(a, 0), (b, 30)], vec![(a, 10), (b, 40)]], 60);
        let itin = world.add_itinerary(vec![Leg { route, dest: Some(b) }]);
        world.build_index();

        let mut engine = Engine::new(world, config(11));
        engine.inject(150, a, itin);
        engine.run(&mut NoopObserver).unwrap();

        let world = &engine.world;
        for v in &world.vehicles {
            for &(_, occ) in &v.occupancy {
                assert!(occ <= v.capacity, "occupancy {occ} over capacity {}", v.capacity);
            }
        }
        // 60 + 60 delivered, 30 left behind; a split happened.
        assert_eq!(world.station_people(b), 120);
        assert_eq!(world.station_people(a), 30);
        assert!(world.groups.len() > 1);
        assert_eq!(world.total_people_created(), 150);
    }

    #[test]
    fn strict_mode_rejects_non_positive_deltas() {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 1);
        let route = bus_route(&mut world, &[vec![(a, 5), (b, 5)]], 50);
        world.add_itinerary(vec![Leg { route, dest: Some(b) }]);
        world.build_index();

        let cfg = SimConfig { strict_timetables: true, horizon: 60.0, ..SimConfig::default() };
        let mut engine = Engine::new(world, cfg);
        let result = engine.run(&mut NoopObserver);
        assert!(matches!(result, Err(EngineError::CorruptTimetable { delta: 0, .. })));
    }

    #[test]
    fn lenient_mode_clamps_the_delta_to_one_minute() {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 1);
        let route = bus_route(&mut world, &[vec![(a, 5), (b, 5)]], 50);
        world.add_itinerary(vec![Leg { route, dest: Some(b) }]);
        world.build_index();

        let mut engine = Engine::new(world, config(1));
        let mut counter = Counter::default();
        engine.run(&mut counter).unwrap();

        assert_eq!(counter.clamped, 1);
        let v = engine.world.vehicle(VehicleId(0));
        assert_eq!(v.arrivals[1], ("B".to_string(), 6.0));
    }
}

// ── Walking legs ──────────────────────────────────────────────────────────────

mod walking {
    use super::*;

    #[test]
    fn embark_delay_then_walk_then_delivery() {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 1);
        let walk = walk_route(&mut world, a, b);
        let itin = world.add_itinerary(vec![Leg { route: walk, dest: Some(b) }]);
        world.build_index();

        let mut engine = Engine::new(world, config(8));
        let gid = engine.inject(10, a, itin);
        engine.run(&mut NoopObserver).unwrap();

        let world = &engine.world;
        assert_eq!(world.station_people(a), 0);
        assert_eq!(world.station_people(b), 10);

        // Departure at exactly the embark delay; 10 walkers give a 1.1
        // multiplier on the 5-20 base and an std below a minute, so the
        // walk is its exact expectation.
        let link = world.route(walk).walk_link().unwrap();
        assert_eq!(link.log.len(), 1);
        assert_eq!(link.log[0].departed, 1.0);
        assert_eq!(link.log[0].count, 10);
        let arrived = link.log[0].arrived.unwrap();
        assert!(arrived > 1.0 + 5.0 && arrived < 1.0 + 22.0, "arrived at {arrived}");
        assert!(link.in_transit.is_empty());

        assert!(world.itineraries[0].is_complete(world.group(gid).cursor));
    }

    #[test]
    fn walkers_stay_listed_at_origin_until_embarkation() {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 1);
        let walk = walk_route(&mut world, a, b);
        let itin = world.add_itinerary(vec![Leg { route: walk, dest: Some(b) }]);
        world.build_index();

        let mut engine = Engine::new(world, config(8));
        engine.inject(4, a, itin);

        // Before the run the embark timer has not fired: the group still
        // counts toward the origin's waiting total.
        assert_eq!(engine.world.station_people(a), 4);
        assert_eq!(engine.world.station(a).people_over_time, vec![(0.0, 4)]);

        engine.run(&mut NoopObserver).unwrap();
        assert_eq!(engine.world.station_people(a), 0);
    }

    #[test]
    fn raising_the_horizon_resumes_where_the_run_stopped() {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 1);
        let walk = walk_route(&mut world, a, b);
        let itin = world.add_itinerary(vec![Leg { route: walk, dest: Some(b) }]);
        world.build_index();

        // The embark wake at t=1 lies past this horizon; it must stay queued
        // rather than being consumed by the cutoff check.
        let cfg = SimConfig { horizon: 0.5, seed: 8, ..SimConfig::default() };
        let mut engine = Engine::new(world, cfg);
        engine.inject(6, a, itin);
        engine.run(&mut NoopObserver).unwrap();
        assert_eq!(engine.world.station_people(a), 6);

        engine.config.horizon = 200.0;
        engine.run(&mut NoopObserver).unwrap();
        assert_eq!(engine.world.station_people(a), 0);
        assert_eq!(engine.world.station_people(b), 6);
    }
}

// ── Suburb distribution ───────────────────────────────────────────────────────

mod suburbs {
    use super::*;

    fn suburb_world() -> (World, StationId, StationId) {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 1);
        let route = bus_route(&mut world, &[vec![(a, 0), (b, 30)]], 50);
        world.add_itinerary(vec![Leg { route, dest: Some(b) }]);
        world.build_index();
        (world, a, b)
    }

    #[test]
    fn injects_exactly_the_population_across_rounds() {
        let (mut world, a, b) = suburb_world();
        world.suburbs.push(Suburb::new(
            "north",
            vec![(a, 50.0), (b, 50.0)],
            100,
            5,
            3,
            true,
        ));

        let mut engine = Engine::new(world, config(21));
        let mut counter = Counter::default();
        engine.run(&mut counter).unwrap();

        // Three scheduled rounds (t = 0, 5, 10): 34 + 34 + 32 drains the pool.
        assert_eq!(counter.injected, 100);
        assert_eq!(engine.world.total_people_created(), 100);
        assert_eq!(engine.world.suburbs[0].remaining, 0);
        assert_eq!(engine.world.suburbs[0].rounds_done, 3);
    }

    #[test]
    fn nobody_vanishes() {
        let (mut world, a, b) = suburb_world();
        world.suburbs.push(Suburb::new(
            "north",
            vec![(a, 60.0), (b, 40.0)],
            200,
            2,
            4,
            true,
        ));

        let mut engine = Engine::new(world, config(33));
        engine.run(&mut NoopObserver).unwrap();

        // Everyone injected is resting at a station or aboard a vehicle.
        let world = &engine.world;
        let at_stations: u32 =
            (0..world.stations.len()).map(|i| world.station_people(StationId(i as u32))).sum();
        let aboard: u32 = (0..world.vehicles.len())
            .map(|i| world.vehicle_occupancy(VehicleId(i as u32)))
            .sum();
        let walking: u32 =
            (0..world.routes.len()).map(|i| world.walkers_on(RouteId(i as u32))).sum();
        assert_eq!(at_stations + aboard + walking, 200);
        assert_eq!(world.total_people_created(), 200);
    }

    #[test]
    fn inactive_suburbs_never_inject() {
        let (mut world, a, b) = suburb_world();
        world.suburbs.push(Suburb::new("south", vec![(a, 50.0), (b, 50.0)], 80, 5, 2, false));

        let mut engine = Engine::new(world, config(2));
        engine.run(&mut NoopObserver).unwrap();
        assert_eq!(engine.world.total_people_created(), 0);
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

mod determinism {
    use super::*;

    fn busy_run(seed: u64) -> World {
        let mut world = World::new();
        let a = station(&mut world, "A", 1);
        let b = station(&mut world, "B", 1);
        let c = station(&mut world, "C", 1);
        let route = bus_route(
            &mut world,
            &[vec![(a, 0), (b, 20), (c, 35)], vec![(a, 10), (b, 30), (c, 45)]],
            60,
        );
        let itin = world.add_itinerary(vec![Leg { route, dest: Some(c) }]);
        world.suburbs.push(Suburb::new("east", vec![(a, 70.0), (b, 30.0)], 150, 5, 3, true));
        world.build_index();

        let mut engine = Engine::new(world, config(seed));
        engine.inject(90, a, itin);
        engine.run(&mut NoopObserver).unwrap();
        engine.into_world()
    }

    #[test]
    fn same_seed_replays_identical_logs() {
        let w1 = busy_run(1234);
        let w2 = busy_run(1234);

        for (s1, s2) in w1.stations.iter().zip(&w2.stations) {
            assert_eq!(s1.people_over_time, s2.people_over_time, "station {}", s1.name);
        }
        assert_eq!(w1.vehicles.len(), w2.vehicles.len());
        for (v1, v2) in w1.vehicles.iter().zip(&w2.vehicles) {
            assert_eq!(v1.arrivals, v2.arrivals);
            assert_eq!(v1.occupancy, v2.occupancy);
        }
        assert_eq!(w1.groups.len(), w2.groups.len());
    }
}
