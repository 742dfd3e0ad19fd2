//! The `Engine` struct and its event loop.

use pt_core::{GroupId, ItineraryId, RouteId, SimClock, SimConfig, SimRng, SimTime, StationId, VehicleId};
use pt_model::{RouteKind, VehicleKind, VisitEntry, WalkRecord, World};

use crate::bays::BayPool;
use crate::error::{EngineError, EngineResult};
use crate::event::EventQueue;
use crate::process::{Process, ProcessId, VehicleState, WalkState};
use crate::service;
use crate::SimObserver;

/// The simulation runner.
///
/// Owns the world, the clock, the RNG stream, the event queue, and the
/// process arena — one `Engine` is one run, and two engines never share
/// state.  The loop is classic discrete-event execution: pop the earliest
/// wake-up, advance the clock to it, resume that process until it parks
/// itself again.  Equal times resume in insertion order.
///
/// Execution stops when the queue drains or the next wake-up lies past the
/// configured horizon.
pub struct Engine {
    pub config: SimConfig,
    pub clock:  SimClock,
    pub world:  World,

    rng:       SimRng,
    queue:     EventQueue,
    processes: Vec<Process>,
    bays:      Vec<BayPool>,
    started:   bool,
}

impl Engine {
    pub fn new(world: World, config: SimConfig) -> Self {
        let clock = config.make_clock();
        let rng = SimRng::new(config.seed);
        let bays = world.stations.iter().map(|s| BayPool::new(s.bays)).collect();
        Self {
            config,
            clock,
            world,
            rng,
            queue: EventQueue::new(),
            processes: Vec::new(),
            bays,
            started: false,
        }
    }

    /// Place a fresh group of `count` people at `station`, bound to
    /// `itinerary` with its cursor at the first leg.
    ///
    /// This is the same entry point suburb rounds use internally; call it
    /// before [`run`](Self::run) to seed a scenario with an initial crowd.
    pub fn inject(&mut self, count: u32, station: StationId, itinerary: ItineraryId) -> GroupId {
        let wall = self.clock.wall();
        let gid = self.world.spawn_group(count, wall, itinerary);
        self.deliver(&[gid], station, true);
        gid
    }

    /// Consume the engine, yielding the final world for output aggregation.
    pub fn into_world(self) -> World {
        self.world
    }

    // ── Event loop ────────────────────────────────────────────────────────

    /// Run until the event queue drains or the horizon is reached.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> EngineResult<()> {
        if !self.started {
            self.seed_processes();
            self.started = true;
        }

        // Peek before popping: a wake-up past the horizon stays queued, so a
        // later run with a raised horizon picks up where this one stopped.
        while self
            .queue
            .peek_time()
            .is_some_and(|at| at.0 <= self.config.horizon)
        {
            let Some(wake) = self.queue.pop() else { break };
            self.clock.advance_to(wake.at);
            self.step(wake.proc, observer)?;
        }

        observer.on_sim_end(self.clock.wall());
        Ok(())
    }

    /// Register the root processes: one spawner per vehicle route with
    /// pending trips, one distributor per active suburb.
    fn seed_processes(&mut self) {
        for i in 0..self.world.routes.len() {
            let route = self.world.routes[i].id;
            let has_trips = self.world.routes[i]
                .vehicle_service()
                .is_some_and(|s| !s.pending_trips.is_empty());
            if has_trips {
                self.spawn_process(Process::VehicleSpawner { route }, SimTime::ZERO);
            }
        }
        for i in 0..self.world.suburbs.len() {
            let s = &self.world.suburbs[i];
            if s.active && s.remaining > 0 && !s.all_weights_zero() {
                self.spawn_process(Process::Suburb { index: i }, SimTime::ZERO);
            }
        }
    }

    /// Add a process to the arena and queue its first wake-up.
    fn spawn_process(&mut self, process: Process, at: SimTime) -> ProcessId {
        let pid = ProcessId(self.processes.len() as u32);
        self.processes.push(process);
        self.queue.push(at, pid);
        pid
    }

    /// Resume one process.  The arena slot is taken (left `Done`); the step
    /// handler reinstalls whatever state the process parks in next.
    fn step<O: SimObserver>(&mut self, pid: ProcessId, observer: &mut O) -> EngineResult<()> {
        match std::mem::replace(&mut self.processes[pid.index()], Process::Done) {
            Process::VehicleSpawner { route } => self.step_spawner(pid, route, observer),
            Process::Vehicle { vehicle, state } => self.step_vehicle(pid, vehicle, state, observer),
            Process::Walk { group, route, origin, dest, state } => {
                self.step_walk(pid, group, route, origin, dest, state, observer)
            }
            Process::Suburb { index } => self.step_suburb(pid, index, observer),
            Process::Done => Ok(()),
        }
    }

    // ── Route spawn loop ──────────────────────────────────────────────────

    /// One spawn scan: consume every pending trip with a stop scheduled at
    /// the current wall minute (budget permitting) and turn each into a
    /// vehicle positioned at that stop.  Matching a mid-trip stop spawns the
    /// vehicle mid-route — a service already underway when the window opened.
    fn step_spawner<O: SimObserver>(
        &mut self,
        pid:      ProcessId,
        route:    RouteId,
        observer: &mut O,
    ) -> EngineResult<()> {
        let wall = self.clock.wall().round() as u32;
        let active = self.world.active_vehicles_on(route);

        let (due, capacity) = {
            let Some(service) = self.world.route_mut(route).vehicle_service_mut() else {
                return Ok(());
            };
            let mut budget = service.spawn_budget.saturating_sub(active);
            let mut due = Vec::new();
            let mut i = 0;
            while i < service.pending_trips.len() {
                if budget == 0 {
                    break;
                }
                match service.pending_trips[i].index_at_minute(wall) {
                    Some(stop) => {
                        due.push((service.pending_trips.remove(i), stop));
                        budget -= 1;
                    }
                    None => i += 1,
                }
            }
            (due, service.capacity)
        };

        let kind = match self.world.route(route).kind {
            RouteKind::Train(_) => VehicleKind::Train,
            _ => VehicleKind::Bus,
        };
        for (trip, stop) in due {
            let vid = self.world.spawn_vehicle(route, kind, trip, stop, capacity);
            let station = self.world.vehicle(vid).current_entry().station;
            observer.on_vehicle_spawned(vid, route, station, self.clock.wall());
            self.spawn_process(
                Process::Vehicle { vehicle: vid, state: VehicleState::AwaitBay },
                self.clock.now,
            );
        }

        let more = self
            .world
            .route(route)
            .vehicle_service()
            .is_some_and(|s| !s.pending_trips.is_empty());
        if more && self.clock.now.0 + 1.0 <= self.config.horizon {
            self.processes[pid.index()] = Process::VehicleSpawner { route };
            self.queue.push(self.clock.now + 1.0, pid);
        }
        Ok(())
    }

    // ── Vehicle state machine ─────────────────────────────────────────────

    fn step_vehicle<O: SimObserver>(
        &mut self,
        pid:      ProcessId,
        vehicle:  VehicleId,
        state:    VehicleState,
        observer: &mut O,
    ) -> EngineResult<()> {
        match state {
            VehicleState::AwaitBay => self.vehicle_await_bay(pid, vehicle, observer),
            VehicleState::Deload => self.vehicle_deload(pid, vehicle, observer),
            VehicleState::Depart { unload } => self.vehicle_depart(pid, vehicle, unload, observer),
        }
    }

    fn vehicle_await_bay<O: SimObserver>(
        &mut self,
        pid:      ProcessId,
        vehicle:  VehicleId,
        observer: &mut O,
    ) -> EngineResult<()> {
        let station = self.world.vehicle(vehicle).current_entry().station;
        self.processes[pid.index()] =
            Process::Vehicle { vehicle, state: VehicleState::AwaitBay };
        if !self.bays[station.index()].try_acquire(pid) {
            // Queued; the holder's release will wake us.
            return Ok(());
        }
        self.service_stop(pid, vehicle, station, observer)
    }

    /// Docked: record the arrival, load (unless terminal), and park until
    /// the loading time has elapsed.
    fn service_stop<O: SimObserver>(
        &mut self,
        pid:      ProcessId,
        vehicle:  VehicleId,
        station:  StationId,
        observer: &mut O,
    ) -> EngineResult<()> {
        let wall = self.clock.wall();
        let at_final = self.world.vehicle(vehicle).at_final_stop();

        let stop_name = self.world.station(station).name.clone();
        self.world.vehicle_mut(vehicle).arrivals.push((stop_name, wall));

        let mut load_minutes = 0.0;
        if !at_final {
            let occupancy = self.world.vehicle_occupancy(vehicle);
            let quota = self.world.vehicle(vehicle).capacity.saturating_sub(occupancy);
            if quota == 0 {
                observer.on_no_seats(vehicle, station, wall);
            } else {
                let route = self.world.vehicle(vehicle).route;
                // Congestion as seen on arrival, before boarding thins the
                // platform out.
                let congestion = self.world.congestion_level(station);
                let boarded = self.world.board(station, quota, route);
                if boarded.is_empty() {
                    observer.on_no_passengers(vehicle, station, wall);
                } else {
                    let people: u32 =
                        boarded.iter().map(|&g| self.world.group(g).count).sum();
                    self.world.vehicle_mut(vehicle).onboard.extend(boarded);
                    observer.on_loaded(vehicle, station, people, wall);

                    let per = self.per_person_minutes(vehicle);
                    load_minutes = service::load_minutes(&mut self.rng, per, people, congestion);
                    let occ = self.world.vehicle_occupancy(vehicle);
                    self.world
                        .vehicle_mut(vehicle)
                        .occupancy
                        .push((wall + load_minutes, occ));
                }
            }
        }

        self.processes[pid.index()] = Process::Vehicle { vehicle, state: VehicleState::Deload };
        self.queue.push(self.clock.now + load_minutes, pid);
        Ok(())
    }

    /// Select who gets off here: groups whose leg explicitly ends at this
    /// stop, or everyone at the trip's terminal stop.  The selected groups
    /// leave the vehicle now and are delivered once the deload time elapses.
    fn vehicle_deload<O: SimObserver>(
        &mut self,
        pid:      ProcessId,
        vehicle:  VehicleId,
        observer: &mut O,
    ) -> EngineResult<()> {
        let wall = self.clock.wall();
        let station = self.world.vehicle(vehicle).current_entry().station;
        let at_final = self.world.vehicle(vehicle).at_final_stop();

        let unload: Vec<GroupId> = self
            .world
            .vehicle(vehicle)
            .onboard
            .iter()
            .copied()
            .filter(|&g| {
                at_final
                    || self
                        .world
                        .current_leg(g)
                        .is_none_or(|leg| leg.dest == Some(station))
            })
            .collect();

        let people: u32 = unload.iter().map(|&g| self.world.group(g).count).sum();
        let mut deload_minutes = 0.0;
        if people > 0 {
            let congestion = self.world.congestion_level(station);
            let per = self.per_person_minutes(vehicle);
            deload_minutes = service::load_minutes(&mut self.rng, per, people, congestion);

            self.world.vehicle_mut(vehicle).onboard.retain(|g| !unload.contains(g));
            let occ = self.world.vehicle_occupancy(vehicle);
            self.world
                .vehicle_mut(vehicle)
                .occupancy
                .push((wall + deload_minutes, occ));
            observer.on_deloaded(vehicle, station, people, wall + deload_minutes);
        } else {
            observer.on_no_deload(vehicle, station, wall);
        }

        self.processes[pid.index()] =
            Process::Vehicle { vehicle, state: VehicleState::Depart { unload } };
        self.queue.push(self.clock.now + deload_minutes, pid);
        Ok(())
    }

    /// Deliver the deloaded groups, free the bay, and either terminate (at
    /// the trip's final stop) or sample the travel time to the next stop and
    /// go back to waiting for its bay.
    fn vehicle_depart<O: SimObserver>(
        &mut self,
        pid:      ProcessId,
        vehicle:  VehicleId,
        unload:   Vec<GroupId>,
        observer: &mut O,
    ) -> EngineResult<()> {
        let station = self.world.vehicle(vehicle).current_entry().station;
        let at_final = self.world.vehicle(vehicle).at_final_stop();

        self.deliver(&unload, station, false);

        if let Some(next) = self.bays[station.index()].release() {
            self.queue.push(self.clock.now, next);
        }

        if at_final {
            self.world.vehicle_mut(vehicle).active = false;
            observer.on_vehicle_terminated(vehicle, self.clock.wall());
            return Ok(());
        }

        let (cur, next) = {
            let v = self.world.vehicle(vehicle);
            (*v.trip.entry(v.stop_index), *v.trip.entry(v.stop_index + 1))
        };
        let delta = next.minute as i64 - cur.minute as i64;
        let expected = if delta <= 0 {
            if self.config.strict_timetables {
                let route = self.world.vehicle(vehicle).route;
                return Err(EngineError::CorruptTimetable {
                    route: self.world.route(route).name.clone(),
                    from:  self.world.station(cur.station).name.clone(),
                    to:    self.world.station(next.station).name.clone(),
                    delta,
                });
            }
            observer.on_delta_clamped(self.world.vehicle(vehicle).route, cur.station, next.station);
            1.0
        } else {
            delta as f64
        };

        let congestion = self.world.congestion_level(station);
        let travel = service::travel_minutes(&mut self.rng, expected, congestion);

        self.world.vehicle_mut(vehicle).stop_index += 1;
        self.processes[pid.index()] =
            Process::Vehicle { vehicle, state: VehicleState::AwaitBay };
        self.queue.push(self.clock.now + travel, pid);
        Ok(())
    }

    fn per_person_minutes(&self, vehicle: VehicleId) -> f64 {
        match self.world.vehicle(vehicle).kind {
            VehicleKind::Bus => self.config.bus_minutes_per_person,
            VehicleKind::Train => self.config.train_minutes_per_person,
        }
    }

    // ── Walk state machine ────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn step_walk<O: SimObserver>(
        &mut self,
        pid:      ProcessId,
        group:    GroupId,
        route:    RouteId,
        origin:   StationId,
        dest:     StationId,
        state:    WalkState,
        observer: &mut O,
    ) -> EngineResult<()> {
        let wall = self.clock.wall();
        match state {
            // Embarkation delay expired: leave the origin's waiting list,
            // join the link, and start the walk timer.
            WalkState::Embark => {
                self.world.station_mut(origin).remove_waiting(group);
                let count = self.world.group(group).count;
                if let Some(link) = self.world.route_mut(route).walk_link_mut() {
                    link.in_transit.push(group);
                    link.log.push(WalkRecord { group, count, departed: wall, arrived: None });
                }
                observer.on_walk_departed(group, route, wall);

                let walkers = self.world.walkers_on(route);
                let factor = self
                    .world
                    .route(route)
                    .walk_link()
                    .map_or(1.0, |l| l.congestion_factor);
                let duration = service::walk_minutes(&mut self.rng, factor, walkers);

                self.processes[pid.index()] =
                    Process::Walk { group, route, origin, dest, state: WalkState::Arrive };
                self.queue.push(self.clock.now + duration, pid);
            }

            // Walk finished: close the link record and deliver.
            WalkState::Arrive => {
                if let Some(link) = self.world.route_mut(route).walk_link_mut() {
                    link.in_transit.retain(|&g| g != group);
                    if let Some(rec) = link
                        .log
                        .iter_mut()
                        .rev()
                        .find(|r| r.group == group && r.arrived.is_none())
                    {
                        rec.arrived = Some(wall);
                    }
                }
                observer.on_walk_arrived(group, route, wall);
                self.deliver(&[group], dest, false);
            }
        }
        Ok(())
    }

    // ── Suburb distribution loop ──────────────────────────────────────────

    fn step_suburb<O: SimObserver>(
        &mut self,
        pid:      ProcessId,
        index:    usize,
        observer: &mut O,
    ) -> EngineResult<()> {
        let wall_minute = self.clock.wall().round() as u64;
        let s = &self.world.suburbs[index];
        if s.remaining == 0 {
            return Ok(());
        }

        let mut drained = false;
        if wall_minute % s.frequency as u64 == 0 {
            if s.rounds_remaining() {
                let target = s.round_target();
                self.run_round(index, target, observer);
                self.world.suburbs[index].rounds_done += 1;
            } else {
                // Final unbounded round: whatever is left goes out now.
                let target = self.world.suburbs[index].remaining;
                self.run_round(index, target, observer);
                drained = true;
            }
        }

        if !drained
            && self.world.suburbs[index].remaining > 0
            && self.clock.now.0 + 1.0 <= self.config.horizon
        {
            self.processes[pid.index()] = Process::Suburb { index };
            self.queue.push(self.clock.now + 1.0, pid);
        }
        Ok(())
    }

    /// One distribution round: repeatedly pick a weighted station at random
    /// and inject `⌈weight% × target⌉` people there (capped at what the round
    /// still owes), bound to a random itinerary known to pass through it.
    fn run_round<O: SimObserver>(&mut self, index: usize, target: u32, observer: &mut O) {
        let wall = self.clock.wall();
        let name = self.world.suburbs[index].name.clone();
        let weights = self.world.suburbs[index].weights.clone();
        let mut left = target.min(self.world.suburbs[index].remaining);

        // Zero-weight picks and stations with no itinerary candidates place
        // nobody; the attempt budget bounds the loop when those dominate.
        let mut attempts = 16 * weights.len().max(1) as u32;
        while left > 0 && attempts > 0 {
            attempts -= 1;
            let Some(&(station, weight)) = self.rng.choose(&weights) else {
                break;
            };
            if weight <= 0.0 {
                continue;
            }
            let Some(&itin) = self.rng.choose(self.world.itinerary_index.candidates(station))
            else {
                continue;
            };

            let n = (((weight / 100.0) * target as f64).ceil() as u32).min(left);
            let gid = self.world.spawn_group(n, wall, itin);
            self.world.suburbs[index].remaining -= n;
            left -= n;
            observer.on_groups_injected(&name, station, n, wall);
            self.deliver(&[gid], station, true);
        }
    }

    // ── Delivery (`put`) ──────────────────────────────────────────────────

    /// Deposit `groups` at `station`.
    ///
    /// For each group: append a visit-log entry; unless it came straight from
    /// a suburb injection, advance its cursor if this delivery completed its
    /// current leg (explicit destination reached, or the natural last stop of
    /// a leg with no explicit destination).  The group then joins the waiting
    /// list — arrived groups rest there permanently, vehicle-leg groups wait
    /// to board, and walk-leg groups additionally get an embarkation timer
    /// that will pull them out of the list when it fires.
    ///
    /// One waiting-count snapshot is recorded per call, not per group.
    fn deliver(&mut self, groups: &[GroupId], station: StationId, from_suburb: bool) {
        if groups.is_empty() {
            return;
        }
        let wall = self.clock.wall();

        for &gid in groups {
            self.world.group_mut(gid).log.push(VisitEntry { station, at: wall });

            if !from_suburb {
                if let Some(leg) = self.world.current_leg(gid).copied() {
                    let completed = leg.dest == Some(station)
                        || (leg.dest.is_none()
                            && self.world.route(leg.route).last_stop() == station);
                    if completed {
                        self.world.group_mut(gid).advance();
                    }
                }
            }

            self.world.station_mut(station).waiting.push(gid);
            if let Some(leg) = self.world.current_leg(gid).copied() {
                if self.world.route(leg.route).is_walk() {
                    let dest =
                        leg.dest.unwrap_or_else(|| self.world.route(leg.route).last_stop());
                    self.spawn_process(
                        Process::Walk {
                            group: gid,
                            route: leg.route,
                            origin: station,
                            dest,
                            state: WalkState::Embark,
                        },
                        self.clock.now + self.config.walk_embark_delay,
                    );
                }
            }
        }

        let total = self.world.station_people(station);
        self.world.station_mut(station).people_over_time.push((wall, total));
    }
}
