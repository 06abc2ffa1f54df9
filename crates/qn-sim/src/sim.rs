//! The `NetworkSim` kernel and its event loop.

use log::{debug, info, trace};

use qn_config::NetworkConfig;
use qn_core::{AgentId, ClassId, QnError, ServerId, SimClock, SimRng, SimTime, StationId, VariateSource};
use qn_station::{Agent, Station};

use crate::routing::route;
use crate::{
    CompletedRecord, Event, EventKind, EventScheduler, NoopObserver, RejectionRecord, RunLog,
    SimBuilder, SimError, SimObserver, SimResult,
};

// ── NetworkSim ────────────────────────────────────────────────────────────────

/// The simulation kernel.
///
/// Owns every [`Station`], the [`EventScheduler`], the clock, and the single
/// variate source of the run.  Agents are owned by whichever structure holds
/// them at the moment: a station's waiting line, a server, or (between a
/// departure and the next arrival) the handler itself.
///
/// Each popped event is handled to completion before the next one:
///
/// ```text
/// ARRIVAL(agent, s)              DEPARTURE(agent, s)
///   snapshot                       log CompletedRecord
///   idle server? → assign          release server
///   else enqueue                   head of line? → assign to that server
///   else reject (terminal)         snapshot
///   snapshot                       route → other station: handle_arrival
///   schedule next external               → none / same: exit (terminal)
/// ```
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct NetworkSim<V: VariateSource = SimRng> {
    /// The validated configuration this run was built from.
    pub config: NetworkConfig,

    /// Simulation clock; only `run` advances it.
    pub clock: SimClock,

    stations:      Vec<Station>,
    scheduler:     EventScheduler,
    rng:           V,
    /// Class arrival probabilities, indexed by `ClassId`.
    class_weights: Vec<f64>,
    next_agent:    u64,
    log:           RunLog,
    started:       bool,
}

impl<V: VariateSource> NetworkSim<V> {
    pub(crate) fn new(config: NetworkConfig, rng: V) -> Self {
        let stations: Vec<Station> = config
            .station_ids()
            .map(|id| {
                let spec = config.station(id);
                Station::new(id, spec.servers, spec.capacity, config.station_service_rates(id))
            })
            .collect();
        let servers = stations.iter().map(Station::server_count).collect();
        let log = RunLog::new(config.horizon, servers, config.num_classes());

        Self {
            clock:         SimClock::new(config.horizon),
            class_weights: config.arrival_probabilities(),
            stations,
            scheduler:     EventScheduler::new(),
            rng,
            next_agent:    0,
            log,
            started:       false,
            config,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the scheduler is empty or the next event lies beyond the
    /// horizon.  Events past the horizon are discarded; services in progress
    /// at that point are not truncated into the log.
    ///
    /// A kernel can run once.  Use [`NoopObserver`] if you don't need
    /// callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<&RunLog> {
        if self.started {
            return Err(SimError::AlreadyRun);
        }
        self.started = true;
        info!("starting run\n{}", self.config);

        for station in &self.stations {
            self.log.snapshots.record(SimTime::ZERO, station);
        }
        self.schedule_next_external_arrival()?;

        while let Some(event) = self.scheduler.pop_earliest() {
            if self.clock.is_beyond_horizon(event.time) {
                debug!("{} lies beyond the horizon, stopping with {} event(s) pending", event.time, self.scheduler.len() + 1);
                break;
            }
            self.clock.advance_to(event.time)?;
            self.log.end_time = event.time;

            match event.kind {
                EventKind::Arrival   => self.handle_external_arrival(&event, observer)?,
                EventKind::Departure => self.handle_departure(&event, observer)?,
            }
            observer.on_event_end(&event, &self.stations);
        }

        debug_assert_eq!(self.log.rejected.len() as u64, self.log.ledger.total_rejected());
        info!(
            "run finished at {}: {} external arrival(s), {} service completion(s), {} rejection(s), {} exit(s)",
            self.log.end_time,
            self.log.external_arrivals,
            self.log.completed.len(),
            self.log.rejected.len(),
            self.log.exits,
        );
        observer.on_run_end(&self.log);
        Ok(&self.log)
    }

    /// Everything recorded so far.
    pub fn log(&self) -> &RunLog {
        &self.log
    }

    /// Consume the kernel, keeping only its records.
    pub fn into_log(self) -> RunLog {
        self.log
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Events still scheduled (those past the horizon after a run).
    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    // ── Arrivals ──────────────────────────────────────────────────────────

    /// Draw the next interarrival gap and, if the arrival falls within the
    /// horizon, allocate its agent id, draw its class, and schedule it.
    fn schedule_next_external_arrival(&mut self) -> SimResult<()> {
        let gap = self.rng.exponential(self.config.external_rate())?;
        let time = self.clock.now() + gap;
        if self.clock.is_beyond_horizon(time) {
            trace!("next external arrival at {time} is past the horizon, stream ends");
            return Ok(());
        }

        let drawn = self.rng.categorical(&self.class_weights)?;
        let class = ClassId::try_from(drawn)
            .map_err(|_| QnError::ContractViolation(format!("class index {drawn} out of range")))?;
        let agent = AgentId(self.next_agent);
        self.next_agent += 1;

        self.scheduler.push(Event::arrival(time, agent, self.config.entry_station(), class));
        Ok(())
    }

    /// An external ARRIVAL event: materialize the agent, handle its arrival,
    /// and keep the external stream going.  The next external arrival is
    /// scheduled exactly once per external event, accepted or rejected.
    fn handle_external_arrival<O: SimObserver>(&mut self, event: &Event, observer: &mut O) -> SimResult<()> {
        self.log.external_arrivals += 1;
        let class = event.class.unwrap_or(ClassId::DEFAULT);
        let agent = Agent::new(event.agent, class, event.time);
        self.handle_arrival(agent, event.station, observer)?;
        self.schedule_next_external_arrival()
    }

    /// Admit `agent` at `station_id`: serve it immediately, queue it, or
    /// reject it when the waiting line is full.
    fn handle_arrival<O: SimObserver>(
        &mut self,
        mut agent: Agent,
        station_id: StationId,
        observer: &mut O,
    ) -> SimResult<()> {
        let now = self.clock.now();
        let (id, class) = (agent.id, agent.class);
        let station = self
            .stations
            .get_mut(station_id.index())
            .ok_or_else(|| QnError::ContractViolation(format!("{id} routed to unknown {station_id}")))?;

        self.log.snapshots.record(now, station);
        agent.queue_len_on_arrival = station.waiting_count() as u64;

        let accepted = if let Some(server) = station.find_idle_server() {
            self.assign_server(station_id, server, agent)?;
            true
        } else {
            match station.enqueue(agent) {
                Ok(()) => {
                    debug!("{now}: {id} ({class}) queued at {station_id}");
                    true
                }
                Err(agent) => {
                    let record = RejectionRecord { agent: agent.id, time: now, station: station_id, class };
                    debug!("{now}: {id} ({class}) rejected, {station_id} is full");
                    self.log.rejected.push(record);
                    observer.on_rejection(&record);
                    false
                }
            }
        };

        self.log.ledger.record(station_id, class, accepted);
        self.log.snapshots.record(now, &self.stations[station_id.index()]);
        if accepted {
            observer.on_arrival(now, id, station_id, class);
        }
        Ok(())
    }

    /// Start serving `agent` on `server` and schedule its DEPARTURE.
    fn assign_server(&mut self, station_id: StationId, server: ServerId, agent: Agent) -> SimResult<()> {
        let now = self.clock.now();
        let id = agent.id;
        let departure = self.stations[station_id.index()].begin_service(server, agent, now, &mut self.rng)?;
        debug!("{now}: {id} enters service on {server} at {station_id}, departs {departure}");
        self.scheduler.push(Event::departure(departure, id, station_id));
        Ok(())
    }

    // ── Departures ────────────────────────────────────────────────────────

    /// A DEPARTURE event: log the visit, free the server (handing it straight
    /// to the head of the line), then route the agent onward or out.
    fn handle_departure<O: SimObserver>(&mut self, event: &Event, observer: &mut O) -> SimResult<()> {
        let now = self.clock.now();
        let station_id = event.station;
        let not_in_service = || SimError::AgentNotInService { agent: event.agent, station: station_id };

        let station = self.stations.get_mut(station_id.index()).ok_or_else(not_in_service)?;
        let server = station.server_holding(event.agent).ok_or_else(not_in_service)?;
        let mut agent = station.finish_service(server).ok_or_else(not_in_service)?;

        let record = CompletedRecord::from_agent(&agent, station_id)
            .ok_or_else(|| QnError::ContractViolation(format!("{} departed without service stamps", agent.id)))?;
        debug!("{now}: {} departs {station_id} after {:.3} in system", agent.id, record.system_time());
        self.log.completed.push(record);
        observer.on_departure(&record);

        if let Some(next) = self.stations[station_id.index()].dequeue_next() {
            self.assign_server(station_id, server, next)?;
        }
        self.log.snapshots.record(now, &self.stations[station_id.index()]);

        let row = self.config.routing_row(agent.class, station_id);
        match route(row, &mut self.rng)? {
            Some(next) if next != station_id => {
                trace!("{now}: {} routed {station_id} -> {next}", agent.id);
                agent.relocate(now);
                self.handle_arrival(agent, next, observer)
            }
            _ => {
                trace!("{now}: {} leaves the network from {station_id}", agent.id);
                self.log.exits += 1;
                observer.on_exit(now, agent.id, station_id);
                Ok(())
            }
        }
    }
}

/// Build, validate, and run `config` once with its own seed, returning the
/// run's records.
pub fn simulate(config: NetworkConfig) -> SimResult<RunLog> {
    let mut sim = SimBuilder::new(config).build()?;
    sim.run(&mut NoopObserver)?;
    Ok(sim.into_log())
}
