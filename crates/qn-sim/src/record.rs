//! Records produced by a run: the completed-agent log, the rejection log,
//! the time-indexed occupancy snapshots, and the arrival ledger.
//!
//! Everything here is plain data handed to the statistics engine and output
//! writers after (or during) the run.  None of it feeds back into control
//! flow.

use qn_core::{AgentId, ClassId, ServerId, SimTime, StationId};
use qn_station::{Agent, Station};

// ── CompletedRecord ───────────────────────────────────────────────────────────

/// One finished service visit.  An agent routed through three stations
/// produces three records.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompletedRecord {
    pub agent:                AgentId,
    pub arrival_time:         SimTime,
    pub service_start:        SimTime,
    pub departure_time:       SimTime,
    pub server:               ServerId,
    pub station:              StationId,
    pub class:                ClassId,
    pub queue_len_on_arrival: u64,
}

impl CompletedRecord {
    /// Build the record for `agent` leaving `station`.
    ///
    /// Returns `None` if the agent was never put into service.
    pub fn from_agent(agent: &Agent, station: StationId) -> Option<Self> {
        Some(Self {
            agent:                agent.id,
            arrival_time:         agent.arrival_time,
            service_start:        agent.service_start?,
            departure_time:       agent.departure_time?,
            server:               agent.server?,
            station,
            class:                agent.class,
            queue_len_on_arrival: agent.queue_len_on_arrival,
        })
    }

    /// `Wq` contribution: service start minus arrival.
    #[inline]
    pub fn waiting_time(&self) -> f64 {
        self.service_start - self.arrival_time
    }

    /// `Ws` contribution: departure minus service start.
    #[inline]
    pub fn service_time(&self) -> f64 {
        self.departure_time - self.service_start
    }

    /// `W` contribution: departure minus arrival.
    #[inline]
    pub fn system_time(&self) -> f64 {
        self.departure_time - self.arrival_time
    }
}

// ── RejectionRecord ───────────────────────────────────────────────────────────

/// An agent turned away from a full station.  Terminal for that agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RejectionRecord {
    pub agent:   AgentId,
    pub time:    SimTime,
    pub station: StationId,
    pub class:   ClassId,
}

// ── StateSnapshot ─────────────────────────────────────────────────────────────

/// Occupancy of one station (or one class at one station) from `time` until
/// the next snapshot in the same stream.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    pub time:      SimTime,
    pub waiting:   usize,
    pub in_system: usize,
    pub busy:      usize,
}

/// Snapshot streams: one per station, and one per (station, class).
#[derive(Clone, Debug, Default)]
pub struct SnapshotLog {
    stations: Vec<Vec<StateSnapshot>>,
    classes:  Vec<Vec<Vec<StateSnapshot>>>,
}

impl SnapshotLog {
    pub fn new(stations: usize, classes: usize) -> Self {
        Self {
            stations: vec![Vec::new(); stations],
            classes:  vec![vec![Vec::new(); classes]; stations],
        }
    }

    /// Append the current occupancy of `station` to its aggregate stream and
    /// to every per-class stream, so all streams share the same time points.
    pub fn record(&mut self, time: SimTime, station: &Station) {
        let s = station.id.index();
        self.stations[s].push(StateSnapshot {
            time,
            waiting:   station.waiting_count(),
            in_system: station.in_system_count(),
            busy:      station.busy_server_count(),
        });
        for (k, stream) in self.classes[s].iter_mut().enumerate() {
            let class = ClassId(k as u16);
            stream.push(StateSnapshot {
                time,
                waiting:   station.class_waiting_count(class),
                in_system: station.class_in_system_count(class),
                busy:      station.class_busy_count(class),
            });
        }
    }

    /// Aggregate stream of `station`, in time order.
    pub fn station(&self, station: StationId) -> &[StateSnapshot] {
        &self.stations[station.index()]
    }

    /// Stream of `class` at `station`, in time order.
    pub fn class(&self, station: StationId, class: ClassId) -> &[StateSnapshot] {
        &self.classes[station.index()][class.index()]
    }

    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }
}

// ── ArrivalLedger ─────────────────────────────────────────────────────────────

/// Arrival attempts per (station, class), split into accepted and rejected.
///
/// This is the single accounting path for arrival counts: the kernel updates
/// it at the one point where an arrival is accepted or turned away, and the
/// rejection log must always agree with it.
#[derive(Clone, Debug, Default)]
pub struct ArrivalLedger {
    accepted: Vec<Vec<u64>>,
    rejected: Vec<Vec<u64>>,
}

impl ArrivalLedger {
    pub fn new(stations: usize, classes: usize) -> Self {
        Self {
            accepted: vec![vec![0; classes]; stations],
            rejected: vec![vec![0; classes]; stations],
        }
    }

    pub fn record(&mut self, station: StationId, class: ClassId, accepted: bool) {
        let table = if accepted { &mut self.accepted } else { &mut self.rejected };
        if let Some(n) = table
            .get_mut(station.index())
            .and_then(|row| row.get_mut(class.index()))
        {
            *n += 1;
        }
    }

    pub fn accepted(&self, station: StationId, class: ClassId) -> u64 {
        self.accepted[station.index()][class.index()]
    }

    pub fn rejected(&self, station: StationId, class: ClassId) -> u64 {
        self.rejected[station.index()][class.index()]
    }

    pub fn attempts(&self, station: StationId, class: ClassId) -> u64 {
        self.accepted(station, class) + self.rejected(station, class)
    }

    pub fn station_accepted(&self, station: StationId) -> u64 {
        self.accepted[station.index()].iter().sum()
    }

    pub fn station_rejected(&self, station: StationId) -> u64 {
        self.rejected[station.index()].iter().sum()
    }

    pub fn station_attempts(&self, station: StationId) -> u64 {
        self.station_accepted(station) + self.station_rejected(station)
    }

    pub fn total_rejected(&self) -> u64 {
        self.rejected.iter().flatten().sum()
    }
}

// ── RunLog ────────────────────────────────────────────────────────────────────

/// Everything one run produced, plus the shape information the statistics
/// engine needs to interpret it.
#[derive(Clone, Debug)]
pub struct RunLog {
    pub horizon:  f64,
    /// Time of the last processed event.
    pub end_time: SimTime,
    /// Server count per station.
    pub servers:     Vec<usize>,
    pub num_classes: usize,
    pub completed: Vec<CompletedRecord>,
    pub rejected:  Vec<RejectionRecord>,
    pub snapshots: SnapshotLog,
    pub ledger:    ArrivalLedger,
    /// External ARRIVAL events processed (accepted or rejected).
    pub external_arrivals: u64,
    /// Agents that left the network after service.
    pub exits: u64,
}

impl RunLog {
    pub fn new(horizon: f64, servers: Vec<usize>, num_classes: usize) -> Self {
        let n = servers.len();
        Self {
            horizon,
            end_time: SimTime::ZERO,
            servers,
            num_classes,
            completed: Vec::new(),
            rejected:  Vec::new(),
            snapshots: SnapshotLog::new(n, num_classes),
            ledger:    ArrivalLedger::new(n, num_classes),
            external_arrivals: 0,
            exits: 0,
        }
    }

    pub fn num_stations(&self) -> usize {
        self.servers.len()
    }

    /// Completed visits at `station`.
    pub fn completed_at(&self, station: StationId) -> impl Iterator<Item = &CompletedRecord> {
        self.completed.iter().filter(move |r| r.station == station)
    }

    /// Rejections at `station`.
    pub fn rejected_at(&self, station: StationId) -> impl Iterator<Item = &RejectionRecord> {
        self.rejected.iter().filter(move |r| r.station == station)
    }
}
