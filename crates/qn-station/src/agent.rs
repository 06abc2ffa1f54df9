//! The `Agent` record.

use qn_core::{AgentId, ClassId, ServerId, SimTime};

/// A customer or job flowing through the network.
///
/// One record per agent for its whole journey.  Moving to another station
/// overwrites the per-visit fields (see [`relocate`](Self::relocate)) instead
/// of allocating a new record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:    AgentId,
    /// Class tag; `ClassId::DEFAULT` in a single-class run.
    pub class: ClassId,
    /// Time the agent entered its current station.
    pub arrival_time: SimTime,
    /// Set when a server picks the agent up.
    pub service_start: Option<SimTime>,
    /// Set together with `service_start`: the scheduled end of service.
    pub departure_time: Option<SimTime>,
    /// Waiting-line length observed on entering the current station.
    pub queue_len_on_arrival: u64,
    /// Server holding the agent at its current station.
    pub server: Option<ServerId>,
}

impl Agent {
    pub fn new(id: AgentId, class: ClassId, arrival_time: SimTime) -> Self {
        Self {
            id,
            class,
            arrival_time,
            service_start:        None,
            departure_time:       None,
            queue_len_on_arrival: 0,
            server:               None,
        }
    }

    /// Reset the per-visit fields for entry into another station at `now`.
    pub fn relocate(&mut self, now: SimTime) {
        self.arrival_time = now;
        self.service_start = None;
        self.departure_time = None;
        self.queue_len_on_arrival = 0;
        self.server = None;
    }

    /// Time spent in the waiting line at the current station, once served.
    pub fn waiting_time(&self) -> Option<f64> {
        self.service_start.map(|s| s - self.arrival_time)
    }

    pub fn in_service(&self) -> bool {
        self.server.is_some()
    }
}
