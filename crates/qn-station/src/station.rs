//! `Station` — servers, a FIFO waiting line, and a capacity bound.
//!
//! # Invariants
//!
//! - `waiting_count() <= capacity` at all times: [`Station::enqueue`] refuses
//!   instead of overflowing.
//! - `busy_server_count() <= server_count()`.
//! - Waiting-line order is service order.
//!
//! Per-class occupancy counters are maintained alongside the aggregate ones
//! so per-class time averages can be integrated without scanning the line.

use std::collections::VecDeque;

use qn_core::{AgentId, Capacity, ClassId, QnError, QnResult, ServerId, SimTime, StationId, VariateSource};

use crate::{Agent, Server};

pub struct Station {
    pub id:        StationId,
    servers:       Vec<Server>,
    waiting:       VecDeque<Agent>,
    capacity:      Capacity,
    /// Service rate per class, indexed by `ClassId`.
    service_rates: Vec<f64>,
    waiting_by_class: Vec<usize>,
    busy_by_class:    Vec<usize>,
}

impl Station {
    /// Build a station with `servers` idle servers.
    ///
    /// `service_rates` holds one rate per class; a single-class network
    /// passes a one-element vector.
    pub fn new(id: StationId, servers: u32, capacity: Capacity, service_rates: Vec<f64>) -> Self {
        let classes = service_rates.len();
        Self {
            id,
            servers: (0..servers).map(|i| Server::new(ServerId(i))).collect(),
            waiting: VecDeque::new(),
            capacity,
            service_rates,
            waiting_by_class: vec![0; classes],
            busy_by_class:    vec![0; classes],
        }
    }

    // ── Servers ───────────────────────────────────────────────────────────

    /// First idle server in index order, if any.
    pub fn find_idle_server(&self) -> Option<ServerId> {
        self.servers.iter().find(|s| !s.is_busy()).map(|s| s.id)
    }

    pub fn server(&self, id: ServerId) -> &Server {
        &self.servers[id.index()]
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// The server currently holding `agent`.
    pub fn server_holding(&self, agent: AgentId) -> Option<ServerId> {
        self.servers
            .iter()
            .find(|s| s.agent().is_some_and(|a| a.id == agent))
            .map(|s| s.id)
    }

    /// Put `agent` into service on `server` at `now`.
    ///
    /// Stamps the service start, draws a class-specific service duration
    /// from `rng`, stamps the departure time, and returns it.  The server must
    /// be idle.
    pub fn begin_service<V: VariateSource>(
        &mut self,
        server: ServerId,
        mut agent: Agent,
        now: SimTime,
        rng: &mut V,
    ) -> QnResult<SimTime> {
        let duration = self.sample_service_duration(agent.class, rng)?;
        let departure = now + duration;
        agent.service_start = Some(now);
        agent.departure_time = Some(departure);

        let class = agent.class;
        let slot = self
            .servers
            .get_mut(server.index())
            .ok_or_else(|| QnError::ContractViolation(format!("{} has no {server}", self.id)))?;
        slot.assign(agent).map_err(|a| {
            QnError::ContractViolation(format!("{server} at {} is busy, cannot serve {}", self.id, a.id))
        })?;
        bump(&mut self.busy_by_class, class, true);
        Ok(departure)
    }

    /// Release `server`, returning the agent it was serving.
    pub fn finish_service(&mut self, server: ServerId) -> Option<Agent> {
        let agent = self.servers.get_mut(server.index())?.release()?;
        bump(&mut self.busy_by_class, agent.class, false);
        Some(agent)
    }

    // ── Waiting line ──────────────────────────────────────────────────────

    /// `true` if the waiting line is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.capacity.is_reached(self.waiting.len())
    }

    /// Append `agent` to the tail of the waiting line.
    ///
    /// When the line is full nothing changes and the agent is handed back.
    pub fn enqueue(&mut self, agent: Agent) -> Result<(), Agent> {
        if self.is_full() {
            return Err(agent);
        }
        bump(&mut self.waiting_by_class, agent.class, true);
        self.waiting.push_back(agent);
        Ok(())
    }

    /// Pop the head of the waiting line.
    pub fn dequeue_next(&mut self) -> Option<Agent> {
        let agent = self.waiting.pop_front()?;
        bump(&mut self.waiting_by_class, agent.class, false);
        Some(agent)
    }

    /// Agents in the waiting line, head first.
    pub fn waiting_line(&self) -> impl Iterator<Item = &Agent> {
        self.waiting.iter()
    }

    // ── Service times ─────────────────────────────────────────────────────

    /// Draw a service duration for an agent of `class`.
    pub fn sample_service_duration<V: VariateSource>(&self, class: ClassId, rng: &mut V) -> QnResult<f64> {
        let rate = self.service_rate(class).ok_or_else(|| {
            QnError::ContractViolation(format!("{} has no service rate for {class}", self.id))
        })?;
        rng.exponential(rate)
    }

    pub fn service_rate(&self, class: ClassId) -> Option<f64> {
        self.service_rates.get(class.index()).copied()
    }

    // ── Occupancy (statistics only) ───────────────────────────────────────

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    pub fn busy_server_count(&self) -> usize {
        self.servers.iter().filter(|s| s.is_busy()).count()
    }

    pub fn in_system_count(&self) -> usize {
        self.waiting_count() + self.busy_server_count()
    }

    pub fn class_waiting_count(&self, class: ClassId) -> usize {
        self.waiting_by_class.get(class.index()).copied().unwrap_or(0)
    }

    pub fn class_busy_count(&self, class: ClassId) -> usize {
        self.busy_by_class.get(class.index()).copied().unwrap_or(0)
    }

    pub fn class_in_system_count(&self, class: ClassId) -> usize {
        self.class_waiting_count(class) + self.class_busy_count(class)
    }
}

/// Adjust a per-class counter.  Classes without a service rate never reach
/// a server (their draw fails first), so only the waiting line can see them.
fn bump(counts: &mut [usize], class: ClassId, up: bool) {
    if let Some(c) = counts.get_mut(class.index()) {
        if up {
            *c += 1;
        } else {
            *c = c.saturating_sub(1);
        }
    }
}
