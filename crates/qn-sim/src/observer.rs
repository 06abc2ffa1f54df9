//! Simulation observer trait for streaming output and progress reporting.

use qn_core::{AgentId, ClassId, SimTime, StationId};
use qn_station::Station;

use crate::{CompletedRecord, Event, RejectionRecord, RunLog};

/// Callbacks invoked by [`NetworkSim::run`][crate::NetworkSim::run] as
/// events are processed.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Hooks fire after the kernel has applied the
/// transition they describe.
///
/// # Example: departure counter
///
/// ```rust,ignore
/// struct Served(u64);
///
/// impl SimObserver for Served {
///     fn on_departure(&mut self, _record: &CompletedRecord) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// An agent was accepted at `station` (served immediately or queued).
    fn on_arrival(&mut self, _time: SimTime, _agent: AgentId, _station: StationId, _class: ClassId) {}

    /// An agent finished service.  Fires once per visit.
    fn on_departure(&mut self, _record: &CompletedRecord) {}

    /// An agent was turned away from a full station.
    fn on_rejection(&mut self, _record: &RejectionRecord) {}

    /// An agent left the network after service at `station`.
    fn on_exit(&mut self, _time: SimTime, _agent: AgentId, _station: StationId) {}

    /// Called after each event (including any routing hop it caused) has
    /// been fully handled.  Read-only access to every station.
    fn on_event_end(&mut self, _event: &Event, _stations: &[Station]) {}

    /// Called once when the run stops.
    fn on_run_end(&mut self, _log: &RunLog) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
