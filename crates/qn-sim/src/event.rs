//! `EventScheduler` — the time-ordered queue of pending events.
//!
//! # Ordering
//!
//! Events pop in ascending `(time, kind, seq)` order:
//!
//! 1. earliest scheduled time first;
//! 2. at equal times, `Arrival` before `Departure`;
//! 3. at equal time and kind, insertion order (`seq` is a per-scheduler
//!    counter assigned on push).
//!
//! The tie-break is explicit so replays with the same seed never depend on
//! heap internals.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use qn_core::{AgentId, ClassId, SimTime, StationId};

// ── Event ─────────────────────────────────────────────────────────────────────

/// The two kinds of scheduled event.  Declaration order is the tie-break
/// order at equal timestamps.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum EventKind {
    Arrival,
    Departure,
}

/// An immutable scheduled event.
///
/// One fixed shape for both kinds: external arrivals carry the class drawn
/// for the new agent, departures leave `class` empty (the agent record
/// already knows it).
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Event {
    pub time:    SimTime,
    pub kind:    EventKind,
    pub agent:   AgentId,
    pub station: StationId,
    pub class:   Option<ClassId>,
}

impl Event {
    pub fn arrival(time: SimTime, agent: AgentId, station: StationId, class: ClassId) -> Self {
        Self { time, kind: EventKind::Arrival, agent, station, class: Some(class) }
    }

    pub fn departure(time: SimTime, agent: AgentId, station: StationId) -> Self {
        Self { time, kind: EventKind::Departure, agent, station, class: None }
    }
}

// ── Heap entry ────────────────────────────────────────────────────────────────

struct Pending {
    seq:   u64,
    event: Event,
}

impl Pending {
    #[inline]
    fn key(&self) -> (SimTime, EventKind, u64) {
        (self.event.time, self.event.kind, self.seq)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

// ── EventScheduler ────────────────────────────────────────────────────────────

/// Min-priority queue of pending events.  Purely synchronous; never blocks.
#[derive(Default)]
pub struct EventScheduler {
    heap:     BinaryHeap<Reverse<Pending>>,
    next_seq: u64,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event`.
    pub fn push(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Pending { seq, event }));
    }

    /// Remove and return the earliest event, or `None` if nothing is pending.
    pub fn pop_earliest(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(p)| p.event)
    }

    /// Time of the earliest pending event.
    pub fn next_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse(p)| p.event.time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
