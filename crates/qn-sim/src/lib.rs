//! `qn-sim` — discrete-event kernel for open multi-class queueing networks.
//!
//! # Event loop
//!
//! ```text
//! record an initial snapshot for every station
//! schedule the first external arrival
//! while let Some(event) = scheduler.pop_earliest():
//!   if event.time > horizon: stop (the event is discarded)
//!   ARRIVAL   → admit at the entry station, schedule the next external arrival
//!   DEPARTURE → log the visit, hand the server to the head of the line,
//!               route the agent (re-admit elsewhere, or exit)
//! ```
//!
//! Routing hops are plain calls inside the departure's handling; only
//! service completions and external arrivals are scheduled events.  A hop
//! always ends in service, queueing, or rejection, so it never recurses.
//!
//! # Modules
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | `event`     | `Event`, `EventKind`, `EventScheduler`                |
//! | `routing`   | `route`: next station from a routing row              |
//! | `record`    | completed/rejection records, snapshots, arrival ledger |
//! | `sim`       | `NetworkSim`, the kernel                              |
//! | `builder`   | `SimBuilder`                                          |
//! | `observer`  | `SimObserver` hooks                                   |
//! | `replicate` | `run_replications`                                    |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs replications on Rayon's thread pool.              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qn_config::NetworkConfigBuilder;
//! use qn_sim::{NoopObserver, SimBuilder};
//!
//! let config = NetworkConfigBuilder::single_class(0.8, vec![1.0], vec![1], vec![vec![0.0]], 1_000.0, None)
//!     .build()?;
//! let mut sim = SimBuilder::new(config).seed(42).build()?;
//! let log = sim.run(&mut NoopObserver)?;
//! println!("{} served, {} rejected", log.completed.len(), log.rejected.len());
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod record;
pub mod replicate;
pub mod routing;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::{Event, EventKind, EventScheduler};
pub use observer::{NoopObserver, SimObserver};
pub use record::{ArrivalLedger, CompletedRecord, RejectionRecord, RunLog, SnapshotLog, StateSnapshot};
pub use replicate::run_replications;
pub use routing::route;
pub use sim::{NetworkSim, simulate};
