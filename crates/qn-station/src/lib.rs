//! `qn-station` — the service points of a queueing network.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`agent`]     | `Agent`, the transient entity carried through the network    |
//! | [`server`]    | `Server`, one unit of service capacity                       |
//! | [`station`]   | `Station`: servers, FIFO waiting line, capacity, rates       |
//!
//! # Ownership
//!
//! An [`Agent`] record is owned by exactly one place at a time: the
//! station's waiting line, the [`Server`] serving it, or the kernel while it
//! is being routed between stations.  Nothing else holds a reference, so a
//! relocated agent can never be observed through a stale alias.

pub mod agent;
pub mod server;
pub mod station;


pub use agent::Agent;
pub use server::Server;
pub use station::Station;
