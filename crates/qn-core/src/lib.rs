//! `qn-core` — foundational types for the `qn` queueing-network simulator.
//!
//! This crate is a dependency of every other `qn-*` crate.  It has no `qn-*`
//! dependencies and minimal external ones (`rand`, `rand_distr`, and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `StationId`, `ServerId`, `ClassId`         |
//! | [`time`]        | `SimTime`, `SimClock`                                 |
//! | [`capacity`]    | `Capacity` (finite or unbounded waiting line)         |
//! | [`rng`]         | `VariateSource` trait, `SimRng` (per-run generator)   |
//! | [`error`]       | `QnError`, `QnResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `qn-config`.                                   |

pub mod capacity;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use capacity::Capacity;
pub use error::{QnError, QnResult};
pub use ids::{AgentId, ClassId, ServerId, StationId};
pub use rng::{SimRng, VariateSource};
pub use time::{SimClock, SimTime};
