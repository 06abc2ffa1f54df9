//! `qn-config` — network configuration for the `qn` simulator.
//!
//! A [`NetworkConfig`] describes one open queueing network: the stations
//! (server count and waiting-line capacity), the agent classes (arrival
//! share, routing matrix, per-station service rates), the external arrival
//! stream, the horizon, and the seed.
//!
//! Every construction path ends in [`NetworkConfig::validate`], so the kernel
//! only ever sees a configuration whose rates, matrices, and probabilities
//! are consistent.  Failures carry the offending field.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "horizon": 1000.0,
//!   "seed": 42,
//!   "stations": [ { "servers": 1, "capacity": "inf" },
//!                 { "servers": 2, "capacity": 10 } ],
//!   "classes": [
//!     { "name": "standard", "arrival_probability": 1.0,
//!       "routing": [[0.0, 1.0], [0.0, 0.0]],
//!       "service_rates": [1.5, 2.0] }
//!   ],
//!   "arrivals": { "external_rate": 1.0, "entry_station": 0 }
//! }
//! ```

pub mod builder;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

#[cfg(test)]
mod tests;

pub use builder::NetworkConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config_json, load_config_reader};
pub use model::{ArrivalSpec, ClassSpec, NetworkConfig, StationSpec};
pub use validate::{PROBABILITY_TOLERANCE, ROW_SUM_TOLERANCE};
