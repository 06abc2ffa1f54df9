//! `qn-stats` — reduces a run's records to performance metrics.
//!
//! # What is computed
//!
//! | Kind               | Metric                 | Source                          |
//! |--------------------|------------------------|---------------------------------|
//! | customer-averaged  | `Wq`, `Ws`, `W`        | completed-visit log             |
//! |                    | queue length on arrival (mean, max) | completed-visit log |
//! | time-averaged      | `Lq`, `L`, `Ls`        | snapshot log, integrated to the horizon |
//! |                    | `ρ`                    | busy-server area / (`c` × horizon) |
//! | counting           | `λ_eff`, `P_loss`      | arrival ledger                  |
//! | diagnostic         | Little's-Law ratios    | `L / (λ_eff W)`, `Lq / (λ_eff Wq)` |
//!
//! Every metric exists per station across all classes and per station per
//! class.  A station that served nobody reports zero for every
//! customer-averaged metric.
//!
//! [`theory`] holds closed-form reference values (M/M/c, M/M/c/K, open
//! Jackson networks) to compare simulated metrics against.
//!
//! # Usage
//!
//! ```rust,ignore
//! let log = qn_sim::simulate(config)?;
//! let metrics = NetworkMetrics::compute(&log);
//! for st in &metrics.stations {
//!     println!("{}: rho={:.3} L={:.3}", st.station, st.aggregate.utilization, st.aggregate.mean_in_system);
//! }
//! ```

pub mod error;
pub mod integrate;
pub mod metrics;
pub mod theory;
pub mod visits;

#[cfg(test)]
mod tests;

pub use error::{TheoryError, TheoryResult};
pub use integrate::Occupancy;
pub use metrics::{LittleCheck, Metrics, NetworkMetrics, StationMetrics};
pub use theory::QueueReference;
pub use visits::VisitSummary;
