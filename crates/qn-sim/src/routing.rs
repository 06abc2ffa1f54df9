//! Probabilistic routing between stations.
//!
//! A routing row gives the probability of moving from the current station to
//! every station.  Rows may sum to less than 1.0: the residual is the
//! probability of leaving the network.
//!
//! ```text
//! row = [0.0, 0.2, 0.0, 0.5]        sum = 0.7
//!   u ~ U[0,1)   u >= 0.7  → exit               (p = 0.3)
//!                otherwise → sample j ∝ row[j]  (1: 0.2/0.7, 3: 0.5/0.7)
//! ```
//!
//! The row is read fresh for every decision; nothing is cached between
//! agents or classes.

use qn_core::{QnError, QnResult, StationId, VariateSource};
use qn_config::ROW_SUM_TOLERANCE;

/// Choose the next station from `row`, or `None` if the agent leaves.
///
/// Negative or NaN entries and sums above `1 + ROW_SUM_TOLERANCE` are
/// contract violations: validation should have rejected them.
pub fn route<V: VariateSource>(row: &[f64], rng: &mut V) -> QnResult<Option<StationId>> {
    if let Some(bad) = row.iter().find(|p| **p < 0.0 || p.is_nan()) {
        return Err(QnError::ContractViolation(format!("negative routing probability {bad} in {row:?}")));
    }

    let sum: f64 = row.iter().sum();
    if sum == 0.0 {
        return Ok(None);
    }
    if sum > 1.0 + ROW_SUM_TOLERANCE {
        return Err(QnError::ContractViolation(format!("routing row {row:?} sums to {sum} > 1.0")));
    }

    if sum < 1.0 && rng.uniform() >= sum {
        return Ok(None);
    }

    // `categorical` normalizes by the row sum.
    let next = rng.categorical(row)?;
    let id = StationId::try_from(next)
        .map_err(|_| QnError::ContractViolation(format!("station index {next} out of range")))?;
    Ok(Some(id))
}
