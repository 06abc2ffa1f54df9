//! Closed-form reference values for Markovian queues and open Jackson
//! networks.
//!
//! These never feed into a simulation; they are an independent oracle to
//! compare measured metrics against.
//!
//! | Model      | Function        | Notes                                    |
//! |------------|-----------------|------------------------------------------|
//! | M/M/1      | [`mm1`]         | requires `λ < μ`                          |
//! | M/M/c      | [`mmc`]         | requires `λ < cμ`                         |
//! | M/M/c/K    | [`mmck`]        | `K` counts waiting + in service; any load |
//! | Jackson    | [`open_jackson`]| single class; traffic equations solved exactly |
//!
//! A station configured with `c` servers and a finite waiting-line capacity
//! `q` is an M/M/c/K queue with `K = c + q`.

use qn_config::NetworkConfig;
use qn_core::{Capacity, ClassId, StationId};

use crate::{TheoryError, TheoryResult};

/// Steady-state measures of one queue.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QueueReference {
    /// Arrival rate offered to the queue.
    pub arrival_rate: f64,
    /// Accepted arrival rate (`λ` for infinite queues).
    pub throughput: f64,
    /// Per-server utilization.
    pub utilization: f64,
    pub l:  f64,
    pub lq: f64,
    pub ls: f64,
    pub w:  f64,
    pub wq: f64,
    pub ws: f64,
    /// Probability an arrival finds the system full.
    pub loss_probability: f64,
}

fn positive(what: &'static str, value: f64) -> TheoryResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(TheoryError::InvalidParameter { what, value })
    }
}

// ── Single queues ─────────────────────────────────────────────────────────────

pub fn mm1(lambda: f64, mu: f64) -> TheoryResult<QueueReference> {
    mmc(lambda, mu, 1)
}

/// M/M/c with an unbounded waiting line (Erlang C).
pub fn mmc(lambda: f64, mu: f64, c: u32) -> TheoryResult<QueueReference> {
    let lambda = positive("arrival rate", lambda)?;
    let mu = positive("service rate", mu)?;
    let servers = positive("server count", f64::from(c))?;

    let r = lambda / mu;
    let rho = r / servers;
    if rho >= 1.0 {
        return Err(TheoryError::Unstable { rho });
    }

    // term(n) = r^n / n!, built incrementally.
    let mut term = 1.0;
    let mut below_c = 0.0;
    for n in 0..c {
        below_c += term;
        term *= r / f64::from(n + 1);
    }
    let p0 = 1.0 / (below_c + term / (1.0 - rho));
    let lq = term * rho * p0 / (1.0 - rho).powi(2);
    let l = lq + r;

    Ok(QueueReference {
        arrival_rate: lambda,
        throughput: lambda,
        utilization: rho,
        l,
        lq,
        ls: r,
        w: l / lambda,
        wq: lq / lambda,
        ws: 1.0 / mu,
        loss_probability: 0.0,
    })
}

/// M/M/c/K: at most `k` agents in the system, arrivals beyond that are lost.
pub fn mmck(lambda: f64, mu: f64, c: u32, k: u32) -> TheoryResult<QueueReference> {
    let lambda = positive("arrival rate", lambda)?;
    let mu = positive("service rate", mu)?;
    positive("server count", f64::from(c))?;
    if k < c {
        return Err(TheoryError::CapacityBelowServers { c, k });
    }

    let r = lambda / mu;
    // Unnormalized p(n): r^n / n! up to c, then a factor r / c per step.
    let mut weights = Vec::with_capacity(k as usize + 1);
    let mut term = 1.0;
    weights.push(term);
    for n in 1..=k {
        term *= r / f64::from(n.min(c));
        weights.push(term);
    }
    let total: f64 = weights.iter().sum();
    let p: Vec<f64> = weights.iter().map(|w| w / total).collect();

    let l: f64 = p.iter().enumerate().map(|(n, pn)| n as f64 * pn).sum();
    let lq: f64 = p
        .iter()
        .enumerate()
        .skip(c as usize + 1)
        .map(|(n, pn)| (n - c as usize) as f64 * pn)
        .sum();
    let loss = p[k as usize];
    let throughput = lambda * (1.0 - loss);
    let ls = l - lq;

    Ok(QueueReference {
        arrival_rate: lambda,
        throughput,
        utilization: ls / f64::from(c),
        l,
        lq,
        ls,
        w: l / throughput,
        wq: lq / throughput,
        ws: 1.0 / mu,
        loss_probability: loss,
    })
}

/// A queue nothing ever reaches: empty, never busy, never losing.
fn idle(mu: f64) -> TheoryResult<QueueReference> {
    let mu = positive("service rate", mu)?;
    Ok(QueueReference {
        arrival_rate: 0.0,
        throughput: 0.0,
        utilization: 0.0,
        l: 0.0,
        lq: 0.0,
        ls: 0.0,
        w: 1.0 / mu,
        wq: 0.0,
        ws: 1.0 / mu,
        loss_probability: 0.0,
    })
}

// ── Networks ──────────────────────────────────────────────────────────────────

/// Solve the traffic equations `λ = γ + Pᵀλ` for the total arrival rate at
/// every station, given external rates `γ` and routing matrix `P`.
pub fn traffic_equations(external: &[f64], routing: &[Vec<f64>]) -> TheoryResult<Vec<f64>> {
    let n = external.len();
    // Augmented system (I - Pᵀ | γ).
    let mut a: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let mut row: Vec<f64> = (0..n)
                .map(|j| {
                    let p_ji = routing.get(j).and_then(|r| r.get(i)).copied().unwrap_or(0.0);
                    if i == j { 1.0 - p_ji } else { -p_ji }
                })
                .collect();
            row.push(external[i]);
            row
        })
        .collect();

    // Gaussian elimination with partial pivoting.
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))
            .ok_or(TheoryError::SingularRouting)?;
        if a[pivot][col].abs() < 1e-12 {
            return Err(TheoryError::SingularRouting);
        }
        a.swap(col, pivot);
        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..=n {
                let upper = a[col][k];
                a[row][k] -= factor * upper;
            }
        }
    }

    let mut lambda = vec![0.0; n];
    for i in (0..n).rev() {
        let tail: f64 = (i + 1..n).map(|j| a[i][j] * lambda[j]).sum();
        lambda[i] = (a[i][n] - tail) / a[i][i];
    }
    Ok(lambda)
}

/// Per-station reference values for a single-class network.
///
/// Unbounded stations are treated as independent M/M/c queues fed by the
/// traffic-equation rates (exact for Jackson networks).  Finite stations use
/// M/M/c/K with the same offered rate; upstream losses are not propagated,
/// so those values are approximate.  A self-route `P[i][i]` is treated as an
/// exit, matching the kernel.  A station no traffic reaches gets an idle
/// reference rather than failing the whole network.
pub fn open_jackson(config: &NetworkConfig) -> TheoryResult<Vec<QueueReference>> {
    if config.num_classes() != 1 {
        return Err(TheoryError::MultiClass(config.num_classes()));
    }
    let class = ClassId::DEFAULT;
    let n = config.num_stations();

    let mut external = vec![0.0; n];
    external[config.entry_station().index()] = config.external_rate();
    let routing: Vec<Vec<f64>> = config
        .station_ids()
        .map(|s| {
            let mut row = config.routing_row(class, s).to_vec();
            row[s.index()] = 0.0;
            row
        })
        .collect();
    let rates = traffic_equations(&external, &routing)?;

    config
        .station_ids()
        .map(|s: StationId| {
            let spec = config.station(s);
            let mu = config.service_rate(class, s);
            let lambda = rates[s.index()];
            if lambda <= 0.0 {
                return idle(mu);
            }
            match spec.capacity {
                Capacity::Unbounded => mmc(lambda, mu, spec.servers),
                Capacity::Finite(q) => {
                    let k = spec
                        .servers
                        .checked_add(q)
                        .ok_or(TheoryError::CapacityOverflow { c: spec.servers, q })?;
                    mmck(lambda, mu, spec.servers, k)
                }
            }
        })
        .collect()
}
