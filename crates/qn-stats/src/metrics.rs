//! The metrics table: one [`Metrics`] row per station (aggregate) and per
//! station and class.

use qn_core::{ClassId, SimTime, StationId};
use qn_sim::RunLog;

use crate::integrate::per_unit;
use crate::{Occupancy, VisitSummary};

// ── LittleCheck ───────────────────────────────────────────────────────────────

/// Little's-Law diagnostics: the measured time averages against
/// `λ_eff × W` and `λ_eff × Wq`.
///
/// Reported, never used to correct anything.  A ratio is `None` when its
/// expected value is zero (nothing was served).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LittleCheck {
    pub expected_l:  f64,
    pub l_ratio:     Option<f64>,
    pub expected_lq: f64,
    pub lq_ratio:    Option<f64>,
}

impl LittleCheck {
    pub fn new(throughput: f64, w: f64, wq: f64, l: f64, lq: f64) -> Self {
        let expected_l = throughput * w;
        let expected_lq = throughput * wq;
        Self {
            expected_l,
            l_ratio: ratio(l, expected_l),
            expected_lq,
            lq_ratio: ratio(lq, expected_lq),
        }
    }
}

fn ratio(measured: f64, expected: f64) -> Option<f64> {
    (expected > 0.0).then(|| measured / expected)
}

// ── Metrics ───────────────────────────────────────────────────────────────────

/// Performance measures for one station, either across all classes or for a
/// single class.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    /// Completed visits.
    pub served: u64,
    /// `Wq`: mean service start minus arrival.
    pub mean_waiting_time: f64,
    /// `Ws`: mean departure minus service start.
    pub mean_service_time: f64,
    /// `W`: mean departure minus arrival.
    pub mean_system_time: f64,
    pub mean_queue_on_arrival: f64,
    pub max_queue_on_arrival:  u64,
    /// `Lq`: time-averaged waiting-line length.
    pub mean_waiting: f64,
    /// `L`: time-averaged number in the station.
    pub mean_in_system: f64,
    /// `Ls`: time-averaged number in service.
    pub mean_in_service: f64,
    /// `ρ`: busy-server time over `servers × horizon`.  For a class row, the
    /// share of that utilization due to the class.
    pub utilization: f64,
    /// Arrival attempts (accepted + rejected).
    pub arrivals: u64,
    pub accepted: u64,
    pub rejected: u64,
    /// `λ_eff`: accepted arrivals per unit time.
    pub throughput: f64,
    /// `P_loss`: rejected over attempted; zero with no attempts.
    pub loss_probability: f64,
    pub little: LittleCheck,
}

impl Metrics {
    pub fn build(
        visits: &VisitSummary,
        occupancy: &Occupancy,
        servers: usize,
        accepted: u64,
        rejected: u64,
        horizon: f64,
    ) -> Self {
        let arrivals = accepted + rejected;
        let throughput = per_unit(accepted as f64, horizon);
        let mean_waiting = occupancy.mean_waiting(horizon);
        let mean_in_system = occupancy.mean_in_system(horizon);
        let (w, wq) = (visits.mean_system(), visits.mean_waiting());

        Self {
            served: visits.served,
            mean_waiting_time: wq,
            mean_service_time: visits.mean_service(),
            mean_system_time: w,
            mean_queue_on_arrival: visits.mean_queue_on_arrival(),
            max_queue_on_arrival: visits.max_queue_on_arrival,
            mean_waiting,
            mean_in_system,
            mean_in_service: occupancy.mean_busy(horizon),
            utilization: per_unit(occupancy.busy_area, servers as f64 * horizon),
            arrivals,
            accepted,
            rejected,
            throughput,
            loss_probability: if arrivals == 0 { 0.0 } else { rejected as f64 / arrivals as f64 },
            little: LittleCheck::new(throughput, w, wq, mean_in_system, mean_waiting),
        }
    }
}

// ── StationMetrics / NetworkMetrics ───────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct StationMetrics {
    pub station:   StationId,
    pub servers:   usize,
    pub aggregate: Metrics,
    /// Indexed by `ClassId`.
    pub classes:   Vec<Metrics>,
}

impl StationMetrics {
    pub fn class(&self, class: ClassId) -> Option<&Metrics> {
        self.classes.get(class.index())
    }
}

/// Every metric of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkMetrics {
    pub horizon:           f64,
    pub end_time:          SimTime,
    pub external_arrivals: u64,
    pub rejected:          u64,
    pub exits:             u64,
    pub stations:          Vec<StationMetrics>,
}

impl NetworkMetrics {
    /// Reduce a run's records to its metrics table.
    pub fn compute(log: &RunLog) -> Self {
        let horizon = log.horizon;
        let stations = (0..log.num_stations())
            .map(|s| {
                let station = StationId(s as u32);
                let servers = log.servers[s];

                let aggregate = Metrics::build(
                    &log.completed_at(station).collect::<VisitSummary>(),
                    &Occupancy::integrate(log.snapshots.station(station), horizon),
                    servers,
                    log.ledger.station_accepted(station),
                    log.ledger.station_rejected(station),
                    horizon,
                );

                let classes = (0..log.num_classes)
                    .map(|k| {
                        let class = ClassId(k as u16);
                        Metrics::build(
                            &log.completed_at(station).filter(|r| r.class == class).collect::<VisitSummary>(),
                            &Occupancy::integrate(log.snapshots.class(station, class), horizon),
                            servers,
                            log.ledger.accepted(station, class),
                            log.ledger.rejected(station, class),
                            horizon,
                        )
                    })
                    .collect();

                StationMetrics { station, servers, aggregate, classes }
            })
            .collect();

        Self {
            horizon,
            end_time: log.end_time,
            external_arrivals: log.external_arrivals,
            rejected: log.rejected.len() as u64,
            exits: log.exits,
            stations,
        }
    }

    pub fn station(&self, station: StationId) -> Option<&StationMetrics> {
        self.stations.get(station.index())
    }

    /// Fraction of external arrivals turned away anywhere in the network.
    pub fn network_loss_probability(&self) -> f64 {
        if self.external_arrivals == 0 {
            0.0
        } else {
            self.rejected as f64 / self.external_arrivals as f64
        }
    }
}
