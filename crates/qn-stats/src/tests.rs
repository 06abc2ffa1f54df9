//! Unit and convergence tests for metrics and reference models.

#[cfg(test)]
mod helpers {
    use std::collections::VecDeque;

    use qn_config::{NetworkConfig, NetworkConfigBuilder};
    use qn_core::{Capacity, QnError, QnResult, SimTime, VariateSource};
    use qn_sim::StateSnapshot;

    pub fn snap(t: f64, waiting: usize, in_system: usize, busy: usize) -> StateSnapshot {
        StateSnapshot { time: SimTime(t), waiting, in_system, busy }
    }

    pub fn mm1(arrival: f64, service: f64, capacity: Capacity, horizon: f64, seed: u64) -> NetworkConfig {
        NetworkConfigBuilder::single_class(arrival, vec![service], vec![1], vec![vec![0.0]], horizon, Some(vec![capacity]))
            .seed(seed)
            .build()
            .unwrap()
    }

    pub fn close(actual: f64, expected: f64, rel: f64) -> bool {
        (actual - expected).abs() <= rel * expected.abs()
    }

    /// Plays back a fixed list of exponential draws; every uniform is 0.5.
    pub struct Scripted(pub VecDeque<f64>);

    impl VariateSource for Scripted {
        fn exponential(&mut self, _rate: f64) -> QnResult<f64> {
            self.0
                .pop_front()
                .ok_or_else(|| QnError::ContractViolation("scripted draws exhausted".into()))
        }

        fn uniform(&mut self) -> f64 {
            0.5
        }
    }
}

// ── Integration ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod integrate_tests {
    use super::helpers::snap;
    use crate::Occupancy;

    #[test]
    fn step_function_area() {
        let stream = [
            snap(0.0, 0, 0, 0),
            snap(1.0, 0, 1, 1),
            snap(2.0, 1, 2, 1),
            snap(4.0, 0, 1, 1),
            snap(6.0, 0, 0, 0),
        ];
        let occ = Occupancy::integrate(&stream, 10.0);
        assert_eq!(occ.waiting_area, 2.0);
        assert_eq!(occ.in_system_area, 1.0 + 4.0 + 2.0);
        assert_eq!(occ.busy_area, 5.0);
        assert!((occ.mean_in_system(10.0) - 0.7).abs() < 1e-12);
        assert!((occ.mean_busy(10.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn last_value_holds_to_horizon() {
        let occ = Occupancy::integrate(&[snap(0.0, 0, 0, 0), snap(7.0, 3, 4, 1)], 10.0);
        assert_eq!(occ.waiting_area, 9.0);
        assert_eq!(occ.in_system_area, 12.0);
    }

    #[test]
    fn same_instant_snapshots_last_wins() {
        let occ = Occupancy::integrate(&[snap(0.0, 0, 5, 5), snap(0.0, 0, 1, 1)], 2.0);
        assert_eq!(occ.in_system_area, 2.0);
    }

    #[test]
    fn clipped_at_horizon() {
        let occ = Occupancy::integrate(&[snap(0.0, 0, 1, 1), snap(12.0, 0, 9, 1)], 10.0);
        assert_eq!(occ.in_system_area, 10.0);
    }

    #[test]
    fn empty_stream_is_zero() {
        assert_eq!(Occupancy::integrate(&[], 10.0), Occupancy::default());
        assert_eq!(Occupancy::default().mean_waiting(0.0), 0.0);
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics_tests {
    use qn_core::{AgentId, Capacity, ClassId, ServerId, SimTime, StationId};
    use qn_sim::{CompletedRecord, NoopObserver, RunLog, SimBuilder};

    use super::helpers::{Scripted, mm1};
    use crate::{NetworkMetrics, VisitSummary};

    /// Arrivals at 1, 2, 3 (the third rejected, capacity 1); services 3 and 2;
    /// departures at 4 and 6; horizon 10.
    fn scripted_metrics() -> NetworkMetrics {
        let config = mm1(1.0, 1.0, Capacity::Finite(1), 10.0, 0);
        let script = Scripted([1.0, 3.0, 1.0, 1.0, 10.0, 2.0].into_iter().collect());
        let mut sim = SimBuilder::new(config).variates(script).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        NetworkMetrics::compute(sim.log())
    }

    #[test]
    fn customer_averages() {
        let m = scripted_metrics().stations[0].aggregate;
        assert_eq!(m.served, 2);
        assert_eq!(m.mean_waiting_time, 1.0);
        assert_eq!(m.mean_service_time, 2.5);
        assert_eq!(m.mean_system_time, 3.5);
        assert_eq!(m.max_queue_on_arrival, 0);
    }

    #[test]
    fn time_averages_and_counts() {
        let metrics = scripted_metrics();
        let m = metrics.stations[0].aggregate;
        assert!((m.mean_waiting - 0.2).abs() < 1e-12);
        assert!((m.mean_in_system - 0.7).abs() < 1e-12);
        assert!((m.mean_in_service - 0.5).abs() < 1e-12);
        assert!((m.utilization - 0.5).abs() < 1e-12);
        assert_eq!((m.arrivals, m.accepted, m.rejected), (3, 2, 1));
        assert!((m.throughput - 0.2).abs() < 1e-12);
        assert!((m.loss_probability - 1.0 / 3.0).abs() < 1e-12);
        assert!((metrics.network_loss_probability() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn little_holds_exactly_when_all_visits_complete() {
        let m = scripted_metrics().stations[0].aggregate;
        assert!((m.little.expected_l - 0.7).abs() < 1e-12);
        assert!((m.little.l_ratio.unwrap() - 1.0).abs() < 1e-9);
        assert!((m.little.lq_ratio.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn single_class_row_matches_aggregate() {
        let metrics = scripted_metrics();
        let st = &metrics.stations[0];
        assert_eq!(st.class(ClassId::DEFAULT), Some(&st.aggregate));
        assert!(st.class(ClassId(1)).is_none());
    }

    #[test]
    fn idle_station_reports_zeros() {
        let log = RunLog::new(10.0, vec![2], 1);
        let metrics = NetworkMetrics::compute(&log);
        let m = metrics.station(StationId(0)).unwrap().aggregate;
        assert_eq!(m.served, 0);
        assert_eq!(m.mean_waiting_time, 0.0);
        assert_eq!(m.mean_system_time, 0.0);
        assert_eq!(m.utilization, 0.0);
        assert_eq!(m.loss_probability, 0.0);
        assert_eq!(m.little.l_ratio, None);
        assert_eq!(metrics.network_loss_probability(), 0.0);
    }

    #[test]
    fn empty_visit_summary() {
        let v = VisitSummary::default();
        assert_eq!(v.mean_waiting(), 0.0);
        assert_eq!(v.mean_queue_on_arrival(), 0.0);
    }

    #[test]
    fn long_queue_on_arrival_is_not_truncated() {
        let deep = u64::from(u32::MAX) + 10;
        let visit = |queue_len_on_arrival| CompletedRecord {
            agent: AgentId(0),
            arrival_time: SimTime(0.0),
            service_start: SimTime(1.0),
            departure_time: SimTime(2.0),
            server: ServerId(0),
            station: StationId(0),
            class: ClassId::DEFAULT,
            queue_len_on_arrival,
        };
        let v: VisitSummary = [visit(deep), visit(10)].iter().collect();
        assert_eq!(v.max_queue_on_arrival, deep);
        assert_eq!(v.mean_queue_on_arrival(), (deep + 10) as f64 / 2.0);
    }
}

// ── Reference models ──────────────────────────────────────────────────────────

#[cfg(test)]
mod theory_tests {
    use qn_config::NetworkConfigBuilder;
    use qn_core::Capacity;

    use super::helpers::close;
    use crate::TheoryError;
    use crate::theory::{mm1, mmc, mmck, open_jackson, traffic_equations};

    #[test]
    fn mm1_textbook() {
        let q = mm1(0.8, 1.0).unwrap();
        assert!(close(q.l, 4.0, 1e-12));
        assert!(close(q.lq, 3.2, 1e-12));
        assert!(close(q.w, 5.0, 1e-12));
        assert!(close(q.wq, 4.0, 1e-12));
        assert!(close(q.utilization, 0.8, 1e-12));
    }

    #[test]
    fn mmc_erlang_c() {
        // r = 2, c = 3: p0 = 1/9, Lq = 8/9.
        let q = mmc(2.0, 1.0, 3).unwrap();
        assert!(close(q.lq, 8.0 / 9.0, 1e-12));
        assert!(close(q.l, 8.0 / 9.0 + 2.0, 1e-12));
        assert!(close(q.ls, 2.0, 1e-12));
    }

    #[test]
    fn mm1k_closed_form() {
        let (rho, k) = (0.5_f64, 5);
        let expected_l = rho * (1.0 - 6.0 * rho.powi(k) + 5.0 * rho.powi(k + 1))
            / ((1.0 - rho) * (1.0 - rho.powi(k + 1)));
        let q = mmck(0.5, 1.0, 1, 5).unwrap();
        assert!(close(q.l, expected_l, 1e-12));
        assert!(close(q.throughput, 0.5 * (1.0 - q.loss_probability), 1e-12));
    }

    #[test]
    fn mmck_approaches_mmc_for_large_k() {
        let finite = mmck(3.0, 2.0, 2, 200).unwrap();
        let infinite = mmc(3.0, 2.0, 2).unwrap();
        assert!(close(finite.l, infinite.l, 1e-6));
        assert!(finite.loss_probability < 1e-9);
    }

    #[test]
    fn invalid_and_unstable() {
        assert_eq!(mm1(1.0, 1.0).unwrap_err(), TheoryError::Unstable { rho: 1.0 });
        assert!(matches!(mmc(0.0, 1.0, 1), Err(TheoryError::InvalidParameter { .. })));
        assert!(matches!(mmc(1.0, 1.0, 0), Err(TheoryError::InvalidParameter { .. })));
        assert_eq!(mmck(1.0, 1.0, 3, 2).unwrap_err(), TheoryError::CapacityBelowServers { c: 3, k: 2 });
        // Overload is fine with a finite buffer.
        assert!(mmck(5.0, 1.0, 1, 3).is_ok());
    }

    #[test]
    fn traffic_equations_series_and_split() {
        let series = vec![vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0], vec![0.0; 3]];
        let rates = traffic_equations(&[1.0, 0.0, 0.0], &series).unwrap();
        assert!(rates.iter().all(|r| close(*r, 1.0, 1e-12)), "{rates:?}");

        let complex = vec![
            vec![0.0, 0.2, 0.0, 0.8],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
            vec![0.0; 4],
        ];
        let rates = traffic_equations(&[1.0, 0.0, 0.0, 0.0], &complex).unwrap();
        for (got, want) in rates.iter().zip([1.0, 0.2, 0.2, 1.0]) {
            assert!(close(*got, want, 1e-12), "{rates:?}");
        }
    }

    #[test]
    fn traffic_equations_feedback_and_singular() {
        let feedback = vec![vec![0.0, 1.0], vec![0.5, 0.0]];
        let rates = traffic_equations(&[1.0, 0.0], &feedback).unwrap();
        assert!(close(rates[0], 2.0, 1e-12) && close(rates[1], 2.0, 1e-12), "{rates:?}");

        let closed = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        assert_eq!(traffic_equations(&[1.0, 0.0], &closed), Err(TheoryError::SingularRouting));
    }

    #[test]
    fn jackson_rejects_multi_class() {
        let config = NetworkConfigBuilder::new(10.0)
            .station(1, Capacity::Unbounded)
            .class("a", 0.5, vec![vec![0.0]], vec![1.0])
            .class("b", 0.5, vec![vec![0.0]], vec![1.0])
            .arrivals(0.5, 0)
            .build()
            .unwrap();
        assert_eq!(open_jackson(&config), Err(TheoryError::MultiClass(2)));
    }

    #[test]
    fn jackson_unreached_station_is_idle() {
        let config = NetworkConfigBuilder::single_class(
            0.5,
            vec![1.0, 4.0],
            vec![1, 2],
            vec![vec![0.0, 0.0], vec![0.0, 0.0]],
            10.0,
            None,
        )
        .build()
        .unwrap();
        let refs = open_jackson(&config).unwrap();
        assert!(close(refs[0].l, 1.0, 1e-12));
        let idle = refs[1];
        assert_eq!(idle.arrival_rate, 0.0);
        assert_eq!((idle.l, idle.lq, idle.utilization, idle.loss_probability), (0.0, 0.0, 0.0, 0.0));
        assert!(close(idle.ws, 0.25, 1e-12));
    }

    #[test]
    fn jackson_capacity_overflow_is_an_error() {
        let config = NetworkConfigBuilder::single_class(
            0.5,
            vec![1.0],
            vec![2],
            vec![vec![0.0]],
            10.0,
            Some(vec![Capacity::Finite(u32::MAX)]),
        )
        .build()
        .unwrap();
        assert_eq!(open_jackson(&config), Err(TheoryError::CapacityOverflow { c: 2, q: u32::MAX }));
    }
}

// ── Convergence against reference values ──────────────────────────────────────

#[cfg(test)]
mod convergence_tests {
    use qn_config::NetworkConfigBuilder;
    use qn_core::Capacity;
    use qn_sim::simulate;

    use super::helpers::{close, mm1};
    use crate::NetworkMetrics;
    use crate::theory::{mmck, open_jackson};

    #[test]
    fn littles_law_mm1_long_run() {
        let log = simulate(mm1(0.8, 1.0, Capacity::Unbounded, 100_000.0, 42)).unwrap();
        let m = NetworkMetrics::compute(&log).stations[0].aggregate;
        assert!(close(m.mean_in_system, 4.0, 0.10), "L = {}", m.mean_in_system);
        assert!(close(m.mean_system_time, 5.0, 0.10), "W = {}", m.mean_system_time);
        assert!(close(m.utilization, 0.8, 0.05), "rho = {}", m.utilization);
        let ratio = m.little.l_ratio.unwrap();
        assert!((ratio - 1.0).abs() < 0.05, "L / (lambda W) = {ratio}");
    }

    #[test]
    fn jackson_series_matches_product_form() {
        let config = NetworkConfigBuilder::single_class(
            1.0,
            vec![1.5, 1.5, 2.0],
            vec![1, 1, 1],
            vec![vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0], vec![0.0; 3]],
            20_000.0,
            None,
        )
        .seed(42)
        .build()
        .unwrap();
        let reference = open_jackson(&config).unwrap();
        let metrics = NetworkMetrics::compute(&simulate(config).unwrap());

        for (st, q) in metrics.stations.iter().zip(&reference) {
            let m = st.aggregate;
            assert!((m.utilization - q.utilization).abs() < 0.03, "{}: rho {} vs {}", st.station, m.utilization, q.utilization);
            assert!(close(m.mean_in_system, q.l, 0.15), "{}: L {} vs {}", st.station, m.mean_in_system, q.l);
        }
    }

    #[test]
    fn multi_server_matches_erlang_c() {
        let config = NetworkConfigBuilder::single_class(3.0, vec![2.0], vec![2], vec![vec![0.0]], 20_000.0, None)
            .seed(42)
            .build()
            .unwrap();
        let q = open_jackson(&config).unwrap()[0];
        let m = NetworkMetrics::compute(&simulate(config).unwrap()).stations[0].aggregate;
        assert!((m.utilization - 0.75).abs() < 0.03, "rho {}", m.utilization);
        assert!(close(m.mean_in_system, q.l, 0.15), "L {} vs {}", m.mean_in_system, q.l);
    }

    #[test]
    fn finite_buffer_loss_matches_mm1k() {
        // Waiting-line capacity 2 with one server: K = 3.
        let log = simulate(mm1(0.9, 1.0, Capacity::Finite(2), 20_000.0, 42)).unwrap();
        let m = NetworkMetrics::compute(&log).stations[0].aggregate;
        let q = mmck(0.9, 1.0, 1, 3).unwrap();
        assert!((m.loss_probability - q.loss_probability).abs() < 0.02, "P_loss {} vs {}", m.loss_probability, q.loss_probability);
        assert!(close(m.mean_in_system, q.l, 0.05), "L {} vs {}", m.mean_in_system, q.l);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use qn_config::NetworkConfigBuilder;
    use qn_core::Capacity;
    use qn_sim::simulate;

    use crate::NetworkMetrics;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn metrics_stay_in_range(seed in any::<u64>(), servers in 1u32..4, cap in 1u32..5, rate in 0.5f64..4.0) {
            let config = NetworkConfigBuilder::single_class(
                rate,
                vec![1.0, 2.0],
                vec![servers, 1],
                vec![vec![0.0, 0.6], vec![0.0, 0.0]],
                200.0,
                Some(vec![Capacity::Finite(cap), Capacity::Unbounded]),
            )
            .seed(seed)
            .build()
            .unwrap();
            let metrics = NetworkMetrics::compute(&simulate(config).unwrap());

            for st in &metrics.stations {
                let m = st.aggregate;
                prop_assert!((0.0..=1.0 + 1e-9).contains(&m.utilization));
                prop_assert!((0.0..=1.0).contains(&m.loss_probability));
                prop_assert!(m.mean_waiting <= m.mean_in_system + 1e-9);
                prop_assert!(m.mean_in_service <= st.servers as f64 + 1e-9);
                prop_assert!((m.mean_in_system - m.mean_waiting - m.mean_in_service).abs() < 1e-6);
                prop_assert_eq!(m.arrivals, m.accepted + m.rejected);
            }
            prop_assert!(metrics.stations[0].aggregate.mean_waiting <= cap as f64 + 1e-9);
            prop_assert_eq!(metrics.stations[1].aggregate.rejected, 0);
        }
    }
}
