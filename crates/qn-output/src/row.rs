//! Plain data row types written by output backends.

use qn_sim::{CompletedRecord, RejectionRecord};
use qn_stats::{Metrics, NetworkMetrics};

/// One completed service visit.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRow {
    pub agent_id:             u64,
    pub station_id:           u32,
    pub server_id:            u32,
    pub class:                String,
    pub arrival_time:         f64,
    pub service_start:        f64,
    pub departure_time:       f64,
    pub queue_len_on_arrival: u64,
}

impl CompletedRow {
    pub fn from_record(record: &CompletedRecord, class: &str) -> Self {
        Self {
            agent_id:             record.agent.0,
            station_id:           record.station.0,
            server_id:            record.server.0,
            class:                class.to_owned(),
            arrival_time:         record.arrival_time.as_f64(),
            service_start:        record.service_start.as_f64(),
            departure_time:       record.departure_time.as_f64(),
            queue_len_on_arrival: record.queue_len_on_arrival,
        }
    }
}

/// One agent turned away from a full station.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectionRow {
    pub agent_id:   u64,
    pub time:       f64,
    pub station_id: u32,
    pub class:      String,
}

impl RejectionRow {
    pub fn from_record(record: &RejectionRecord, class: &str) -> Self {
        Self {
            agent_id:   record.agent.0,
            time:       record.time.as_f64(),
            station_id: record.station.0,
            class:      class.to_owned(),
        }
    }
}

/// Label used in the `class` column of aggregate metrics rows.
pub const ALL_CLASSES: &str = "all";

/// One line of the metrics table, tagged with the network it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub network:    String,
    pub station_id: u32,
    /// A class name, or [`ALL_CLASSES`] for the station aggregate.
    pub class:      String,
    pub servers:    usize,
    pub metrics:    Metrics,
}

impl MetricsRow {
    /// Flatten `metrics` into rows: one aggregate row per station, followed
    /// by one row per class when the network has more than one class.
    ///
    /// `class_names` is indexed by `ClassId`; missing names fall back to the
    /// numeric id.
    pub fn from_metrics(network: &str, metrics: &NetworkMetrics, class_names: &[String]) -> Vec<Self> {
        let mut rows = Vec::new();
        for st in &metrics.stations {
            let row = |class: String, m: &Metrics| MetricsRow {
                network: network.to_owned(),
                station_id: st.station.0,
                class,
                servers: st.servers,
                metrics: *m,
            };
            rows.push(row(ALL_CLASSES.to_owned(), &st.aggregate));
            if st.classes.len() > 1 {
                for (k, m) in st.classes.iter().enumerate() {
                    let name = class_names.get(k).cloned().unwrap_or_else(|| k.to_string());
                    rows.push(row(name, m));
                }
            }
        }
        rows
    }
}
