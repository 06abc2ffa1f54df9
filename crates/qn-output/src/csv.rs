//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `completed_agents.csv`
//! - `rejections.csv`
//! - `station_metrics.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CompletedRow, MetricsRow, OutputResult, RejectionRow};

pub const COMPLETED_HEADER: [&str; 11] = [
    "agent_id",
    "station_id",
    "server_id",
    "class",
    "arrival_time",
    "service_start",
    "departure_time",
    "waiting_time",
    "service_time",
    "system_time",
    "queue_len_on_arrival",
];

pub const REJECTION_HEADER: [&str; 4] = ["agent_id", "time", "station_id", "class"];

pub const METRICS_HEADER: [&str; 22] = [
    "network",
    "station_id",
    "class",
    "servers",
    "served",
    "avg_waiting_time",
    "avg_service_time",
    "avg_system_time",
    "avg_queue_on_arrival",
    "max_queue_on_arrival",
    "lq",
    "l",
    "ls",
    "utilization",
    "arrivals",
    "accepted",
    "rejected",
    "lambda_eff",
    "loss_probability",
    "little_l_ratio",
    "little_lq_ratio",
    "horizon",
];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    completed:  Writer<File>,
    rejections: Writer<File>,
    metrics:    Writer<File>,
    /// Horizon written into every metrics row.
    horizon:    f64,
    finished:   bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files in it, and write the
    /// header rows.
    pub fn new(dir: &Path, horizon: f64) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut completed = Writer::from_path(dir.join("completed_agents.csv"))?;
        completed.write_record(COMPLETED_HEADER)?;

        let mut rejections = Writer::from_path(dir.join("rejections.csv"))?;
        rejections.write_record(REJECTION_HEADER)?;

        let mut metrics = Writer::from_path(dir.join("station_metrics.csv"))?;
        metrics.write_record(METRICS_HEADER)?;

        Ok(Self {
            completed,
            rejections,
            metrics,
            horizon,
            finished: false,
        })
    }
}

fn ratio(r: Option<f64>) -> String {
    r.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_completed(&mut self, row: &CompletedRow) -> OutputResult<()> {
        self.completed.write_record(&[
            row.agent_id.to_string(),
            row.station_id.to_string(),
            row.server_id.to_string(),
            row.class.clone(),
            row.arrival_time.to_string(),
            row.service_start.to_string(),
            row.departure_time.to_string(),
            (row.service_start - row.arrival_time).to_string(),
            (row.departure_time - row.service_start).to_string(),
            (row.departure_time - row.arrival_time).to_string(),
            row.queue_len_on_arrival.to_string(),
        ])?;
        Ok(())
    }

    fn write_rejection(&mut self, row: &RejectionRow) -> OutputResult<()> {
        self.rejections.write_record(&[
            row.agent_id.to_string(),
            row.time.to_string(),
            row.station_id.to_string(),
            row.class.clone(),
        ])?;
        Ok(())
    }

    fn write_metrics(&mut self, rows: &[MetricsRow]) -> OutputResult<()> {
        for row in rows {
            let m = &row.metrics;
            self.metrics.write_record(&[
                row.network.clone(),
                row.station_id.to_string(),
                row.class.clone(),
                row.servers.to_string(),
                m.served.to_string(),
                m.mean_waiting_time.to_string(),
                m.mean_service_time.to_string(),
                m.mean_system_time.to_string(),
                m.mean_queue_on_arrival.to_string(),
                m.max_queue_on_arrival.to_string(),
                m.mean_waiting.to_string(),
                m.mean_in_system.to_string(),
                m.mean_in_service.to_string(),
                m.utilization.to_string(),
                m.arrivals.to_string(),
                m.accepted.to_string(),
                m.rejected.to_string(),
                m.throughput.to_string(),
                m.loss_probability.to_string(),
                ratio(m.little.l_ratio),
                ratio(m.little.lq_ratio),
                self.horizon.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.completed.flush()?;
        self.rejections.flush()?;
        self.metrics.flush()?;
        Ok(())
    }
}
