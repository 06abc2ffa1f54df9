//! `OutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use log::debug;

use qn_config::NetworkConfig;
use qn_core::ClassId;
use qn_sim::{CompletedRecord, RejectionRecord, RunLog, SimObserver};
use qn_stats::NetworkMetrics;

use crate::row::{CompletedRow, MetricsRow, RejectionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams completed visits and rejections to any
/// [`OutputWriter`] as they happen, then writes the metrics table and
/// finishes the writer when the run ends.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct OutputObserver<W: OutputWriter> {
    writer:      W,
    network:     String,
    class_names: Vec<String>,
    metrics:     Option<NetworkMetrics>,
    last_error:  Option<OutputError>,
}

impl<W: OutputWriter> OutputObserver<W> {
    /// Create an observer backed by `writer`.  `network` labels every
    /// metrics row; class names are taken from `config`.
    pub fn new(writer: W, config: &NetworkConfig, network: impl Into<String>) -> Self {
        Self {
            writer,
            network:     network.into(),
            class_names: config.classes.iter().map(|c| c.name.clone()).collect(),
            metrics:     None,
            last_error:  None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// The metrics computed at the end of the run.
    pub fn metrics(&self) -> Option<&NetworkMetrics> {
        self.metrics.as_ref()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn class_name(&self, class: ClassId) -> &str {
        self.class_names.get(class.index()).map_or("", String::as_str)
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for OutputObserver<W> {
    fn on_departure(&mut self, record: &CompletedRecord) {
        let row = CompletedRow::from_record(record, self.class_name(record.class));
        let result = self.writer.write_completed(&row);
        self.store_err(result);
    }

    fn on_rejection(&mut self, record: &RejectionRecord) {
        let row = RejectionRow::from_record(record, self.class_name(record.class));
        let result = self.writer.write_rejection(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, log: &RunLog) {
        let metrics = NetworkMetrics::compute(log);
        let rows = MetricsRow::from_metrics(&self.network, &metrics, &self.class_names);
        debug!("writing {} metrics row(s) for {}", rows.len(), self.network);
        let result = self.writer.write_metrics(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
        self.metrics = Some(metrics);
    }
}

/// Write an already finished run through `writer`: every completed visit,
/// every rejection, and the metrics table, then finish.
pub fn write_run<W: OutputWriter>(
    writer: &mut W,
    log: &RunLog,
    config: &NetworkConfig,
    network: &str,
) -> OutputResult<NetworkMetrics> {
    let name = |class: ClassId| config.classes.get(class.index()).map_or("", |c| c.name.as_str());
    for record in &log.completed {
        writer.write_completed(&CompletedRow::from_record(record, name(record.class)))?;
    }
    for record in &log.rejected {
        writer.write_rejection(&RejectionRow::from_record(record, name(record.class)))?;
    }
    let metrics = NetworkMetrics::compute(log);
    let class_names: Vec<String> = config.classes.iter().map(|c| c.name.clone()).collect();
    writer.write_metrics(&MetricsRow::from_metrics(network, &metrics, &class_names))?;
    writer.finish()?;
    Ok(metrics)
}
