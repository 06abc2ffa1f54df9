//! Customer-averaged accumulation over completed visits.

use qn_sim::CompletedRecord;

/// Running sums over a set of completed visits.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VisitSummary {
    pub served:         u64,
    waiting_sum:        f64,
    service_sum:        f64,
    system_sum:         f64,
    queue_on_arrival:   u64,
    pub max_queue_on_arrival: u64,
}

impl VisitSummary {
    pub fn add(&mut self, record: &CompletedRecord) {
        self.served += 1;
        self.waiting_sum += record.waiting_time();
        self.service_sum += record.service_time();
        self.system_sum += record.system_time();
        self.queue_on_arrival += record.queue_len_on_arrival;
        self.max_queue_on_arrival = self.max_queue_on_arrival.max(record.queue_len_on_arrival);
    }

    /// `Wq`; zero when nothing was served.
    pub fn mean_waiting(&self) -> f64 {
        self.mean(self.waiting_sum)
    }

    /// `Ws`; zero when nothing was served.
    pub fn mean_service(&self) -> f64 {
        self.mean(self.service_sum)
    }

    /// `W`; zero when nothing was served.
    pub fn mean_system(&self) -> f64 {
        self.mean(self.system_sum)
    }

    pub fn mean_queue_on_arrival(&self) -> f64 {
        self.mean(self.queue_on_arrival as f64)
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.served == 0 { 0.0 } else { sum / self.served as f64 }
    }
}

impl<'a> FromIterator<&'a CompletedRecord> for VisitSummary {
    fn from_iter<I: IntoIterator<Item = &'a CompletedRecord>>(iter: I) -> Self {
        let mut summary = VisitSummary::default();
        for record in iter {
            summary.add(record);
        }
        summary
    }
}
