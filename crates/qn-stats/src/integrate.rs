//! Step-function integration of snapshot streams.
//!
//! A snapshot's counts hold from its timestamp until the next snapshot in
//! the same stream; the last one holds until the horizon.  Several
//! snapshots at the same instant are fine: the zero-width intervals between
//! them contribute nothing, so the last one at that instant wins.
//!
//! ```text
//! count
//!   2 |        ┌──────┐
//!   1 |   ┌────┘      └────────┐
//!   0 |───┘                    └──────  ... horizon
//!     t0  t1   t2     t3       t4
//! area = 1·(t2-t1) + 2·(t3-t2) + 1·(t4-t3)
//! ```

use qn_sim::StateSnapshot;

/// Integrated occupancy of one snapshot stream: count × time for each of the
/// three counters.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Occupancy {
    pub waiting_area:   f64,
    pub in_system_area: f64,
    pub busy_area:      f64,
}

impl Occupancy {
    /// Integrate `stream` over `[first snapshot, horizon]`.
    ///
    /// Intervals are clipped at `horizon`; an empty stream integrates to zero.
    pub fn integrate(stream: &[StateSnapshot], horizon: f64) -> Self {
        let mut occ = Occupancy::default();
        for (i, snap) in stream.iter().enumerate() {
            let start = snap.time.as_f64().min(horizon);
            let end = stream
                .get(i + 1)
                .map_or(horizon, |next| next.time.as_f64().min(horizon));
            let dt = end - start;
            if dt <= 0.0 {
                continue;
            }
            occ.waiting_area += snap.waiting as f64 * dt;
            occ.in_system_area += snap.in_system as f64 * dt;
            occ.busy_area += snap.busy as f64 * dt;
        }
        occ
    }

    /// `Lq`: time-averaged waiting-line length.
    pub fn mean_waiting(&self, horizon: f64) -> f64 {
        per_unit(self.waiting_area, horizon)
    }

    /// `L`: time-averaged number in the station.
    pub fn mean_in_system(&self, horizon: f64) -> f64 {
        per_unit(self.in_system_area, horizon)
    }

    /// `Ls`: time-averaged number in service.
    pub fn mean_busy(&self, horizon: f64) -> f64 {
        per_unit(self.busy_area, horizon)
    }
}

#[inline]
pub(crate) fn per_unit(total: f64, horizon: f64) -> f64 {
    if horizon > 0.0 { total / horizon } else { 0.0 }
}
