//! Structural and numeric validation of a [`NetworkConfig`].

use std::collections::HashSet;

use crate::{ClassSpec, ConfigError, ConfigResult, NetworkConfig};

/// Allowed deviation of the class arrival probabilities from a sum of 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Allowed excess of a routing row sum over 1.0.
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

impl NetworkConfig {
    /// Check every rate, matrix, probability, and capacity.
    ///
    /// Returns the first failure found, in section order: network, stations,
    /// classes, arrivals.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.horizon > 0.0) || !self.horizon.is_finite() {
            return Err(ConfigError::Horizon(self.horizon));
        }
        self.validate_stations()?;
        self.validate_classes()?;
        self.validate_arrivals()
    }

    fn validate_stations(&self) -> ConfigResult<()> {
        if self.stations.is_empty() {
            return Err(ConfigError::NoStations);
        }
        for (i, s) in self.stations.iter().enumerate() {
            if s.servers == 0 {
                return Err(ConfigError::NoServers { station: i });
            }
            if s.capacity == qn_core::Capacity::Finite(0) {
                return Err(ConfigError::ZeroCapacity { station: i });
            }
        }
        Ok(())
    }

    fn validate_classes(&self) -> ConfigResult<()> {
        if self.classes.is_empty() {
            return Err(ConfigError::NoClasses);
        }

        let n = self.stations.len();
        let mut seen = HashSet::with_capacity(self.classes.len());
        let mut total = 0.0;

        for class in &self.classes {
            if !seen.insert(class.name.as_str()) {
                return Err(ConfigError::DuplicateClass(class.name.clone()));
            }
            let p = class.arrival_probability;
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::ArrivalProbability { class: class.name.clone(), value: p });
            }
            total += p;

            validate_routing(class, n)?;
            validate_service_rates(class, n)?;
        }

        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ConfigError::ProbabilitySum(total));
        }
        Ok(())
    }

    fn validate_arrivals(&self) -> ConfigResult<()> {
        let rate = self.arrivals.external_rate;
        if !(rate > 0.0) || !rate.is_finite() {
            return Err(ConfigError::ArrivalRate(rate));
        }
        let entry = self.arrivals.entry_station;
        if entry as usize >= self.stations.len() {
            return Err(ConfigError::EntryStation { entry, max: self.stations.len() - 1 });
        }
        Ok(())
    }
}

fn validate_routing(class: &ClassSpec, n: usize) -> ConfigResult<()> {
    if class.routing.len() != n {
        return Err(ConfigError::RoutingRows {
            class:    class.name.clone(),
            expected: n,
            got:      class.routing.len(),
        });
    }
    for (row, entries) in class.routing.iter().enumerate() {
        if entries.len() != n {
            return Err(ConfigError::RoutingColumns {
                class:    class.name.clone(),
                row,
                expected: n,
                got:      entries.len(),
            });
        }
        for (col, &value) in entries.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RoutingEntry { class: class.name.clone(), row, col, value });
            }
        }
        let sum: f64 = entries.iter().sum();
        if sum > 1.0 + ROW_SUM_TOLERANCE {
            return Err(ConfigError::RoutingRowSum { class: class.name.clone(), row, sum });
        }
    }
    Ok(())
}

fn validate_service_rates(class: &ClassSpec, n: usize) -> ConfigResult<()> {
    if class.service_rates.len() != n {
        return Err(ConfigError::ServiceRateCount {
            class:    class.name.clone(),
            expected: n,
            got:      class.service_rates.len(),
        });
    }
    for (station, &value) in class.service_rates.iter().enumerate() {
        if !(value > 0.0) || !value.is_finite() {
            return Err(ConfigError::ServiceRate { class: class.name.clone(), station, value });
        }
    }
    Ok(())
}
