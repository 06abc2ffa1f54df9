//! Fluent builder for constructing a validated [`NetworkConfig`].

use qn_core::Capacity;

use crate::{ArrivalSpec, ClassSpec, ConfigResult, NetworkConfig, StationSpec};

/// Fluent builder for [`NetworkConfig`].
///
/// # Example
///
/// ```rust
/// use qn_config::NetworkConfigBuilder;
/// use qn_core::Capacity;
///
/// // Two stations in series, one class.
/// let config = NetworkConfigBuilder::new(100.0)
///     .seed(7)
///     .station(1, Capacity::Unbounded)
///     .station(2, Capacity::Finite(10))
///     .class("standard", 1.0, vec![vec![0.0, 1.0], vec![0.0, 0.0]], vec![1.5, 2.0])
///     .arrivals(1.0, 0)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.num_stations(), 2);
/// ```
pub struct NetworkConfigBuilder {
    horizon:  f64,
    seed:     u64,
    stations: Vec<StationSpec>,
    classes:  Vec<ClassSpec>,
    arrivals: ArrivalSpec,
}

impl NetworkConfigBuilder {
    /// Start a configuration that simulates up to `horizon`.
    ///
    /// Defaults: seed 42, external arrival rate 1.0 into station 0.
    pub fn new(horizon: f64) -> Self {
        Self {
            horizon,
            seed:     42,
            stations: Vec::new(),
            classes:  Vec::new(),
            arrivals: ArrivalSpec { external_rate: 1.0, entry_station: 0 },
        }
    }

    /// Single-class network: the common case of one agent population with
    /// one routing matrix and one service rate per station.
    ///
    /// `capacities` defaults to all-unbounded when `None`.  The class is named
    /// `"default"` and receives every arrival.
    pub fn single_class(
        arrival_rate:  f64,
        service_rates: Vec<f64>,
        servers:       Vec<u32>,
        routing:       Vec<Vec<f64>>,
        horizon:       f64,
        capacities:    Option<Vec<Capacity>>,
    ) -> Self {
        let capacities = capacities.unwrap_or_else(|| vec![Capacity::Unbounded; servers.len()]);
        let mut builder = Self::new(horizon).arrivals(arrival_rate, 0);
        for (i, &c) in servers.iter().enumerate() {
            let cap = capacities.get(i).copied().unwrap_or_default();
            builder = builder.station(c, cap);
        }
        builder.class("default", 1.0, routing, service_rates)
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Append a station; stations are numbered in insertion order.
    pub fn station(mut self, servers: u32, capacity: Capacity) -> Self {
        self.stations.push(StationSpec { servers, capacity });
        self
    }

    /// Append a class; classes are numbered in insertion order.
    pub fn class(
        mut self,
        name:                impl Into<String>,
        arrival_probability: f64,
        routing:             Vec<Vec<f64>>,
        service_rates:       Vec<f64>,
    ) -> Self {
        self.classes.push(ClassSpec {
            name: name.into(),
            arrival_probability,
            routing,
            service_rates,
        });
        self
    }

    /// Set the external arrival rate and the station it feeds.
    pub fn arrivals(mut self, external_rate: f64, entry_station: u32) -> Self {
        self.arrivals = ArrivalSpec { external_rate, entry_station };
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> ConfigResult<NetworkConfig> {
        let config = NetworkConfig {
            stations: self.stations,
            classes:  self.classes,
            arrivals: self.arrivals,
            horizon:  self.horizon,
            seed:     self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
